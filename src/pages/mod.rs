//! Per-screen state. Each page owns only what it fetched; nothing is cached
//! across navigation.

mod comments;
mod home;
mod input;
mod login;
mod profile;
mod saved;
mod sidebar;

pub use comments::CommentSection;
pub use home::{HomeFocus, HomePage, InsightPanel};
pub use input::TextInput;
pub use login::{LoginField, LoginPage};
pub use profile::ProfilePage;
pub use saved::SavedList;
pub use sidebar::{NavItem, NAV_ITEMS};

/// Move a list cursor by `delta`, clamped to `len`.
pub(crate) fn step(selected: usize, len: usize, delta: isize) -> usize {
    if len == 0 {
        return 0;
    }
    let next = selected as isize + delta;
    next.clamp(0, len as isize - 1) as usize
}

#[cfg(test)]
mod tests {
    use super::step;

    #[test]
    fn test_step_clamps() {
        assert_eq!(step(0, 0, 1), 0);
        assert_eq!(step(0, 3, -1), 0);
        assert_eq!(step(2, 3, 1), 2);
        assert_eq!(step(1, 3, 1), 2);
    }
}
