use crate::router::Route;

#[derive(Debug, Clone, Copy)]
pub struct NavItem {
    pub path: &'static str,
    pub label: &'static str,
    pub key: char,
}

pub const NAV_ITEMS: [NavItem; 4] = [
    NavItem { path: "/", label: "Home", key: '1' },
    NavItem { path: "/bookmarks", label: "Bookmarks", key: '2' },
    NavItem { path: "/read-later", label: "Read Later", key: '3' },
    NavItem { path: "/profile", label: "Profile", key: '4' },
];

impl NavItem {
    pub fn route(&self) -> Route {
        Route::from_path(self.path)
    }

    pub fn is_active(&self, current: &Route) -> bool {
        current.path() == self.path
    }

    pub fn for_key(key: char) -> Option<NavItem> {
        NAV_ITEMS.iter().copied().find(|item| item.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_item_follows_route() {
        let active: Vec<&str> = NAV_ITEMS
            .iter()
            .filter(|item| item.is_active(&Route::Bookmarks))
            .map(|item| item.label)
            .collect();
        assert_eq!(active, vec!["Bookmarks"]);
    }

    #[test]
    fn test_not_found_highlights_nothing() {
        let route = Route::from_path("/nowhere");
        assert!(NAV_ITEMS.iter().all(|item| !item.is_active(&route)));
    }

    #[test]
    fn test_key_lookup() {
        assert_eq!(NavItem::for_key('3').map(|i| i.route()), Some(Route::ReadLater));
        assert!(NavItem::for_key('9').is_none());
    }
}
