use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::models::{Bookmark, ReadLaterItem};
use crate::pages::{HomeFocus, NavItem, TextInput};
use crate::router::Route;

use super::{App, Overlay, Page};

/// Feed a keystroke into a text buffer. Returns false for keys it ignores.
fn edit(input: &mut TextInput, key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => input.push(c),
        KeyCode::Backspace => input.pop(),
        _ => return false,
    }
    true
}

impl App {
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return;
        }

        if !matches!(self.overlay, Overlay::None) {
            self.handle_overlay_key(key);
            return;
        }
        if self.modal_is_open() {
            self.handle_modal_key(key);
            return;
        }
        if self.handle_text_entry(&key) {
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Char('f') => self.open_feedback(),
            KeyCode::Char(':') => self.open_goto(),
            KeyCode::Char('?') => self.overlay = Overlay::Help,
            KeyCode::Char(c @ '1'..='9') => {
                if let Some(item) = NavItem::for_key(c) {
                    self.navigate(item.route());
                }
            }
            KeyCode::Esc if self.notifications.current().is_some() => self.notifications.dismiss(),
            _ => self.handle_page_key(key),
        }
    }

    fn handle_overlay_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc || matches!(self.overlay, Overlay::Help) {
            self.overlay = Overlay::None;
            return;
        }
        if key.code == KeyCode::Enter {
            match self.overlay {
                Overlay::Feedback(_) => self.submit_feedback(),
                Overlay::Goto(_) => self.submit_goto(),
                Overlay::Help | Overlay::None => {}
            }
            return;
        }
        if let Overlay::Feedback(input) | Overlay::Goto(input) = &mut self.overlay {
            edit(input, &key);
        }
    }

    fn handle_modal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char('l') | KeyCode::Char('s') => self.modal_go_to_login(),
            KeyCode::Esc | KeyCode::Char('c') => self.modal_continue_without(),
            KeyCode::Char('q') => self.quit(),
            _ => {}
        }
    }

    /// Forms and the comment box swallow printable keys.
    fn handle_text_entry(&mut self, key: &KeyEvent) -> bool {
        match &mut self.page {
            Page::Login(login) => match key.code {
                KeyCode::Tab | KeyCode::BackTab => {
                    login.next_field();
                    true
                }
                KeyCode::Enter => {
                    self.submit_login();
                    true
                }
                KeyCode::Esc => {
                    self.navigate(Route::Home);
                    true
                }
                _ => edit(login.active_input(), key),
            },
            Page::Home(home) if home.focus() == HomeFocus::CommentInput => match key.code {
                KeyCode::Enter => {
                    self.post_comment();
                    true
                }
                KeyCode::Esc => {
                    home.set_focus(HomeFocus::Articles);
                    true
                }
                KeyCode::Tab => {
                    home.cycle_focus();
                    true
                }
                _ => edit(&mut home.comments.input, key),
            },
            _ => false,
        }
    }

    fn handle_page_key(&mut self, key: KeyEvent) {
        match &mut self.page {
            Page::Home(home) => match (home.focus(), key.code) {
                (_, KeyCode::Tab) => home.cycle_focus(),
                (HomeFocus::Comments, KeyCode::Char('j') | KeyCode::Down) => {
                    home.comments.select_next()
                }
                (HomeFocus::Comments, KeyCode::Char('k') | KeyCode::Up) => {
                    home.comments.select_prev()
                }
                (HomeFocus::Comments, KeyCode::Char('d')) => self.delete_selected_comment(),
                (HomeFocus::Comments, KeyCode::Esc) => home.set_focus(HomeFocus::Articles),
                (_, KeyCode::Char('j') | KeyCode::Down) => home.select_next(),
                (_, KeyCode::Char('k') | KeyCode::Up) => home.select_prev(),
                (_, KeyCode::Char(']') | KeyCode::Right) => self.shift_topic(true),
                (_, KeyCode::Char('[') | KeyCode::Left) => self.shift_topic(false),
                (_, KeyCode::Enter) => self.open_selected_article(),
                (_, KeyCode::Esc) => self.close_article(),
                (_, KeyCode::Char('b')) => self.save_highlighted::<Bookmark>(),
                (_, KeyCode::Char('l')) => self.save_highlighted::<ReadLaterItem>(),
                (_, KeyCode::Char('o')) => self.open_in_browser(),
                (_, KeyCode::Char('c')) => home.set_focus(HomeFocus::CommentInput),
                _ => {}
            },
            Page::Bookmarks(list) => match key.code {
                KeyCode::Char('j') | KeyCode::Down => list.select_next(),
                KeyCode::Char('k') | KeyCode::Up => list.select_prev(),
                KeyCode::Char('d') | KeyCode::Delete => self.remove_selected_saved(),
                KeyCode::Char('u') => self.undo_remove(),
                KeyCode::Char('o') | KeyCode::Enter => self.open_in_browser(),
                _ => {}
            },
            Page::ReadLater(list) => match key.code {
                KeyCode::Char('j') | KeyCode::Down => list.select_next(),
                KeyCode::Char('k') | KeyCode::Up => list.select_prev(),
                KeyCode::Char('d') | KeyCode::Delete => self.remove_selected_saved(),
                KeyCode::Char('u') => self.undo_remove(),
                KeyCode::Char('o') | KeyCode::Enter => self.open_in_browser(),
                _ => {}
            },
            Page::Profile(_) => {
                if key.code == KeyCode::Char('x') {
                    self.sign_out();
                }
            }
            Page::NotFound => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char('h')) {
                    self.navigate(Route::Home);
                }
            }
            Page::Login(_) => {}
        }
    }
}
