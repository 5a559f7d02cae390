use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::app::SavedKind;
use crate::auth::Session;
use crate::pages::{LoginField, LoginPage, ProfilePage, SavedList, TextInput};

use super::widgets::{centered, skeleton};
use super::Palette;

pub fn draw_saved<T: SavedKind>(frame: &mut Frame, area: Rect, palette: &Palette, list: &SavedList<T>) {
    let mut block = Block::bordered()
        .border_style(palette.border(true))
        .title(format!(" {} ({}) ", T::LABEL, list.items().len()))
        .title_bottom(Line::styled(
            " d remove · u undo · o open ",
            palette.muted(),
        ));
    if let Some(err) = list.error() {
        block = block.title_bottom(Line::styled(format!(" {} ", err), palette.error()).right_aligned());
    }

    if list.is_loading() {
        frame.render_widget(
            Paragraph::new(skeleton(area.height as usize / 2, area.width, palette)).block(block),
            area,
        );
        return;
    }
    if list.items().is_empty() {
        let message = format!("Nothing in {} yet. Press 1 to browse the news.", T::LABEL);
        frame.render_widget(
            Paragraph::new(Line::styled(message, palette.muted())).block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = list
        .items()
        .iter()
        .map(|item| {
            let mut meta = vec![Span::styled(item.source(), palette.muted())];
            if let Some(created) = item.created_at() {
                meta.push(Span::styled(format!(" · saved {}", created), palette.muted()));
            }
            ListItem::new(vec![Line::styled(item.title(), palette.title()), Line::from(meta)])
        })
        .collect();
    let widget = List::new(items)
        .block(block)
        .highlight_style(palette.highlight())
        .highlight_symbol("▌ ");
    let mut state = ListState::default().with_selected(Some(list.selected()));
    frame.render_stateful_widget(widget, area, &mut state);
}

pub fn draw_profile(
    frame: &mut Frame,
    area: Rect,
    palette: &Palette,
    page: &ProfilePage,
    session: &Session,
) {
    let Some(user) = session.user.as_ref() else {
        return;
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!(" {} ", user.initial()), palette.highlight()),
            Span::raw("  "),
            Span::styled(user.display_name().to_string(), palette.title()),
        ]),
        Line::from(""),
    ];
    for (label, value) in ProfilePage::details(user) {
        lines.push(Line::from(vec![
            Span::styled(format!("{:>8}  ", label), palette.muted()),
            Span::raw(value),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::styled("2  Your bookmarks", palette.border(true)));
    lines.push(Line::styled("3  Your read-later queue", palette.border(true)));
    lines.push(Line::from(""));
    lines.push(Line::styled("x  Sign out", palette.error()));
    if let Some(err) = page.error() {
        lines.push(Line::from(""));
        lines.push(Line::styled(err.to_string(), palette.error()));
    }

    let rect = centered(area, 60, lines.len() as u16 + 2);
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(palette.border(false))
        .title(" Profile ");
    frame.render_widget(Paragraph::new(lines).block(block), rect);
}

fn field_line<'a>(label: &'a str, input: &'a TextInput, active: bool, palette: &Palette) -> Line<'a> {
    let marker = if active { "▏" } else { "" };
    Line::from(vec![
        Span::styled(format!("{:>6}  ", label), palette.muted()),
        Span::styled(
            input.value(),
            if active { palette.highlight() } else { palette.base() },
        ),
        Span::styled(marker, palette.border(true)),
    ])
}

pub fn draw_login(frame: &mut Frame, area: Rect, palette: &Palette, page: &LoginPage) {
    let mut lines = vec![
        Line::styled("Sign in to NewsAura", palette.title()),
        Line::styled(
            "Save bookmarks, queue articles and join the discussion.",
            palette.muted(),
        ),
        Line::from(""),
        field_line("Name", &page.name, page.field() == LoginField::Name, palette),
        field_line("Email", &page.email, page.field() == LoginField::Email, palette),
        Line::from(""),
        Line::styled("Tab switch field · Enter sign in · Esc back", palette.muted()),
    ];
    if let Some(err) = page.error() {
        lines.push(Line::from(""));
        lines.push(Line::styled(err, palette.error()));
    }

    let rect = centered(area, 64, lines.len() as u16 + 2);
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(palette.border(true))
        .title(" Sign In ");
    frame.render_widget(Paragraph::new(lines).block(block), rect);
}

pub fn draw_not_found(frame: &mut Frame, area: Rect, palette: &Palette, path: &str) {
    let [_, body, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(5),
        Constraint::Fill(1),
    ])
    .areas(area);
    let lines = vec![
        Line::styled("404", palette.title()),
        Line::styled("Page not found", palette.base()),
        Line::styled(path.to_string(), palette.muted()),
        Line::from(""),
        Line::styled("Press Enter to go home", palette.muted()),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), body);
}

/// What a protected route shows under the modal while signed out.
pub fn draw_locked(frame: &mut Frame, area: Rect, palette: &Palette, category: &str) {
    let lines = vec![
        Line::styled(format!("{} requires an account.", category), palette.title()),
        Line::styled("Type :/login to sign in, or press 1 for the news.", palette.muted()),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        centered(area, area.width, 2),
    );
}
