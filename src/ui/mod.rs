//! Drawing. Reads `App` state and never mutates it.

mod home;
mod palette;
mod screens;
mod widgets;

pub use palette::Palette;

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{App, Page};
use crate::auth::GateView;
use crate::pages::NAV_ITEMS;

const SIDEBAR_WIDTH: u16 = 22;

pub fn draw(frame: &mut Frame, app: &App) {
    let palette = Palette::for_theme(app.theme.theme());
    let area = frame.area();
    frame.render_widget(Block::new().style(palette.base()), area);

    let [sidebar, main] =
        Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)]).areas(area);
    let [body, status] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(main);

    draw_sidebar(frame, sidebar, &palette, app);
    draw_body(frame, body, &palette, app);
    draw_status(frame, status, &palette, app);

    if let Some(gate) = app.gate.as_ref().filter(|g| g.modal().is_open()) {
        widgets::draw_login_modal(frame, area, &palette, gate.modal());
    }
    widgets::draw_overlay(frame, area, &palette, &app.overlay);
    if let Some(notification) = app.notifications.current() {
        widgets::draw_notification(frame, main, &palette, notification);
    }
}

fn draw_sidebar(frame: &mut Frame, area: Rect, palette: &Palette, app: &App) {
    let mut lines = vec![
        Line::styled(" NewsAura", palette.title()),
        Line::styled(" AI-powered headlines", palette.muted()),
        Line::from(""),
    ];
    for item in NAV_ITEMS {
        let active = item.is_active(app.route());
        let style = if active { palette.highlight() } else { palette.base() };
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", item.key), palette.muted()),
            Span::styled(format!(" {:<14}", item.label), style),
        ]));
    }

    lines.push(Line::from(""));
    let session = app.session();
    let account = match (&session.user, session.is_loaded) {
        (_, false) => Line::styled(" Checking session…", palette.muted()),
        (Some(user), true) if session.is_signed_in => Line::from(vec![
            Span::styled(format!(" [{}] ", user.initial()), palette.border(true)),
            Span::raw(user.display_name().to_string()),
        ]),
        _ => Line::styled(" Not signed in", palette.muted()),
    };
    lines.push(account);

    let block = Block::new()
        .borders(Borders::RIGHT)
        .border_style(palette.border(false));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_body(frame: &mut Frame, area: Rect, palette: &Palette, app: &App) {
    match app.gate_view() {
        GateView::Spinner => {
            widgets::draw_spinner(frame, area, palette, app.ticks, "Checking your session…");
            return;
        }
        GateView::LoginRequired => {
            let category = app.route().protection().unwrap_or("this content");
            screens::draw_locked(frame, area, palette, category);
            return;
        }
        GateView::Content => {}
    }

    match app.page() {
        Page::Home(page) => home::draw(frame, area, palette, page, app.ticks),
        Page::Login(page) => screens::draw_login(frame, area, palette, page),
        Page::Profile(page) => screens::draw_profile(frame, area, palette, page, app.session()),
        Page::Bookmarks(list) => screens::draw_saved(frame, area, palette, list),
        Page::ReadLater(list) => screens::draw_saved(frame, area, palette, list),
        Page::NotFound => screens::draw_not_found(frame, area, palette, app.route().path()),
    }
}

fn draw_status(frame: &mut Frame, area: Rect, palette: &Palette, app: &App) {
    let line = Line::from(vec![
        Span::styled(format!(" {} ", app.route().title()), palette.highlight()),
        Span::styled(format!(" {}", app.route().path()), palette.muted()),
        Span::styled(
            format!("  {} theme · t toggle · f feedback · ? keys · q quit", app.theme.theme().as_str()),
            palette.muted(),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
