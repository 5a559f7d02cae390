use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::{Notification, Overlay};
use crate::auth::LoginRequiredModal;

use super::Palette;

const SPINNER: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

pub fn spinner_frame(ticks: u64) -> &'static str {
    SPINNER[(ticks % SPINNER.len() as u64) as usize]
}

/// Rect of `width` x `height` centred in `area`, clipped to it.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

pub fn draw_spinner(frame: &mut Frame, area: Rect, palette: &Palette, ticks: u64, label: &str) {
    let line = Line::from(vec![
        Span::styled(spinner_frame(ticks), palette.border(true)),
        Span::raw(" "),
        Span::styled(label.to_string(), palette.muted()),
    ]);
    frame.render_widget(
        Paragraph::new(line).alignment(Alignment::Center),
        centered(area, area.width, 1),
    );
}

/// Grey placeholder rows shown while a list is loading.
pub fn skeleton(rows: usize, width: u16, palette: &Palette) -> Text<'static> {
    let width = width.saturating_sub(4) as usize;
    let lines: Vec<Line> = (0..rows)
        .map(|i| {
            let len = match i % 3 {
                0 => width,
                1 => width * 3 / 4,
                _ => width / 2,
            };
            Line::styled("░".repeat(len.max(4)), palette.muted())
        })
        .collect();
    Text::from(lines)
}

pub fn draw_login_modal(frame: &mut Frame, area: Rect, palette: &Palette, modal: &LoginRequiredModal) {
    let mut lines = vec![
        Line::from(""),
        Line::styled(
            format!("Sign in to access {}.", modal.category_name()),
            palette.title(),
        ),
        Line::from(""),
    ];
    for perk in LoginRequiredModal::PERKS {
        lines.push(Line::from(vec![
            Span::styled("  ✓ ", palette.border(true)),
            Span::raw(perk),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" Enter ", palette.highlight()),
        Span::raw(format!(" {}", LoginRequiredModal::LOGIN_LABEL)),
    ]));
    lines.push(Line::from(vec![
        Span::styled("   c   ", palette.highlight()),
        Span::raw(format!(" {}", LoginRequiredModal::CONTINUE_LABEL)),
    ]));

    let rect = centered(area, 52, lines.len() as u16 + 2);
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(palette.border(true))
        .title(format!(" {} ", LoginRequiredModal::TITLE))
        .style(palette.base());
    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(lines).block(block), rect);
}

/// Message plus border and padding, kept inside `available` columns.
fn toast_width(message_len: usize, available: u16) -> u16 {
    let width = message_len
        .saturating_add(4)
        .min(usize::from(available.saturating_sub(2)))
        .max(12);
    u16::try_from(width).unwrap_or(u16::MAX)
}

pub fn draw_notification(frame: &mut Frame, area: Rect, palette: &Palette, notification: &Notification) {
    let width = toast_width(notification.message.chars().count(), area.width);
    let [top, _] = Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);
    let [_, rect] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(width)]).areas(top);

    let style = palette.notification(notification.kind);
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(style);
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(notification.message.as_str())
            .style(style)
            .block(block),
        rect,
    );
}

pub fn draw_overlay(frame: &mut Frame, area: Rect, palette: &Palette, overlay: &Overlay) {
    let (title, input, hint) = match overlay {
        Overlay::None => return,
        Overlay::Help => {
            draw_help(frame, area, palette);
            return;
        }
        Overlay::Feedback(input) => (
            " Send Feedback ",
            input,
            "Tell us what you think. Enter to send, Esc to cancel.",
        ),
        Overlay::Goto(input) => (" Go to ", input, "Path such as /bookmarks. Enter to go."),
    };

    let rect = centered(area, 64, 7);
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(palette.border(true))
        .title(title)
        .style(palette.base());
    let text = vec![
        Line::styled(hint, palette.muted()),
        Line::from(""),
        Line::from(vec![
            Span::styled("> ", palette.border(true)),
            Span::raw(input.value().to_string()),
            Span::styled("▏", palette.border(true)),
        ]),
    ];
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(text).wrap(Wrap { trim: false }).block(block),
        rect,
    );
}

const HELP: [(&str, &str); 14] = [
    ("1-4", "Home / Bookmarks / Read Later / Profile"),
    (":", "Go to a path"),
    ("j / k", "Move selection"),
    ("[ / ]", "Previous / next topic"),
    ("Enter", "Open article"),
    ("Tab", "Cycle article / comments / comment box"),
    ("c", "Write a comment"),
    ("b / l", "Bookmark / read later"),
    ("o", "Open in browser"),
    ("d / u", "Delete / undo"),
    ("x", "Sign out (profile)"),
    ("t", "Toggle theme"),
    ("f", "Send feedback"),
    ("q", "Quit"),
];

fn draw_help(frame: &mut Frame, area: Rect, palette: &Palette) {
    let lines: Vec<Line> = HELP
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("{:>8}  ", key), palette.border(true)),
                Span::raw(*action),
            ])
        })
        .collect();
    let rect = centered(area, 56, lines.len() as u16 + 2);
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(palette.border(true))
        .title(" Keys ")
        .style(palette.base());
    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(lines).block(block), rect);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_is_clipped() {
        let area = Rect::new(0, 0, 40, 10);
        let rect = centered(area, 60, 20);
        assert_eq!(rect, area);

        let small = centered(area, 10, 2);
        assert_eq!((small.width, small.height), (10, 2));
        assert_eq!((small.x, small.y), (15, 4));
    }

    #[test]
    fn test_toast_width_is_bounded() {
        assert_eq!(toast_width(10, 80), 14);
        assert_eq!(toast_width(200, 80), 78);
        assert_eq!(toast_width(70_000, 80), 78);
        assert_eq!(toast_width(70_000, u16::MAX), u16::MAX - 2);
        assert_eq!(toast_width(0, 80), 12);
    }

    #[test]
    fn test_spinner_cycles() {
        assert_eq!(spinner_frame(0), spinner_frame(SPINNER.len() as u64));
        assert_ne!(spinner_frame(0), spinner_frame(1));
    }
}
