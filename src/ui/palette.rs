use ratatui::style::{Color, Modifier, Style};

use crate::app::{NotificationKind, Theme};
use crate::models::SentimentLabel;

/// Colours for one theme. Every widget styles itself through this.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub selection: Color,
    pub error: Color,
    pub success: Color,
    pub warning: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                bg: Color::Rgb(17, 24, 39),
                fg: Color::Rgb(229, 231, 235),
                muted: Color::Rgb(156, 163, 175),
                accent: Color::Rgb(96, 165, 250),
                border: Color::Rgb(55, 65, 81),
                selection: Color::Rgb(31, 41, 55),
                error: Color::Rgb(248, 113, 113),
                success: Color::Rgb(74, 222, 128),
                warning: Color::Rgb(250, 204, 21),
            },
            Theme::Light => Self {
                bg: Color::Rgb(249, 250, 251),
                fg: Color::Rgb(17, 24, 39),
                muted: Color::Rgb(107, 114, 128),
                accent: Color::Rgb(37, 99, 235),
                border: Color::Rgb(209, 213, 219),
                selection: Color::Rgb(229, 231, 235),
                error: Color::Rgb(220, 38, 38),
                success: Color::Rgb(22, 163, 74),
                warning: Color::Rgb(202, 138, 4),
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::new().fg(self.fg).bg(self.bg)
    }

    pub fn muted(&self) -> Style {
        Style::new().fg(self.muted)
    }

    pub fn border(&self, focused: bool) -> Style {
        Style::new().fg(if focused { self.accent } else { self.border })
    }

    pub fn title(&self) -> Style {
        Style::new().fg(self.fg).add_modifier(Modifier::BOLD)
    }

    pub fn highlight(&self) -> Style {
        Style::new()
            .bg(self.selection)
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error(&self) -> Style {
        Style::new().fg(self.error)
    }

    pub fn notification(&self, kind: NotificationKind) -> Style {
        let colour = match kind {
            NotificationKind::Error => self.error,
            NotificationKind::Success => self.success,
        };
        Style::new().fg(colour).bg(self.bg).add_modifier(Modifier::BOLD)
    }

    pub fn sentiment(&self, label: SentimentLabel) -> Style {
        let colour = match label {
            SentimentLabel::Positive => self.success,
            SentimentLabel::Neutral => self.warning,
            SentimentLabel::Negative => self.error,
        };
        Style::new().fg(colour).add_modifier(Modifier::BOLD)
    }
}
