//! Color scheme and styles.

use ratatui::style::{Color, Modifier, Style};

use crate::view::CellStyle;

/// Dashboard color palette.
pub struct Theme;

impl Theme {
    pub const BG: Color = Color::Reset;
    pub const FG: Color = Color::Reset;
    pub const FG_DIM: Color = Color::DarkGray;
    pub const HEADER_FG: Color = Color::White;
    pub const HEADER_BG: Color = Color::Blue;
    pub const HIGHLIGHT_WARNING: Color = Color::Yellow;
}

/// Pre-defined styles.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Theme::FG).bg(Theme::BG)
    }

    /// Server header line.
    pub fn header() -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    /// Column labels.
    pub fn table_header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Young eviction age.
    pub fn warning() -> Style {
        Style::default()
            .fg(Theme::HIGHLIGHT_WARNING)
            .add_modifier(Modifier::BOLD)
    }

    pub fn dim() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    pub fn from_class(class: CellStyle) -> Style {
        match class {
            CellStyle::Normal => Self::default(),
            CellStyle::Header => Self::header(),
            CellStyle::ColumnHeader => Self::table_header(),
            CellStyle::Warning => Self::warning(),
            CellStyle::Dimmed => Self::dim(),
        }
    }
}
