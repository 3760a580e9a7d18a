use ratatui::style::{Color, Modifier, Style};

// Matte palette: grays with one blue accent.
pub(crate) const HEADER_BG: Color = Color::Rgb(17, 24, 39);
pub(crate) const ACCENT: Color = Color::Rgb(37, 99, 235);
pub(crate) const GREEN: Color = Color::Rgb(74, 222, 128);
pub(crate) const RED: Color = Color::Rgb(248, 113, 113);
pub(crate) const YELLOW: Color = Color::Rgb(250, 204, 21);
pub(crate) const SURFACE: Color = Color::Rgb(31, 41, 55);
pub(crate) const TEXT: Color = Color::Rgb(243, 244, 246);
pub(crate) const TEXT_DIM: Color = Color::Rgb(156, 163, 175);
pub(crate) const OVERLAY: Color = Color::Rgb(55, 65, 81);
pub(crate) const COMMAND_BG: Color = Color::Rgb(3, 7, 18);

/// Category chart bars cycle through these.
pub(crate) const CHART_COLORS: &[Color] = &[
    Color::Rgb(107, 114, 128),
    Color::Rgb(37, 99, 235),
    Color::Rgb(55, 65, 81),
    Color::Rgb(156, 163, 175),
    Color::Rgb(243, 244, 246),
];

pub(crate) fn header_style() -> Style {
    Style::default()
        .fg(TEXT)
        .bg(HEADER_BG)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn selected_style() -> Style {
    Style::default().fg(HEADER_BG).bg(ACCENT)
}

pub(crate) fn normal_style() -> Style {
    Style::default().fg(TEXT)
}

pub(crate) fn dim_style() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub(crate) fn income_style() -> Style {
    Style::default().fg(GREEN)
}

pub(crate) fn expense_style() -> Style {
    Style::default().fg(RED)
}

pub(crate) fn alt_row_style() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub(crate) fn command_bar_style() -> Style {
    Style::default().fg(TEXT).bg(COMMAND_BG)
}

pub(crate) fn status_bar_style() -> Style {
    Style::default().fg(TEXT_DIM).bg(SURFACE)
}
