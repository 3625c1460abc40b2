use super::colors::*;
use ratatui::style::{Modifier, Style};

pub fn focused_border() -> Style {
    Style::default().fg(FOCUSED_BORDER)
}

pub fn unfocused_border() -> Style {
    Style::default().fg(UNFOCUSED_BORDER)
}

pub fn border(focused: bool) -> Style {
    if focused {
        focused_border()
    } else {
        unfocused_border()
    }
}

pub fn selected_item() -> Style {
    Style::default().bg(SELECTED_BG).add_modifier(Modifier::BOLD)
}

/// Keyboard cursor in the list when it differs from the selection.
pub fn highlighted_item(focused: bool) -> Style {
    if focused {
        Style::default().bg(HIGHLIGHT_BG)
    } else {
        Style::default()
    }
}

pub fn normal_text() -> Style {
    Style::default().fg(NORMAL_TEXT)
}

pub fn label_text() -> Style {
    Style::default().fg(LABEL_TEXT)
}

pub fn muted_italic() -> Style {
    Style::default().fg(LABEL_TEXT).add_modifier(Modifier::ITALIC)
}

pub fn bold_highlight() -> Style {
    Style::default()
        .fg(HIGHLIGHT_TEXT)
        .add_modifier(Modifier::BOLD)
}

pub fn active_section() -> Style {
    Style::default()
        .fg(ACTIVE_SECTION)
        .add_modifier(Modifier::BOLD)
}

pub fn live_badge() -> Style {
    Style::default().fg(LIVE_COLOR).add_modifier(Modifier::BOLD)
}

pub fn section_title() -> Style {
    Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn error_text() -> Style {
    Style::default().fg(ERROR_COLOR)
}
