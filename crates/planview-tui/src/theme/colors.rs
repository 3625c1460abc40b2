use ratatui::style::Color;

pub const FOCUSED_BORDER: Color = Color::Cyan;
pub const UNFOCUSED_BORDER: Color = Color::White;
pub const SELECTED_BG: Color = Color::Blue;
pub const HIGHLIGHT_BG: Color = Color::DarkGray;

pub const NORMAL_TEXT: Color = Color::White;
pub const LABEL_TEXT: Color = Color::DarkGray;
pub const HIGHLIGHT_TEXT: Color = Color::Yellow;
pub const ACTIVE_SECTION: Color = Color::Green;

pub const LIVE_COLOR: Color = Color::Red;
pub const HEADING_COLOR: Color = Color::Cyan;
pub const CODE_COLOR: Color = Color::LightYellow;
pub const QUOTE_COLOR: Color = Color::Gray;
pub const ERROR_COLOR: Color = Color::Red;
