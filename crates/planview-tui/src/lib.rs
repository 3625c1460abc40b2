pub mod app;
pub mod detail;
pub mod events;
pub mod live;
pub mod markdown_renderer;
pub mod navigator;
pub mod theme;
pub mod ui;

pub use app::{App, AppMessage, Focus};
pub use detail::{DetailContent, DetailState, LogRows, ObjectiveDetailView};
pub use live::{LivePoller, LiveUpdate};
pub use navigator::{LiveSnapshot, LoadState, NavigatorRow, ObjectiveNavigator};
