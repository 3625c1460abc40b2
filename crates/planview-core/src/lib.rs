pub mod active_section;
pub mod config;
pub mod debounce;
pub mod error;
pub mod input;
pub mod page_cursor;
pub mod result;
pub mod schedule;
pub mod scroll_sync;
pub mod window;

pub use active_section::{
    ActiveSectionTracker, GeometryObserver, SectionRect, VisibilityBand, VisibilityEntry,
    VisibilityObserver,
};
pub use config::NavigatorConfig;
pub use debounce::Debouncer;
pub use error::PlanviewError;
pub use input::InputBuffer;
pub use page_cursor::{FetchTicket, Page, PageCursor, PageSource};
pub use result::PlanviewResult;
pub use schedule::ScheduledTask;
pub use scroll_sync::{ScrollAnchor, ScrollSync, SyncPhase};
pub use window::{Align, WindowEngine, WindowState};
