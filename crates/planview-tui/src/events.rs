use crossterm::event::{
    self, Event as TerminalEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind,
};
use std::time::Duration;
use tokio::sync::mpsc;

/// Timers in the navigator are polled at this rate.
pub const TICK_RATE: Duration = Duration::from_millis(16);

/// Rows moved per mouse wheel notch.
const WHEEL_ROWS: i64 = 3;

#[derive(Debug, Clone)]
pub enum Event {
    Key(KeyEvent),
    /// Mouse wheel over `(column, row)`; positive `delta` scrolls down.
    Scroll { column: u16, row: u16, delta: i64 },
    Resize(u16, u16),
    Tick,
}

/// Polls the terminal once per tick and forwards input to the app.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    shutdown_tx: mpsc::UnboundedSender<()>,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::with_tick_rate(TICK_RATE)
    }

    pub fn with_tick_rate(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (shutdown_tx, mut shutdown_rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(tick_rate);
            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => break,
                    _ = ticker.tick() => {
                        let event = poll_terminal().unwrap_or(Event::Tick);
                        if tx.send(event).is_err() {
                            break;
                        }
                    }
                }
            }
            tracing::debug!("event loop stopped");
        });

        Self { rx, shutdown_tx }
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    pub fn stop(&self) {
        let _ = self.shutdown_tx.send(());
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// One pending terminal event, if there is one we care about.
fn poll_terminal() -> Option<Event> {
    if !event::poll(Duration::ZERO).unwrap_or(false) {
        return None;
    }
    match event::read().ok()? {
        TerminalEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        TerminalEvent::Mouse(mouse) => {
            let delta = match mouse.kind {
                MouseEventKind::ScrollDown => WHEEL_ROWS,
                MouseEventKind::ScrollUp => -WHEEL_ROWS,
                _ => return None,
            };
            Some(Event::Scroll {
                column: mouse.column,
                row: mouse.row,
                delta,
            })
        }
        TerminalEvent::Resize(width, height) => Some(Event::Resize(width, height)),
        _ => None,
    }
}

pub fn should_quit(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
