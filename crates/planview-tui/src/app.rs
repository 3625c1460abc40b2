use crate::detail::{DetailContent, ObjectiveDetailView, SECTION_IDS};
use crate::events::{self, Event, EventHandler};
use crate::live::{LivePoller, LiveUpdate};
use crate::navigator::{LoadState, ObjectiveNavigator};
use crate::ui;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use planview_core::{FetchTicket, NavigatorConfig, Page, PlanviewResult};
use planview_domain::{DataSource, Objective, ObjectiveDetail, Plan, PlanId, Selection, SubObjective};
use ratatui::layout::{Position, Rect};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

/// Results of background work, delivered to the event loop.
#[derive(Debug)]
pub enum AppMessage {
    Plans(PlanviewResult<Vec<Plan>>),
    Plan {
        plan_id: PlanId,
        result: PlanviewResult<Plan>,
    },
    Objectives {
        plan_id: PlanId,
        result: PlanviewResult<Vec<Objective>>,
    },
    Detail {
        selection: Selection,
        result: PlanviewResult<ObjectiveDetail>,
    },
    Page {
        ticket: FetchTicket<Selection>,
        result: PlanviewResult<Page<SubObjective>>,
    },
    Live(LiveUpdate),
}

impl From<LiveUpdate> for AppMessage {
    fn from(update: LiveUpdate) -> Self {
        Self::Live(update)
    }
}

enum Incoming {
    Event(Option<Event>),
    Message(AppMessage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Search,
    Detail,
    Plans,
}

pub struct App {
    source: Arc<dyn DataSource>,
    config: NavigatorConfig,
    pub plan: Option<Plan>,
    pub plan_error: Option<String>,
    /// Every plan, for the picker.
    pub plans: Vec<Plan>,
    pub plan_cursor: usize,
    pub navigator: ObjectiveNavigator,
    pub detail: ObjectiveDetailView,
    pub focus: Focus,
    /// Where the panes were last drawn, for routing mouse scrolls.
    pub list_area: Rect,
    pub detail_area: Rect,
    initial_selection: Option<Selection>,
    landed: bool,
    tx: mpsc::UnboundedSender<AppMessage>,
    rx: mpsc::UnboundedReceiver<AppMessage>,
    poller: Option<LivePoller>,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        source: Arc<dyn DataSource>,
        config: NavigatorConfig,
        plan_id: PlanId,
        initial_selection: Option<Selection>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            navigator: ObjectiveNavigator::new(plan_id, &config),
            detail: ObjectiveDetailView::new(&config),
            source,
            config,
            plan: None,
            plan_error: None,
            plans: Vec::new(),
            plan_cursor: 0,
            focus: Focus::List,
            list_area: Rect::default(),
            detail_area: Rect::default(),
            initial_selection,
            landed: false,
            tx,
            rx,
            poller: None,
            should_quit: false,
        }
    }

    pub fn plan_id(&self) -> PlanId {
        self.navigator.plan_id()
    }

    /// Kick off the initial fetches and live polling. Needs a tokio runtime.
    pub fn start(&mut self) {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(AppMessage::Plans(source.list_plans().await));
        });
        self.open_plan();
    }

    /// Show another plan.
    ///
    /// Everything tied to the current plan is cancelled: live polling, the
    /// pending query, a pending first-selection scroll and the detail pane.
    /// Results still in flight for the old plan are dropped when they arrive.
    pub fn switch_plan(&mut self, plan_id: PlanId) -> bool {
        if plan_id == self.plan_id() {
            return false;
        }
        if let Some(mut poller) = self.poller.take() {
            poller.stop();
        }
        self.navigator.reset(plan_id);
        self.detail.clear();
        self.plan = None;
        self.plan_error = None;
        self.initial_selection = None;
        self.landed = false;
        self.open_plan();
        true
    }

    fn open_plan(&mut self) {
        let plan_id = self.plan_id();

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = source.get_plan(plan_id).await;
            let _ = tx.send(AppMessage::Plan { plan_id, result });
        });

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = source.list_objectives(plan_id).await;
            let _ = tx.send(AppMessage::Objectives { plan_id, result });
        });

        self.poller = Some(LivePoller::start(
            Arc::clone(&self.source),
            plan_id,
            self.config.live_poll_interval(),
            self.tx.clone(),
        ));
    }

    /// Apply every message that has already arrived. Returns how many there were.
    pub fn drain_messages(&mut self, now: Instant) -> usize {
        let mut count = 0;
        while let Ok(message) = self.rx.try_recv() {
            self.handle_message(now, message);
            count += 1;
        }
        count
    }

    pub fn handle_message(&mut self, now: Instant, message: AppMessage) {
        match message {
            AppMessage::Plans(Ok(plans)) => {
                self.plans = plans;
            }
            AppMessage::Plans(Err(e)) => {
                tracing::warn!("plan list unavailable: {}", e);
            }
            AppMessage::Plan { plan_id, result } => {
                if plan_id != self.plan_id() {
                    return;
                }
                match result {
                    Ok(plan) => self.plan = Some(plan),
                    Err(e) => {
                        tracing::warn!(plan = plan_id, "plan unavailable: {}", e);
                        self.plan_error = Some(e.to_string());
                    }
                }
            }
            AppMessage::Objectives { plan_id, result } => {
                if plan_id != self.plan_id() {
                    return;
                }
                match result {
                    Ok(objectives) => self.navigator.set_objectives(now, objectives),
                    Err(e) => {
                        tracing::warn!(plan = plan_id, "objectives unavailable: {}", e);
                        self.navigator.set_unavailable(e.to_string());
                    }
                }
                self.try_land(now);
            }
            AppMessage::Detail { selection, result } => {
                self.detail
                    .apply_detail(selection, result.map(DetailContent::from));
            }
            AppMessage::Page { ticket, result } => {
                if let Some(next) = self.detail.complete_page(&ticket, result) {
                    self.spawn_page_fetch(next);
                }
            }
            AppMessage::Live(update) => {
                if update.plan_id != self.plan_id() {
                    return;
                }
                match update.result {
                    Ok(live) => {
                        self.detail.apply_live(live.clone());
                        self.navigator.set_live(live, update.polled_at);
                    }
                    Err(_) => self.navigator.mark_live_polled(),
                }
                self.try_land(now);
            }
        }
    }

    /// Select something once both the list and the first live poll are in.
    fn try_land(&mut self, now: Instant) {
        if self.landed || !self.navigator.live_known() {
            return;
        }
        if *self.navigator.load_state() == LoadState::Loading {
            return;
        }
        self.landed = true;
        let selection = self
            .initial_selection
            .or_else(|| self.navigator.landing_selection());
        if let Some(selection) = selection {
            tracing::info!(%selection, "landing selection");
            self.select(now, selection);
        }
    }

    /// Make `selection` current in both panes.
    pub fn select(&mut self, now: Instant, selection: Selection) {
        self.navigator.select_item(now, selection);
        let ticket = self.detail.show(selection);
        match selection {
            Selection::Live => {
                let live = self.navigator.live().map(|s| s.objective.clone());
                self.detail.apply_live(live);
            }
            Selection::Objective(objective_id) => {
                let source = Arc::clone(&self.source);
                let tx = self.tx.clone();
                let plan_id = self.plan_id();
                tokio::spawn(async move {
                    let result = source.get_objective(plan_id, objective_id).await;
                    let _ = tx.send(AppMessage::Detail { selection, result });
                });
            }
        }
        if let Some(ticket) = ticket {
            self.spawn_page_fetch(ticket);
        }
    }

    fn spawn_page_fetch(&self, ticket: FetchTicket<Selection>) {
        let Some(objective_id) = ticket.key.objective_id() else {
            return;
        };
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = source
                .fetch_sub_objectives(objective_id, ticket.limit, ticket.offset)
                .await
                .map(|response| response.into_page());
            let _ = tx.send(AppMessage::Page { ticket, result });
        });
    }

    /// Advance timers and section tracking. Returns true if a redraw is due.
    pub fn tick(&mut self, now: Instant) -> bool {
        let list_changed = self.navigator.tick(now);
        let section_changed = self.detail.pump_sections();
        list_changed || section_changed
    }

    pub fn handle_key(&mut self, now: Instant, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        match self.focus {
            Focus::Search => self.handle_search_key(now, key),
            Focus::List => self.handle_list_key(now, key),
            Focus::Detail => self.handle_detail_key(key),
            Focus::Plans => self.handle_plans_key(key),
        }
    }

    fn handle_plans_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('p') => self.focus = Focus::List,
            KeyCode::Down | KeyCode::Char('j') => {
                self.plan_cursor = (self.plan_cursor + 1).min(self.plans.len().saturating_sub(1));
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.plan_cursor = self.plan_cursor.saturating_sub(1);
            }
            KeyCode::Enter => {
                if let Some(plan_id) = self.plans.get(self.plan_cursor).map(|plan| plan.id) {
                    self.switch_plan(plan_id);
                }
                self.focus = Focus::List;
            }
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_search_key(&mut self, now: Instant, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Down | KeyCode::Tab => {
                self.focus = Focus::List;
            }
            KeyCode::Backspace => self.navigator.backspace(now),
            KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.navigator.delete_word(now);
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.navigator.clear_query(now);
            }
            KeyCode::Left => self.navigator.move_input_cursor_left(),
            KeyCode::Right => self.navigator.move_input_cursor_right(),
            KeyCode::Char(c) => self.navigator.type_char(now, c),
            _ => {}
        }
    }

    fn handle_list_key(&mut self, now: Instant, key: KeyEvent) {
        if events::should_quit(&key) {
            self.should_quit = true;
            return;
        }
        match key.code {
            KeyCode::Char('/') => self.focus = Focus::Search,
            KeyCode::Char('p') if !self.plans.is_empty() => {
                let current = self.plan_id();
                self.plan_cursor = self
                    .plans
                    .iter()
                    .position(|plan| plan.id == current)
                    .unwrap_or(0);
                self.focus = Focus::Plans;
            }
            KeyCode::Tab | KeyCode::Right => self.focus = Focus::Detail,
            KeyCode::Down | KeyCode::Char('j') => self.navigator.move_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => self.navigator.move_cursor(-1),
            KeyCode::PageDown => self.navigator.move_cursor(self.navigator.page_size()),
            KeyCode::PageUp => self.navigator.move_cursor(-self.navigator.page_size()),
            KeyCode::Home | KeyCode::Char('g') => self.navigator.cursor_home(),
            KeyCode::End | KeyCode::Char('G') => self.navigator.cursor_end(),
            KeyCode::Char('e') => self.navigator.scroll_by(1),
            KeyCode::Char('y') => self.navigator.scroll_by(-1),
            KeyCode::Enter => {
                if let Some(objective) = self.navigator.highlighted() {
                    let selection = Selection::Objective(objective.id);
                    self.select(now, selection);
                }
            }
            KeyCode::Char('l') if self.navigator.live().is_some() => {
                self.select(now, Selection::Live);
            }
            KeyCode::Esc => self.navigator.clear_query(now),
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) {
        if events::should_quit(&key) {
            self.should_quit = true;
            return;
        }
        let ticket = match key.code {
            KeyCode::Tab | KeyCode::Left | KeyCode::Esc => {
                self.focus = Focus::List;
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.detail.scroll_by(1);
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.detail.scroll_by(-1);
                None
            }
            KeyCode::PageDown | KeyCode::Char(' ') => {
                self.detail.scroll_by(10);
                None
            }
            KeyCode::PageUp => {
                self.detail.scroll_by(-10);
                None
            }
            KeyCode::Char(c @ '1'..='3') => {
                let index = c as usize - '1' as usize;
                self.detail.scroll_to_section(SECTION_IDS[index]);
                None
            }
            KeyCode::Char(']') | KeyCode::Char('n') => self.detail.next_page(),
            KeyCode::Char('[') | KeyCode::Char('p') => self.detail.prev_page(),
            _ => None,
        };
        if let Some(ticket) = ticket {
            self.spawn_page_fetch(ticket);
        }
    }

    /// Mouse wheel: scroll whichever pane is under the pointer.
    pub fn handle_scroll(&mut self, column: u16, row: u16, delta: i64) {
        let position = Position::new(column, row);
        if self.list_area.contains(position) {
            self.navigator.scroll_by(delta);
        } else if self.detail_area.contains(position) {
            self.detail.scroll_by(delta);
        }
    }

    /// Cancel timers, watches and polling.
    pub fn teardown(&mut self) {
        self.navigator.teardown();
        self.detail.teardown();
        if let Some(mut poller) = self.poller.take() {
            poller.stop();
        }
    }

    pub async fn run(&mut self) -> PlanviewResult<()> {
        let mut terminal = setup_terminal()?;
        let mut events = EventHandler::new();
        self.start();

        while !self.should_quit {
            terminal.draw(|frame| ui::render(self, frame))?;

            let incoming = tokio::select! {
                event = events.next() => Incoming::Event(event),
                Some(message) = self.rx.recv() => Incoming::Message(message),
            };

            let now = Instant::now();
            match incoming {
                Incoming::Event(Some(Event::Key(key))) => self.handle_key(now, key),
                Incoming::Event(Some(Event::Scroll { column, row, delta })) => {
                    self.handle_scroll(column, row, delta);
                }
                Incoming::Event(Some(Event::Resize(_, _))) => {}
                Incoming::Event(Some(Event::Tick)) => {
                    self.tick(now);
                }
                Incoming::Event(None) => break,
                Incoming::Message(message) => self.handle_message(now, message),
            }
        }

        events.stop();
        self.teardown();
        restore_terminal(&mut terminal)?;
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, io::Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<(), io::Error> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}
