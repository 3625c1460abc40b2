use crate::app::{App, Focus};
use crate::detail::DetailState;
use crate::navigator::LoadState;
use crate::theme::*;
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(app: &mut App, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(frame.area());

    render_header(app, frame, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[1]);

    app.list_area = body[0];
    app.detail_area = body[1];
    render_objective_list(app, frame, body[0]);
    render_detail(app, frame, body[1]);
    render_footer(app, frame, chunks[2]);

    if app.focus == Focus::Plans {
        render_plan_picker(app, frame, chunks[1]);
    }
}

fn render_plan_picker(app: &App, frame: &mut Frame, area: Rect) {
    let width = area.width.min(48);
    let height = (app.plans.len() as u16 + 2).min(area.height);
    let popup = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );
    let current = app.plan_id();
    let lines: Vec<Line> = app
        .plans
        .iter()
        .enumerate()
        .map(|(index, plan)| {
            let style = if index == app.plan_cursor {
                selected_item()
            } else {
                normal_text()
            };
            let marker = if plan.id == current { "● " } else { "  " };
            Line::from(Span::styled(format!("{}{}", marker, plan.title), style))
        })
        .collect();
    let block = Block::default()
        .title("Plans")
        .borders(Borders::ALL)
        .border_style(focused_border());
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let line = match (&app.plan, &app.plan_error) {
        (Some(plan), _) => {
            let mut spans = vec![Span::styled(plan.title.clone(), bold_highlight())];
            if let Some(description) = &plan.description {
                spans.push(Span::styled(format!("  {}", description), label_text()));
            }
            Line::from(spans)
        }
        (None, Some(error)) => Line::from(Span::styled(format!("Plan unavailable: {}", error), error_text())),
        (None, None) => Line::from(Span::styled("Loading plan...", muted_italic())),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(unfocused_border());
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_objective_list(app: &mut App, frame: &mut Frame, area: Rect) {
    let focused = matches!(app.focus, Focus::List | Focus::Search | Focus::Plans);
    let block = Block::default()
        .title("Objectives")
        .borders(Borders::ALL)
        .border_style(border(focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let has_live = app.navigator.live().is_some();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(if has_live { 2 } else { 0 }),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    if let Some(snapshot) = app.navigator.live() {
        let selected = app.navigator.selection().is_some_and(|s| s.is_live());
        let style = if selected { selected_item() } else { normal_text() };
        let lines = vec![
            Line::from(vec![
                Span::styled("● LIVE ", live_badge()),
                Span::styled(snapshot.objective.title.clone(), style),
            ]),
            Line::from(Span::styled(
                format!("  polled {}", snapshot.polled_at.format("%H:%M:%S")),
                label_text(),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), chunks[0]);
    }

    render_search_box(app, frame, chunks[1]);

    let rows_area = chunks[2];
    app.navigator.resize(u64::from(rows_area.height));

    match app.navigator.load_state() {
        LoadState::Loading => {
            frame.render_widget(
                Paragraph::new(Span::styled("Loading objectives...", muted_italic())),
                rows_area,
            );
        }
        LoadState::Unavailable(message) => {
            frame.render_widget(
                Paragraph::new(Span::styled(format!("Objectives unavailable: {}", message), error_text())),
                rows_area,
            );
        }
        LoadState::Ready if app.navigator.shows_no_results() => {
            frame.render_widget(
                Paragraph::new(Span::styled("No objectives found", muted_italic())),
                rows_area,
            );
        }
        LoadState::Ready => render_rows(app, frame, rows_area, focused),
    }

    frame.render_widget(
        Paragraph::new(Span::styled(app.navigator.footer_text(), label_text())),
        chunks[3],
    );
}

fn render_search_box(app: &App, frame: &mut Frame, area: Rect) {
    let query = app.navigator.query();
    let line = if query.is_empty() && app.focus != Focus::Search {
        Line::from(Span::styled("/ search by title or number", muted_italic()))
    } else {
        Line::from(vec![Span::styled("/", label_text()), Span::raw(query.to_string())])
    };
    frame.render_widget(Paragraph::new(line), area);

    if app.focus == Focus::Search {
        let column = area.x + 1 + app.navigator.input().cursor_column() as u16;
        frame.set_cursor_position(Position::new(column.min(area.right().saturating_sub(1)), area.y));
    }
}

/// Only realized rows are drawn, each at its offset relative to the scroll position.
fn render_rows(app: &App, frame: &mut Frame, area: Rect, focused: bool) {
    let window = app.navigator.window();
    let top = window.scroll_offset();
    let bottom = top + u64::from(area.height);

    for row in app.navigator.rows() {
        if row.offset < top || row.offset >= bottom {
            continue;
        }
        let y = area.y + (row.offset - top) as u16;
        let style = if row.selected {
            selected_item()
        } else if row.highlighted {
            highlighted_item(focused)
        } else {
            normal_text()
        };
        let line = Line::from(vec![
            Span::styled(format!("#{:<5} ", row.objective.counter), label_text()),
            Span::styled(row.objective.title.clone(), style),
        ])
        .style(style);
        frame.render_widget(Paragraph::new(line), Rect::new(area.x, y, area.width, 1));
    }
}

fn render_detail(app: &mut App, frame: &mut Frame, area: Rect) {
    let focused = app.focus == Focus::Detail;
    let block = Block::default()
        .title("Detail")
        .borders(Borders::ALL)
        .border_style(border(focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (title, badge) = match app.detail.state() {
        DetailState::Empty => {
            frame.render_widget(
                Paragraph::new(Span::styled("Select an objective", muted_italic())),
                inner,
            );
            return;
        }
        DetailState::Loading => ("Loading...".to_string(), None),
        DetailState::Unavailable(message) => (format!("Unavailable: {}", message), None),
        DetailState::Ready(content) => (
            content.title.clone(),
            Some(match content.counter {
                Some(counter) => Span::styled(format!("#{}", counter), label_text()),
                None => Span::styled("Live Objective", live_badge()),
            }),
        ),
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let mut header = Vec::new();
    if let Some(badge) = badge {
        header.push(badge);
        header.push(Span::raw("  "));
    }
    let title_style = if matches!(app.detail.state(), DetailState::Unavailable(_)) {
        error_text()
    } else {
        bold_highlight()
    };
    header.push(Span::styled(title, title_style));
    frame.render_widget(Paragraph::new(Line::from(header)), chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(14), Constraint::Min(0)])
        .split(chunks[1]);

    let mut nav = vec![Line::from(Span::styled("JUMP TO", label_text())), Line::default()];
    for (index, (_, label, active)) in app.detail.nav_entries().into_iter().enumerate() {
        let style = if active { active_section() } else { normal_text() };
        let marker = if active { "▸" } else { " " };
        nav.push(Line::from(Span::styled(format!("{}{} {}", marker, index + 1, label), style)));
    }
    frame.render_widget(Paragraph::new(nav), body[0]);

    app.detail.resize(u64::from(body[1].height));
    let scroll = app.detail.scroll_offset().min(u64::from(u16::MAX)) as u16;
    frame.render_widget(
        Paragraph::new(app.detail.document())
            .style(Style::default())
            .scroll((scroll, 0)),
        body[1],
    );
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let help = match app.focus {
        Focus::Search => "type to filter | ^W: delete word | ^U: clear | ESC/ENTER: done",
        Focus::List => "j/k: move | ENTER: open | l: live | /: search | p: plans | TAB: detail | q: quit",
        Focus::Plans => "j/k: move | ENTER: switch plan | ESC: close",
        Focus::Detail => "j/k: scroll | 1-3: jump to section | [/]: page | TAB: list | q: quit",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(unfocused_border());
    frame.render_widget(
        Paragraph::new(Span::styled(help, label_text())).block(block),
        area,
    );
}
