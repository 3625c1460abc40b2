use planview_core::{NavigatorConfig, Page, PlanviewError};
use planview_domain::{LiveObjective, ObjectiveContent, Selection, SubObjective};
use planview_tui::{DetailContent, DetailState, LogRows, ObjectiveDetailView};
use ratatui::text::Line;

const OBJECTIVE: Selection = Selection::Objective(10_007);

fn text_of(line: &Line) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}

fn content() -> DetailContent {
    DetailContent {
        title: "Migrate the billing service".into(),
        counter: Some(7),
        content: ObjectiveContent {
            task: Some("## Goal\n\nMove billing to the new queue.".into()),
            result: Some("Done. Throughput doubled.".into()),
            contextual_data: None,
        },
    }
}

fn steps(offset: usize, count: usize) -> Vec<SubObjective> {
    (offset..offset + count)
        .map(|i| SubObjective {
            id: 10_007_000 + i as u64,
            input: format!("step {} input", i),
            output: format!("step {} output", i),
        })
        .collect()
}

fn page(offset: usize, total: usize) -> Page<SubObjective> {
    let count = 15.min(total.saturating_sub(offset));
    Page {
        offset,
        limit: 15,
        items: steps(offset, count),
        total,
    }
}

fn shown() -> ObjectiveDetailView {
    let mut detail = ObjectiveDetailView::new(&NavigatorConfig::default());
    detail.resize(10);
    let ticket = detail.show(OBJECTIVE).unwrap();
    detail.apply_detail(OBJECTIVE, Ok(content()));
    assert!(detail.complete_page(&ticket, Ok(page(0, 500))).is_none());
    detail
}

#[test]
fn test_show_requests_first_page() {
    let mut detail = ObjectiveDetailView::new(&NavigatorConfig::default());
    let ticket = detail.show(OBJECTIVE).unwrap();
    assert_eq!((ticket.offset, ticket.limit), (0, 15));
    assert_eq!(detail.state(), &DetailState::Loading);
    assert_eq!(detail.log_rows(), LogRows::Syncing);

    // showing the same selection again is a no-op
    assert!(detail.show(OBJECTIVE).is_none());
}

#[test]
fn test_page_label_and_jump_ahead() {
    let mut detail = shown();
    assert_eq!(detail.page_label().as_deref(), Some("Page 1 of 34"));
    assert!(matches!(detail.log_rows(), LogRows::Rows(items) if items.len() == 15));

    // jumping to page 3 fetches pages 2 and 3 in order
    let ticket = detail.request_page(2).unwrap();
    assert_eq!(ticket.offset, 15);
    assert_eq!(detail.log_rows(), LogRows::Syncing);
    let ticket = detail.complete_page(&ticket, Ok(page(15, 500))).unwrap();
    assert_eq!(ticket.offset, 30);
    assert!(detail.complete_page(&ticket, Ok(page(30, 500))).is_none());

    assert_eq!(detail.page_label().as_deref(), Some("Page 3 of 34"));
    match detail.log_rows() {
        LogRows::Rows(items) => assert_eq!(items[0].input, "step 30 input"),
        other => panic!("unexpected log rows: {:?}", other),
    }

    // going back needs no fetch
    assert!(detail.prev_page().is_none());
    assert_eq!(detail.page_label().as_deref(), Some("Page 2 of 34"));
}

#[test]
fn test_returning_to_first_page_stops_fetching() {
    let mut detail = shown();
    let ticket = detail.request_page(5).unwrap();
    assert_eq!(ticket.offset, 15);

    assert!(detail.request_page(0).is_none());
    assert_eq!(detail.page_label().as_deref(), Some("Page 1 of 34"));
    assert!(detail.complete_page(&ticket, Ok(page(15, 500))).is_none());
    assert!(matches!(detail.log_rows(), LogRows::Rows(items) if items[0].input == "step 0 input"));
}

#[test]
fn test_single_page_has_no_label() {
    let mut detail = ObjectiveDetailView::new(&NavigatorConfig::default());
    let ticket = detail.show(OBJECTIVE).unwrap();
    detail.complete_page(&ticket, Ok(page(0, 4)));
    assert_eq!(detail.page_label(), None);
    assert!(detail.next_page().is_none());
}

#[test]
fn test_empty_log_shows_no_steps() {
    let mut detail = ObjectiveDetailView::new(&NavigatorConfig::default());
    let ticket = detail.show(OBJECTIVE).unwrap();
    detail.complete_page(&ticket, Ok(page(0, 0)));
    assert_eq!(detail.log_rows(), LogRows::NoSteps);
    assert!(detail
        .document()
        .iter()
        .any(|line| text_of(line) == "No steps recorded."));
}

#[test]
fn test_stale_results_are_discarded() {
    let mut detail = ObjectiveDetailView::new(&NavigatorConfig::default());
    let old_ticket = detail.show(OBJECTIVE).unwrap();
    let other = Selection::Objective(10_008);
    detail.show(other);

    assert!(!detail.apply_detail(OBJECTIVE, Ok(content())));
    assert!(detail.complete_page(&old_ticket, Ok(page(0, 500))).is_none());
    assert_eq!(detail.state(), &DetailState::Loading);
    assert_eq!(detail.total_pages(), None);
}

#[test]
fn test_page_failure_is_reported_and_retryable() {
    let mut detail = ObjectiveDetailView::new(&NavigatorConfig::default());
    let ticket = detail.show(OBJECTIVE).unwrap();
    detail.complete_page(
        &ticket,
        Err(PlanviewError::FetchFailure("connection reset".into())),
    );
    assert!(matches!(detail.log_rows(), LogRows::Unavailable(message) if message.contains("connection reset")));

    let retry = detail.request_page(0).unwrap();
    detail.complete_page(&retry, Ok(page(0, 20)));
    assert!(matches!(detail.log_rows(), LogRows::Rows(_)));
}

#[test]
fn test_missing_sections_render_placeholder() {
    let mut detail = ObjectiveDetailView::new(&NavigatorConfig::default());
    detail.show(OBJECTIVE);
    detail.apply_detail(
        OBJECTIVE,
        Ok(DetailContent {
            content: ObjectiveContent::default(),
            ..content()
        }),
    );
    let placeholders = detail
        .document()
        .iter()
        .filter(|line| text_of(line) == "No data available yet.")
        .count();
    assert_eq!(placeholders, 2);
}

#[test]
fn test_failed_detail_is_unavailable() {
    let mut detail = ObjectiveDetailView::new(&NavigatorConfig::default());
    detail.show(OBJECTIVE);
    detail.apply_detail(
        OBJECTIVE,
        Err(PlanviewError::NotFound("Objective 10007 not found".into())),
    );
    assert!(matches!(detail.state(), DetailState::Unavailable(message) if message.contains("10007")));
}

#[test]
fn test_jump_to_section_activates_it() {
    let mut detail = shown();
    assert_eq!(detail.active_section(), "task");

    assert!(detail.scroll_to_section("log"));
    let log_top = detail
        .layout()
        .iter()
        .find(|rect| rect.id == "log")
        .map(|rect| rect.top)
        .unwrap();
    assert_eq!(detail.scroll_offset(), log_top - 1);
    assert_eq!(detail.active_section(), "log");

    assert!(detail.scroll_to_section("task"));
    assert_eq!(detail.scroll_offset(), 0);
    assert_eq!(detail.active_section(), "task");

    assert!(!detail.scroll_to_section("appendix"));
}

#[test]
fn test_sections_are_inert_until_content_arrives() {
    let mut detail = ObjectiveDetailView::new(&NavigatorConfig::default());
    detail.resize(10);
    detail.show(OBJECTIVE);
    detail.scroll_to_section("log");
    assert!(!detail.pump_sections());
    assert_eq!(detail.active_section(), "task");
}

#[test]
fn test_live_detail_has_no_steps() {
    let mut detail = ObjectiveDetailView::new(&NavigatorConfig::default());
    assert!(detail.show(Selection::Live).is_none());
    detail.apply_live(Some(LiveObjective {
        counter: 12,
        title: "Rolling out the cache".into(),
        content: ObjectiveContent {
            task: Some("Warm the cache".into()),
            ..ObjectiveContent::default()
        },
    }));
    match detail.state() {
        DetailState::Ready(content) => {
            assert_eq!(content.counter, None);
            assert_eq!(content.title, "Rolling out the cache");
        }
        other => panic!("unexpected state: {:?}", other),
    }
    assert_eq!(detail.log_rows(), LogRows::NoSteps);

    detail.apply_live(None);
    assert!(matches!(detail.state(), DetailState::Unavailable(_)));
}

#[test]
fn test_live_updates_ignored_for_objectives() {
    let mut detail = shown();
    detail.apply_live(None);
    assert!(matches!(detail.state(), DetailState::Ready(content) if content.counter == Some(7)));
}

#[test]
fn test_clear_drops_outstanding_results() {
    let mut detail = shown();
    let ticket = detail.request_page(1).unwrap();

    detail.clear();
    assert_eq!(detail.state(), &DetailState::Empty);
    assert_eq!(detail.selection(), None);
    assert_eq!(detail.page_label(), None);

    assert!(!detail.apply_detail(OBJECTIVE, Ok(content())));
    assert!(detail.complete_page(&ticket, Ok(page(15, 500))).is_none());
    assert_eq!(detail.state(), &DetailState::Empty);

    // showing the same objective again starts from the first page
    let ticket = detail.show(OBJECTIVE).unwrap();
    assert_eq!(ticket.offset, 0);
}
