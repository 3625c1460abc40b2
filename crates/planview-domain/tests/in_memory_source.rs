use planview_core::PageCursor;
use planview_domain::{DataSource, InMemorySource, Selection, SubObjective, SubObjectivePages};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_plans_and_lookup() {
    let source = InMemorySource::new();
    let plans = source.list_plans().await.unwrap();
    assert_eq!(plans.len(), 3);
    assert_eq!(source.get_plan(2).await.unwrap().title, "Product Roadmap");

    let err = source.get_plan(9).await.unwrap_err();
    assert!(err.is_unavailable());
}

#[tokio::test]
async fn test_objective_ids_follow_plan() {
    let source = InMemorySource::new();
    let objectives = source.list_objectives(2).await.unwrap();
    assert_eq!(objectives.first().unwrap().id, 21500);
    assert_eq!(objectives.last().unwrap().id, 20001);
    assert_eq!(objectives.last().unwrap().title, "Develop platform stability");

    let detail = source.get_objective(2, 20042).await.unwrap();
    assert_eq!(detail.objective.counter, 42);
    assert!(detail.content.task.as_deref().unwrap().contains("Objective Overview"));
    assert!(detail.content.result.as_deref().unwrap().contains("| Metric |"));
}

#[tokio::test]
async fn test_objective_from_other_plan_is_not_found() {
    let source = InMemorySource::new();
    assert!(source.get_objective(1, 20042).await.is_err());
    assert!(source.get_objective(1, 11501).await.is_err());
    assert!(source.list_objectives(4).await.is_err());
}

#[tokio::test]
async fn test_sub_objective_pages_truncate_at_total() {
    let source = InMemorySource::new();
    let page = source.fetch_sub_objectives(10001, 15, 495).await.unwrap();
    assert_eq!(page.meta.total, 500);
    assert_eq!(page.data.len(), 5);
    assert_eq!(page.data[0].id, 10001 * 1000 + 496);
    assert!(page.data[0].input.starts_with("Input 496"));
}

#[tokio::test]
async fn test_live_objective_toggles() {
    let source = InMemorySource::new();
    let live = source.poll_live(1).await.unwrap().unwrap();
    assert_eq!(live.counter, 0);

    source.set_live(false);
    assert_eq!(source.poll_live(1).await.unwrap(), None);
    assert_eq!("live".parse::<Selection>().unwrap(), Selection::Live);
}

#[tokio::test]
async fn test_page_cursor_over_source() {
    let source = Arc::new(InMemorySource::new().with_latency(Duration::from_millis(1)));
    let pages = SubObjectivePages::new(source);
    let mut cursor: PageCursor<u64, SubObjective> = PageCursor::new(10007, 15);

    cursor.request_page(33);
    cursor.ensure_page(33, &pages).await.unwrap();
    assert_eq!(cursor.total_pages(), Some(34));
    let last = cursor.current_page().unwrap();
    assert_eq!(last.items.len(), 5);
    assert_eq!(last.items[4].id, 10007 * 1000 + 500);
}

#[tokio::test]
async fn test_unknown_objective_has_no_steps() {
    let source = Arc::new(InMemorySource::new().with_steps_per_objective(3));
    let pages = SubObjectivePages::new(source);
    let mut cursor: PageCursor<u64, SubObjective> = PageCursor::new(99, 15);
    let err = cursor.ensure_page(0, &pages).await.unwrap_err();
    assert!(err.is_unavailable());
    assert!(cursor.loaded_pages().is_empty());
}
