use async_trait::async_trait;
use mockall::mock;
use mockall::predicate::eq;
use planview_core::{Page, PageCursor, PageSource, PlanviewError, PlanviewResult};

mock! {
    Source {}

    #[async_trait]
    impl PageSource<u64, u32> for Source {
        async fn fetch_page(&self, key: &u64, limit: usize, offset: usize) -> PlanviewResult<Page<u32>>;
    }
}

const TOTAL: usize = 500;

fn slice(offset: usize, limit: usize) -> Page<u32> {
    let end = (offset + limit).min(TOTAL);
    Page {
        offset,
        limit,
        items: (offset..end).map(|i| i as u32).collect(),
        total: TOTAL,
    }
}

fn expect_offset(source: &mut MockSource, key: u64, offset: usize) {
    source
        .expect_fetch_page()
        .with(eq(key), eq(15), eq(offset))
        .times(1)
        .returning(|_, limit, offset| Ok(slice(offset, limit)));
}

#[tokio::test]
async fn test_jump_to_page_fetches_every_intermediate_page_once() {
    let mut source = MockSource::new();
    for page in 0..=5 {
        expect_offset(&mut source, 9, page * 15);
    }

    let mut cursor: PageCursor<u64, u32> = PageCursor::new(9, 15);
    cursor.request_page(5);
    cursor.ensure_page(5, &source).await.unwrap();

    assert_eq!(cursor.loaded_pages().len(), 6);
    assert_eq!(cursor.total_pages(), Some(34));
    let offsets: Vec<usize> = cursor.loaded_pages().iter().map(|p| p.offset).collect();
    assert_eq!(offsets, vec![0, 15, 30, 45, 60, 75]);
    assert_eq!(cursor.current_page().unwrap().items[0], 75);
}

#[tokio::test]
async fn test_loaded_pages_are_not_refetched() {
    let mut source = MockSource::new();
    for page in 0..=2 {
        expect_offset(&mut source, 9, page * 15);
    }

    let mut cursor: PageCursor<u64, u32> = PageCursor::new(9, 15);
    cursor.ensure_page(1, &source).await.unwrap();
    cursor.ensure_page(0, &source).await.unwrap();
    cursor.ensure_page(2, &source).await.unwrap();
    cursor.ensure_page(1, &source).await.unwrap();

    assert_eq!(cursor.loaded_pages().len(), 3);
}

#[tokio::test]
async fn test_failure_mid_chain_keeps_prefix() {
    let mut source = MockSource::new();
    expect_offset(&mut source, 9, 0);
    source
        .expect_fetch_page()
        .with(eq(9), eq(15), eq(15))
        .times(1)
        .returning(|_, _, _| Err(PlanviewError::FetchFailure("connection reset".into())));

    let mut cursor: PageCursor<u64, u32> = PageCursor::new(9, 15);
    let err = cursor.ensure_page(3, &source).await.unwrap_err();
    assert!(err.is_unavailable());
    assert_eq!(cursor.loaded_pages().len(), 1);
    assert!(!cursor.is_fetching());

    source.checkpoint();
    for page in 1..=3 {
        expect_offset(&mut source, 9, page * 15);
    }
    cursor.ensure_page(3, &source).await.unwrap();
    assert_eq!(cursor.loaded_pages().len(), 4);
}

#[tokio::test]
async fn test_page_past_total_is_invalid_range() {
    let mut source = MockSource::new();
    source
        .expect_fetch_page()
        .times(1)
        .returning(|_, limit, offset| {
            Ok(Page {
                offset,
                limit,
                items: vec![1, 2, 3],
                total: 3,
            })
        });

    let mut cursor: PageCursor<u64, u32> = PageCursor::new(9, 15);
    let err = cursor.ensure_page(4, &source).await.unwrap_err();
    assert!(matches!(err, PlanviewError::InvalidRange { index: 4, len: 1 }));
    assert_eq!(cursor.total_pages(), Some(1));
}

#[tokio::test]
async fn test_out_of_range_page_stops_once_total_is_known() {
    let mut source = MockSource::new();
    expect_offset(&mut source, 9, 0);

    let mut cursor: PageCursor<u64, u32> = PageCursor::new(9, 15);
    cursor.ensure_page(0, &source).await.unwrap();
    assert_eq!(cursor.total_pages(), Some(34));

    // no expectations left: any further fetch fails the test
    source.checkpoint();
    let err = cursor.ensure_page(999, &source).await.unwrap_err();
    assert!(matches!(err, PlanviewError::InvalidRange { index: 999, len: 34 }));
    assert_eq!(cursor.loaded_pages().len(), 1);
    assert!(!cursor.is_fetching());
}

#[tokio::test]
async fn test_out_of_range_page_on_cold_cursor_fetches_first_page_only() {
    let mut source = MockSource::new();
    expect_offset(&mut source, 9, 0);

    let mut cursor: PageCursor<u64, u32> = PageCursor::new(9, 15);
    let err = cursor.ensure_page(40, &source).await.unwrap_err();
    assert!(matches!(err, PlanviewError::InvalidRange { index: 40, len: 34 }));
    assert_eq!(cursor.loaded_pages().len(), 1);
}

#[tokio::test]
async fn test_switching_key_starts_over() {
    let mut source = MockSource::new();
    expect_offset(&mut source, 1, 0);
    expect_offset(&mut source, 1, 15);
    expect_offset(&mut source, 2, 0);

    let mut cursor: PageCursor<u64, u32> = PageCursor::new(1, 15);
    cursor.request_page(1);
    cursor.ensure_page(1, &source).await.unwrap();
    assert_eq!(cursor.requested_page(), 1);

    cursor.switch_key(2);
    assert_eq!(cursor.requested_page(), 0);
    cursor.ensure_page(0, &source).await.unwrap();
    assert_eq!(cursor.loaded_pages().len(), 1);
    assert_eq!(*cursor.key(), 2);
}

#[tokio::test]
async fn test_ticket_flow_discards_results_from_previous_key() {
    let mut cursor: PageCursor<u64, u32> = PageCursor::new(1, 15);
    let ticket = cursor.request_page(0).unwrap();
    assert_eq!(cursor.request_page(0), None);

    cursor.switch_key(2);
    let fresh = cursor.request_page(0).unwrap();
    assert_ne!(ticket.generation, fresh.generation);

    assert!(!cursor.complete(&ticket, Ok(slice(0, 15))).unwrap());
    assert!(cursor.loaded_pages().is_empty());
    assert!(cursor.complete(&fresh, Ok(slice(0, 15))).unwrap());
    assert_eq!(cursor.loaded_pages().len(), 1);
}
