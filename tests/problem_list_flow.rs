use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use codedash::api::{ApiError, MockBackend};
use codedash::domain::problem::{Problem, ProblemPage};
use codedash::screens::{ProblemListScreen, RefreshOutcome};
use codedash::services::RecordingNotifier;

const DEBOUNCE: Duration = Duration::from_millis(40);

fn page_of(problems: Vec<Problem>, total_pages: u32) -> ProblemPage {
    ProblemPage {
        problems,
        total_pages,
        ..ProblemPage::default()
    }
}

fn screen_with(backend: MockBackend) -> (ProblemListScreen, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::new());
    let screen = ProblemListScreen::new(Arc::new(backend), notifier.clone(), 10, DEBOUNCE);
    (screen, notifier)
}

#[tokio::test]
async fn typing_a_word_issues_one_request_for_the_final_value() {
    let mut backend = MockBackend::new();
    // One request total, carrying the last typed value and a reset page.
    backend
        .expect_fetch_problems()
        .withf(|query| query.search == "two" && query.page == 1)
        .times(1)
        .returning(|_| Ok(page_of(vec![Problem::new("p1", "two-sum", "Two Sum")], 1)));

    let (mut screen, _notifier) = screen_with(backend);
    screen.set_page(3);

    for text in ["t", "tw", "two"] {
        screen.search_input(text);
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let settled = timeout(DEBOUNCE * 5, screen.settled_search())
        .await
        .expect("debounced value should arrive")
        .expect("gate is still alive");
    assert_eq!(settled, "two");
    assert!(screen.apply_search(settled));
    screen.refresh().await;

    assert_eq!(screen.rows().len(), 1);
    assert_eq!(screen.query().page(), 1);

    // No second settled value exists for the earlier keystrokes.
    assert!(timeout(DEBOUNCE * 2, screen.settled_search()).await.is_err());
}

#[tokio::test]
async fn identical_settled_search_does_not_change_the_query() {
    let (mut screen, _notifier) = screen_with(MockBackend::new());

    assert!(screen.apply_search("two".to_string()));
    screen.set_page(4);

    // The same value settling again must not reset the page or force a
    // refetch; descriptor equality makes the second request redundant.
    assert!(!screen.apply_search("two".to_string()));
    assert_eq!(screen.query().page(), 4);
}

#[tokio::test]
async fn blocked_records_never_render_regardless_of_server_inclusion() {
    let mut backend = MockBackend::new();
    backend.expect_fetch_problems().returning(|_| {
        let mut blocked = Problem::new("p2", "hidden", "Hidden");
        blocked.is_blocked = true;
        Ok(page_of(
            vec![Problem::new("p1", "two-sum", "Two Sum"), blocked],
            1,
        ))
    });

    let (mut screen, _notifier) = screen_with(backend);
    screen.refresh().await;

    let rows = screen.rows();
    assert_eq!(rows.len(), 1);
    assert!(rows.iter().all(|row| !row.problem.is_blocked));
}

#[tokio::test]
async fn transient_failure_preserves_rows_until_the_next_natural_retrigger() {
    let mut backend = MockBackend::new();
    backend
        .expect_fetch_problems()
        .withf(|query| query.page == 1)
        .returning(|_| Ok(page_of(vec![Problem::new("p1", "a", "A")], 3)));
    backend
        .expect_fetch_problems()
        .withf(|query| query.page == 2)
        .times(2)
        .returning({
            let mut first_call = true;
            move |_| {
                if first_call {
                    first_call = false;
                    Err(ApiError::rejected("server down"))
                } else {
                    Ok(page_of(vec![Problem::new("p2", "b", "B")], 3))
                }
            }
        });

    let (mut screen, notifier) = screen_with(backend);
    screen.refresh().await;
    assert_eq!(screen.rows()[0].problem.id, "p1");

    // Page 2 fails: the page-1 rows stay up next to the error notice.
    screen.set_page(2);
    screen.refresh().await;
    assert_eq!(screen.rows()[0].problem.id, "p1");
    assert_eq!(notifier.errors(), vec!["server down".to_string()]);

    // No automatic retry happened; the user re-triggering the same page is
    // the retry.
    screen.refresh().await;
    assert_eq!(screen.rows()[0].problem.id, "p2");
    assert!(screen.error().is_none());
}

#[tokio::test]
async fn late_result_for_a_superseded_search_is_discarded() {
    let (mut screen, _notifier) = screen_with(MockBackend::new());

    assert!(screen.apply_search("tree".to_string()));
    let (q1, t1) = screen.begin_refresh();
    assert!(screen.apply_search("graph".to_string()));
    let (q2, t2) = screen.begin_refresh();
    assert_ne!(q1, q2);

    // Q2 commits first; Q1 then settles late and must not overwrite it.
    let outcome = screen.finish_refresh(t2, Ok(page_of(vec![Problem::new("g", "g", "G")], 1)));
    assert_eq!(outcome, RefreshOutcome::Committed);
    let outcome = screen.finish_refresh(t1, Ok(page_of(vec![Problem::new("t", "t", "T")], 1)));
    assert_eq!(outcome, RefreshOutcome::Stale);

    assert_eq!(screen.rows()[0].problem.id, "g");
}
