//! Ordering operations round-tripped through the stub service.
//!
//! These cover the ordering laws end to end: optimistic local moves, the
//! reorder push, and adoption of the server's acknowledged list.

use pdfqueue::selection::Selection;

use crate::common::{local_names, remote_names, seeded_session, spawn_stub};

#[tokio::test]
async fn test_move_up_single_item_syncs_with_server() {
    let (url, state) = spawn_stub().await;
    let dir = tempfile::tempdir().unwrap();
    let mut session = seeded_session(&url, &dir, &["a.pdf", "b.pdf", "c.pdf"]).await;

    let moved = session.move_up(&Selection::new([2])).await.unwrap();

    assert!(moved);
    assert_eq!(local_names(&session), ["a.pdf", "c.pdf", "b.pdf"]);
    assert_eq!(remote_names(&state), local_names(&session));
    assert_eq!(state.lock().unwrap().reorder_hits, 1);
}

#[tokio::test]
async fn test_move_up_contiguous_block_keeps_internal_order() {
    // [A,B,C,D,E], select C and D, move up -> [A,C,D,B,E]
    let (url, state) = spawn_stub().await;
    let dir = tempfile::tempdir().unwrap();
    let mut session =
        seeded_session(&url, &dir, &["a.pdf", "b.pdf", "c.pdf", "d.pdf", "e.pdf"]).await;

    session.move_up(&Selection::new([2, 3])).await.unwrap();

    assert_eq!(
        local_names(&session),
        ["a.pdf", "c.pdf", "d.pdf", "b.pdf", "e.pdf"]
    );
    assert_eq!(remote_names(&state), local_names(&session));
}

#[tokio::test]
async fn test_move_up_then_move_down_restores_order() {
    let (url, _state) = spawn_stub().await;
    let dir = tempfile::tempdir().unwrap();
    let mut session =
        seeded_session(&url, &dir, &["a.pdf", "b.pdf", "c.pdf", "d.pdf", "e.pdf"]).await;
    let original = local_names(&session);

    session.move_up(&Selection::new([2, 3])).await.unwrap();
    // The same items now sit one position higher.
    session.move_down(&Selection::new([1, 2])).await.unwrap();

    assert_eq!(local_names(&session), original);
}

#[tokio::test]
async fn test_move_up_of_top_item_issues_no_request() {
    let (url, state) = spawn_stub().await;
    let dir = tempfile::tempdir().unwrap();
    let mut session = seeded_session(&url, &dir, &["a.pdf", "b.pdf"]).await;

    let moved = session.move_up(&Selection::new([0])).await.unwrap();

    assert!(!moved);
    assert_eq!(local_names(&session), ["a.pdf", "b.pdf"]);
    assert_eq!(state.lock().unwrap().reorder_hits, 0);
}

#[tokio::test]
async fn test_move_down_of_bottom_item_issues_no_request() {
    let (url, state) = spawn_stub().await;
    let dir = tempfile::tempdir().unwrap();
    let mut session = seeded_session(&url, &dir, &["a.pdf", "b.pdf"]).await;

    let moved = session.move_down(&Selection::new([1])).await.unwrap();

    assert!(!moved);
    assert_eq!(state.lock().unwrap().reorder_hits, 0);
}

#[tokio::test]
async fn test_boundary_item_skipped_but_rest_of_selection_moves() {
    let (url, _state) = spawn_stub().await;
    let dir = tempfile::tempdir().unwrap();
    let mut session = seeded_session(&url, &dir, &["a.pdf", "b.pdf", "c.pdf"]).await;

    let moved = session.move_up(&Selection::new([0, 2])).await.unwrap();

    assert!(moved);
    assert_eq!(local_names(&session), ["a.pdf", "c.pdf", "b.pdf"]);
}

#[tokio::test]
async fn test_remove_selected_shrinks_list_and_notifies_server() {
    let (url, state) = spawn_stub().await;
    let dir = tempfile::tempdir().unwrap();
    let mut session = seeded_session(&url, &dir, &["a.pdf", "b.pdf", "c.pdf"]).await;

    let report = session
        .remove_selected(&Selection::new([0, 2]))
        .await
        .unwrap();

    assert!(report.is_clean());
    assert_eq!(report.removed.len(), 2);
    assert_eq!(local_names(&session), ["b.pdf"]);
    // No descriptor matching a removed path survives locally or remotely.
    assert!(!session.files().iter().any(|f| f.path == "uploads/a.pdf"));
    assert_eq!(remote_names(&state), ["b.pdf"]);
    assert_eq!(state.lock().unwrap().delete_hits, 2);
}

#[tokio::test]
async fn test_reorder_round_trip_preserves_length() {
    let (url, _state) = spawn_stub().await;
    let dir = tempfile::tempdir().unwrap();
    let mut session = seeded_session(&url, &dir, &["a.pdf", "b.pdf", "c.pdf", "d.pdf"]).await;

    session.move_down(&Selection::new([0, 1])).await.unwrap();

    assert_eq!(session.len(), 4);
}
