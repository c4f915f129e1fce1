//! Failure paths: the local list must stay consistent whatever the service
//! or the network does.

use pdfqueue::Error;
use pdfqueue::selection::Selection;

use crate::common::{local_names, seeded_session, session_for, spawn_stub, write_pdf};

#[tokio::test]
async fn test_clear_all_failure_leaves_local_list_untouched() {
    let (url, state) = spawn_stub().await;
    let dir = tempfile::tempdir().unwrap();
    let mut session = seeded_session(&url, &dir, &["a.pdf", "b.pdf"]).await;
    state.lock().unwrap().fail_clear = true;

    let before = session.files().to_vec();
    let err = session.clear_all().await.unwrap_err();

    assert!(err.is_remote());
    assert!(format!("{err}").contains("disk on fire"));
    assert_eq!(session.files(), &before[..]);
    assert_eq!(state.lock().unwrap().clear_hits, 1);
}

#[tokio::test]
async fn test_clear_all_success_empties_local_list() {
    let (url, state) = spawn_stub().await;
    let dir = tempfile::tempdir().unwrap();
    let mut session = seeded_session(&url, &dir, &["a.pdf", "b.pdf"]).await;

    session.clear_all().await.unwrap();

    assert!(session.is_empty());
    assert!(state.lock().unwrap().files.is_empty());
}

#[tokio::test]
async fn test_failed_remote_delete_still_removes_locally_and_is_reported() {
    let (url, state) = spawn_stub().await;
    let dir = tempfile::tempdir().unwrap();
    let mut session = seeded_session(&url, &dir, &["a.pdf", "b.pdf"]).await;
    state.lock().unwrap().fail_deletes = true;

    let report = session
        .remove_selected(&Selection::new([0]))
        .await
        .unwrap();

    // Best-effort: the local entry is gone, the failure is not silent.
    assert_eq!(report.removed.len(), 1);
    assert_eq!(report.failed_deletes.len(), 1);
    assert_eq!(report.failed_deletes[0].0, "uploads/a.pdf");
    assert_eq!(local_names(&session), ["b.pdf"]);
}

#[tokio::test]
async fn test_reorder_timeout_rolls_back_the_optimistic_move() {
    let (url, state) = spawn_stub().await;
    let dir = tempfile::tempdir().unwrap();
    let mut session = seeded_session(&url, &dir, &["a.pdf", "b.pdf", "c.pdf"]).await;
    state.lock().unwrap().slow_reorder = true;

    let before = local_names(&session);
    let err = session.move_up(&Selection::new([1])).await.unwrap_err();

    assert!(matches!(err, Error::Timeout { .. }));
    // The push never took effect, so the local order must not have either.
    assert_eq!(local_names(&session), before);
}

#[tokio::test]
async fn test_merge_error_from_service_is_surfaced_verbatim() {
    let (url, state) = spawn_stub().await;
    let dir = tempfile::tempdir().unwrap();
    let session = seeded_session(&url, &dir, &["a.pdf"]).await;
    state.lock().unwrap().fail_merge = true;

    let err = session.merge().await.unwrap_err();

    assert!(err.is_remote());
    assert!(format!("{err}").contains("broken.pdf"));
}

#[tokio::test]
async fn test_unreachable_service_is_a_transport_error() {
    // Nothing listens on this port.
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_for("http://127.0.0.1:9");

    let err = session.upload(&write_pdf(&dir, "a.pdf")).await.unwrap_err();

    assert!(err.is_transport());
    assert!(session.is_empty());
}
