//! Shared harness for the integration tests.
//!
//! Spins up an in-process stub of the merge service on an ephemeral port
//! and drives a real [`Session`] against it over HTTP. The stub mirrors
//! the service's endpoints and records how often each was hit, so tests
//! can assert not just outcomes but which network calls were (not) made.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Multipart, Path as UrlPath, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use pdfqueue::client::ServiceClient;
use pdfqueue::config::Config;
use pdfqueue::session::Session;
use pdfqueue::store::FileDescriptor;

/// Mutable state of the stub service.
#[derive(Debug, Default)]
pub struct StubState {
    /// Files the stub believes are uploaded, in order.
    pub files: Vec<FileDescriptor>,
    pub upload_hits: usize,
    pub reorder_hits: usize,
    pub delete_hits: usize,
    pub clear_hits: usize,
    pub merge_hits: usize,
    pub dark_mode: bool,
    /// Make /clear_all answer `success: false`.
    pub fail_clear: bool,
    /// Make /delete_file answer with an error.
    pub fail_deletes: bool,
    /// Make /merge answer with an error.
    pub fail_merge: bool,
    /// Delay /reorder past the client timeout.
    pub slow_reorder: bool,
    /// Body of the most recent /edit request, for shape assertions.
    pub last_edit: Option<(String, Value)>,
}

pub type SharedState = Arc<Mutex<StubState>>;

/// Start the stub service; returns its base URL and shared state handle.
pub async fn spawn_stub() -> (String, SharedState) {
    let state: SharedState = Arc::default();
    let app = Router::new()
        .route("/upload", post(upload))
        .route("/delete_file", post(delete_file))
        .route("/clear_all", post(clear_all))
        .route("/reorder", post(reorder))
        .route("/merge", post(merge))
        .route("/edit/remove_page", post(edit_remove_page))
        .route("/edit/rotate_page", post(edit_rotate_page))
        .route("/edit/add_text", post(edit_add_text))
        .route("/download/{filename}", get(download))
        .route("/toggle_theme", post(toggle_theme))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve stub");
    });

    (format!("http://{addr}"), state)
}

/// A session talking to the stub, with a short timeout so the slow-reorder
/// test stays quick.
pub fn session_for(base_url: &str) -> Session {
    let config = Config::new(base_url, 1, true, false).expect("stub config");
    let client = ServiceClient::new(config).expect("stub client");
    Session::new(client)
}

/// Write a minimal file that passes the client's PDF checks.
pub fn write_pdf(dir: &tempfile::TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, format!("%PDF-1.4\n{name} test body\n%%EOF\n")).expect("write fixture");
    path
}

/// Upload the named fixtures in order and return the session.
pub async fn seeded_session(
    base_url: &str,
    dir: &tempfile::TempDir,
    names: &[&str],
) -> Session {
    let mut session = session_for(base_url);
    for name in names {
        let path = write_pdf(dir, name);
        session.upload(&path).await.expect("seed upload");
    }
    session
}

/// Names of the session's files, in list order.
pub fn local_names(session: &Session) -> Vec<String> {
    session.files().iter().map(|f| f.name.clone()).collect()
}

/// Names of the stub's files, in the order it last acknowledged.
pub fn remote_names(state: &SharedState) -> Vec<String> {
    state
        .lock()
        .unwrap()
        .files
        .iter()
        .map(|f| f.name.clone())
        .collect()
}

async fn upload(State(state): State<SharedState>, mut multipart: Multipart) -> Json<Value> {
    let mut uploaded = Vec::new();
    while let Some(field) = multipart.next_field().await.expect("multipart field") {
        if field.name() != Some("files[]") {
            continue;
        }
        let name = field.file_name().unwrap_or("upload.pdf").to_string();
        let bytes = field.bytes().await.expect("field bytes");
        if !bytes.starts_with(b"%PDF-") {
            return Json(json!({"error": format!("{name} is not a PDF")}));
        }
        uploaded.push(FileDescriptor {
            name: name.clone(),
            path: format!("uploads/{name}"),
            pages: Some(1),
        });
    }
    if uploaded.is_empty() {
        return Json(json!({"error": "No files selected"}));
    }

    let mut st = state.lock().unwrap();
    st.upload_hits += 1;
    st.files.extend(uploaded.iter().cloned());
    Json(json!({ "files": uploaded }))
}

async fn delete_file(State(state): State<SharedState>, Json(body): Json<Value>) -> Json<Value> {
    let path = body["path"].as_str().unwrap_or_default().to_string();
    let mut st = state.lock().unwrap();
    st.delete_hits += 1;
    if st.fail_deletes {
        return Json(json!({"success": false, "error": format!("Failed to delete file: {path}")}));
    }
    st.files.retain(|f| f.path != path);
    Json(json!({"success": true}))
}

async fn clear_all(State(state): State<SharedState>) -> Json<Value> {
    let mut st = state.lock().unwrap();
    st.clear_hits += 1;
    if st.fail_clear {
        return Json(json!({"success": false, "error": "Failed to clear files: disk on fire"}));
    }
    st.files.clear();
    Json(json!({"success": true}))
}

async fn reorder(State(state): State<SharedState>, Json(body): Json<Value>) -> Json<Value> {
    let slow = state.lock().unwrap().slow_reorder;
    if slow {
        // Longer than the 1s client timeout used by session_for.
        tokio::time::sleep(Duration::from_millis(1500)).await;
    }

    let order: Vec<FileDescriptor> =
        serde_json::from_value(body["order"].clone()).expect("reorder body");
    let mut st = state.lock().unwrap();
    st.reorder_hits += 1;
    st.files = order.clone();
    Json(json!({ "files": order }))
}

async fn merge(State(state): State<SharedState>, Json(body): Json<Value>) -> Json<Value> {
    let files: Vec<FileDescriptor> =
        serde_json::from_value(body["files"].clone()).expect("merge body");
    let mut st = state.lock().unwrap();
    st.merge_hits += 1;
    if st.fail_merge {
        return Json(json!({"error": "Errors occurred with the following files:\nbroken.pdf"}));
    }
    if files.is_empty() {
        return Json(json!({"error": "No files selected"}));
    }
    let total_pages: u32 = files.iter().map(|f| f.pages.unwrap_or(1)).sum();
    Json(json!({
        "success": true,
        "output_path": "merged/merged.pdf",
        "total_pages": total_pages,
    }))
}

async fn edit_remove_page(state: State<SharedState>, body: Json<Value>) -> Json<Value> {
    record_edit(state, "remove_page", body)
}

async fn edit_rotate_page(state: State<SharedState>, body: Json<Value>) -> Json<Value> {
    record_edit(state, "rotate_page", body)
}

async fn edit_add_text(state: State<SharedState>, body: Json<Value>) -> Json<Value> {
    record_edit(state, "add_text", body)
}

fn record_edit(
    State(state): State<SharedState>,
    op: &str,
    Json(body): Json<Value>,
) -> Json<Value> {
    let mut st = state.lock().unwrap();
    st.last_edit = Some((op.to_string(), body));
    Json(json!({"success": true, "output_path": "edited/edited_merged.pdf"}))
}

async fn download(UrlPath(filename): UrlPath<String>) -> Vec<u8> {
    format!("%PDF-1.4\nstub download of {filename}\n%%EOF\n").into_bytes()
}

async fn toggle_theme(State(state): State<SharedState>) -> Json<Value> {
    let mut st = state.lock().unwrap();
    st.dark_mode = !st.dark_mode;
    Json(json!({"dark_mode": st.dark_mode}))
}
