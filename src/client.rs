//! HTTP client for the merge service.
//!
//! [`ServiceClient`] translates local operations into the service's
//! HTTP/JSON contract and converts every response into a proper `Result`.
//! It holds no file-list state of its own; reconciling responses with the
//! local list is the session's job.
//!
//! Timeouts are enforced per request and surfaced as [`Error::Timeout`], so
//! callers can guarantee the local list was not changed by a request that
//! never completed.

use std::path::Path;

use reqwest::multipart;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::io::AsyncWriteExt;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::protocol::{
    AddTextRequest, DeleteRequest, FileListResponse, MergeRequest, OutputResponse,
    RemovePageRequest, ReorderRequest, Rotation, RotatePageRequest, ServiceOutput, StatusResponse,
    ThemeResponse,
};
use crate::store::FileDescriptor;

/// Leading bytes every PDF file starts with.
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Client for the merge service's HTTP interface.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    http: reqwest::Client,
    config: Config,
}

impl ServiceClient {
    /// Create a client for the configured service.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| Error::invalid_config(format!("failed to build HTTP client: {err}")))?;
        Ok(Self { http, config })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Upload one local PDF file.
    ///
    /// The file's type is checked client-side (extension and `%PDF-` header)
    /// before any network I/O. The service answers with the descriptors it
    /// registered, normally one.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidFileType`] for non-PDF input, plus the usual remote
    /// and transport failures.
    pub async fn upload(&self, local: &Path) -> Result<Vec<FileDescriptor>> {
        check_pdf_extension(local)?;
        let bytes = tokio::fs::read(local).await?;
        if !bytes.starts_with(PDF_MAGIC) {
            return Err(Error::InvalidFileType {
                path: local.to_path_buf(),
            });
        }

        let file_name = local
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.pdf".to_string());

        tracing::debug!(file = %local.display(), size = bytes.len(), "uploading");

        let endpoint = "/upload";
        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("application/pdf")
            .map_err(|err| transport_error(endpoint, err))?;
        let form = multipart::Form::new().part("files[]", part);

        let sent = self
            .http
            .post(self.config.endpoint(endpoint))
            .multipart(form)
            .send()
            .await;
        let response: FileListResponse = self.recv_json(endpoint, sent).await?;
        response.into_result()
    }

    /// Ask the service to delete an uploaded file.
    ///
    /// Best-effort: callers remove the local entry whether or not this
    /// succeeds.
    pub async fn delete_file(&self, path: &str) -> Result<()> {
        let response: StatusResponse = self
            .post_json("/delete_file", &DeleteRequest { path })
            .await?;
        response.into_result()
    }

    /// Ask the service to forget every uploaded file.
    ///
    /// # Errors
    ///
    /// Any failure means the server-side state is unknown; callers must not
    /// clear the local list unless this returns `Ok`.
    pub async fn clear_all(&self) -> Result<()> {
        let endpoint = "/clear_all";
        let sent = self.http.post(self.config.endpoint(endpoint)).send().await;
        let response: StatusResponse = self.recv_json(endpoint, sent).await?;
        response.into_result()
    }

    /// Push the full current order; the service answers with the order it
    /// considers canonical.
    pub async fn reorder(&self, order: &[FileDescriptor]) -> Result<Vec<FileDescriptor>> {
        let response: FileListResponse =
            self.post_json("/reorder", &ReorderRequest { order }).await?;
        response.into_result()
    }

    /// Merge the given files, in order, into a single document.
    pub async fn merge(&self, files: &[FileDescriptor]) -> Result<ServiceOutput> {
        let response: OutputResponse = self.post_json("/merge", &MergeRequest { files }).await?;
        response.into_result()
    }

    /// Remove one page from a produced PDF. `page` is 1-based.
    pub async fn remove_page(&self, pdf_path: &str, page: u32) -> Result<ServiceOutput> {
        let page_num = to_page_index(page)?;
        let response: OutputResponse = self
            .post_json("/edit/remove_page", &RemovePageRequest { pdf_path, page_num })
            .await?;
        response.into_result()
    }

    /// Rotate one page of a produced PDF. `page` is 1-based.
    pub async fn rotate_page(
        &self,
        pdf_path: &str,
        page: u32,
        rotation: Rotation,
    ) -> Result<ServiceOutput> {
        let page_num = to_page_index(page)?;
        let response: OutputResponse = self
            .post_json(
                "/edit/rotate_page",
                &RotatePageRequest {
                    pdf_path,
                    page_num,
                    rotation: rotation.as_degrees(),
                },
            )
            .await?;
        response.into_result()
    }

    /// Place text on one page of a produced PDF. `page` is 1-based.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyText`] if `text` is empty, checked before any network
    /// call.
    pub async fn add_text(
        &self,
        pdf_path: &str,
        page: u32,
        text: &str,
        x: i32,
        y: i32,
    ) -> Result<ServiceOutput> {
        if text.trim().is_empty() {
            return Err(Error::EmptyText);
        }
        let page_num = to_page_index(page)?;
        let response: OutputResponse = self
            .post_json(
                "/edit/add_text",
                &AddTextRequest {
                    pdf_path,
                    page_num,
                    text,
                    x,
                    y,
                },
            )
            .await?;
        response.into_result()
    }

    /// Download a produced PDF to a local file. Returns the bytes written.
    pub async fn download(&self, filename: &str, dest: &Path) -> Result<u64> {
        let endpoint = format!("/download/{filename}");
        let sent = self.http.get(self.config.endpoint(&endpoint)).send().await;
        let mut response = sent.map_err(|err| transport_error(&endpoint, err))?;
        if !response.status().is_success() {
            return Err(Error::remote(format!(
                "download failed with HTTP {}",
                response.status()
            )));
        }

        let mut file = tokio::fs::File::create(dest).await?;
        let mut written = 0u64;
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|err| transport_error(&endpoint, err))?
        {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;
        Ok(written)
    }

    /// Flip the service-wide dark mode flag. Returns the new state.
    pub async fn toggle_theme(&self) -> Result<bool> {
        let endpoint = "/toggle_theme";
        let sent = self.http.post(self.config.endpoint(endpoint)).send().await;
        let response: ThemeResponse = self.recv_json(endpoint, sent).await?;
        Ok(response.dark_mode)
    }

    /// POST a JSON body and decode a JSON response.
    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T> {
        let sent = self
            .http
            .post(self.config.endpoint(endpoint))
            .json(body)
            .send()
            .await;
        self.recv_json(endpoint, sent).await
    }

    /// Decode a JSON response, mapping failures to the error taxonomy.
    ///
    /// The service reports its own failures in an `error` field even on
    /// non-2xx statuses, so the body is decoded first and the status only
    /// consulted when the body is not usable JSON.
    async fn recv_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        sent: reqwest::Result<reqwest::Response>,
    ) -> Result<T> {
        let response = sent.map_err(|err| transport_error(endpoint, err))?;
        let status = response.status();
        match response.json::<T>().await {
            Ok(value) => Ok(value),
            Err(_) if !status.is_success() => {
                Err(Error::remote(format!("service answered HTTP {status}")))
            }
            Err(err) => Err(transport_error(endpoint, err)),
        }
    }
}

/// Convert a 1-based UI page number into the 0-based index the service
/// expects.
fn to_page_index(page: u32) -> Result<u32> {
    if page == 0 {
        return Err(Error::InvalidPage { page });
    }
    Ok(page - 1)
}

/// Reject files whose declared type is not PDF, before touching the network.
fn check_pdf_extension(path: &Path) -> Result<()> {
    let is_pdf = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if is_pdf {
        Ok(())
    } else {
        Err(Error::InvalidFileType {
            path: path.to_path_buf(),
        })
    }
}

/// Map a reqwest failure to the error taxonomy, keeping timeouts distinct.
fn transport_error(endpoint: &str, err: reqwest::Error) -> Error {
    if err.is_timeout() {
        tracing::warn!(endpoint, "request timed out");
        Error::Timeout {
            endpoint: endpoint.to_string(),
        }
    } else {
        Error::Transport {
            endpoint: endpoint.to_string(),
            source: err,
        }
    }
}
