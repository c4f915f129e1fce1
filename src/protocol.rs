//! Wire types for the merge service's HTTP/JSON interface.
//!
//! Every response the service sends may carry an `error` field instead of
//! its payload, so response structs keep both sides optional and the client
//! converts them into proper `Result`s.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::store::FileDescriptor;

/// Body of `POST /reorder`.
#[derive(Debug, Serialize)]
pub struct ReorderRequest<'a> {
    /// Full current order, authoritative answer comes back in `files`.
    pub order: &'a [FileDescriptor],
}

/// Body of `POST /merge`.
#[derive(Debug, Serialize)]
pub struct MergeRequest<'a> {
    /// Files to concatenate, in list order.
    pub files: &'a [FileDescriptor],
}

/// Body of `POST /delete_file`.
#[derive(Debug, Serialize)]
pub struct DeleteRequest<'a> {
    /// Server-assigned path of the file to delete.
    pub path: &'a str,
}

/// Body of `POST /edit/remove_page`.
#[derive(Debug, Serialize)]
pub struct RemovePageRequest<'a> {
    /// Server-side path of the PDF to edit.
    pub pdf_path: &'a str,
    /// 0-based page index.
    pub page_num: u32,
}

/// Body of `POST /edit/rotate_page`.
#[derive(Debug, Serialize)]
pub struct RotatePageRequest<'a> {
    /// Server-side path of the PDF to edit.
    pub pdf_path: &'a str,
    /// 0-based page index.
    pub page_num: u32,
    /// Rotation in degrees (90, 180, or 270).
    pub rotation: u16,
}

/// Body of `POST /edit/add_text`.
#[derive(Debug, Serialize)]
pub struct AddTextRequest<'a> {
    /// Server-side path of the PDF to edit.
    pub pdf_path: &'a str,
    /// 0-based page index.
    pub page_num: u32,
    /// Text to place on the page.
    pub text: &'a str,
    /// Horizontal position in points.
    pub x: i32,
    /// Vertical position in points.
    pub y: i32,
}

/// Response carrying a file list (`/upload`, `/reorder`).
#[derive(Debug, Deserialize)]
pub struct FileListResponse {
    #[serde(default)]
    files: Vec<FileDescriptor>,
    #[serde(default)]
    error: Option<String>,
}

impl FileListResponse {
    /// Extract the file list, or the service's error.
    pub fn into_result(self) -> Result<Vec<FileDescriptor>> {
        match self.error {
            Some(message) => Err(Error::remote(message)),
            None => Ok(self.files),
        }
    }
}

/// Response carrying only a success flag (`/delete_file`, `/clear_all`).
#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

impl StatusResponse {
    /// Convert into `Ok(())` iff the service confirmed success.
    pub fn into_result(self) -> Result<()> {
        match (self.success, self.error) {
            (true, _) => Ok(()),
            (false, Some(message)) => Err(Error::remote(message)),
            (false, None) => Err(Error::remote("service did not confirm success")),
        }
    }
}

/// Raw response of `/merge` and the `/edit/*` endpoints.
#[derive(Debug, Deserialize)]
pub struct OutputResponse {
    #[serde(default)]
    output_path: Option<String>,
    #[serde(default)]
    total_pages: Option<u32>,
    #[serde(default)]
    error: Option<String>,
}

impl OutputResponse {
    /// Extract the produced output, or the service's error.
    pub fn into_result(self) -> Result<ServiceOutput> {
        if let Some(message) = self.error {
            return Err(Error::remote(message));
        }
        match self.output_path {
            Some(output_path) => Ok(ServiceOutput {
                output_path,
                total_pages: self.total_pages,
            }),
            None => Err(Error::remote("service returned no output path")),
        }
    }
}

/// A file the service produced (merged or edited PDF).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceOutput {
    /// Server-side path of the produced PDF, usable with `/download`.
    pub output_path: String,
    /// Total pages in the produced PDF, when the service reports it.
    pub total_pages: Option<u32>,
}

/// Response of `POST /toggle_theme`.
#[derive(Debug, Deserialize)]
pub struct ThemeResponse {
    /// Whether dark mode is now active.
    pub dark_mode: bool,
}

/// Page rotation accepted by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    /// Rotate 90 degrees clockwise.
    Clockwise90,
    /// Rotate 180 degrees.
    Rotate180,
    /// Rotate 270 degrees clockwise (90 counter-clockwise).
    Clockwise270,
}

impl Rotation {
    /// Parse rotation from degrees.
    ///
    /// # Errors
    ///
    /// Returns an error unless `degrees` is 90, 180, or 270.
    pub fn from_degrees(degrees: u16) -> Result<Self> {
        match degrees {
            90 => Ok(Self::Clockwise90),
            180 => Ok(Self::Rotate180),
            270 => Ok(Self::Clockwise270),
            _ => Err(Error::InvalidRotation { degrees }),
        }
    }

    /// Get rotation as degrees.
    pub fn as_degrees(&self) -> u16 {
        match self {
            Self::Clockwise90 => 90,
            Self::Rotate180 => 180,
            Self::Clockwise270 => 270,
        }
    }
}
