//! Review API types
//!
//! Structs that mirror the backend's JSON bodies, plus the typed expert
//! categories and the upload payload.

use crate::error::{ClientError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::Path;

/// Multipart field name the backend reads the file from
const UPLOAD_FIELD: &str = "file";

/// MIME type attached to uploaded BPMN documents
const BPMN_MIME: &str = "application/xml";

/// Expert category a suggestion list belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExpertId {
    /// Business expert (wire id 1)
    Business,
    /// Process expert (wire id 2)
    Process,
    /// Technical expert (wire id 3)
    Technical,
}

impl ExpertId {
    /// All categories, in wire id order
    pub const ALL: [ExpertId; 3] = [ExpertId::Business, ExpertId::Process, ExpertId::Technical];

    /// Numeric id used in request paths
    pub fn id(self) -> u8 {
        match self {
            ExpertId::Business => 1,
            ExpertId::Process => 2,
            ExpertId::Technical => 3,
        }
    }

    /// Display label for the rendering layer
    pub fn label(self) -> &'static str {
        match self {
            ExpertId::Business => "业务专家",
            ExpertId::Process => "流程专家",
            ExpertId::Technical => "技术专家",
        }
    }
}

impl TryFrom<u8> for ExpertId {
    type Error = ClientError;

    fn try_from(id: u8) -> Result<Self> {
        match id {
            1 => Ok(ExpertId::Business),
            2 => Ok(ExpertId::Process),
            3 => Ok(ExpertId::Technical),
            other => Err(ClientError::UnknownExpert(other)),
        }
    }
}

impl From<ExpertId> for u8 {
    fn from(expert: ExpertId) -> Self {
        expert.id()
    }
}

impl fmt::Display for ExpertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Backend representation of an uploaded BPMN document
///
/// Opaque to the client: kept verbatim for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessModel(pub Value);

impl ProcessModel {
    /// Borrow the raw JSON value
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// A single expert suggestion; shape is defined by the backend
pub type Suggestion = Value;

/// Body returned by the upload endpoint
#[derive(Deserialize, Debug)]
pub struct UploadResponse {
    /// The stored process model
    pub bpmn: ProcessModel,
}

/// Body returned by the suggestions endpoint
#[derive(Deserialize, Debug)]
pub struct SuggestionsResponse {
    /// Suggestions for the requested expert, in backend order
    pub suggestions: Vec<Suggestion>,
}

/// Body returned by the health-check endpoint
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    /// Status reported by the backend (e.g. "ok")
    pub status: String,
}

impl HealthStatus {
    /// Synthetic status used when the health check itself fails
    pub fn error() -> Self {
        Self {
            status: "error".to_string(),
        }
    }

    /// Whether this is the synthetic failure status
    pub fn is_error(&self) -> bool {
        self.status == "error"
    }
}

/// A BPMN file to upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPayload {
    /// File name sent in the multipart part
    pub file_name: String,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl UploadPayload {
    /// Create a payload from in-memory contents
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a payload from disk; the file name is the path's last component
    pub async fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self { file_name, bytes })
    }

    /// Build the multipart form sent to the upload endpoint
    pub fn into_form(self) -> Result<reqwest::multipart::Form> {
        let part = reqwest::multipart::Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(BPMN_MIME)?;
        Ok(reqwest::multipart::Form::new().part(UPLOAD_FIELD, part))
    }
}
