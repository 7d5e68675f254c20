//! API module
//!
//! HTTP client and wire types for the BPMN review backend

pub mod client;
pub mod types;

pub use client::{ApiClient, HealthProbe, ReviewBackend};
pub use types::{
    ExpertId, HealthStatus, ProcessModel, Suggestion, SuggestionsResponse, UploadPayload,
    UploadResponse,
};
