//! BPMN Review Client Library
//!
//! Client-side state for a BPMN expert-review backend: upload a process model,
//! fetch per-expert review suggestions, and keep the backend's reachability
//! under watch. The binary in `src/main.rs` wires these together.

pub mod api;
pub mod config;
pub mod error;
pub mod monitor;
/// Client state store
///
/// Holds the uploaded model, expert suggestions, loading flag and error message.
pub mod state;

pub use api::{ApiClient, ExpertId, HealthProbe, HealthStatus, ProcessModel, ReviewBackend};
pub use api::{Suggestion, UploadPayload};
pub use config::Config;
pub use error::{ClientError, Result};
pub use monitor::{check_connection, ConnectionMonitor, MonitorHandle};
pub use state::{BpmnStore, StoreState};
