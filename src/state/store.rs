// Client state store
// Holds the uploaded process model, per-expert suggestions, loading flag and error

use crate::api::{ApiClient, ExpertId, ProcessModel, ReviewBackend, Suggestion, UploadPayload};
use crate::error::Result;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, error};

/// Snapshot of everything the rendering layer reads
#[derive(Debug, Clone, PartialEq)]
pub struct StoreState {
    /// Most recently uploaded process model, if any upload succeeded
    pub current_bpmn: Option<ProcessModel>,
    /// Suggestions per expert; always holds all three experts
    pub expert_suggestions: HashMap<ExpertId, Vec<Suggestion>>,
    /// True while an operation is outstanding
    pub is_loading: bool,
    /// Message of the last failed operation, cleared when the next one starts
    pub error: Option<String>,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            current_bpmn: None,
            expert_suggestions: ExpertId::ALL
                .into_iter()
                .map(|expert| (expert, Vec::new()))
                .collect(),
            is_loading: false,
            error: None,
        }
    }
}

impl StoreState {
    /// Create a new state with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Suggestions for one expert (empty if missing)
    pub fn suggestions(&self, expert: ExpertId) -> &[Suggestion] {
        self.expert_suggestions
            .get(&expert)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether the last operation failed
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    fn begin(&mut self) {
        self.is_loading = true;
        self.error = None;
    }
}

/// Client state store
///
/// Owned by the application context and shared by reference (wrap it in an
/// `Arc` to hand it to several tasks). Operations take `&self`; overlapping
/// calls are neither queued nor serialized and race on the shared
/// loading/error fields, last completion wins. The lock is never held across
/// a request.
pub struct BpmnStore<B = ApiClient> {
    backend: B,
    state: RwLock<StoreState>,
}

impl<B: ReviewBackend> BpmnStore<B> {
    /// Create a store with default state on top of a backend
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: RwLock::new(StoreState::new()),
        }
    }

    /// The backend this store talks to
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Upload a BPMN file and make the returned model current
    ///
    /// On failure the current model is left untouched, the error message is
    /// recorded in the store and the error is returned as well.
    pub async fn upload(&self, payload: UploadPayload) -> Result<ProcessModel> {
        self.state.write().await.begin();
        debug!(file_name = %payload.file_name, "Starting BPMN upload");

        let result = self.backend.upload_bpmn(payload).await;

        let mut state = self.state.write().await;
        match &result {
            Ok(model) => state.current_bpmn = Some(model.clone()),
            Err(e) => {
                error!(error = %e, "BPMN upload failed");
                state.error = Some(e.to_string());
            }
        }
        state.is_loading = false;
        result
    }

    /// Fetch suggestions for one expert, replacing only that expert's list
    ///
    /// On failure the expert's previous list is kept, the error message is
    /// recorded in the store and the error is returned as well.
    pub async fn fetch_suggestions(&self, expert: ExpertId) -> Result<Vec<Suggestion>> {
        self.state.write().await.begin();
        debug!(expert = expert.id(), "Fetching expert suggestions");

        let result = self.backend.fetch_suggestions(expert).await;

        let mut state = self.state.write().await;
        match &result {
            Ok(suggestions) => {
                state
                    .expert_suggestions
                    .insert(expert, suggestions.clone());
            }
            Err(e) => {
                error!(expert = expert.id(), error = %e, "Fetching suggestions failed");
                state.error = Some(e.to_string());
            }
        }
        state.is_loading = false;
        result
    }

    /// Suggestions currently held for one expert
    pub async fn suggestions(&self, expert: ExpertId) -> Vec<Suggestion> {
        self.state.read().await.suggestions(expert).to_vec()
    }

    /// Whether an operation is outstanding
    pub async fn is_loading(&self) -> bool {
        self.state.read().await.is_loading
    }

    /// Whether the last operation failed
    pub async fn has_error(&self) -> bool {
        self.state.read().await.has_error()
    }

    /// Message of the last failure, if any
    pub async fn error_message(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    /// Currently held process model
    pub async fn current_model(&self) -> Option<ProcessModel> {
        self.state.read().await.current_bpmn.clone()
    }

    /// Copy of the whole state
    pub async fn snapshot(&self) -> StoreState {
        self.state.read().await.clone()
    }
}
