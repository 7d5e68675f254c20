// State management module
// Client-side store for the uploaded model, expert suggestions and request status

pub mod store;

pub use store::{BpmnStore, StoreState};
