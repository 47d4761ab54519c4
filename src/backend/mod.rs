//! Backend client module for HTTP communication

mod client;
mod traits;
mod types;

pub use client::BackendClient;
pub use traits::BackendClientTrait;
pub use types::{BackendError, CreateProvinceProps, SubmitOutcome};

#[cfg(test)]
pub use traits::MockBackendClientTrait;
