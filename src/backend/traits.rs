//! Trait abstraction for the backend client to enable mocking in tests

use super::types::{BackendError, CreateProvinceProps, SubmitOutcome};
use crate::state::ProvinceForm;
use async_trait::async_trait;

/// Trait for backend operations, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BackendClientTrait: Send + Sync {
    /// Visit the create page and return its props
    async fn visit_create(&self, path: &str) -> Result<CreateProvinceProps, BackendError>;

    /// Store a new province
    async fn store_province(
        &self,
        path: &str,
        form: &ProvinceForm,
    ) -> Result<SubmitOutcome, BackendError>;
}
