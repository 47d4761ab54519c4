//! HTTP client for communicating with the admin backend
//!
//! Requests are sent as JSON with the XHR marker header so the backend
//! answers validation failures with a 422 JSON body instead of a redirect
//! back to the form.

use super::traits::BackendClientTrait;
use super::types::{
    decode_validation_errors, redirect_from_body, BackendError, CreateProvinceProps,
    SubmitOutcome,
};
use crate::state::ProvinceForm;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, LOCATION};
use reqwest::StatusCode;
use std::time::Duration;

/// Client for communicating with the admin backend
pub struct BackendClient {
    http_client: reqwest::Client,
    /// Base URL without trailing slash
    base_url: String,
}

impl BackendClient {
    /// Create a new backend client
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, BackendError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            "X-Requested-With",
            HeaderValue::from_static("XMLHttpRequest"),
        );

        // Redirects are reported to the caller, not followed
        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::none());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http_client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl BackendClientTrait for BackendClient {
    async fn visit_create(&self, path: &str) -> Result<CreateProvinceProps, BackendError> {
        let url = self.url(path);
        tracing::debug!("Visiting {url}");

        let response = self.http_client.get(&url).send().await.map_err(|e| {
            tracing::error!("Failed to reach backend at {url}: {e}");
            BackendError::Http(e)
        })?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let props: CreateProvinceProps = serde_json::from_str(&body)?;
        tracing::info!("Loaded {} countries", props.countries.len());
        Ok(props)
    }

    async fn store_province(
        &self,
        path: &str,
        form: &ProvinceForm,
    ) -> Result<SubmitOutcome, BackendError> {
        let url = self.url(path);

        let response = self
            .http_client
            .post(&url)
            .json(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to store province: {e}");
                BackendError::Http(e)
            })?;

        let status = response.status();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body = response.text().await?;

        outcome_from_response(status, location, &body)
    }
}

/// Classify a store response
fn outcome_from_response(
    status: StatusCode,
    location: Option<String>,
    body: &str,
) -> Result<SubmitOutcome, BackendError> {
    if status == StatusCode::UNPROCESSABLE_ENTITY {
        let errors = decode_validation_errors(body)?;
        return Ok(SubmitOutcome::Invalid(errors));
    }

    if status.is_success() || status.is_redirection() {
        let location = location.or_else(|| redirect_from_body(body));
        tracing::info!("Province stored (status {})", status.as_u16());
        return Ok(SubmitOutcome::Redirect { location });
    }

    Err(BackendError::Status {
        status: status.as_u16(),
        body: body.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FieldName;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_trims_base_url() {
        let client = BackendClient::new("http://admin.test/", None).unwrap();
        assert_eq!(client.url("/provinces"), "http://admin.test/provinces");
    }

    #[test]
    fn test_new_with_timeout() {
        let client = BackendClient::new("http://admin.test", Some(Duration::from_secs(5)));
        assert!(client.is_ok());
    }

    #[test]
    fn test_unprocessable_is_invalid() {
        let outcome = outcome_from_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            None,
            r#"{"errors":{"code":"already taken"}}"#,
        )
        .unwrap();
        match outcome {
            SubmitOutcome::Invalid(errors) => {
                assert_eq!(errors.get(FieldName::Code), Some("already taken"))
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_redirect_uses_location_header() {
        let outcome = outcome_from_response(
            StatusCode::FOUND,
            Some("http://admin.test/provinces".to_string()),
            "",
        )
        .unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Redirect {
                location: Some("http://admin.test/provinces".to_string())
            }
        );
    }

    #[test]
    fn test_created_falls_back_to_body_redirect() {
        let outcome =
            outcome_from_response(StatusCode::CREATED, None, r#"{"redirect":"/provinces"}"#)
                .unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Redirect {
                location: Some("/provinces".to_string())
            }
        );
    }

    #[test]
    fn test_success_without_location() {
        let outcome = outcome_from_response(StatusCode::NO_CONTENT, None, "").unwrap();
        assert_eq!(outcome, SubmitOutcome::Redirect { location: None });
    }

    #[test]
    fn test_server_error_is_err() {
        let result = outcome_from_response(StatusCode::INTERNAL_SERVER_ERROR, None, "boom");
        assert!(matches!(
            result,
            Err(BackendError::Status { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_http_error() {
        // Port 9 (discard) on localhost is not expected to accept HTTP
        let client = BackendClient::new("http://127.0.0.1:9", Some(Duration::from_secs(2))).unwrap();
        let result = client.visit_create("/provinces/create").await;
        assert!(result.is_err());
    }
}
