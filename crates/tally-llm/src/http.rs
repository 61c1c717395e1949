//! Shared HTTP plumbing for the network-backed providers

use crate::LlmError;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use std::thread;
use std::time::Duration;
use tracing::warn;

/// Build a blocking client with the given request timeout
pub(crate) fn build_client(timeout: Duration) -> Result<Client, LlmError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LlmError::Config(format!("Failed to build HTTP client: {}", e)))
}

/// Send a request, retrying transport failures with exponential backoff
///
/// `build` is called once per attempt since a blocking `RequestBuilder`
/// cannot be reused after `send`.
pub(crate) fn send_with_retry<F>(
    build: F,
    max_retries: u32,
    model: &str,
) -> Result<Response, LlmError>
where
    F: Fn() -> RequestBuilder,
{
    let max_attempts = max_retries.max(1);
    let mut attempts = 0;
    let mut last_error = None;

    while attempts < max_attempts {
        match build().send() {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    return Ok(response);
                }
                if status == StatusCode::NOT_FOUND {
                    return Err(LlmError::ModelNotAvailable(model.to_string()));
                }
                if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                    return Err(LlmError::Config(format!(
                        "HTTP {}: credentials rejected",
                        status
                    )));
                }
                if status == StatusCode::TOO_MANY_REQUESTS {
                    last_error = Some(LlmError::RateLimitExceeded);
                } else {
                    let error_text = response
                        .text()
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    last_error = Some(LlmError::Communication(format!(
                        "HTTP {}: {}",
                        status, error_text
                    )));
                }
            }
            Err(e) => {
                last_error = Some(LlmError::Communication(format!("Request failed: {}", e)));
            }
        }

        attempts += 1;
        if attempts < max_attempts {
            // Exponential backoff: 1s, 2s, 4s, etc.
            let delay = Duration::from_secs(2u64.pow(attempts - 1));
            warn!(
                "LLM request attempt {}/{} failed, retrying in {:?}",
                attempts, max_attempts, delay
            );
            thread::sleep(delay);
        }
    }

    Err(last_error.unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
}
