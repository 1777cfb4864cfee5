use crate::config::InferenceConfig;
use crate::error::StageError;
use reqwest::{Client, Response};

/// Builds the HTTP client shared by the three stage services.
///
/// The configured timeout applies to each call as a whole.
pub fn build_client(config: &InferenceConfig) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(config.timeout())
        .user_agent(concat!("lecture-voice/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Reads the body of a response whose status satisfies `accept`, or turns
/// the response into [`StageError::UpstreamStatus`] carrying the full body.
pub(crate) async fn read_body(
    response: Response,
    accept: impl Fn(reqwest::StatusCode) -> bool,
) -> Result<Vec<u8>, StageError> {
    let status = response.status();
    if !accept(status) {
        let body = match response.bytes().await {
            Ok(raw) => String::from_utf8_lossy(&raw).into_owned(),
            Err(e) => {
                tracing::warn!(
                    status = status.as_u16(),
                    error = %e,
                    "failed to read upstream error body"
                );
                String::new()
            }
        };
        return Err(StageError::UpstreamStatus {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.bytes().await?.to_vec())
}
