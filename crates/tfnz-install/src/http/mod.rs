mod basic_ext;

use crate::prelude::*;
use crate::{err_ctx, Result};
use async_trait::async_trait;
use reqwest_middleware::RequestBuilder;
use std::time::Duration;

pub(crate) mod prelude {
    pub(crate) use super::basic_ext::{RequestBuilderBasicExt, ResponseBasicExt};
}

pub type Client = reqwest_middleware::ClientWithMiddleware;

/// The client doesn't retry anything. A request that failed is reported as
/// the failure of the installation step it belongs to.
pub(crate) fn create_client(timeout: Duration) -> Result<Client> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(err_ctx!(HttpClientError::BuildClient))?;

    let client = reqwest_middleware::ClientBuilder::new(client)
        .with(ObservingMiddleware)
        .with_init(|request_builder: RequestBuilder| {
            request_builder.header(
                "User-Agent",
                concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")),
            )
        })
        .build();

    Ok(client)
}

struct ObservingMiddleware;

#[async_trait]
impl reqwest_middleware::Middleware for ObservingMiddleware {
    async fn handle(
        &self,
        request: reqwest::Request,
        extensions: &mut http::Extensions,
        next: reqwest_middleware::Next<'_>,
    ) -> reqwest_middleware::Result<reqwest::Response> {
        let span = info_span!(
            "request",
            method = %request.method(),
            url = %request.url(),
        );

        async {
            let (result, duration) = next.run(request, extensions).with_duration().await;

            let duration = tracing_duration(duration);

            let response = match &result {
                Ok(response) => response,
                Err(err) => {
                    debug!(duration, err = tracing_err(err), "Network request failed");
                    return result;
                }
            };

            let status = response.status();

            let Err(err) = response.error_for_status_ref() else {
                debug!(duration, %status, "Network request succeeded");
                return result;
            };

            // Reported by the caller as the failure of the installation step
            debug!(
                err = tracing_err(&err),
                duration,
                %status,
                "Network request failed (error status)"
            );

            result
        }
        .instrument(span)
        .await
    }
}

/// Errors at the layer of the HTTP API
#[derive(Debug, thiserror::Error)]
pub(crate) enum HttpClientError {
    #[error("Failed to build the HTTP client")]
    BuildClient { source: reqwest::Error },

    #[error("HTTP request failed")]
    Request { source: reqwest_middleware::Error },

    #[error("Failed to read HTTP response")]
    ReadPayload { source: reqwest::Error },

    #[error("HTTP request has failed (HTTP status code: {status}):\n{body}")]
    BadResponseStatusCode {
        status: reqwest::StatusCode,
        body: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test(tokio::test)]
    #[ignore]
    async fn manual_sandbox() {
        let url = "https://20ft.nz/tfnz.1";

        let http = create_client(Duration::from_secs(10)).unwrap();
        let response = http.head(url).send().await.unwrap();

        dbg!(response.status(), response.content_length());
    }
}
