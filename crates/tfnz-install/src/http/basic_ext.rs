use super::HttpClientError;
use crate::prelude::*;
use crate::util::fs;
use crate::{err, err_ctx, Result};
use async_trait::async_trait;
use easy_ext::ext;
use futures::prelude::*;
use reqwest::Response;
use reqwest_middleware::RequestBuilder;
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// Limit for the amount of error response body quoted in the error message
const MAX_ERROR_BODY_CHARS: usize = 1000;

#[ext(RequestBuilderBasicExt)]
#[async_trait]
pub(crate) impl RequestBuilder {
    /// Better version of [`RequestBuilder::send`] that returns an error
    /// if the error response status code is returned.
    async fn try_send(self) -> Result<Response> {
        let response = self
            .send()
            .await
            .map_err(err_ctx!(HttpClientError::Request))?;

        let status = response.status();

        if !status.is_client_error() && !status.is_server_error() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_else(|err| {
            format!(
                "Could not collect the error response body text: {}",
                err.display_chain()
            )
        });

        let body: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();

        Err(err!(HttpClientError::BadResponseStatusCode { status, body }))
    }
}

#[ext(ResponseBasicExt)]
#[async_trait]
pub(crate) impl Response {
    /// Streams the body into the file at `path`, truncating the file if it
    /// already exists.
    async fn read_to_file(self, path: &Path) -> Result<u64> {
        let file = fs::File::create(path).await?;

        let mut stream = self.bytes_stream();

        let mut file = tokio::io::BufWriter::with_capacity(
            64 * 1024, // 64 KB
            file,
        );

        let mut written = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(err_ctx!(HttpClientError::ReadPayload))?;
            file.write_all(&chunk)
                .await
                .fatal_ctx(|| format!("Failed to write HTTP stream chunk to {path:?}"))?;
            written += chunk.len() as u64;
        }

        file.flush()
            .await
            .fatal_ctx(|| format!("Failed to flush the file {path:?} written from HTTP stream"))?;

        Ok(written)
    }
}
