use crate::http::{self, prelude::*};
use crate::prelude::*;
use crate::Result;
use async_trait::async_trait;
use std::path::Path;

/// Retrieves remote resources into local files
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Writes the whole body of the resource at `url` to `dest`, replacing
    /// the existing file. The content is not verified in any way.
    async fn fetch_to_file(&self, url: &url::Url, dest: &Path) -> Result;
}

/// Plain unauthenticated HTTP(S) `GET`
pub struct HttpFetcher {
    http: http::Client,
}

impl HttpFetcher {
    pub fn new(http: http::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch_to_file(&self, url: &url::Url, dest: &Path) -> Result {
        let response = self.http.get(url.clone()).try_send().await?;
        let bytes = response.read_to_file(dest).await?;

        debug!(%url, ?dest, bytes, "Downloaded file");

        Ok(())
    }
}
