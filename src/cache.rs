//! Document cache: one raw source document per category, fetched at most once.
//!
//! The presence of `<category>.cache` is the only freshness signal. There is
//! no TTL and no revalidation; delete the file to force a refetch.

use crate::error::{Error, Result};
use crate::registry::Category;
use futures::StreamExt;
use reqwest::Client;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// File-backed cache rooted at a directory (the working directory by default).
pub struct DocumentCache {
    dir: PathBuf,
    client: Client,
}

impl DocumentCache {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("winerr/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            dir: dir.into(),
            client,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where `category`'s document is (or will be) cached
    pub fn path_for(&self, category: &Category) -> PathBuf {
        self.dir.join(category.cache_file_name())
    }

    pub async fn is_cached(&self, category: &Category) -> bool {
        fs::try_exists(self.path_for(category))
            .await
            .unwrap_or(false)
    }

    /// Return the category's raw document, fetching and caching it first if
    /// no cache file exists yet.
    pub async fn obtain(&self, category: &Category) -> Result<Vec<u8>> {
        let path = self.path_for(category);

        if self.is_cached(category).await {
            debug!("File already exists: {}", path.display());
        } else {
            let url = category.source_url()?;
            info!("Retrieving URL: {}", url);
            self.download(url.as_str(), &path).await?;
            info!("Created {}", path.display());
        }

        Ok(fs::read(&path).await?)
    }

    /// Stream the response into `<path>.part`, then rename into place.
    /// Nothing is left behind unless the whole body was written.
    async fn download(&self, url: &str, path: &Path) -> Result<()> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let part = partial_path(path);
        let written = write_stream(response, &part).await;

        match written {
            Ok(bytes) => {
                debug!("Fetched {} bytes from {}", bytes, url);
                fs::rename(&part, path).await?;
                Ok(())
            }
            Err(e) => {
                let _ = fs::remove_file(&part).await;
                Err(e)
            }
        }
    }
}

async fn write_stream(response: reqwest::Response, part: &Path) -> Result<usize> {
    let mut file = fs::File::create(part).await?;
    let mut stream = response.bytes_stream();
    let mut total = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        total += chunk.len();
    }

    file.flush().await?;
    Ok(total)
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Strategy;
    use tempfile::tempdir;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn category(url: String) -> Category {
        Category::new("HRESULT", url, Strategy::Default)
    }

    #[test]
    fn test_partial_path() {
        assert_eq!(
            partial_path(Path::new("/tmp/HRESULT.cache")),
            PathBuf::from("/tmp/HRESULT.cache.part")
        );
    }

    #[tokio::test]
    async fn test_existing_cache_file_is_returned_unchanged() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("HRESULT.cache"), b"<html>cached</html>").unwrap();

        // Unroutable URL: any network access would fail the test.
        let cache = DocumentCache::new(dir.path()).unwrap();
        let doc = cache
            .obtain(&category("http://127.0.0.1:9/never".to_string()))
            .await
            .unwrap();
        assert_eq!(doc, b"<html>cached</html>");
    }

    #[tokio::test]
    async fn test_fetch_then_cache_roundtrip() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/hresult"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<table></table>"))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let cache = DocumentCache::new(dir.path()).unwrap();
        let cat = category(format!("{}/hresult", server.uri()));

        assert!(!cache.is_cached(&cat).await);
        let first = cache.obtain(&cat).await.unwrap();
        assert!(cache.is_cached(&cat).await);
        let second = cache.obtain(&cat).await.unwrap();

        assert_eq!(first, b"<table></table>");
        assert_eq!(first, second);
        assert!(!dir.path().join("HRESULT.cache.part").exists());
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_no_cache_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let cache = DocumentCache::new(dir.path()).unwrap();
        let cat = category(format!("{}/hresult", server.uri()));

        let err = cache.obtain(&cat).await.unwrap_err();
        assert!(matches!(err, Error::HttpStatus { status: 404, .. }));
        assert!(!cache.is_cached(&cat).await);
        assert!(!dir.path().join("HRESULT.cache.part").exists());
    }

    #[tokio::test]
    async fn test_invalid_source_url() {
        let dir = tempdir().unwrap();
        let cache = DocumentCache::new(dir.path()).unwrap();
        let err = cache
            .obtain(&category("not a url".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }
}
