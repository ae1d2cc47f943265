//! Read-only document sources: a local directory or a static HTTP host

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::ArchiveError;

/// Read access to a content root. Paths are `/`-separated and relative to it.
pub trait DocumentSource: Send + Sync {
    fn fetch(&self, path: &str) -> impl Future<Output = Result<Vec<u8>, ArchiveError>> + Send;

    fn exists(&self, path: &str) -> impl Future<Output = bool> + Send;

    /// Absolute location of `path`, suitable for handing to another program
    fn locate(&self, path: &str) -> String;
}

#[derive(Clone, Debug)]
pub struct LocalSource {
    root: PathBuf,
}

impl LocalSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        path.split('/')
            .filter(|part| !part.is_empty())
            .fold(self.root.clone(), |acc, part| acc.join(part))
    }
}

impl DocumentSource for LocalSource {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, ArchiveError> {
        tokio::fs::read(self.resolve(path))
            .await
            .map_err(|e| ArchiveError::fetch(path, e))
    }

    async fn exists(&self, path: &str) -> bool {
        tokio::fs::try_exists(self.resolve(path)).await.unwrap_or(false)
    }

    fn locate(&self, path: &str) -> String {
        self.resolve(path).display().to_string()
    }
}

#[derive(Clone, Debug)]
pub struct HttpSource {
    base: Url,
    client: Client,
}

impl HttpSource {
    /// Requests that take longer than `timeout` fail as fetch errors, and
    /// probes that time out count as missing.
    pub fn new(base: &str, timeout: Duration) -> anyhow::Result<Self> {
        // Url::join replaces the last segment unless the base ends in '/'
        let base = if base.ends_with('/') {
            Url::parse(base)?
        } else {
            Url::parse(&format!("{}/", base))?
        };
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { base, client })
    }

    fn url(&self, path: &str) -> Result<Url, ArchiveError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| ArchiveError::fetch(path, e))
    }
}

impl DocumentSource for HttpSource {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, ArchiveError> {
        let url = self.url(path)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ArchiveError::fetch(path, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ArchiveError::fetch(path, format!("HTTP {}", status.as_u16())));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ArchiveError::fetch(path, e))?;
        Ok(body.to_vec())
    }

    async fn exists(&self, path: &str) -> bool {
        let Ok(url) = self.url(path) else {
            return false;
        };
        match self.client.head(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(path, error = %e, "HEAD probe failed");
                false
            }
        }
    }

    fn locate(&self, path: &str) -> String {
        self.url(path)
            .map(|url| url.to_string())
            .unwrap_or_else(|_| path.to_string())
    }
}

/// The source chosen at startup from `content_root`
#[derive(Clone, Debug)]
pub enum ContentSource {
    Local(LocalSource),
    Remote(HttpSource),
}

impl ContentSource {
    pub fn from_root(root: &str, timeout: Duration) -> anyhow::Result<Self> {
        if root.starts_with("http://") || root.starts_with("https://") {
            Ok(ContentSource::Remote(HttpSource::new(root, timeout)?))
        } else {
            Ok(ContentSource::Local(LocalSource::new(root)))
        }
    }

    pub fn local_root(&self) -> Option<&std::path::Path> {
        match self {
            ContentSource::Local(local) => Some(local.root()),
            ContentSource::Remote(_) => None,
        }
    }
}

impl DocumentSource for ContentSource {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, ArchiveError> {
        let result = match self {
            ContentSource::Local(local) => local.fetch(path).await,
            ContentSource::Remote(remote) => remote.fetch(path).await,
        };
        crate::log_fetch_result!(path, result);
        result
    }

    async fn exists(&self, path: &str) -> bool {
        match self {
            ContentSource::Local(local) => local.exists(path).await,
            ContentSource::Remote(remote) => remote.exists(path).await,
        }
    }

    fn locate(&self, path: &str) -> String {
        match self {
            ContentSource::Local(local) => local.locate(path),
            ContentSource::Remote(remote) => remote.locate(path),
        }
    }
}

/// In-memory content root for tests
#[cfg(test)]
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    docs: std::collections::HashMap<String, Vec<u8>>,
}

#[cfg(test)]
impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: &str, body: &str) -> Self {
        self.docs.insert(path.to_string(), body.as_bytes().to_vec());
        self
    }
}

#[cfg(test)]
impl DocumentSource for MemorySource {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, ArchiveError> {
        self.docs
            .get(path)
            .cloned()
            .ok_or_else(|| ArchiveError::fetch(path, "HTTP 404"))
    }

    async fn exists(&self, path: &str) -> bool {
        self.docs.contains_key(path)
    }

    fn locate(&self, path: &str) -> String {
        format!("memory:{}", path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(10);

    /// Accepts connections and never answers them
    async fn silent_host() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn local_source_reads_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("assets/data")).unwrap();
        std::fs::write(dir.path().join("assets/data/a.json"), b"{}").unwrap();

        let source = LocalSource::new(dir.path());
        assert_eq!(source.fetch("assets/data/a.json").await.unwrap(), b"{}");
        assert!(source.exists("assets/data/a.json").await);
        assert!(!source.exists("assets/data/b.json").await);
        assert!(matches!(
            source.fetch("assets/data/b.json").await,
            Err(ArchiveError::Fetch { .. })
        ));
    }

    #[test]
    fn http_source_joins_under_base_path() {
        let source = HttpSource::new("https://example.org/archive", TIMEOUT).unwrap();
        assert_eq!(
            source.locate("assets/audio/icon.opus"),
            "https://example.org/archive/assets/audio/icon.opus"
        );
    }

    #[test]
    fn root_scheme_picks_the_source() {
        assert!(matches!(
            ContentSource::from_root("https://example.org", TIMEOUT).unwrap(),
            ContentSource::Remote(_)
        ));
        let local = ContentSource::from_root("/srv/archive", TIMEOUT).unwrap();
        assert_eq!(local.local_root(), Some(std::path::Path::new("/srv/archive")));
    }

    #[tokio::test]
    async fn silent_host_times_out_instead_of_hanging() {
        let base = silent_host().await;
        let source = HttpSource::new(&base, Duration::from_millis(200)).unwrap();

        let fetched = tokio::time::timeout(Duration::from_secs(5), source.fetch("assets/data/a.json"))
            .await
            .expect("fetch should give up on its own");
        assert!(matches!(fetched, Err(ArchiveError::Fetch { .. })));

        let probed = tokio::time::timeout(Duration::from_secs(5), source.exists("assets/audio/a.opus"))
            .await
            .expect("probe should give up on its own");
        assert!(!probed);
    }
}
