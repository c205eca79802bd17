use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

use crate::error::FetchError;

/// Where documents come from: an http(s) base URL or a local directory.
#[derive(Debug, Clone)]
pub enum ContentSource {
    Http { client: reqwest::Client, base: String },
    Dir(PathBuf),
}

impl ContentSource {
    pub fn from_root(root: &str, timeout: Duration) -> Result<Self, FetchError> {
        if root.starts_with("http://") || root.starts_with("https://") {
            let client = reqwest::Client::builder().timeout(timeout).build()?;
            Ok(Self::Http {
                client,
                base: root.to_string(),
            })
        } else {
            Ok(Self::Dir(PathBuf::from(root)))
        }
    }

    /// Fetch one document's text. Any error means "not found" to the caller.
    pub async fn fetch(&self, path: &str) -> Result<String, FetchError> {
        match self {
            Self::Http { client, base } => {
                let url = join_url(base, path);
                debug!("GET {}", url);
                let res = client.get(&url).send().await?;
                let status = res.status();
                if !status.is_success() {
                    return Err(FetchError::Status {
                        url,
                        status: status.as_u16(),
                    });
                }
                Ok(res.text().await?)
            }
            Self::Dir(dir) => {
                let file = dir.join(path);
                debug!("read {}", file.display());
                tokio::fs::read_to_string(&file)
                    .await
                    .map_err(|source| FetchError::Io {
                        path: file.display().to_string(),
                        source,
                    })
            }
        }
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
