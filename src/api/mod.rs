pub mod discogs;
pub mod mock;

use crate::error::{Error, Result};
use crate::models::Release;
use std::path::PathBuf;
use url::Url;

/// Where a release document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseRef {
    /// `file:<path>` to a saved release JSON.
    File(PathBuf),
    /// Discogs release id.
    Id(u64),
}

impl ReleaseRef {
    /// Accepts `file:<path>`, `16215626`, `r16215626`,
    /// `https://api.discogs.com/releases/16215626` and
    /// `https://www.discogs.com/release/16215626-Pink-Floyd-Wish-You-Were-Here`.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(path) = s.strip_prefix("file:") {
            return Ok(ReleaseRef::File(PathBuf::from(path)));
        }
        if let Ok(id) = s.strip_prefix('r').unwrap_or(s).parse::<u64>() {
            return Ok(ReleaseRef::Id(id));
        }

        let invalid = || Error::InvalidReleaseRef(s.to_string());
        let url = Url::parse(s).map_err(|_| invalid())?;
        let mut segments = url.path_segments().ok_or_else(invalid)?;
        while let Some(segment) = segments.next() {
            if segment == "release" || segment == "releases" {
                let digits: String = segments.next().unwrap_or_default().chars().take_while(char::is_ascii_digit).collect();
                return digits.parse().map(ReleaseRef::Id).map_err(|_| invalid());
            }
        }
        Err(invalid())
    }
}

/// Something that can produce a release by its Discogs id.
/// Implementations: discogs::DiscogsProvider, mock::MockSource.
#[async_trait::async_trait]
pub trait ReleaseSource: Send + Sync {
    async fn fetch_release(&self, id: u64) -> Result<Release>;

    /// Return the source's name (for logging)
    fn name(&self) -> &str;
}

/// Resolve a reference: local files are read directly, ids go to `source`.
pub async fn get_release<S: ReleaseSource + ?Sized>(source: &S, reference: &ReleaseRef) -> Result<Release> {
    match reference {
        ReleaseRef::File(path) => {
            tracing::debug!("reading release from {}", path.display());
            let s = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&s)?)
        }
        ReleaseRef::Id(id) => {
            tracing::info!("fetching release {} from {}", id, source.name());
            source.fetch_release(*id).await
        }
    }
}
