use super::ReleaseSource;
use crate::error::{Error, Result};
use crate::models::Release;
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::info;

/// Serves canned releases; used in tests and offline runs.
#[derive(Default)]
pub struct MockSource {
    releases: HashMap<u64, Release>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_release(mut self, id: u64, release: Release) -> Self {
        self.releases.insert(id, release);
        self
    }
}

#[async_trait]
impl ReleaseSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_release(&self, id: u64) -> Result<Release> {
        info!("MockSource: fetch_release {}", id);
        self.releases
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::InvalidReleaseRef(format!("mock has no release {}", id)))
    }
}
