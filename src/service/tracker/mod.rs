pub mod linear;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::{CreatedIssue, IssuePayload, Res};

// Traits.

/// Generic issue-tracker trait that clients must implement.
///
/// One operation: create an issue from a typed payload, returning a handle for
/// the created issue or a structured error.
#[async_trait]
pub trait GenericTrackerClient: Send + Sync + 'static {
    /// Create an issue in the tracker.
    async fn create_issue(&self, payload: &IssuePayload) -> Res<CreatedIssue>;
}

// Structs.

/// Tracker client for the application.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct TrackerClient {
    inner: Arc<dyn GenericTrackerClient>,
}

impl Deref for TrackerClient {
    type Target = dyn GenericTrackerClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl TrackerClient {
    pub fn new(inner: Arc<dyn GenericTrackerClient>) -> Self {
        Self { inner }
    }
}
