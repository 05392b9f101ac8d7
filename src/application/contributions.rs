use std::sync::Arc;

use async_trait::async_trait;
use metrics::counter;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::contributions::{ContributionCalendar, GraphCell};

#[derive(Debug, Error)]
pub enum ContributionsError {
    #[error("contributions request failed: {0}")]
    Transport(String),
    #[error("contributions endpoint answered with status {0}")]
    Status(u16),
    #[error("contributions payload could not be read: {0}")]
    Payload(String),
}

/// Fetches the contribution calendar of a single user.
#[async_trait]
pub trait ContributionsProvider: Send + Sync {
    async fn fetch(&self, username: &str) -> Result<ContributionCalendar, ContributionsError>;
}

#[derive(Debug, Clone, Serialize)]
pub struct ContributionGraph {
    pub username: String,
    pub total: u64,
    pub weeks: Vec<Vec<GraphCell>>,
}

impl ContributionGraph {
    pub fn from_calendar(username: &str, calendar: &ContributionCalendar) -> Self {
        Self {
            username: username.to_string(),
            total: calendar.total(),
            weeks: calendar.weeks(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }
}

#[derive(Clone)]
pub struct ContributionsService {
    provider: Option<Arc<dyn ContributionsProvider>>,
    username: Option<String>,
}

impl ContributionsService {
    pub fn new(provider: Arc<dyn ContributionsProvider>, username: impl Into<String>) -> Self {
        Self {
            provider: Some(provider),
            username: Some(username.into()),
        }
    }

    /// A service that always reports an empty graph.
    pub fn disabled() -> Self {
        Self {
            provider: None,
            username: None,
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Fetch the graph. Any failure degrades to an empty graph.
    pub async fn graph(&self) -> Option<ContributionGraph> {
        let (Some(provider), Some(username)) = (self.provider.as_ref(), self.username.as_deref())
        else {
            debug!(target = "folio::contributions", "contribution graph disabled");
            return None;
        };

        let calendar = match provider.fetch(username).await {
            Ok(calendar) => calendar,
            Err(err) => {
                warn!(
                    target = "folio::contributions",
                    username,
                    error = %err,
                    "failed to fetch contribution calendar"
                );
                counter!("folio_source_unavailable_total", "source" => "contributions")
                    .increment(1);
                ContributionCalendar::empty()
            }
        };

        Some(ContributionGraph::from_calendar(username, &calendar))
    }
}
