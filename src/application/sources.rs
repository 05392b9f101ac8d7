//! Source traits describing where post records come from.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::posts::{LocalPostRecord, RemotePostRecord};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{source_name} post source unavailable: {message}")]
    Unavailable {
        source_name: &'static str,
        message: String,
    },
}

impl SourceError {
    pub fn unavailable(source_name: &'static str, message: impl Into<String>) -> Self {
        Self::Unavailable {
            source_name,
            message: message.into(),
        }
    }
}

/// Supplies locally authored posts, in a stable source order.
#[async_trait]
pub trait LocalPostSource: Send + Sync {
    async fn local_posts(&self) -> Result<Vec<LocalPostRecord>, SourceError>;
}

/// Supplies pointers to externally published posts.
#[async_trait]
pub trait RemotePostSource: Send + Sync {
    async fn remote_posts(&self) -> Result<Vec<RemotePostRecord>, SourceError>;
}
