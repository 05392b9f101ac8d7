//! Sources for externally published posts.

use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::fs;
use tracing::debug;

use crate::application::sources::{RemotePostSource, SourceError};
use crate::domain::posts::RemotePostRecord;

/// The catalog shipped with the site. Replace it with a catalog file via
/// `content.remote_catalog`.
pub fn builtin_catalog() -> Vec<RemotePostRecord> {
    vec![RemotePostRecord {
        title: Some("Your Medium Article Title".to_string()),
        url: Some("https://medium.com/@yourusername/your-article-slug".to_string()),
        published_at: Some("2024-01-01".to_string()),
        summary: Some("Brief description of your Medium article".to_string()),
        tags: vec![
            "Tag1".to_string(),
            "Tag2".to_string(),
            "Category".to_string(),
        ],
    }]
}

/// An immutable, in-memory list of remote posts.
#[derive(Debug, Clone)]
pub struct StaticRemotePostSource {
    posts: Arc<[RemotePostRecord]>,
}

impl StaticRemotePostSource {
    pub fn new(posts: Vec<RemotePostRecord>) -> Self {
        Self {
            posts: posts.into(),
        }
    }

    pub fn builtin() -> Self {
        Self::new(builtin_catalog())
    }
}

#[async_trait]
impl RemotePostSource for StaticRemotePostSource {
    async fn remote_posts(&self) -> Result<Vec<RemotePostRecord>, SourceError> {
        Ok(self.posts.to_vec())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogFile {
    posts: Vec<RemotePostRecord>,
}

/// Parse a TOML catalog made of `[[posts]]` tables.
pub fn parse_catalog(text: &str) -> Result<Vec<RemotePostRecord>, toml::de::Error> {
    toml::from_str::<CatalogFile>(text).map(|catalog| catalog.posts)
}

/// Reads a TOML catalog file on every request, so edits show up without a restart.
#[derive(Debug, Clone)]
pub struct CatalogRemotePostSource {
    path: PathBuf,
}

impl CatalogRemotePostSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RemotePostSource for CatalogRemotePostSource {
    async fn remote_posts(&self) -> Result<Vec<RemotePostRecord>, SourceError> {
        let text = fs::read_to_string(&self.path).await.map_err(|err| {
            SourceError::unavailable(
                "remote",
                format!("cannot read {}: {err}", self.path.display()),
            )
        })?;

        let posts = parse_catalog(&text).map_err(|err| {
            SourceError::unavailable(
                "remote",
                format!("cannot parse {}: {err}", self.path.display()),
            )
        })?;

        debug!(
            target = "folio::remote",
            path = %self.path.display(),
            count = posts.len(),
            "loaded remote catalog"
        );
        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_accepts_both_date_spellings() {
        let posts = parse_catalog(
            r#"
[[posts]]
title = "One"
url = "https://medium.com/@me/one"
published_at = "2024-02-01"
tags = ["Maps"]

[[posts]]
title = "Two"
url = "https://medium.com/@me/two"
publishedAt = "2024-03-01"
summary = "Second"
"#,
        )
        .expect("valid catalog");

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].published_at.as_deref(), Some("2024-02-01"));
        assert_eq!(posts[0].tags, ["Maps"]);
        assert_eq!(posts[1].published_at.as_deref(), Some("2024-03-01"));
        assert_eq!(posts[1].summary.as_deref(), Some("Second"));
    }

    #[test]
    fn empty_catalog_has_no_posts() {
        assert!(parse_catalog("").expect("empty is fine").is_empty());
    }

    #[tokio::test]
    async fn builtin_source_serves_the_shipped_catalog() {
        let posts = StaticRemotePostSource::builtin()
            .remote_posts()
            .await
            .expect("static source never fails");
        assert_eq!(posts, builtin_catalog());
    }

    #[tokio::test]
    async fn missing_catalog_file_is_unavailable() {
        let source = CatalogRemotePostSource::new("/definitely/not/here/catalog.toml");
        let err = source.remote_posts().await.expect_err("missing file");
        assert!(matches!(err, SourceError::Unavailable { .. }));
    }
}
