//! Filesystem source for locally authored posts.
//!
//! Each `*.md` / `*.mdx` file in the content directory is one post; the file
//! stem is its slug. Files open with a `---` delimited YAML front matter block.

use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use thiserror::Error;
use tokio::fs;
use tracing::{debug, warn};

use crate::application::sources::{LocalPostSource, SourceError};
use crate::domain::posts::{LocalPostMetadata, LocalPostRecord};

const POST_EXTENSIONS: [&str; 2] = ["md", "mdx"];
const FRONT_MATTER_DELIMITER: &str = "---";

#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("file does not start with a `---` front matter block")]
    Missing,
    #[error("front matter is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone)]
pub struct FsLocalPostSource {
    directory: PathBuf,
}

impl FsLocalPostSource {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    async fn post_paths(&self) -> Result<Vec<PathBuf>, SourceError> {
        let mut entries = fs::read_dir(&self.directory).await.map_err(|err| {
            SourceError::unavailable(
                "local",
                format!("cannot read {}: {err}", self.directory.display()),
            )
        })?;

        let mut paths = Vec::new();
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(err) => {
                    return Err(SourceError::unavailable(
                        "local",
                        format!("cannot list {}: {err}", self.directory.display()),
                    ));
                }
            };

            let path = entry.path();
            let is_file = entry
                .file_type()
                .await
                .map(|kind| kind.is_file())
                .unwrap_or(false);
            if is_file && has_post_extension(&path) {
                paths.push(path);
            }
        }

        paths.sort();
        Ok(paths)
    }
}

#[async_trait]
impl LocalPostSource for FsLocalPostSource {
    async fn local_posts(&self) -> Result<Vec<LocalPostRecord>, SourceError> {
        let paths = self.post_paths().await?;
        let mut records = Vec::with_capacity(paths.len());

        for path in paths {
            let Some(slug) = path.file_stem().and_then(OsStr::to_str) else {
                warn!(
                    target = "folio::content",
                    path = %path.display(),
                    "skipping post with a non UTF-8 file name"
                );
                continue;
            };

            let text = match fs::read_to_string(&path).await {
                Ok(text) => text,
                Err(err) => {
                    warn!(
                        target = "folio::content",
                        path = %path.display(),
                        error = %err,
                        "skipping unreadable post file"
                    );
                    continue;
                }
            };

            match parse_post_file(slug, &text) {
                Ok(record) => records.push(record),
                Err(err) => warn!(
                    target = "folio::content",
                    path = %path.display(),
                    error = %err,
                    "skipping post with unusable front matter"
                ),
            }
        }

        debug!(
            target = "folio::content",
            directory = %self.directory.display(),
            count = records.len(),
            "loaded local posts"
        );
        Ok(records)
    }
}

/// Split a post file into its front matter and markdown body.
pub fn parse_post_file(slug: &str, text: &str) -> Result<LocalPostRecord, FrontMatterError> {
    let (front_matter, body) = split_front_matter(text).ok_or(FrontMatterError::Missing)?;

    let metadata = if front_matter.trim().is_empty() {
        LocalPostMetadata::default()
    } else {
        serde_yaml::from_str(front_matter)?
    };

    Ok(LocalPostRecord {
        slug: slug.to_string(),
        metadata,
        content: body.trim_start_matches(['\r', '\n']).to_string(),
    })
}

fn split_front_matter(text: &str) -> Option<(&str, &str)> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let rest = text.strip_prefix(FRONT_MATTER_DELIMITER)?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == FRONT_MATTER_DELIMITER {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

fn has_post_extension(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| POST_EXTENSIONS.contains(&ext))
}
