use std::sync::Arc;

use metrics::counter;
use tracing::{debug, warn};

use crate::application::{
    filter::PostQuery,
    pipeline::{BlogIndex, build_index},
    render::MarkdownRenderer,
    sources::{LocalPostSource, RemotePostSource, SourceError},
};
use crate::domain::{
    categories::CategoryRules,
    posts::{LocalPostRecord, Post, PostEntry, RemotePostRecord},
};

/// A local post together with its rendered body.
#[derive(Debug, Clone)]
pub struct PostDetail {
    pub post: Post,
    pub image: Option<String>,
    pub body_html: String,
}

#[derive(Clone)]
pub struct BlogService {
    local: Arc<dyn LocalPostSource>,
    remote: Arc<dyn RemotePostSource>,
    rules: Arc<CategoryRules>,
    renderer: Arc<MarkdownRenderer>,
}

impl BlogService {
    pub fn new(
        local: Arc<dyn LocalPostSource>,
        remote: Arc<dyn RemotePostSource>,
        rules: Arc<CategoryRules>,
        renderer: Arc<MarkdownRenderer>,
    ) -> Self {
        Self {
            local,
            remote,
            rules,
            renderer,
        }
    }

    /// The full ordered listing. Sources that fail are treated as empty.
    pub async fn index(&self) -> BlogIndex {
        let (local, remote) = self.load_sources().await;
        let index = build_index(&local, &remote, &self.rules);
        debug!(
            target = "folio::blog",
            posts = index.posts.len(),
            excluded = index.excluded.len(),
            "blog index built"
        );
        index
    }

    pub async fn list(&self, query: &PostQuery) -> Vec<Post> {
        let index = self.index().await;
        if query.is_unfiltered() {
            return index.posts;
        }
        query.apply(&index.posts)
    }

    /// Look up a single local post by slug. Malformed or unknown slugs yield `None`.
    pub async fn local_post(&self, slug: &str) -> Option<PostDetail> {
        let records = self.local_records().await;
        let record = records.iter().find(|record| record.slug == slug)?;
        self.detail_for(record)
    }

    /// Every well-formed local post, newest first.
    pub async fn local_post_details(&self) -> Vec<PostDetail> {
        let records = self.local_records().await;
        let mut details: Vec<PostDetail> = records
            .iter()
            .filter_map(|record| self.detail_for(record))
            .collect();
        details.sort_by(|a, b| b.post.published_at.cmp(&a.post.published_at));
        details
    }

    fn detail_for(&self, record: &LocalPostRecord) -> Option<PostDetail> {
        let entry = match PostEntry::from_local(record) {
            Ok(entry) => entry,
            Err(err) => {
                warn!(
                    target = "folio::blog",
                    slug = %record.slug,
                    error = %err,
                    "skipping malformed local post"
                );
                return None;
            }
        };

        let body_html = match self.renderer.render(&record.content) {
            Ok(html) => html,
            Err(err) => {
                warn!(
                    target = "folio::blog",
                    slug = %record.slug,
                    error = %err,
                    "skipping local post whose body failed to render"
                );
                return None;
            }
        };

        let category = self.rules.categorize(&entry);
        Some(PostDetail {
            post: entry.with_category(category),
            image: record.metadata.image.clone(),
            body_html,
        })
    }

    async fn load_sources(&self) -> (Vec<LocalPostRecord>, Vec<RemotePostRecord>) {
        let (local, remote) = tokio::join!(self.local.local_posts(), self.remote.remote_posts());
        (or_empty(local, "local"), or_empty(remote, "remote"))
    }

    async fn local_records(&self) -> Vec<LocalPostRecord> {
        or_empty(self.local.local_posts().await, "local")
    }
}

fn or_empty<T>(result: Result<Vec<T>, SourceError>, source: &'static str) -> Vec<T> {
    match result {
        Ok(records) => records,
        Err(err) => {
            warn!(
                target = "folio::blog",
                source,
                error = %err,
                "post source unavailable; continuing without it"
            );
            counter!("folio_source_unavailable_total", "source" => source).increment(1);
            Vec::new()
        }
    }
}
