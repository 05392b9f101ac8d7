//! Aggregation, categorization and ordering of posts from both sources.
//!
//! Each stage takes its input by value or by shared reference and returns a
//! fresh sequence. Nothing here performs I/O.

use metrics::counter;
use tracing::warn;

use crate::domain::{
    categories::CategoryRules,
    error::DomainError,
    posts::{LocalPostRecord, Post, PostEntry, RemotePostRecord},
};

/// Merge both sources into one sequence: local records first, in source
/// order, followed by remote records in source order.
///
/// Fails on the first malformed record. Identifiers are not checked for
/// collisions across sources.
pub fn aggregate(
    local: &[LocalPostRecord],
    remote: &[RemotePostRecord],
) -> Result<Vec<PostEntry>, DomainError> {
    let mut entries = Vec::with_capacity(local.len() + remote.len());
    for record in local {
        entries.push(PostEntry::from_local(record)?);
    }
    for record in remote {
        entries.push(PostEntry::from_remote(record)?);
    }
    Ok(entries)
}

/// Result of [`aggregate_lenient`]: the well-formed entries plus the errors
/// for every record that was left out.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub entries: Vec<PostEntry>,
    pub excluded: Vec<DomainError>,
}

/// Like [`aggregate`], but a malformed record is set aside instead of
/// failing the whole merge.
pub fn aggregate_lenient(local: &[LocalPostRecord], remote: &[RemotePostRecord]) -> Aggregation {
    let mut aggregation = Aggregation {
        entries: Vec::with_capacity(local.len() + remote.len()),
        excluded: Vec::new(),
    };

    let converted = local
        .iter()
        .map(PostEntry::from_local)
        .chain(remote.iter().map(PostEntry::from_remote));

    for result in converted {
        match result {
            Ok(entry) => aggregation.entries.push(entry),
            Err(err) => aggregation.excluded.push(err),
        }
    }

    aggregation
}

pub fn categorize_all(entries: Vec<PostEntry>, rules: &CategoryRules) -> Vec<Post> {
    entries
        .into_iter()
        .map(|entry| {
            let category = rules.categorize(&entry);
            entry.with_category(category)
        })
        .collect()
}

/// Newest first. The sort is stable, so posts sharing a date keep their
/// aggregation order.
pub fn sort_descending_by_date(mut posts: Vec<Post>) -> Vec<Post> {
    posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    posts
}

/// The ordered, categorized listing plus whatever had to be excluded on the way.
#[derive(Debug, Clone, Default)]
pub struct BlogIndex {
    pub posts: Vec<Post>,
    pub excluded: Vec<DomainError>,
}

/// Run aggregate → categorize → sort, logging and dropping malformed records.
pub fn build_index(
    local: &[LocalPostRecord],
    remote: &[RemotePostRecord],
    rules: &CategoryRules,
) -> BlogIndex {
    let Aggregation { entries, excluded } = aggregate_lenient(local, remote);

    for err in &excluded {
        warn!(
            target = "folio::pipeline",
            origin = %err.origin(),
            error = %err,
            "excluding malformed post record"
        );
        counter!("folio_records_excluded_total", "origin" => err.origin().as_str()).increment(1);
    }

    let posts = sort_descending_by_date(categorize_all(entries, rules));
    counter!("folio_posts_aggregated_total").increment(posts.len() as u64);

    BlogIndex { posts, excluded }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;
    use crate::domain::posts::{Category, LocalPostMetadata, Origin};

    fn local(slug: &str, title: &str, date: &str, tags: &[&str]) -> LocalPostRecord {
        LocalPostRecord {
            slug: slug.to_string(),
            metadata: LocalPostMetadata {
                title: Some(title.to_string()),
                published_at: Some(date.to_string()),
                summary: Some(format!("About {title}")),
                tags: tags.iter().map(|tag| tag.to_string()).collect(),
                image: None,
            },
            content: String::new(),
        }
    }

    fn remote(url: &str, title: &str, date: &str) -> RemotePostRecord {
        RemotePostRecord {
            title: Some(title.to_string()),
            url: Some(url.to_string()),
            published_at: Some(date.to_string()),
            summary: Some(String::new()),
            tags: vec!["Maps".to_string()],
        }
    }

    #[test]
    fn aggregate_keeps_every_record_local_first() {
        let local_records = vec![
            local("b", "B", "2024-01-02", &[]),
            local("a", "A", "2024-01-01", &[]),
        ];
        let remote_records = vec![remote("https://medium.com/@me/c", "C", "2024-01-03")];

        let entries = aggregate(&local_records, &remote_records).expect("well-formed input");
        let identifiers: Vec<_> = entries.iter().map(|e| e.identifier.as_str()).collect();
        assert_eq!(identifiers, ["b", "a", "https://medium.com/@me/c"]);
        assert_eq!(entries.len(), local_records.len() + remote_records.len());
    }

    #[test]
    fn aggregate_propagates_malformed_records() {
        let mut broken = local("broken", "Broken", "2024-01-01", &[]);
        broken.metadata.published_at = None;

        let err = aggregate(&[broken], &[]).expect_err("missing date");
        assert!(matches!(
            err,
            DomainError::MalformedRecord {
                origin: Origin::Local,
                ..
            }
        ));
    }

    #[test]
    fn lenient_aggregation_sets_malformed_records_aside() {
        let mut broken = remote("https://medium.com/@me/x", "X", "2024-01-01");
        broken.title = None;

        let aggregation = aggregate_lenient(&[local("ok", "Ok", "2024-01-01", &[])], &[broken]);
        assert_eq!(aggregation.entries.len(), 1);
        assert_eq!(aggregation.excluded.len(), 1);
        assert_eq!(aggregation.excluded[0].origin(), Origin::Remote);
    }

    #[test]
    fn sort_orders_newest_first() {
        let local_records = vec![
            local("jan", "Jan", "2024-01-01", &[]),
            local("mar", "Mar", "2024-03-01", &[]),
            local("feb", "Feb", "2024-02-01", &[]),
        ];
        let entries = aggregate(&local_records, &[]).expect("well-formed input");
        let sorted = sort_descending_by_date(categorize_all(entries, &CategoryRules::standard()));

        let dates: Vec<_> = sorted.iter().map(|post| post.published_at).collect();
        assert_eq!(
            dates,
            [
                date!(2024 - 03 - 01),
                date!(2024 - 02 - 01),
                date!(2024 - 01 - 01)
            ]
        );
    }

    #[test]
    fn ties_keep_aggregation_order() {
        let index = build_index(
            &[local("a", "A", "2024-01-01", &[])],
            &[remote("https://medium.com/@me/a", "A elsewhere", "2024-01-01")],
            &CategoryRules::standard(),
        );

        let origins: Vec<_> = index.posts.iter().map(|post| post.origin).collect();
        assert_eq!(origins, [Origin::Local, Origin::Remote]);
    }

    #[test]
    fn build_index_categorizes_every_post() {
        let index = build_index(
            &[
                local("react", "Hooks", "2024-01-05", &["React"]),
                local("year", "My Year in Review", "2024-01-04", &["Personal"]),
            ],
            &[remote(
                "https://medium.com/@me/maps",
                "Exploring Maps and Architecture",
                "2024-01-03",
            )],
            &CategoryRules::standard(),
        );

        let categories: Vec<_> = index.posts.iter().map(|post| post.category).collect();
        assert_eq!(
            categories,
            [
                Category::WebsiteDevelopment,
                Category::LifeThoughts,
                Category::MediumArticles
            ]
        );
        assert!(index.excluded.is_empty());
    }

    #[test]
    fn pipeline_is_idempotent() {
        let local_records = vec![
            local("one", "One", "2024-02-01", &["API"]),
            local("two", "Two", "2024-02-01", &[]),
        ];
        let remote_records = vec![remote("https://medium.com/@me/three", "Three", "2024-03-01")];
        let rules = CategoryRules::standard();

        let first = build_index(&local_records, &remote_records, &rules);
        let second = build_index(&local_records, &remote_records, &rules);
        assert_eq!(first.posts, second.posts);
    }
}
