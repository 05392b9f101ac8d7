//! Post records as supplied by the two sources, and the unified post shape the
//! pipeline hands to the presenter.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use time::{
    Date, OffsetDateTime, format_description::FormatItem, format_description::well_known::Rfc3339,
    macros::format_description,
};
use url::Url;

use super::error::DomainError;

pub const ISO_DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");
pub const HUMAN_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[month repr:long] [day padding:none], [year]");

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Where a post came from. Local posts live in the site's own content
/// directory; remote posts are pointers to articles published elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Local,
    Remote,
}

impl Origin {
    pub fn as_str(self) -> &'static str {
        match self {
            Origin::Local => "local",
            Origin::Remote => "remote",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    WebsiteDevelopment,
    LifeThoughts,
    MediumArticles,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::WebsiteDevelopment,
        Category::LifeThoughts,
        Category::MediumArticles,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Category::WebsiteDevelopment => "website-development",
            Category::LifeThoughts => "life-thoughts",
            Category::MediumArticles => "medium-articles",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::WebsiteDevelopment => "Website Development",
            Category::LifeThoughts => "Life & Thoughts",
            Category::MediumArticles => "Medium Articles",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.slug() == value)
            .ok_or_else(|| format!("unknown category `{value}`"))
    }
}

/// Front matter of a locally authored post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocalPostMetadata {
    pub title: Option<String>,
    pub published_at: Option<String>,
    pub summary: Option<String>,
    pub tags: Vec<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalPostRecord {
    pub slug: String,
    pub metadata: LocalPostMetadata,
    /// Markdown body following the front matter.
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemotePostRecord {
    pub title: Option<String>,
    pub url: Option<String>,
    #[serde(alias = "publishedAt")]
    pub published_at: Option<String>,
    pub summary: Option<String>,
    pub tags: Vec<String>,
}

/// A post after aggregation, before a category has been derived for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostEntry {
    pub origin: Origin,
    pub identifier: String,
    pub title: String,
    pub summary: String,
    pub published_at: Date,
    pub tags: Vec<String>,
    pub target_url: String,
}

impl PostEntry {
    pub fn from_local(record: &LocalPostRecord) -> Result<Self, DomainError> {
        let slug = record.slug.as_str();
        if slug.trim().is_empty() {
            return Err(DomainError::malformed(Origin::Local, None, "missing slug"));
        }
        // The slug is the lookup key for `/blog/{slug}`, so it is used verbatim.
        if slug.trim() != slug {
            return Err(DomainError::malformed(
                Origin::Local,
                Some(slug),
                "slug has surrounding whitespace",
            ));
        }

        let metadata = &record.metadata;
        let title = required_title(Origin::Local, slug, metadata.title.as_deref())?;
        let published_at = required_date(Origin::Local, slug, metadata.published_at.as_deref())?;

        Ok(Self {
            origin: Origin::Local,
            identifier: slug.to_string(),
            title,
            summary: metadata.summary.clone().unwrap_or_default(),
            published_at,
            tags: metadata.tags.clone(),
            target_url: format!("/blog/{slug}"),
        })
    }

    pub fn from_remote(record: &RemotePostRecord) -> Result<Self, DomainError> {
        let url = record
            .url
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                DomainError::malformed(Origin::Remote, record.title.as_deref(), "missing url")
            })?;
        external_url(url)
            .map_err(|reason| DomainError::malformed(Origin::Remote, Some(url), reason))?;

        let title = required_title(Origin::Remote, url, record.title.as_deref())?;
        let published_at = required_date(Origin::Remote, url, record.published_at.as_deref())?;

        Ok(Self {
            origin: Origin::Remote,
            identifier: url.to_string(),
            title,
            summary: record.summary.clone().unwrap_or_default(),
            published_at,
            tags: record.tags.clone(),
            target_url: url.to_string(),
        })
    }

    pub fn with_category(self, category: Category) -> Post {
        Post {
            origin: self.origin,
            identifier: self.identifier,
            title: self.title,
            summary: self.summary,
            published_at: self.published_at,
            tags: self.tags,
            target_url: self.target_url,
            category,
        }
    }
}

/// The unified, categorized post consumed by the presenter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub origin: Origin,
    pub identifier: String,
    pub title: String,
    pub summary: String,
    #[serde(with = "iso_date")]
    pub published_at: Date,
    pub tags: Vec<String>,
    pub target_url: String,
    pub category: Category,
}

impl Post {
    pub fn is_external(&self) -> bool {
        self.origin == Origin::Remote
    }

    /// Tags joined by a single space, lower-cased, as exposed to client-side search.
    pub fn search_tags(&self) -> String {
        self.tags.join(" ").to_lowercase()
    }
}

fn required_title(
    origin: Origin,
    identifier: &str,
    title: Option<&str>,
) -> Result<String, DomainError> {
    match title.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(DomainError::malformed(
            origin,
            Some(identifier),
            "missing title",
        )),
    }
}

/// Remote posts link off-site, so only absolute http(s) URLs are accepted.
fn external_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw).map_err(|err| format!("invalid url: {err}"))?;
    match url.scheme() {
        "http" | "https" if url.host().is_some() => Ok(url),
        "http" | "https" => Err("url has no host".to_string()),
        scheme => Err(format!("unsupported url scheme `{scheme}`")),
    }
}

fn required_date(
    origin: Origin,
    identifier: &str,
    raw: Option<&str>,
) -> Result<Date, DomainError> {
    let raw = raw
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| DomainError::malformed(origin, Some(identifier), "missing publish date"))?;

    parse_published_date(raw)
        .map_err(|reason| DomainError::malformed(origin, Some(identifier), reason))
}

/// Parse an ISO-8601 calendar date (`2024-01-31`) or an RFC 3339 timestamp,
/// keeping only the date part.
pub fn parse_published_date(raw: &str) -> Result<Date, String> {
    let trimmed = raw.trim();
    if let Ok(date) = Date::parse(trimmed, ISO_DATE_FORMAT) {
        return Ok(date);
    }

    OffsetDateTime::parse(trimmed, &Rfc3339)
        .map(|timestamp| timestamp.date())
        .map_err(|err| format!("invalid publish date `{trimmed}`: {err}"))
}

pub fn format_iso_date(date: Date) -> String {
    date.format(ISO_DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

pub fn format_human_date(date: Date) -> String {
    date.format(HUMAN_DATE_FORMAT)
        .unwrap_or_else(|_| format_iso_date(date))
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    fn local(slug: &str, title: Option<&str>, published_at: Option<&str>) -> LocalPostRecord {
        LocalPostRecord {
            slug: slug.to_string(),
            metadata: LocalPostMetadata {
                title: title.map(str::to_string),
                published_at: published_at.map(str::to_string),
                summary: Some("summary".to_string()),
                tags: vec!["React".to_string()],
                image: None,
            },
            content: String::new(),
        }
    }

    #[test]
    fn local_record_routes_to_blog_path() {
        let entry = PostEntry::from_local(&local("hello-world", Some("Hello"), Some("2024-03-01")))
            .expect("valid record");

        assert_eq!(entry.origin, Origin::Local);
        assert_eq!(entry.identifier, "hello-world");
        assert_eq!(entry.target_url, "/blog/hello-world");
        assert_eq!(entry.published_at, date!(2024 - 03 - 01));
        assert_eq!(entry.summary, "summary");
    }

    #[test]
    fn remote_record_uses_url_as_identifier_and_target() {
        let record = RemotePostRecord {
            title: Some("Elsewhere".to_string()),
            url: Some("https://medium.com/@me/elsewhere".to_string()),
            published_at: Some("2023-12-24".to_string()),
            summary: None,
            tags: Vec::new(),
        };

        let entry = PostEntry::from_remote(&record).expect("valid record");
        assert_eq!(entry.origin, Origin::Remote);
        assert_eq!(entry.identifier, "https://medium.com/@me/elsewhere");
        assert_eq!(entry.target_url, entry.identifier);
        assert_eq!(entry.summary, "");
    }

    #[test]
    fn missing_title_is_malformed() {
        let err = PostEntry::from_local(&local("untitled", None, Some("2024-01-01")))
            .expect_err("title is required");
        assert!(err.to_string().contains("missing title"));
        assert_eq!(err.origin(), Origin::Local);
    }

    #[test]
    fn blank_title_is_malformed() {
        let err = PostEntry::from_local(&local("blank", Some("   "), Some("2024-01-01")))
            .expect_err("title must be non-empty");
        assert!(err.to_string().contains("missing title"));
    }

    #[test]
    fn missing_date_is_malformed() {
        let err = PostEntry::from_local(&local("undated", Some("Undated"), None))
            .expect_err("date is required");
        assert!(err.to_string().contains("missing publish date"));
    }

    #[test]
    fn unparseable_date_is_malformed() {
        let err = PostEntry::from_local(&local("bad-date", Some("Bad"), Some("yesterday")))
            .expect_err("date must parse");
        assert!(err.to_string().contains("invalid publish date"));
    }

    #[test]
    fn remote_without_url_is_malformed() {
        let record = RemotePostRecord {
            title: Some("Nowhere".to_string()),
            published_at: Some("2024-01-01".to_string()),
            ..Default::default()
        };
        let err = PostEntry::from_remote(&record).expect_err("url is required");
        assert!(err.to_string().contains("missing url"));
    }

    #[test]
    fn slug_with_surrounding_whitespace_is_malformed() {
        let err = PostEntry::from_local(&local("spaced ", Some("Spaced"), Some("2024-01-01")))
            .expect_err("slug must be usable verbatim");
        assert!(err.to_string().contains("surrounding whitespace"));
    }

    #[test]
    fn remote_url_must_be_http_or_https() {
        for url in ["javascript:alert(1)", "/blog/relative", "mailto:me@example.com"] {
            let record = RemotePostRecord {
                title: Some("Sneaky".to_string()),
                url: Some(url.to_string()),
                published_at: Some("2024-01-01".to_string()),
                ..Default::default()
            };
            let err = PostEntry::from_remote(&record).expect_err("non-web url is rejected");
            assert_eq!(err.origin(), Origin::Remote, "{url}");
        }
    }

    #[test]
    fn rfc3339_timestamps_keep_their_date() {
        let parsed = parse_published_date("2024-05-06T22:10:00Z").expect("timestamp");
        assert_eq!(parsed, date!(2024 - 05 - 06));
    }

    #[test]
    fn human_date_format_matches_listing() {
        assert_eq!(format_human_date(date!(2024 - 01 - 01)), "January 1, 2024");
    }

    #[test]
    fn category_slugs_round_trip_through_from_str() {
        for category in Category::ALL {
            assert_eq!(category.slug().parse::<Category>(), Ok(category));
        }
        assert!("all".parse::<Category>().is_err());
    }

    #[test]
    fn search_tags_are_space_joined_and_lowercased() {
        let post = PostEntry::from_local(&local("tagged", Some("Tagged"), Some("2024-01-01")))
            .expect("valid record")
            .with_category(Category::WebsiteDevelopment);
        assert_eq!(post.search_tags(), "react");
    }
}
