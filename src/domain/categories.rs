//! Category derivation as an ordered rule table.
//!
//! Rules are evaluated top to bottom and the first match wins; when nothing
//! matches the table's fallback category applies. The table is plain data so
//! callers (and tests) can supply their own.

use std::collections::BTreeSet;

use super::posts::{Category, Origin, PostEntry};

/// Tags that mark a local post as website development work. Matched exactly.
pub const WEBSITE_DEVELOPMENT_TAGS: [&str; 10] = [
    "Web Development",
    "React",
    "Next.js",
    "TypeScript",
    "Three.js",
    "3D Graphics",
    "Maps",
    "GitHub",
    "API",
    "Tutorial",
];

/// Substrings searched for in the lower-cased title.
pub const WEBSITE_DEVELOPMENT_TITLE_TERMS: [&str; 5] =
    ["rubik", "github", "map", "technical", "architecture"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleMatcher {
    /// Matches every post from the given origin.
    Origin(Origin),
    /// Matches when any of the post's tags is in the set (case-sensitive).
    AnyTag(BTreeSet<String>),
    /// Matches when the lower-cased title contains any of the terms.
    TitleContains(Vec<String>),
}

impl RuleMatcher {
    pub fn any_tag<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::AnyTag(tags.into_iter().map(Into::into).collect())
    }

    pub fn title_contains<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::TitleContains(
            terms
                .into_iter()
                .map(|term| term.into().to_lowercase())
                .collect(),
        )
    }

    pub fn matches(&self, origin: Origin, tags: &[String], title: &str) -> bool {
        match self {
            RuleMatcher::Origin(expected) => origin == *expected,
            RuleMatcher::AnyTag(set) => tags.iter().any(|tag| set.contains(tag)),
            RuleMatcher::TitleContains(terms) => {
                let title = title.to_lowercase();
                terms.iter().any(|term| title.contains(term.as_str()))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRule {
    pub matcher: RuleMatcher,
    pub category: Category,
}

impl CategoryRule {
    pub fn new(matcher: RuleMatcher, category: Category) -> Self {
        Self { matcher, category }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRules {
    rules: Vec<CategoryRule>,
    fallback: Category,
}

impl CategoryRules {
    pub fn new(rules: Vec<CategoryRule>, fallback: Category) -> Self {
        Self { rules, fallback }
    }

    /// The site's rule table:
    /// remote origin, then website-development tags, then title terms, else life & thoughts.
    pub fn standard() -> Self {
        Self::new(
            vec![
                CategoryRule::new(
                    RuleMatcher::Origin(Origin::Remote),
                    Category::MediumArticles,
                ),
                CategoryRule::new(
                    RuleMatcher::any_tag(WEBSITE_DEVELOPMENT_TAGS),
                    Category::WebsiteDevelopment,
                ),
                CategoryRule::new(
                    RuleMatcher::title_contains(WEBSITE_DEVELOPMENT_TITLE_TERMS),
                    Category::WebsiteDevelopment,
                ),
            ],
            Category::LifeThoughts,
        )
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn fallback(&self) -> Category {
        self.fallback
    }

    pub fn categorize_parts(&self, origin: Origin, tags: &[String], title: &str) -> Category {
        self.rules
            .iter()
            .find(|rule| rule.matcher.matches(origin, tags, title))
            .map(|rule| rule.category)
            .unwrap_or(self.fallback)
    }

    pub fn categorize(&self, entry: &PostEntry) -> Category {
        self.categorize_parts(entry.origin, &entry.tags, &entry.title)
    }
}

impl Default for CategoryRules {
    fn default() -> Self {
        Self::standard()
    }
}
