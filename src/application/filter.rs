//! Text search and category selection over an already ordered listing.

use std::{fmt, str::FromStr};

use crate::domain::posts::{Category, Post};

pub const ALL_CATEGORIES_KEY: &str = "all";
pub const ALL_CATEGORIES_LABEL: &str = "All Posts";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategorySelection {
    #[default]
    All,
    Only(Category),
}

impl CategorySelection {
    pub fn key(self) -> &'static str {
        match self {
            CategorySelection::All => ALL_CATEGORIES_KEY,
            CategorySelection::Only(category) => category.slug(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategorySelection::All => ALL_CATEGORIES_LABEL,
            CategorySelection::Only(category) => category.label(),
        }
    }

    /// Every option of the category select, "all" first.
    pub fn options() -> Vec<CategorySelection> {
        std::iter::once(CategorySelection::All)
            .chain(Category::ALL.into_iter().map(CategorySelection::Only))
            .collect()
    }

    pub fn admits(self, category: Category) -> bool {
        match self {
            CategorySelection::All => true,
            CategorySelection::Only(selected) => selected == category,
        }
    }
}

impl fmt::Display for CategorySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CategorySelection {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed == ALL_CATEGORIES_KEY {
            return Ok(CategorySelection::All);
        }
        trimmed.parse().map(CategorySelection::Only)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostQuery {
    search: String,
    pub category: CategorySelection,
}

impl PostQuery {
    pub fn new(search: Option<&str>, category: CategorySelection) -> Self {
        Self {
            search: search.map(|term| term.trim().to_lowercase()).unwrap_or_default(),
            category,
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn is_unfiltered(&self) -> bool {
        self.search.is_empty() && self.category == CategorySelection::All
    }

    pub fn matches(&self, post: &Post) -> bool {
        self.category.admits(post.category) && self.matches_search(post)
    }

    fn matches_search(&self, post: &Post) -> bool {
        if self.search.is_empty() {
            return true;
        }
        post.title.to_lowercase().contains(&self.search)
            || post.summary.to_lowercase().contains(&self.search)
            || post.search_tags().contains(&self.search)
    }

    pub fn apply(&self, posts: &[Post]) -> Vec<Post> {
        posts
            .iter()
            .filter(|post| self.matches(post))
            .cloned()
            .collect()
    }
}
