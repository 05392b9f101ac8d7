use url::Url;

use crate::presentation::views::LayoutChrome;

const DEFAULT_DESCRIPTION: &str = "Notes on building for the web, and on everything else.";

/// Builds the shared page chrome (brand, title, canonical link) for the site.
#[derive(Debug, Clone)]
pub struct ChromeService {
    title: String,
    base_url: String,
}

impl ChromeService {
    pub fn new(title: impl Into<String>, base_url: &Url) -> Self {
        Self {
            title: title.into(),
            base_url: normalize_public_site_url(base_url.as_str()),
        }
    }

    /// Chrome for the page at `path`. A `None` title uses the site title alone.
    pub fn load(
        &self,
        page_title: Option<&str>,
        description: Option<&str>,
        path: &str,
    ) -> LayoutChrome {
        let description = description
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(DEFAULT_DESCRIPTION);
        LayoutChrome::new(&self.title, page_title.unwrap_or(&self.title), description)
            .with_canonical(self.canonical_url(path))
    }

    pub fn canonical_url(&self, path: &str) -> String {
        let trimmed = path.trim_start_matches('/');
        if trimmed.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}{trimmed}", self.base_url)
        }
    }
}

fn normalize_public_site_url(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    format!("{trimmed}/")
}
