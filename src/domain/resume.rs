//! Profile data behind the home page: hero text, work and education
//! timelines, projects, tech stack and contact links.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

const LINK_SCHEMES: [&str; 4] = ["http", "https", "mailto", "tel"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResumeError {
    #[error("resume is missing a name")]
    MissingName,
    #[error("invalid link `{url}` in {field}: {reason}")]
    InvalidLink {
        field: &'static str,
        url: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeData {
    pub name: String,
    pub location: Option<String>,
    pub location_link: Option<String>,
    /// One-line pitch under the greeting.
    pub description: String,
    /// Longer About text. Blank lines separate paragraphs.
    pub summary: String,
    pub avatar_url: Option<String>,
    pub contact: Contact,
    pub work: Vec<WorkEntry>,
    pub education: Vec<EducationEntry>,
    pub projects: Vec<Project>,
    pub tech_stack: Vec<TechGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub email: Option<String>,
    pub tel: Option<String>,
    pub social: Vec<SocialLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkEntry {
    pub company: String,
    pub href: Option<String>,
    pub title: String,
    pub location: Option<String>,
    pub start: String,
    /// `None` while the role is current.
    pub end: Option<String>,
    pub badges: Vec<String>,
    pub bullets: Vec<String>,
}

impl WorkEntry {
    pub fn period(&self) -> String {
        period(&self.start, self.end.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub school: String,
    pub href: Option<String>,
    pub degree: String,
    pub start: String,
    pub end: Option<String>,
}

impl EducationEntry {
    pub fn period(&self) -> String {
        period(&self.start, self.end.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub title: String,
    pub href: Option<String>,
    pub dates: String,
    pub active: bool,
    pub description: String,
    pub technologies: Vec<String>,
    pub links: Vec<ProjectLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectLink {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechGroup {
    pub name: String,
    pub items: Vec<String>,
}

impl ResumeData {
    /// The resume shipped with the site. Replace it with a resume file via
    /// `content.resume`.
    pub fn placeholder() -> Self {
        Self {
            name: "Your Name".to_string(),
            location: Some("Your City".to_string()),
            location_link: None,
            description: "Developer writing about the web, and about everything else."
                .to_string(),
            summary: concat!(
                "Write your personal story here.\n\n",
                "This text appears in the expandable About section."
            )
            .to_string(),
            avatar_url: None,
            contact: Contact {
                email: Some("you@example.com".to_string()),
                tel: None,
                social: vec![SocialLink {
                    name: "GitHub".to_string(),
                    url: "https://github.com/yourusername".to_string(),
                }],
            },
            work: Vec::new(),
            education: Vec::new(),
            projects: Vec::new(),
            tech_stack: Vec::new(),
        }
    }

    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }

    pub fn summary_paragraphs(&self) -> Vec<String> {
        self.summary
            .split("\n\n")
            .map(str::trim)
            .filter(|paragraph| !paragraph.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Reject a resume the home page could not render sensibly.
    pub fn validate(&self) -> Result<(), ResumeError> {
        if self.name.trim().is_empty() {
            return Err(ResumeError::MissingName);
        }

        let optional_links = [
            ("location_link", self.location_link.as_deref()),
            ("avatar_url", self.avatar_url.as_deref()),
        ];
        for (field, link) in optional_links {
            if let Some(url) = link {
                check_link(field, url, &["http", "https"])?;
            }
        }

        for social in &self.contact.social {
            check_link("contact.social", &social.url, &LINK_SCHEMES)?;
        }
        for work in &self.work {
            if let Some(href) = work.href.as_deref() {
                check_link("work.href", href, &LINK_SCHEMES)?;
            }
        }
        for education in &self.education {
            if let Some(href) = education.href.as_deref() {
                check_link("education.href", href, &LINK_SCHEMES)?;
            }
        }
        for project in &self.projects {
            if let Some(href) = project.href.as_deref() {
                check_link("projects.href", href, &LINK_SCHEMES)?;
            }
            for link in &project.links {
                check_link("projects.links", &link.href, &LINK_SCHEMES)?;
            }
        }

        Ok(())
    }
}

fn period(start: &str, end: Option<&str>) -> String {
    format!("{start} - {}", end.unwrap_or("Present"))
}

fn check_link(field: &'static str, raw: &str, schemes: &[&str]) -> Result<(), ResumeError> {
    let invalid = |reason: String| ResumeError::InvalidLink {
        field,
        url: raw.to_string(),
        reason,
    };

    // Site-relative paths such as `/me.jpeg` are fine.
    if raw.starts_with('/') && !raw.starts_with("//") {
        return Ok(());
    }

    let url = Url::parse(raw).map_err(|err| invalid(err.to_string()))?;
    if schemes.contains(&url.scheme()) {
        Ok(())
    } else {
        Err(invalid(format!("unsupported scheme `{}`", url.scheme())))
    }
}
