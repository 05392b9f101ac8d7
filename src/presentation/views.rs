use crate::application::{
    blog::PostDetail,
    contributions::ContributionGraph,
    error::{ErrorReport, HttpError},
    filter::{CategorySelection, PostQuery},
};
use crate::domain::{
    contributions::{EMPTY_COLOR, GraphCell, LEGEND_COLORS},
    posts::{Post, format_human_date, format_iso_date},
    resume::{EducationEntry, ResumeData, TechGroup, WorkEntry},
};
use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

pub const EMPTY_LISTING_MESSAGE: &str = "No blog posts found.";

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

/// Render a template to a string. Used by the static exporter.
pub fn render_page<T: Template>(template: &T) -> Result<String, TemplateRenderError> {
    template.render().map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_page",
            "Template rendering failed",
            err,
        )
    })
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    render_page(&template).map(Html).map_err(HttpError::from)
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

pub fn render_not_found_response(chrome: LayoutChrome) -> Response {
    let content = ErrorPageView::not_found();
    let view = LayoutContext::new(chrome, content);
    let mut response = render_template_response(ErrorTemplate { view }, StatusCode::NOT_FOUND);
    ErrorReport::from_message(
        "presentation::views::render_not_found_response",
        StatusCode::NOT_FOUND,
        "Resource not found",
    )
    .attach(&mut response);
    response
}

#[derive(Clone)]
pub struct BrandView {
    pub title: String,
    pub href: String,
}

#[derive(Clone)]
pub struct PageMetaView {
    pub title: String,
    pub description: String,
    pub canonical: String,
}

#[derive(Clone)]
pub struct LayoutChrome {
    pub brand: BrandView,
    pub meta: PageMetaView,
}

impl LayoutChrome {
    /// Chrome for a page titled `page_title` under the site named `site_title`.
    pub fn new(site_title: &str, page_title: &str, description: &str) -> Self {
        let title = if page_title == site_title {
            site_title.to_string()
        } else {
            format!("{page_title} | {site_title}")
        };

        Self {
            brand: BrandView {
                title: site_title.to_string(),
                href: "/".to_string(),
            },
            meta: PageMetaView {
                title,
                description: description.to_string(),
                canonical: String::new(),
            },
        }
    }

    pub fn with_canonical(self, canonical: String) -> Self {
        Self {
            meta: PageMetaView {
                canonical,
                ..self.meta
            },
            ..self
        }
    }
}

#[derive(Clone)]
pub struct LayoutContext<T> {
    pub brand: BrandView,
    pub meta: PageMetaView,
    pub content: T,
}

impl<T> LayoutContext<T> {
    pub fn new(chrome: LayoutChrome, content: T) -> Self {
        Self {
            brand: chrome.brand,
            meta: chrome.meta,
            content,
        }
    }
}

/// One row of the blog listing, carrying the attributes the filter script reads.
#[derive(Clone)]
pub struct PostListItem {
    pub title: String,
    pub href: String,
    pub summary: String,
    pub iso_date: String,
    pub published: String,
    pub tags: Vec<String>,
    pub category_key: &'static str,
    pub category_label: &'static str,
    pub is_external: bool,
    pub search_title: String,
    pub search_summary: String,
    pub search_tags: String,
}

impl From<&Post> for PostListItem {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            href: post.target_url.clone(),
            summary: post.summary.clone(),
            iso_date: format_iso_date(post.published_at),
            published: format_human_date(post.published_at),
            tags: post.tags.clone(),
            category_key: post.category.slug(),
            category_label: post.category.label(),
            is_external: post.is_external(),
            search_title: post.title.to_lowercase(),
            search_summary: post.summary.to_lowercase(),
            search_tags: post.search_tags(),
        }
    }
}

#[derive(Clone)]
pub struct CategoryOption {
    pub key: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

pub fn category_options(selected: CategorySelection) -> Vec<CategoryOption> {
    CategorySelection::options()
        .into_iter()
        .map(|option| CategoryOption {
            key: option.key(),
            label: option.label(),
            selected: option == selected,
        })
        .collect()
}

#[derive(Clone)]
pub struct ContributionGraphView {
    pub username: String,
    pub total: u64,
    pub weeks: Vec<Vec<GraphCell>>,
    pub empty_color: &'static str,
    pub legend: Vec<&'static str>,
}

impl From<ContributionGraph> for ContributionGraphView {
    fn from(graph: ContributionGraph) -> Self {
        Self {
            username: graph.username,
            total: graph.total,
            weeks: graph.weeks,
            empty_color: EMPTY_COLOR,
            legend: LEGEND_COLORS.to_vec(),
        }
    }
}

pub struct BlogIndexContext {
    pub posts: Vec<PostListItem>,
    pub categories: Vec<CategoryOption>,
    pub search: String,
    pub has_results: bool,
    pub empty_message: &'static str,
    pub contributions: Option<ContributionGraphView>,
}

impl BlogIndexContext {
    pub fn new(
        posts: &[Post],
        query: &PostQuery,
        contributions: Option<ContributionGraph>,
    ) -> Self {
        let posts: Vec<PostListItem> = posts.iter().map(PostListItem::from).collect();
        Self {
            has_results: !posts.is_empty(),
            posts,
            categories: category_options(query.category),
            search: query.search().to_string(),
            empty_message: EMPTY_LISTING_MESSAGE,
            contributions: contributions
                .filter(|graph| !graph.is_empty())
                .map(ContributionGraphView::from),
        }
    }
}

#[derive(Template)]
#[template(path = "blog.html")]
pub struct BlogIndexTemplate {
    pub view: LayoutContext<BlogIndexContext>,
}

#[derive(Clone)]
pub struct LinkView {
    pub label: String,
    pub href: String,
}

/// One row of the work or education timeline.
#[derive(Clone)]
pub struct TimelineItemView {
    pub title: String,
    pub subtitle: String,
    pub href: Option<String>,
    pub period: String,
    pub location: Option<String>,
    pub badges: Vec<String>,
    pub bullets: Vec<String>,
}

impl From<&WorkEntry> for TimelineItemView {
    fn from(work: &WorkEntry) -> Self {
        Self {
            title: work.company.clone(),
            subtitle: work.title.clone(),
            href: work.href.clone(),
            period: work.period(),
            location: work.location.clone(),
            badges: work.badges.clone(),
            bullets: work.bullets.clone(),
        }
    }
}

impl From<&EducationEntry> for TimelineItemView {
    fn from(education: &EducationEntry) -> Self {
        Self {
            title: education.school.clone(),
            subtitle: education.degree.clone(),
            href: education.href.clone(),
            period: education.period(),
            location: None,
            badges: Vec::new(),
            bullets: Vec::new(),
        }
    }
}

#[derive(Clone)]
pub struct ProjectView {
    pub title: String,
    pub href: Option<String>,
    pub dates: String,
    pub active: bool,
    pub description: String,
    pub technologies: Vec<String>,
    pub links: Vec<LinkView>,
}

pub struct HomeContext {
    pub name: String,
    pub greeting: String,
    pub location: Option<String>,
    pub location_link: Option<String>,
    pub description: String,
    pub avatar_url: Option<String>,
    pub about: Vec<String>,
    pub work: Vec<TimelineItemView>,
    pub education: Vec<TimelineItemView>,
    pub projects: Vec<ProjectView>,
    pub tech_stack: Vec<TechGroup>,
    pub contacts: Vec<LinkView>,
    pub contributions: Option<ContributionGraphView>,
}

impl HomeContext {
    pub fn new(resume: &ResumeData, contributions: Option<ContributionGraph>) -> Self {
        let projects = resume
            .projects
            .iter()
            .map(|project| ProjectView {
                title: project.title.clone(),
                href: project.href.clone(),
                dates: project.dates.clone(),
                active: project.active,
                description: project.description.clone(),
                technologies: project.technologies.clone(),
                links: project
                    .links
                    .iter()
                    .map(|link| LinkView {
                        label: link.label.clone(),
                        href: link.href.clone(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            name: resume.name.clone(),
            greeting: format!("Hi, I'm {}.", resume.first_name()),
            location: resume.location.clone(),
            location_link: resume.location_link.clone(),
            description: resume.description.clone(),
            avatar_url: resume.avatar_url.clone(),
            about: resume.summary_paragraphs(),
            work: resume.work.iter().map(TimelineItemView::from).collect(),
            education: resume.education.iter().map(TimelineItemView::from).collect(),
            projects,
            tech_stack: resume
                .tech_stack
                .iter()
                .filter(|group| !group.items.is_empty())
                .cloned()
                .collect(),
            contacts: contact_links(resume),
            contributions: contributions
                .filter(|graph| !graph.is_empty())
                .map(ContributionGraphView::from),
        }
    }
}

fn contact_links(resume: &ResumeData) -> Vec<LinkView> {
    let contact = &resume.contact;
    let email = contact.email.as_ref().map(|email| LinkView {
        label: "Email".to_string(),
        href: format!("mailto:{email}"),
    });
    let tel = contact.tel.as_ref().map(|tel| LinkView {
        label: "Phone".to_string(),
        href: format!("tel:{tel}"),
    });

    contact
        .social
        .iter()
        .map(|social| LinkView {
            label: social.name.clone(),
            href: social.url.clone(),
        })
        .chain(email)
        .chain(tel)
        .collect()
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub view: LayoutContext<HomeContext>,
}

pub struct PostDetailContext {
    pub title: String,
    pub summary: String,
    pub iso_date: String,
    pub published: String,
    pub tags: Vec<String>,
    pub category_label: &'static str,
    pub image: Option<String>,
    pub body_html: String,
}

impl From<PostDetail> for PostDetailContext {
    fn from(detail: PostDetail) -> Self {
        let PostDetail {
            post,
            image,
            body_html,
        } = detail;

        Self {
            iso_date: format_iso_date(post.published_at),
            published: format_human_date(post.published_at),
            category_label: post.category.label(),
            title: post.title,
            summary: post.summary,
            tags: post.tags,
            image,
            body_html,
        }
    }
}

#[derive(Template)]
#[template(path = "post.html")]
pub struct PostTemplate {
    pub view: LayoutContext<PostDetailContext>,
}

pub struct ErrorPageView {
    pub title: String,
    pub message: String,
    pub primary_action: Option<ErrorAction>,
}

impl ErrorPageView {
    pub fn not_found() -> Self {
        Self {
            title: "Page Not Found".to_string(),
            message: "The page you requested does not exist. Try the blog index instead."
                .to_string(),
            primary_action: Some(ErrorAction::blog()),
        }
    }
}

pub struct ErrorAction {
    pub href: String,
    pub label: String,
}

impl ErrorAction {
    pub fn blog() -> Self {
        Self {
            href: "/blog".to_string(),
            label: "Back to the blog".to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub view: LayoutContext<ErrorPageView>,
}
