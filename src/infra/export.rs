//! Static export of the blog into a directory tree servable by any file host.
//!
//! Pages use a trailing-slash layout: `/` is written to `index.html`, `/blog`
//! to `blog/index.html` and `/blog/{slug}` to `blog/{slug}/index.html`.

use std::{
    path::{Component, Path, PathBuf},
    sync::Arc,
};

use tokio::fs;
use tracing::{info, warn};

use crate::application::{
    blog::BlogService, chrome::ChromeService, contributions::ContributionsService,
    filter::PostQuery,
};
use crate::domain::resume::ResumeData;
use crate::presentation::views::{
    BlogIndexContext, BlogIndexTemplate, HomeContext, HomeTemplate, LayoutContext,
    PostDetailContext, PostTemplate, render_page,
};

use super::error::InfraError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub output_dir: PathBuf,
    pub listed_posts: usize,
    pub detail_pages: usize,
}

#[derive(Clone)]
pub struct SiteExporter {
    blog: Arc<BlogService>,
    contributions: Arc<ContributionsService>,
    chrome: Arc<ChromeService>,
    resume: Arc<ResumeData>,
}

impl SiteExporter {
    pub fn new(
        blog: Arc<BlogService>,
        contributions: Arc<ContributionsService>,
        chrome: Arc<ChromeService>,
        resume: Arc<ResumeData>,
    ) -> Self {
        Self {
            blog,
            contributions,
            chrome,
            resume,
        }
    }

    pub async fn export(&self, output_dir: &Path) -> Result<ExportReport, InfraError> {
        let (index, contributions) =
            tokio::join!(self.blog.index(), self.contributions.graph());

        let chrome = self
            .chrome
            .load(None, Some(&self.resume.description), "/");
        let home = render_page(&HomeTemplate {
            view: LayoutContext::new(
                chrome,
                HomeContext::new(&self.resume, contributions.clone()),
            ),
        })
        .map_err(|err| InfraError::export(format!("home page: {err}: {}", err.error)))?;
        write_file(&output_dir.join("index.html"), home.as_bytes()).await?;

        let chrome = self.chrome.load(None, None, "/blog");
        let content = BlogIndexContext::new(&index.posts, &PostQuery::default(), contributions);
        let listing = render_page(&BlogIndexTemplate {
            view: LayoutContext::new(chrome, content),
        })
        .map_err(|err| InfraError::export(format!("blog index: {err}: {}", err.error)))?;
        write_file(&output_dir.join("blog").join("index.html"), listing.as_bytes()).await?;

        let json = serde_json::to_vec_pretty(&index.posts)
            .map_err(|err| InfraError::export(format!("posts json: {err}")))?;
        write_file(&output_dir.join("api").join("posts.json"), &json).await?;

        let mut detail_pages = 0;
        for detail in self.blog.local_post_details().await {
            let slug = detail.post.identifier.clone();
            if !is_safe_slug(&slug) {
                warn!(
                    target = "folio::export",
                    slug = %slug,
                    "skipping post whose slug is not a single path segment"
                );
                continue;
            }

            let chrome = self.chrome.load(
                Some(&detail.post.title),
                Some(&detail.post.summary),
                &detail.post.target_url,
            );
            let html = render_page(&PostTemplate {
                view: LayoutContext::new(chrome, PostDetailContext::from(detail)),
            })
            .map_err(|err| InfraError::export(format!("post `{slug}`: {err}: {}", err.error)))?;

            let path = output_dir.join("blog").join(&slug).join("index.html");
            write_file(&path, html.as_bytes()).await?;
            detail_pages += 1;
        }

        let report = ExportReport {
            output_dir: output_dir.to_path_buf(),
            listed_posts: index.posts.len(),
            detail_pages,
        };
        info!(
            target = "folio::export",
            output_dir = %report.output_dir.display(),
            listed_posts = report.listed_posts,
            detail_pages = report.detail_pages,
            "static export finished"
        );
        Ok(report)
    }
}

async fn write_file(path: &Path, contents: &[u8]) -> Result<(), InfraError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, contents).await?;
    Ok(())
}

fn is_safe_slug(slug: &str) -> bool {
    let mut components = Path::new(slug).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
