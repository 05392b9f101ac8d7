#![allow(dead_code)]

use std::{path::Path, sync::Arc};

use folio::{
    application::{
        blog::BlogService, chrome::ChromeService, contributions::ContributionsService,
        render::MarkdownRenderer,
    },
    domain::{
        categories::CategoryRules,
        posts::RemotePostRecord,
        resume::{EducationEntry, ResumeData, WorkEntry},
    },
    infra::{content::FsLocalPostSource, remote::StaticRemotePostSource},
};
use tempfile::TempDir;
use url::Url;

pub const REACT_POST: &str = "---
title: Building with React
publishedAt: 2024-05-01
summary: Components all the way down
tags:
  - React
  - Frontend
---

# Hooks

Some **markdown** with a <script>alert(1)</script> tag.
";

pub const LIFE_POST: &str = "---
title: Morning walks
publishedAt: 2024-06-10
summary: Slow starts
tags: [Life]
---
A short note.
";

pub const DRAFT_POST: &str = "---
summary: No title yet
publishedAt: 2024-07-01
---
Draft.
";

/// A content directory with two valid posts, one malformed post and a stray file.
pub fn content_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "hello-react.md", REACT_POST);
    write(dir.path(), "morning-walks.mdx", LIFE_POST);
    write(dir.path(), "draft.md", DRAFT_POST);
    write(dir.path(), "notes.txt", "not a post");
    dir
}

pub fn write(dir: &Path, name: &str, contents: &str) {
    std::fs::write(dir.join(name), contents).expect("write fixture");
}

pub fn remote_article() -> RemotePostRecord {
    RemotePostRecord {
        title: Some("Shipping maps at scale".to_string()),
        url: Some("https://medium.com/@me/maps".to_string()),
        published_at: Some("2024-05-20".to_string()),
        summary: Some("Tiles and caches".to_string()),
        tags: vec!["Maps".to_string()],
    }
}

pub fn blog_service(posts_dir: &Path) -> Arc<BlogService> {
    Arc::new(BlogService::new(
        Arc::new(FsLocalPostSource::new(posts_dir)),
        Arc::new(StaticRemotePostSource::new(vec![remote_article()])),
        Arc::new(CategoryRules::standard()),
        MarkdownRenderer::shared(),
    ))
}

pub fn chrome() -> Arc<ChromeService> {
    Arc::new(ChromeService::new(
        "blog",
        &Url::parse("https://example.com").expect("valid url"),
    ))
}

pub fn resume() -> Arc<ResumeData> {
    let mut resume = ResumeData::placeholder();
    resume.name = "Grace Hopper".to_string();
    resume.work.push(WorkEntry {
        company: "Navy Computation Project".to_string(),
        title: "Programmer".to_string(),
        start: "1944".to_string(),
        end: Some("1949".to_string()),
        bullets: vec!["Ran the Mark I".to_string()],
        ..Default::default()
    });
    resume.education.push(EducationEntry {
        school: "Yale University".to_string(),
        degree: "PhD, Mathematics".to_string(),
        start: "1930".to_string(),
        end: Some("1934".to_string()),
        ..Default::default()
    });
    Arc::new(resume)
}

pub fn disabled_contributions() -> Arc<ContributionsService> {
    Arc::new(ContributionsService::disabled())
}
