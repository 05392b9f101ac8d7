use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;

use crate::{
    application::{
        blog::BlogService,
        chrome::ChromeService,
        contributions::ContributionsService,
        error::AppError,
        filter::{CategorySelection, PostQuery},
    },
    domain::resume::ResumeData,
    presentation::views::{
        BlogIndexContext, BlogIndexTemplate, HomeContext, HomeTemplate, LayoutContext,
        PostDetailContext, PostTemplate, render_not_found_response, render_template_response,
    },
};

use super::middleware::{log_responses, set_request_context};

#[derive(Clone)]
pub struct HttpState {
    pub blog: Arc<BlogService>,
    pub contributions: Arc<ContributionsService>,
    pub chrome: Arc<ChromeService>,
    pub resume: Arc<ResumeData>,
}

pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/blog", get(blog_index))
        .route("/blog/", get(blog_index))
        .route("/blog/{slug}", get(post_detail))
        .route("/api/posts", get(api_posts))
        .route("/api/contributions", get(api_contributions))
        .route("/_health", get(health))
        .fallback(fallback)
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ListingQuery {
    search: Option<String>,
    category: Option<String>,
}

impl ListingQuery {
    fn into_post_query(self) -> Result<PostQuery, AppError> {
        let category = match self.category.as_deref() {
            Some(raw) => raw
                .parse::<CategorySelection>()
                .map_err(|_| AppError::validation(format!("unknown category `{raw}`")))?,
            None => CategorySelection::All,
        };
        Ok(PostQuery::new(self.search.as_deref(), category))
    }
}

async fn home(State(state): State<HttpState>) -> Response {
    let contributions = state.contributions.graph().await;
    let chrome = state
        .chrome
        .load(None, Some(&state.resume.description), "/");
    let view = LayoutContext::new(chrome, HomeContext::new(&state.resume, contributions));
    render_template_response(HomeTemplate { view }, StatusCode::OK)
}

async fn blog_index(State(state): State<HttpState>, Query(query): Query<ListingQuery>) -> Response {
    let query = match query.into_post_query() {
        Ok(query) => query,
        Err(err) => return err.into_response(),
    };

    let (index, contributions) = tokio::join!(state.blog.index(), state.contributions.graph());
    let posts = if query.is_unfiltered() {
        index.posts.clone()
    } else {
        query.apply(&index.posts)
    };

    let chrome = state.chrome.load(None, None, "/blog");
    let content = BlogIndexContext::new(&posts, &query, contributions);
    let view = LayoutContext::new(chrome, content);
    render_template_response(BlogIndexTemplate { view }, StatusCode::OK)
}

async fn post_detail(State(state): State<HttpState>, Path(slug): Path<String>) -> Response {
    match state.blog.local_post(&slug).await {
        Some(detail) => {
            let chrome = state.chrome.load(
                Some(&detail.post.title),
                Some(&detail.post.summary),
                &detail.post.target_url,
            );
            let view = LayoutContext::new(chrome, PostDetailContext::from(detail));
            render_template_response(PostTemplate { view }, StatusCode::OK)
        }
        None => render_not_found_response(state.chrome.load(None, None, "/blog")),
    }
}

async fn api_posts(
    State(state): State<HttpState>,
    Query(query): Query<ListingQuery>,
) -> Result<Response, AppError> {
    let query = query.into_post_query()?;
    let posts = state.blog.list(&query).await;
    Ok(Json(posts).into_response())
}

async fn api_contributions(State(state): State<HttpState>) -> Result<Response, AppError> {
    let graph = state.contributions.graph().await.ok_or(AppError::NotFound)?;
    Ok(Json(graph).into_response())
}

async fn health() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn fallback(State(state): State<HttpState>) -> Response {
    render_not_found_response(state.chrome.load(None, None, "/blog"))
}
