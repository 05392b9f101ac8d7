mod common;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use folio::infra::http::{HttpState, build_router};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use common::{blog_service, chrome, content_dir, disabled_contributions, resume};

fn router(posts_dir: &std::path::Path) -> Router {
    build_router(HttpState {
        blog: blog_service(posts_dir),
        contributions: disabled_contributions(),
        chrome: chrome(),
        resume: resume(),
    })
}

async fn get(router: Router, uri: &str) -> (StatusCode, String) {
    let response = router
        .oneshot(Request::get(uri).body(Body::empty()).expect("request"))
        .await
        .expect("router is infallible");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

#[tokio::test]
async fn blog_index_lists_every_post() {
    let dir = content_dir();
    let (status, html) = get(router(dir.path()), "/blog").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Morning walks"));
    assert!(html.contains("Building with React"));
    assert!(html.contains(r#"href="/blog/hello-react""#));
    assert!(html.contains(r#"rel="noopener noreferrer""#));
    assert!(html.contains(r#"data-category="life-thoughts""#));
    assert!(html.contains(r#"<link rel="canonical" href="https://example.com/blog" />"#));
}

#[tokio::test]
async fn blog_index_filters_server_side() {
    let dir = content_dir();
    let (status, html) = get(router(dir.path()), "/blog?category=website-development").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Building with React"));
    assert!(!html.contains("Morning walks"));
}

#[tokio::test]
async fn root_renders_the_resume() {
    let dir = content_dir();
    let (status, html) = get(router(dir.path()), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Grace."));
    assert!(html.contains("Navy Computation Project"));
    assert!(html.contains("1944 - 1949"));
    assert!(html.contains("PhD, Mathematics"));
    assert!(html.contains(r#"href="https://github.com/yourusername""#));
    assert!(html.contains(r#"<link rel="canonical" href="https://example.com/" />"#));
    assert!(html.contains(r#"<a href="/blog">Blog</a>"#));
}

#[tokio::test]
async fn post_detail_renders_markdown() {
    let dir = content_dir();
    let (status, html) = get(router(dir.path()), "/blog/hello-react").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<title>Building with React | blog</title>"));
    assert!(html.contains("<strong>markdown</strong>"));
    assert!(!html.contains("<script>alert"));
}

#[tokio::test]
async fn unknown_post_is_not_found() {
    let dir = content_dir();
    let (status, html) = get(router(dir.path()), "/blog/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("Page Not Found"));
}

#[tokio::test]
async fn api_posts_returns_ordered_json() {
    let dir = content_dir();
    let (status, body) = get(router(dir.path()), "/api/posts").await;
    assert_eq!(status, StatusCode::OK);

    let posts: Value = serde_json::from_str(&body).expect("json");
    let posts = posts.as_array().expect("array");
    assert_eq!(posts.len(), 3);
    assert_eq!(posts[0]["title"], "Morning walks");
    assert_eq!(posts[0]["category"], "life-thoughts");
    assert_eq!(posts[0]["published_at"], "2024-06-10");
    assert_eq!(posts[1]["origin"], "remote");
}

#[tokio::test]
async fn api_posts_filters_by_search() {
    let dir = content_dir();
    let (status, body) = get(router(dir.path()), "/api/posts?search=tiles").await;
    assert_eq!(status, StatusCode::OK);

    let posts: Value = serde_json::from_str(&body).expect("json");
    let posts = posts.as_array().expect("array");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["title"], "Shipping maps at scale");
}

#[tokio::test]
async fn api_posts_rejects_unknown_category() {
    let dir = content_dir();
    let (status, _) = get(router(dir.path()), "/api/posts?category=cooking").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn contributions_are_not_found_when_disabled() {
    let dir = content_dir();
    let (status, _) = get(router(dir.path()), "/api/contributions").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_reports_no_content() {
    let dir = content_dir();
    let (status, _) = get(router(dir.path()), "/_health").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}
