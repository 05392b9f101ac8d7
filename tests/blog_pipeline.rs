mod common;

use folio::{
    application::filter::{CategorySelection, PostQuery},
    domain::posts::{Category, Origin},
};
use time::macros::date;

use common::{blog_service, content_dir};

#[tokio::test]
async fn merges_categorizes_and_orders_posts_from_disk() {
    let dir = content_dir();
    let blog = blog_service(dir.path());

    let index = blog.index().await;

    let titles: Vec<_> = index.posts.iter().map(|post| post.title.as_str()).collect();
    assert_eq!(
        titles,
        [
            "Morning walks",
            "Shipping maps at scale",
            "Building with React"
        ]
    );

    let categories: Vec<_> = index.posts.iter().map(|post| post.category).collect();
    assert_eq!(
        categories,
        [
            Category::LifeThoughts,
            Category::MediumArticles,
            Category::WebsiteDevelopment
        ]
    );

    assert_eq!(index.posts[0].target_url, "/blog/morning-walks");
    assert_eq!(index.posts[1].origin, Origin::Remote);
    assert_eq!(index.posts[2].published_at, date!(2024 - 05 - 01));

    assert_eq!(index.excluded.len(), 1);
    assert!(index.excluded[0].to_string().contains("draft"));
}

#[tokio::test]
async fn missing_content_directory_still_lists_remote_posts() {
    let dir = content_dir();
    let blog = blog_service(&dir.path().join("does-not-exist"));

    let index = blog.index().await;

    assert_eq!(index.posts.len(), 1);
    assert_eq!(index.posts[0].category, Category::MediumArticles);
}

#[tokio::test]
async fn list_applies_search_and_category() {
    let dir = content_dir();
    let blog = blog_service(dir.path());

    let react = blog
        .list(&PostQuery::new(Some("REACT"), CategorySelection::All))
        .await;
    assert_eq!(react.len(), 1);
    assert_eq!(react[0].title, "Building with React");

    let medium = blog
        .list(&PostQuery::new(
            None,
            CategorySelection::Only(Category::MediumArticles),
        ))
        .await;
    assert_eq!(medium.len(), 1);
    assert!(medium[0].is_external());

    let nothing = blog
        .list(&PostQuery::new(
            Some("react"),
            CategorySelection::Only(Category::LifeThoughts),
        ))
        .await;
    assert!(nothing.is_empty());
}

#[tokio::test]
async fn local_post_renders_sanitized_markdown() {
    let dir = content_dir();
    let blog = blog_service(dir.path());

    let detail = blog.local_post("hello-react").await.expect("post exists");
    assert_eq!(detail.post.title, "Building with React");
    assert!(detail.body_html.contains("<strong>markdown</strong>"));
    assert!(!detail.body_html.contains("<script>"));

    assert!(blog.local_post("draft").await.is_none());
    assert!(blog.local_post("unknown").await.is_none());
}

#[tokio::test]
async fn file_stem_with_surrounding_whitespace_is_excluded_not_mislinked() {
    let dir = content_dir();
    common::write(dir.path(), "spaced .md", common::LIFE_POST);
    let blog = blog_service(dir.path());

    let index = blog.index().await;
    assert_eq!(index.excluded.len(), 2);
    for post in index.posts.iter().filter(|post| post.origin == Origin::Local) {
        assert!(
            blog.local_post(&post.identifier).await.is_some(),
            "listed post `{}` must resolve",
            post.identifier
        );
    }
    assert!(blog.local_post("spaced").await.is_none());
}
