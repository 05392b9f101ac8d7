mod common;

use folio::infra::export::SiteExporter;
use serde_json::Value;

use common::{blog_service, chrome, content_dir, disabled_contributions, resume};

#[tokio::test]
async fn writes_listing_detail_pages_and_json() {
    let content = content_dir();
    let out = tempfile::tempdir().expect("tempdir");

    let exporter = SiteExporter::new(
        blog_service(content.path()),
        disabled_contributions(),
        chrome(),
        resume(),
    );
    let report = exporter.export(out.path()).await.expect("export succeeds");

    assert_eq!(report.listed_posts, 3);
    assert_eq!(report.detail_pages, 2);

    let home = std::fs::read_to_string(out.path().join("index.html")).expect("home written");
    assert!(home.contains("Yale University"));

    let listing =
        std::fs::read_to_string(out.path().join("blog/index.html")).expect("listing written");
    assert!(listing.contains("Shipping maps at scale"));
    assert!(listing.contains(r#"data-tags="react frontend""#));

    let detail = std::fs::read_to_string(out.path().join("blog/hello-react/index.html"))
        .expect("detail written");
    assert!(detail.contains("Components all the way down"));

    assert!(out.path().join("blog/morning-walks/index.html").is_file());
    assert!(!out.path().join("blog/draft/index.html").exists());

    let json = std::fs::read_to_string(out.path().join("api/posts.json")).expect("json written");
    let posts: Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(posts.as_array().map(Vec::len), Some(3));
}
