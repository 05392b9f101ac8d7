use std::{process, sync::Arc};

use folio::{
    application::{
        blog::BlogService,
        chrome::ChromeService,
        contributions::ContributionsService,
        error::AppError,
        filter::{CategorySelection, PostQuery},
        render::MarkdownRenderer,
        sources::{LocalPostSource, RemotePostSource},
    },
    config,
    domain::{
        categories::CategoryRules,
        posts::{Post, format_iso_date},
        resume::ResumeData,
    },
    infra::{
        content::FsLocalPostSource,
        export::SiteExporter,
        github::GithubContributionsClient,
        http::{self, HttpState},
        remote::{CatalogRemotePostSource, StaticRemotePostSource},
        resume::load_resume,
        telemetry,
    },
};
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(std::io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Build(_) => run_build(settings).await,
        config::Command::List(args) => run_list(settings, args).await,
    }
}

struct SiteServices {
    blog: Arc<BlogService>,
    contributions: Arc<ContributionsService>,
    chrome: Arc<ChromeService>,
    resume: Arc<ResumeData>,
}

async fn build_site_services(settings: &config::Settings) -> Result<SiteServices, AppError> {
    let local: Arc<dyn LocalPostSource> =
        Arc::new(FsLocalPostSource::new(settings.content.posts_dir.clone()));

    let remote: Arc<dyn RemotePostSource> = match settings.content.remote_catalog.as_ref() {
        Some(path) => Arc::new(CatalogRemotePostSource::new(path.clone())),
        None => Arc::new(StaticRemotePostSource::builtin()),
    };

    let blog = Arc::new(BlogService::new(
        local,
        remote,
        Arc::new(CategoryRules::standard()),
        MarkdownRenderer::shared(),
    ));

    let contributions = match settings.github.username.as_ref() {
        Some(username) => {
            let client = GithubContributionsClient::new(
                settings.github.endpoint.clone(),
                settings.github.token.clone(),
                settings.github.timeout,
            )?;
            ContributionsService::new(Arc::new(client), username.clone())
        }
        None => ContributionsService::disabled(),
    };

    let chrome = ChromeService::new(settings.site.title.clone(), &settings.site.base_url);
    let resume = load_resume(settings.content.resume.as_deref()).await?;

    Ok(SiteServices {
        blog,
        contributions: Arc::new(contributions),
        chrome: Arc::new(chrome),
        resume: Arc::new(resume),
    })
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let services = build_site_services(&settings).await?;

    info!(
        target = "folio::serve",
        posts_dir = %settings.content.posts_dir.display(),
        contributions = services.contributions.username().unwrap_or("disabled"),
        "starting server"
    );

    let router = http::build_router(HttpState {
        blog: services.blog,
        contributions: services.contributions,
        chrome: services.chrome,
        resume: services.resume,
    });

    http::serve(
        settings.server.addr,
        router,
        settings.server.graceful_shutdown,
    )
    .await
}

async fn run_build(settings: config::Settings) -> Result<(), AppError> {
    let services = build_site_services(&settings).await?;
    let exporter = SiteExporter::new(
        services.blog,
        services.contributions,
        services.chrome,
        services.resume,
    );
    exporter.export(&settings.export.output_dir).await?;
    Ok(())
}

async fn run_list(settings: config::Settings, args: config::ListArgs) -> Result<(), AppError> {
    let category = args
        .category
        .parse::<CategorySelection>()
        .map_err(AppError::validation)?;
    let query = PostQuery::new(args.search.as_deref(), category);

    let services = build_site_services(&settings).await?;
    let posts = services.blog.list(&query).await;

    if args.json {
        let json = serde_json::to_string_pretty(&posts)
            .map_err(|err| AppError::unexpected(format!("failed to encode posts: {err}")))?;
        println!("{json}");
    } else {
        for post in &posts {
            println!("{}", listing_line(post));
        }
    }

    Ok(())
}

fn listing_line(post: &Post) -> String {
    format!(
        "{}  {:<20}  {}  {}",
        format_iso_date(post.published_at),
        post.category.slug(),
        post.title,
        post.target_url
    )
}
