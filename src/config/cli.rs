use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};

/// Command-line arguments for the folio binary.
#[derive(Debug, Parser)]
#[command(name = "folio", version, about = "Personal site and blog")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "FOLIO_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Serve the site over HTTP.
    Serve(Box<ServeArgs>),
    /// Export the site as static files.
    Build(BuildArgs),
    /// Print the merged, categorized blog listing.
    List(ListArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct ContentOverrides {
    /// Override the directory holding local markdown posts.
    #[arg(long = "posts-dir", value_name = "PATH", value_hint = ValueHint::DirPath)]
    pub posts_dir: Option<PathBuf>,

    /// Override the TOML catalog of remote posts.
    #[arg(long = "remote-catalog", value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub remote_catalog: Option<PathBuf>,

    /// Override the TOML resume rendered on the home page.
    #[arg(long = "resume", value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub resume: Option<PathBuf>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct LoggingOverrides {
    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub overrides: ServeOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeOverrides {
    #[command(flatten)]
    pub content: ContentOverrides,

    #[command(flatten)]
    pub logging: LoggingOverrides,

    /// Override the listener host.
    #[arg(long = "server-host", value_name = "HOST")]
    pub server_host: Option<String>,

    /// Override the listener port.
    #[arg(long = "server-port", value_name = "PORT")]
    pub server_port: Option<u16>,

    /// Override the graceful shutdown timeout.
    #[arg(long = "server-graceful-shutdown-seconds", value_name = "SECONDS")]
    pub server_graceful_shutdown_seconds: Option<u64>,

    /// Override the GitHub user whose contribution graph is shown.
    #[arg(long = "github-username", value_name = "LOGIN")]
    pub github_username: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct BuildArgs {
    #[command(flatten)]
    pub content: ContentOverrides,

    #[command(flatten)]
    pub logging: LoggingOverrides,

    /// Override the directory the static site is written to.
    #[arg(long = "output-dir", value_name = "PATH", value_hint = ValueHint::DirPath)]
    pub output_dir: Option<PathBuf>,

    /// Override the public base URL used for canonical links.
    #[arg(long = "site-base-url", value_name = "URL")]
    pub site_base_url: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct ListArgs {
    #[command(flatten)]
    pub content: ContentOverrides,

    #[command(flatten)]
    pub logging: LoggingOverrides,

    /// Only show posts whose title, summary or tags contain this text.
    #[arg(long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Only show one category (all|website-development|life-thoughts|medium-articles).
    #[arg(long, value_name = "CATEGORY", default_value = "all")]
    pub category: String,

    /// Print JSON instead of a table.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub json: bool,
}
