//! Configuration layer: typed settings with layered precedence (file → env → CLI).

mod cli;

use std::{net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

pub use cli::{
    BuildArgs, CliArgs, Command, ContentOverrides, ListArgs, LoggingOverrides, ServeArgs,
    ServeOverrides,
};

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "folio";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_GRACEFUL_SHUTDOWN_SECS: u64 = 10;
const DEFAULT_POSTS_DIR: &str = "content";
const DEFAULT_SITE_TITLE: &str = "blog";
const DEFAULT_SITE_BASE_URL: &str = "http://127.0.0.1:3000";
const DEFAULT_GITHUB_ENDPOINT: &str = "https://api.github.com/graphql";
const DEFAULT_GITHUB_TIMEOUT_SECS: u64 = 10;
const DEFAULT_OUTPUT_DIR: &str = "out";

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub content: ContentSettings,
    pub site: SiteSettings,
    pub github: GithubSettings,
    pub export: ExportSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub addr: SocketAddr,
    pub graceful_shutdown: Duration,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct ContentSettings {
    pub posts_dir: PathBuf,
    pub remote_catalog: Option<PathBuf>,
    pub resume: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct SiteSettings {
    pub title: String,
    pub base_url: Url,
}

#[derive(Debug, Clone)]
pub struct GithubSettings {
    pub username: Option<String>,
    pub token: Option<String>,
    pub endpoint: Url,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub output_dir: PathBuf,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix("FOLIO").separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_command(cli.command.as_ref());

    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    server: RawServerSettings,
    logging: RawLoggingSettings,
    content: RawContentSettings,
    site: RawSiteSettings,
    github: RawGithubSettings,
    export: RawExportSettings,
}

impl RawSettings {
    fn apply_command(&mut self, command: Option<&Command>) {
        match command {
            Some(Command::Serve(args)) => self.apply_serve_overrides(&args.overrides),
            Some(Command::Build(args)) => self.apply_build_overrides(args),
            Some(Command::List(args)) => {
                self.apply_content_overrides(&args.content);
                self.apply_logging_overrides(&args.logging);
            }
            None => self.apply_serve_overrides(&ServeOverrides::default()),
        }
    }

    fn apply_serve_overrides(&mut self, overrides: &ServeOverrides) {
        if let Some(host) = overrides.server_host.as_ref() {
            self.server.host = Some(host.clone());
        }
        if let Some(port) = overrides.server_port {
            self.server.port = Some(port);
        }
        if let Some(seconds) = overrides.server_graceful_shutdown_seconds {
            self.server.graceful_shutdown_seconds = Some(seconds);
        }
        if let Some(username) = overrides.github_username.as_ref() {
            self.github.username = Some(username.clone());
        }

        self.apply_content_overrides(&overrides.content);
        self.apply_logging_overrides(&overrides.logging);
    }

    fn apply_build_overrides(&mut self, args: &BuildArgs) {
        if let Some(dir) = args.output_dir.as_ref() {
            self.export.output_dir = Some(dir.clone());
        }
        if let Some(url) = args.site_base_url.as_ref() {
            self.site.base_url = Some(url.clone());
        }

        self.apply_content_overrides(&args.content);
        self.apply_logging_overrides(&args.logging);
    }

    fn apply_content_overrides(&mut self, overrides: &ContentOverrides) {
        if let Some(dir) = overrides.posts_dir.as_ref() {
            self.content.posts_dir = Some(dir.clone());
        }
        if let Some(path) = overrides.remote_catalog.as_ref() {
            self.content.remote_catalog = Some(path.clone());
        }
        if let Some(path) = overrides.resume.as_ref() {
            self.content.resume = Some(path.clone());
        }
    }

    fn apply_logging_overrides(&mut self, overrides: &LoggingOverrides) {
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            server,
            logging,
            content,
            site,
            github,
            export,
        } = raw;

        Ok(Self {
            server: build_server_settings(server)?,
            logging: build_logging_settings(logging)?,
            content: build_content_settings(content)?,
            site: build_site_settings(site)?,
            github: build_github_settings(github)?,
            export: build_export_settings(export)?,
        })
    }
}

fn build_server_settings(server: RawServerSettings) -> Result<ServerSettings, LoadError> {
    let host = server.host.unwrap_or_else(|| DEFAULT_HOST.to_string());

    let port = server.port.unwrap_or(DEFAULT_PORT);
    if port == 0 {
        return Err(LoadError::invalid(
            "server.port",
            "port must be greater than zero",
        ));
    }

    let addr = parse_socket_addr(&host, port)
        .map_err(|reason| LoadError::invalid("server.addr", reason))?;

    let graceful_secs = server
        .graceful_shutdown_seconds
        .unwrap_or(DEFAULT_GRACEFUL_SHUTDOWN_SECS);
    if graceful_secs == 0 {
        return Err(LoadError::invalid(
            "server.graceful_shutdown_seconds",
            "must be greater than zero",
        ));
    }

    Ok(ServerSettings {
        addr,
        graceful_shutdown: Duration::from_secs(graceful_secs),
    })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_content_settings(content: RawContentSettings) -> Result<ContentSettings, LoadError> {
    let posts_dir = content
        .posts_dir
        .unwrap_or_else(|| PathBuf::from(DEFAULT_POSTS_DIR));
    if posts_dir.as_os_str().is_empty() {
        return Err(LoadError::invalid(
            "content.posts_dir",
            "path must not be empty",
        ));
    }

    let remote_catalog = content
        .remote_catalog
        .filter(|path| !path.as_os_str().is_empty());
    let resume = content
        .resume
        .filter(|path| !path.as_os_str().is_empty());

    Ok(ContentSettings {
        posts_dir,
        remote_catalog,
        resume,
    })
}

fn build_site_settings(site: RawSiteSettings) -> Result<SiteSettings, LoadError> {
    let title = site
        .title
        .map(|value| value.trim().to_string())
        .unwrap_or_else(|| DEFAULT_SITE_TITLE.to_string());
    if title.is_empty() {
        return Err(LoadError::invalid("site.title", "must not be empty"));
    }

    let base_url = parse_absolute_url(
        site.base_url.as_deref().unwrap_or(DEFAULT_SITE_BASE_URL),
        "site.base_url",
    )?;

    Ok(SiteSettings { title, base_url })
}

fn build_github_settings(github: RawGithubSettings) -> Result<GithubSettings, LoadError> {
    let username = non_blank(github.username);
    let token = non_blank(github.token);

    let endpoint = parse_absolute_url(
        github.endpoint.as_deref().unwrap_or(DEFAULT_GITHUB_ENDPOINT),
        "github.endpoint",
    )?;

    let timeout_secs = github
        .timeout_seconds
        .unwrap_or(DEFAULT_GITHUB_TIMEOUT_SECS);
    if timeout_secs == 0 {
        return Err(LoadError::invalid(
            "github.timeout_seconds",
            "must be greater than zero",
        ));
    }

    Ok(GithubSettings {
        username,
        token,
        endpoint,
        timeout: Duration::from_secs(timeout_secs),
    })
}

fn build_export_settings(export: RawExportSettings) -> Result<ExportSettings, LoadError> {
    let output_dir = export
        .output_dir
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
    if output_dir.as_os_str().is_empty() {
        return Err(LoadError::invalid(
            "export.output_dir",
            "path must not be empty",
        ));
    }

    Ok(ExportSettings { output_dir })
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawServerSettings {
    host: Option<String>,
    port: Option<u16>,
    graceful_shutdown_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawContentSettings {
    posts_dir: Option<PathBuf>,
    remote_catalog: Option<PathBuf>,
    resume: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSiteSettings {
    title: Option<String>,
    base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawGithubSettings {
    username: Option<String>,
    token: Option<String>,
    endpoint: Option<String>,
    timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawExportSettings {
    output_dir: Option<PathBuf>,
}

fn parse_socket_addr(host: &str, port: u16) -> Result<SocketAddr, String> {
    let candidate = format!("{host}:{port}");
    candidate
        .parse()
        .map_err(|err| format!("invalid address `{candidate}`: {err}"))
}

fn parse_absolute_url(value: &str, key: &'static str) -> Result<Url, LoadError> {
    let url = Url::parse(value.trim())
        .map_err(|err| LoadError::invalid(key, format!("invalid URL `{value}`: {err}")))?;
    if url.cannot_be_a_base() {
        return Err(LoadError::invalid(key, "URL must be absolute"));
    }
    Ok(url)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

/// Resolve configuration using the supplied CLI arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}
