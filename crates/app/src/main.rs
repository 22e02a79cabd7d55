use std::fmt;
use std::sync::Arc;

use client::{ApiConfig, AuthSession, Backend};
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use exam_core::model::{ExamSettings, ExpiryPolicy};
use services::{CatalogService, Clock, ExamFlowService, ScoreboardService};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidExamSecs { raw: String },
    InvalidExpiryPolicy { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidExamSecs { raw } => {
                write!(f, "invalid --exam-secs value: {raw}")
            }
            ArgsError::InvalidExpiryPolicy { raw } => {
                write!(f, "invalid --on-expire value: {raw} (expected none | auto-submit)")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--api-url <url>] [--token <token>]");
    eprintln!("                      [--exam-secs <secs>] [--on-expire <none|auto-submit>]");
    eprintln!("                      [--sample]");
    eprintln!();
    eprintln!("Without an API url the embedded sample backend is used.");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUZUU_API_URL, QUZUU_AUTH_TOKEN, QUZUU_EXAM_SECS, QUZUU_ON_EXPIRE");
}

struct Args {
    api_url: Option<String>,
    token: Option<String>,
    exam_secs: Option<u32>,
    on_expire: Option<ExpiryPolicy>,
    sample: bool,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        // Env vars seed the defaults; flags below override them.
        let mut api_url = None;
        let mut token = None;
        if let Some(config) = ApiConfig::from_env() {
            api_url = Some(config.base_url);
            token = config.auth.map(|auth| auth.token().to_string());
        }
        let mut exam_secs = std::env::var("QUZUU_EXAM_SECS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok());
        let mut on_expire = std::env::var("QUZUU_ON_EXPIRE")
            .ok()
            .and_then(|v| v.parse::<ExpiryPolicy>().ok());
        let mut sample = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-url" => {
                    api_url = Some(require_value(args, "--api-url")?);
                }
                "--token" => {
                    token = Some(require_value(args, "--token")?);
                }
                "--exam-secs" => {
                    let value = require_value(args, "--exam-secs")?;
                    let parsed: u32 = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidExamSecs { raw: value.clone() })?;
                    exam_secs = Some(parsed);
                }
                "--on-expire" => {
                    let value = require_value(args, "--on-expire")?;
                    let parsed = value
                        .parse::<ExpiryPolicy>()
                        .map_err(|_| ArgsError::InvalidExpiryPolicy { raw: value.clone() })?;
                    on_expire = Some(parsed);
                }
                "--sample" => sample = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            api_url,
            token,
            exam_secs,
            on_expire,
            sample,
        })
    }
}

struct DesktopApp {
    settings: ExamSettings,
    exam_flow: Arc<ExamFlowService>,
    catalog: Arc<CatalogService>,
    scoreboard: Arc<ScoreboardService>,
}

impl UiApp for DesktopApp {
    fn exam_settings(&self) -> ExamSettings {
        self.settings
    }

    fn exam_flow(&self) -> Arc<ExamFlowService> {
        Arc::clone(&self.exam_flow)
    }

    fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }

    fn scoreboard(&self) -> Arc<ScoreboardService> {
        Arc::clone(&self.scoreboard)
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let settings = match parsed.exam_secs {
        Some(secs) => ExamSettings::new(
            secs,
            parsed.on_expire.unwrap_or(ExpiryPolicy::Hold),
        )?,
        None => match parsed.on_expire {
            Some(policy) => {
                ExamSettings::new(ExamSettings::standard().duration_secs(), policy)?
            }
            None => ExamSettings::standard(),
        },
    };

    // Sample mode wins; otherwise an API url selects the remote backend.
    let backend = if parsed.sample || parsed.api_url.is_none() {
        tracing::info!("using the embedded sample backend");
        Backend::sample()
    } else {
        let api_url = parsed.api_url.unwrap_or_default();
        tracing::info!(%api_url, "using the remote backend");
        Backend::http(ApiConfig::new(api_url, parsed.token.map(AuthSession::new)))
    };

    let exam_flow = Arc::new(ExamFlowService::new(
        Clock::default(),
        Arc::clone(&backend.questions),
        Arc::clone(&backend.grading),
    ));
    let catalog = Arc::new(CatalogService::new(Arc::clone(&backend.catalog)));
    let scoreboard = Arc::new(ScoreboardService::new(Arc::clone(&backend.scoreboard)));

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        settings,
        exam_flow,
        catalog,
        scoreboard,
    });
    let context = build_app_context(&app);

    // Some dev setups default to an always-on-top window; keep it a normal one.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Quzuu")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
