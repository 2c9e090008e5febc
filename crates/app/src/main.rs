use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::{FetchApplied, QuizSession, StartOutcome};
use services::{ConfigError, QuizService, TriviaApiConfig, TriviaClient};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use ui::vm::decode_entities;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    Config(ConfigError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<ConfigError> for ArgsError {
    fn from(err: ConfigError) -> Self {
        ArgsError::Config(err)
    }
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    quiz_service: Arc<QuizService>,
}

impl UiApp for DesktopApp {
    fn quiz_service(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz_service)
    }

    fn prefetch_on_launch(&self) -> bool {
        true
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui      [--api-url <url>] [--amount <n>]");
    eprintln!("  cargo run -p app -- preview [--api-url <url>] [--amount <n>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api-url {}", services::DEFAULT_BASE_URL);
    eprintln!("  --amount {}", services::DEFAULT_AMOUNT);
    eprintln!();
    eprintln!("Environment (also read from .env):");
    eprintln!("  QUIZ_API_URL, QUIZ_AMOUNT, QUIZ_CATEGORY, QUIZ_DIFFICULTY, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Preview,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "preview" => Some(Self::Preview),
            _ => None,
        }
    }
}

struct Args {
    config: TriviaApiConfig,
}

impl Args {
    fn parse(
        args: &mut impl Iterator<Item = String>,
        mut config: TriviaApiConfig,
    ) -> Result<Self, ArgsError> {
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-url" => {
                    let value = require_value(args, "--api-url")?;
                    config = config.with_base_url(&value)?;
                }
                "--amount" => {
                    let value = require_value(args, "--amount")?;
                    config = config.with_amount(&value)?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { config })
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env is not an error.
    let _ = dotenvy::dotenv();
    init_tracing();

    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let config = TriviaApiConfig::from_env()?;
    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter, config).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    tracing::info!(
        ?cmd,
        url = %parsed.config.base_url,
        amount = parsed.config.amount,
        "question source configured"
    );
    let client = TriviaClient::new(parsed.config);
    let quiz_service = Arc::new(QuizService::new(Arc::new(client)));

    match cmd {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp { quiz_service });
            let context = build_app_context(&app);

            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Quizzical")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Preview => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(preview(&quiz_service))
        }
    }
}

/// Fetches one batch and prints the built quiz, marking correct answers.
async fn preview(service: &QuizService) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = QuizSession::new();

    if let StartOutcome::Pending {
        fetch: Some(ticket),
    } = service.start(&mut session)?
    {
        if service.load(&mut session, ticket).await? == FetchApplied::Empty {
            println!("The question source returned no questions.");
            return Ok(());
        }
    }

    for (index, question) in session.quiz().iter().enumerate() {
        println!("{}. {}", index + 1, decode_entities(question.text()));
        for (answer_index, answer) in question.answers().iter().enumerate() {
            let marker = if answer_index == question.correct_answer_index() {
                '*'
            } else {
                ' '
            };
            println!("   {marker} {}", decode_entities(answer.text()));
        }
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
