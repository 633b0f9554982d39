use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::QuizLoopService;
use storage::{BankCache, QuestionSource, assemble_bank, open_source};
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const DEFAULT_BANK_FILE: &str = "KCNA Exam Prep Questions.xlsx";
const DEFAULT_TITLE: &str = "KCNA Exam Prep";

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidSeed { raw: String },
    EmptyFile,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::EmptyFile => write!(f, "--file must not be empty"),
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

struct DesktopApp {
    title: String,
    quiz_loop: Arc<QuizLoopService>,
}

impl UiApp for DesktopApp {
    fn app_title(&self) -> String {
        self.title.clone()
    }

    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    file: PathBuf,
    seed: Option<u64>,
    title: String,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui    [--file <path>] [--seed <u64>] [--title <text>]");
    eprintln!("  cargo run -p app -- check [--file <path>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --file \"{DEFAULT_BANK_FILE}\"");
    eprintln!("  --title \"{DEFAULT_TITLE}\"");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_BANK_FILE, QUIZ_SEED, QUIZ_TITLE, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Check,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "check" => Some(Self::Check),
            _ => None,
        }
    }
}

enum Parsed {
    Run(Args),
    Help,
}

impl Args {
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Parsed, ArgsError> {
        let mut file = env("QUIZ_BANK_FILE")
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_BANK_FILE), PathBuf::from);
        let mut seed = match env("QUIZ_SEED") {
            Some(raw) => Some(parse_seed(raw)?),
            None => None,
        };
        let mut title = env("QUIZ_TITLE")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--file" => {
                    let value = require_value(args, "--file")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::EmptyFile);
                    }
                    file = PathBuf::from(value);
                }
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    seed = Some(parse_seed(value)?);
                }
                "--title" => {
                    title = require_value(args, "--title")?;
                }
                "--help" | "-h" => return Ok(Parsed::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Parsed::Run(Self { file, seed, title }))
    }
}

fn parse_seed(raw: String) -> Result<u64, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidSeed { raw })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: launching UI when no subcommand is provided.
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

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter, |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    let Parsed::Run(args) = parsed else {
        print_usage();
        return Ok(());
    };

    init_tracing();

    match cmd {
        Command::Check => check_bank(&args),
        Command::Ui => launch_ui(args),
    }
}

/// Load the bank without starting the UI and report what each sheet contributed.
fn check_bank(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let source = open_source(&args.file)?;
    let sheets = source.read_sheets()?;
    for sheet in &sheets {
        if sheet.has_question_column() {
            println!("{}: {} rows", sheet.name, sheet.rows.len());
        } else {
            println!("{}: skipped (no Question column)", sheet.name);
        }
    }
    let bank = assemble_bank(&source.cache_key(), sheets)?;
    println!("{}: {} questions ready", args.file.display(), bank.len());
    Ok(())
}

fn launch_ui(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    // Load before opening a window so a bad bank never reaches the UI.
    let cache = BankCache::new();
    let quiz_loop = QuizLoopService::load(&cache, &args.file)?.with_seed(args.seed);
    info!(
        title = %args.title,
        questions = quiz_loop.bank_size(),
        seeded = args.seed.is_some(),
        "launching quiz"
    );

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        title: args.title,
        quiz_loop: Arc::new(quiz_loop),
    });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Quiz")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
