use clap::Parser;
use conceptify::logger::{self, LogLevel, LoggerConfig};
use conceptify::{ConceptApp, Config, ConsolePresenter, GenerationForm, SessionState};
use std::path::PathBuf;
use std::process::ExitCode;

/// Conceptify - turn a concept into an educational diagram.
#[derive(Parser, Debug)]
#[command(name = "conceptify", version, about)]
struct Cli {
    /// Describe your concept (e.g. "Photosynthesis", "Ancient Rome market")
    prompt: String,

    /// Number of images (1-4)
    #[arg(short = 'n', long, default_value_t = 1)]
    count: u8,

    /// Aspect ratio: 1:1, 16:9, 9:16, 4:3 or 3:4
    #[arg(short, long, default_value = "1:1")]
    aspect_ratio: String,

    /// Image style: "Simple diagram", "Detailed labeled diagram", "Realistic scene", "Comic-style"
    #[arg(short, long, default_value = "Simple diagram")]
    style: String,

    /// Turn off educational clarity enhancement
    #[arg(long)]
    no_enhance: bool,

    /// Return as soon as the request is accepted instead of waiting for the images
    #[arg(long)]
    no_wait: bool,

    /// API key; overrides BRIA_API_KEY for this session
    #[arg(long)]
    api_key: Option<String>,

    /// Where to write downloaded images
    #[arg(short, long, env = "CONCEPTIFY_OUTPUT_DIR")]
    out_dir: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    log_level: LogLevel,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Also append logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv_loaded = dotenv::dotenv().is_ok();
    let cli = Cli::parse();

    let mut logger_config = LoggerConfig::new()
        .with_level(cli.log_level)
        .with_json_output(cli.json_logs);
    if let Some(path) = cli.log_file.as_deref() {
        logger_config = logger_config.with_file_output(&path.to_string_lossy());
    }
    if let Err(e) = logger::init_with_config(logger_config) {
        eprintln!("Failed to initialize logger: {}", e);
        return ExitCode::FAILURE;
    }

    if dotenv_loaded {
        log::info!("✅ .env file loaded successfully");
    } else {
        log::warn!("⚠️  No .env file found, using system environment variables");
    }
    logger::log_startup_info("Conceptify", env!("CARGO_PKG_VERSION"));

    let mut config = Config::from_env();
    if let Some(dir) = cli.out_dir {
        config = config.with_output_dir(dir);
    }
    logger::log_config_info(&config);

    let app = match ConceptApp::from_config(&config) {
        Ok(app) => app,
        Err(e) => {
            log::error!("❌ Failed to initialize client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut session = SessionState::initialize(&config);
    if let Some(key) = cli.api_key.as_deref() {
        session.set_credential(key);
    }

    let form = GenerationForm {
        prompt: cli.prompt,
        num_images: cli.count,
        aspect_ratio: cli.aspect_ratio,
        enhance_image: !cli.no_enhance,
        style: cli.style,
        sync: !cli.no_wait,
    };

    let mut presenter = ConsolePresenter::new(&config.output_dir);
    match app.handle_generate(&mut session, &form, &mut presenter).await {
        Some(outcome) if outcome.report.any_fetched() => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}
