use anyhow::{anyhow, bail, Context};
use clap::Parser;
use housing_predictor::cli::{Cli, Commands, PredictArgs};
use housing_predictor::config::{AppConfig, LoggingConfig};
use housing_predictor::domain::PropertyRecord;
use housing_predictor::ml::ModelBundle;
use housing_predictor::predictor::Predictor;
use housing_predictor::server::start_server;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_from(&cli.config_dir).with_context(|| {
        format!(
            "failed to load configuration from {}",
            cli.config_dir.display()
        )
    })?;
    cli.apply_overrides(&mut config);
    config
        .validate()
        .map_err(|errors| anyhow!("invalid configuration: {}", errors.join("; ")))?;

    match &cli.command {
        None | Some(Commands::Serve(_)) => {
            init_logging(&config.logging);
            run_serve(config).await?;
        }
        Some(Commands::Predict(args)) => {
            init_logging_simple();
            run_predict(&config, args)?;
        }
        Some(Commands::Models) => {
            init_logging_simple();
            run_models(&config)?;
        }
    }

    Ok(())
}

async fn run_serve(config: AppConfig) -> anyhow::Result<()> {
    info!(
        version = env!("CARGO_PKG_VERSION"),
        models_dir = %config.models.dir.display(),
        "Starting housing price predictor"
    );

    // Load failures are logged and recorded; the server starts regardless.
    let bundle = ModelBundle::load(&config.models);
    let predictor = Predictor::new(bundle, config.clustering.feature_width);

    start_server(&config.server, predictor).await?;
    Ok(())
}

fn run_predict(config: &AppConfig, args: &PredictArgs) -> anyhow::Result<()> {
    let raw = match (&args.input, &args.file) {
        (Some(input), _) => input.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => bail!("either --input or --file is required"),
    };
    let record: PropertyRecord =
        serde_json::from_str(&raw).context("input is not a valid property record")?;

    let predictor = Predictor::new(
        ModelBundle::load(&config.models),
        config.clustering.feature_width,
    );
    let result = predictor.predict_result(&record)?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn run_models(config: &AppConfig) -> anyhow::Result<()> {
    let bundle = ModelBundle::load(&config.models);
    let statuses = bundle.statuses();

    println!("Model directory: {}", config.models.dir.display());
    for status in &statuses {
        match &status.error {
            None => println!("  {:<18} loaded", status.model),
            Some(reason) => println!("  {:<18} FAILED: {}", status.model, reason),
        }
    }

    let failed = statuses.iter().filter(|s| !s.loaded).count();
    if failed > 0 {
        bail!("{failed} model(s) failed to load");
    }
    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn init_logging_simple() {
    // Minimal logging for CLI commands
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .try_init();
}
