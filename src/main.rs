use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use rescisao_client::clock::{Clock, SystemClock};
use rescisao_client::config::{ClientConfig, ConfigLoader};
use rescisao_client::form::{ExtraCompensationList, FormInput};
use rescisao_client::logging::init_logging;
use rescisao_client::pipeline::{RequestPipeline, SubmissionOutcome};
use rescisao_client::render::to_plain_text;
use rescisao_client::ui::{NoticeKind, UiState};

/// Submit a severance (rescisão) calculation and print the breakdown.
///
/// Identical submissions within the cache lifetime are answered from the
/// local cache without contacting the service.
#[derive(Parser, Debug)]
#[command(name = "rescisao")]
#[command(version, about, long_about = None)]
struct Args {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the calculation endpoint
    #[arg(long)]
    endpoint: Option<String>,

    /// Override the cache file location
    #[arg(long)]
    store: Option<PathBuf>,

    /// Monthly salary (e.g. 3000.00)
    #[arg(short, long)]
    salary: String,

    /// Admission date, YYYY-MM-DD
    #[arg(short, long)]
    admission: String,

    /// Termination date, YYYY-MM-DD
    #[arg(short, long)]
    termination: String,

    /// Termination reason code (e.g. demissao-sem-justa-causa)
    #[arg(short, long)]
    reason: String,

    /// Notice type: indenizado, trabalhado or reduzido
    #[arg(short, long, default_value = "indenizado")]
    notice: String,

    /// The employee has disability protection
    #[arg(long, default_value_t = false)]
    disability: bool,

    /// Extra compensation as MONTH:QUANTITY:AMOUNT; repeatable. A blank
    /// month means the current one.
    #[arg(short, long = "extra", value_name = "MONTH:QUANTITY:AMOUNT")]
    extras: Vec<String>,

    /// Log filter (e.g. info, debug); RUST_LOG takes precedence
    #[arg(long)]
    log_level: Option<String>,
}

fn load_config(args: &Args) -> Result<ClientConfig> {
    let mut config = match &args.config {
        Some(path) => ConfigLoader::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?
            .into_config(),
        None => ClientConfig::default(),
    };
    if let Some(endpoint) = &args.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(store) = &args.store {
        config.cache.store_path = store.clone();
    }
    Ok(config)
}

fn build_extras(raw: &[String], clock: &dyn Clock) -> Result<ExtraCompensationList> {
    let mut list = ExtraCompensationList::new();
    for value in raw {
        let parts: Vec<&str> = value.split(':').collect();
        let [month, quantity, amount] = parts.as_slice() else {
            bail!("Invalid --extra '{}': expected MONTH:QUANTITY:AMOUNT", value);
        };

        let handle = list.add_record(clock.today());
        if let Some(field) = list.field_mut(handle) {
            if !month.trim().is_empty() {
                field.month = month.trim().to_string();
            }
            field.quantity = quantity.to_string();
            field.amount = amount.to_string();
        }
    }
    Ok(list)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.log_level.as_deref());

    let config = load_config(&args)?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let extras = build_extras(&args.extras, clock.as_ref())?;

    let form = FormInput {
        salary: args.salary.clone(),
        admission_date: args.admission.clone(),
        termination_date: args.termination.clone(),
        termination_reason: args.reason.clone(),
        notice_type: args.notice.clone(),
        disability_checkbox: args.disability.then(|| "on".to_string()),
    };

    let mut pipeline = RequestPipeline::from_config(&config, Arc::clone(&clock)).with_context(
        || format!("Failed to open cache: {}", config.cache.store_path.display()),
    )?;
    let mut ui = UiState::new(config.notice_lifetime());

    let outcome = pipeline.submit(&mut ui, &form, &extras).await;

    for notice in ui.active_notices(clock.now()) {
        match notice.kind {
            NoticeKind::Error => eprintln!("error: {}", notice.text),
            NoticeKind::Success => eprintln!("{}", notice.text),
        }
    }

    match outcome {
        SubmissionOutcome::Rendered { lines, .. } => {
            print!("{}", to_plain_text(&lines));
            Ok(ExitCode::SUCCESS)
        }
        _ => Ok(ExitCode::FAILURE),
    }
}
