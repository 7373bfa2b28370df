//! Qualification desk entry point
//!
//! Without a file only the catalog is loaded and checked. With a saved
//! qualification the call is replayed and its result screen printed;
//! `--save` puts it into the lead pool and `--transfer` also hands it to
//! the CRM.

mod replay;

use anyhow::{bail, Context};
use chrono::Local;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use visa_crm_config::{
    load_settings, CatalogValidator, ServiceCatalog, Settings, ValidationSeverity,
};
use visa_crm_persistence::{CustomerMirror, LoggingMirror};
use visa_crm_qualification::{save_to_lead_pool, transfer_to_crm_with, QualificationSession};

use crate::replay::SavedQualification;

/// Qualification desk: replay a saved call and hand it over.
#[derive(Debug, Parser)]
#[command(name = "visa-crm-desk", version, about = "Lead qualification desk")]
struct Cli {
    /// Saved qualification JSON; without it only the catalog is checked
    input: Option<PathBuf>,

    /// Save the replayed lead into the lead pool
    #[arg(long, requires = "input")]
    save: bool,

    /// Save the lead and transfer it to the CRM
    #[arg(long, requires = "input", conflicts_with = "save")]
    transfer: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Priority: env vars > config/{env}.yaml > config/default.yaml > defaults
    let env = std::env::var("VISA_CRM_ENV").ok();
    let settings = match load_settings(env.as_deref()) {
        Ok(settings) => {
            // Tracing not yet initialized
            eprintln!(
                "Loaded configuration from files (env: {})",
                env.as_deref().unwrap_or("default")
            );
            settings
        }
        Err(e) => {
            eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
            Settings::default()
        }
    };

    init_tracing(&settings);
    tracing::info!("Starting qualification desk v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(environment = ?settings.environment, "Configuration loaded");

    let catalog = load_catalog(&settings)?;

    let Some(input) = cli.input else {
        tracing::info!(services = catalog.len(), "No qualification given, catalog check only");
        return Ok(());
    };

    let saved = SavedQualification::load(&input)?;
    let session = saved.replay(catalog, settings.scoring.clone());
    let now = Local::now().naive_local();
    print_result(&session, now);

    if !cli.save && !cli.transfer {
        return Ok(());
    }

    let mirror: Arc<dyn CustomerMirror> = Arc::new(LoggingMirror);
    let persistence = visa_crm_persistence::init(Some(mirror));

    let confirmation = saved.confirmation(&session);
    let Some(lead) = save_to_lead_pool(&session, &confirmation, &*persistence.leads, now) else {
        bail!("name and phone are required to save the lead");
    };
    println!("Saved lead {}", lead.id);

    if cli.transfer {
        let customer = transfer_to_crm_with(
            &settings.scoring,
            lead.id,
            &*persistence.leads,
            &*persistence.customers,
        )?;
        println!("Transferred to CRM as {} ({})", customer.full_name(), customer.stage);
    }

    Ok(())
}

/// Configured catalog, checked before any call is replayed
///
/// Critical findings always abort; in staging and production reference
/// errors abort too.
fn load_catalog(settings: &Settings) -> anyhow::Result<Arc<ServiceCatalog>> {
    let catalog = settings.load_catalog().context("loading service catalog")?;

    let result = CatalogValidator::new()
        .with_cutoff(settings.scoring.disqualify_at_or_below)
        .validate(&catalog);
    for finding in &result.errors {
        match finding.severity {
            ValidationSeverity::Warning => tracing::warn!("{}", finding),
            _ => tracing::error!("{}", finding),
        }
    }

    let blocking = if settings.environment.is_strict() {
        result
            .errors
            .iter()
            .any(|e| e.severity >= ValidationSeverity::Error)
    } else {
        !result.is_ok()
    };
    if blocking {
        bail!("{}", result.summary());
    }

    tracing::info!(services = catalog.len(), "{}", result.summary());
    Ok(catalog)
}

fn print_result(session: &QualificationSession, now: chrono::NaiveDateTime) {
    let temperature = session.temperature();
    let action = session.recommended_action();

    println!("Service: {}", session.service());
    println!("Progress: {} ({}%)", session.progress_text(), session.progress_percent());
    println!("Score: {} ({})", temperature.score_display, temperature.label);
    if let Some(message) = session.disqualification_message() {
        println!("Disqualified: {}", message);
    }
    for alert in session.alerts() {
        println!("[{}] {}", alert.alert.severity.as_str(), alert.alert.text);
    }

    println!("\n{}", action.title);
    for (i, step) in action.steps.iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }

    if let Some(summary) = session.summary(now) {
        println!("\n{}", summary);
    }
}

/// Initialize tracing (console only)
fn init_tracing(settings: &Settings) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = &settings.observability.log_level;
        format!("visa_crm={}", level).into()
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);
    let fmt_layer = if settings.observability.log_json {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .json()
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };
    subscriber.with(fmt_layer).init();
}
