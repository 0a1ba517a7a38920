use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::api::AppState;
use crate::core::{Language, TargetQuery, country_by_id};
use crate::narrative::{DossierOutcome, HttpNarrativeGenerator, NarrativeGenerator, compose_dossier};

#[derive(Parser, Debug)]
#[command(
    name = "realitycheck",
    about = "Estimates how many single adults in a country meet an income and age target"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the JSON API.
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,

        #[command(flatten)]
        narrative: NarrativeArgs,
    },
    /// Run one estimate and print the result and dossier as JSON.
    Calculate(CalculateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct NarrativeArgs {
    #[arg(
        long,
        env = "REALITYCHECK_NARRATIVE_ENDPOINT",
        help = "Narrative generation endpoint; placeholder prose is used when unset"
    )]
    pub narrative_endpoint: Option<String>,

    #[arg(long, env = "REALITYCHECK_NARRATIVE_API_KEY", hide_env_values = true)]
    pub narrative_api_key: Option<String>,

    #[arg(long, default_value_t = 30, help = "Narrative request deadline in seconds")]
    pub narrative_timeout_secs: u64,
}

impl NarrativeArgs {
    pub fn generator(&self) -> Option<Arc<dyn NarrativeGenerator>> {
        let endpoint = self.narrative_endpoint.as_deref()?.trim();
        if endpoint.is_empty() {
            return None;
        }
        Some(Arc::new(HttpNarrativeGenerator::new(
            endpoint,
            self.narrative_api_key.clone(),
        )))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.narrative_timeout_secs.max(1))
    }

    pub fn app_state(&self) -> AppState {
        AppState {
            generator: self.generator(),
            narrative_timeout: self.timeout(),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliLanguage {
    En,
    Pt,
}

impl From<CliLanguage> for Language {
    fn from(value: CliLanguage) -> Self {
        match value {
            CliLanguage::En => Language::En,
            CliLanguage::Pt => Language::Pt,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct CalculateArgs {
    #[arg(long, help = "Country identifier, e.g. bra")]
    pub country: String,
    #[arg(long, help = "Minimum monthly income in local currency")]
    pub target_income: f64,
    #[arg(long, default_value_t = 25, allow_negative_numbers = true)]
    pub age_min: i32,
    #[arg(long, default_value_t = 40, allow_negative_numbers = true)]
    pub age_max: i32,
    #[arg(long, default_value_t = 0.0)]
    pub user_income: f64,
    #[arg(long)]
    pub user_age: Option<u32>,
    #[arg(long, value_enum, default_value_t = CliLanguage::En)]
    pub lang: CliLanguage,

    #[command(flatten)]
    pub narrative: NarrativeArgs,
}

impl CalculateArgs {
    pub fn query(&self) -> TargetQuery {
        TargetQuery {
            target_income: self.target_income,
            age_min: self.age_min,
            age_max: self.age_max,
            user_income: self.user_income,
            user_age: self.user_age,
        }
    }
}

pub async fn run_calculate(args: &CalculateArgs) -> Result<DossierOutcome, String> {
    let country = country_by_id(&args.country)
        .ok_or_else(|| format!("--country: unknown country '{}'", args.country))?;
    let generator = args.narrative.generator();

    compose_dossier(
        country,
        &args.query(),
        args.lang.into(),
        generator.as_deref(),
        args.narrative.timeout(),
    )
    .await
    .map_err(|e| e.to_string())
}
