//! External narrative generation.
//!
//! The generator only ever sees a [`NarrativeSummary`]. Numbers are computed
//! before it is called, and a failed call leaves the placeholder prose in
//! place.

mod summary;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;

use crate::core::{
    self as engine, CalculationResult, CountryStats, Dossier, Language, NarrativeSections,
    TargetQuery,
};

pub use summary::{
    IncomeAsymmetry, IncomePosition, LifePhase, NarrativeSummary, Optionality, SeekerPhase,
};

#[derive(Error, Debug)]
pub enum NarrativeError {
    #[error("narrative service unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),

    #[error("narrative service returned HTTP {0}")]
    Status(u16),

    #[error("narrative service returned a malformed body: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("narrative service did not answer within {0:?}")]
    TimedOut(Duration),
}

#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    async fn generate(
        &self,
        summary: &NarrativeSummary,
    ) -> Result<NarrativeSections, NarrativeError>;
}

#[derive(Debug, Clone)]
pub struct HttpNarrativeGenerator {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct NarrativeRequest<'a> {
    summary: &'a NarrativeSummary,
    language: Language,
}

impl HttpNarrativeGenerator {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key,
        }
    }
}

#[async_trait]
impl NarrativeGenerator for HttpNarrativeGenerator {
    async fn generate(
        &self,
        summary: &NarrativeSummary,
    ) -> Result<NarrativeSections, NarrativeError> {
        tracing::debug!("Requesting narrative from: {}", self.endpoint);

        let mut request = self.client.post(&self.endpoint).json(&NarrativeRequest {
            summary,
            language: summary.language,
        });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("Narrative response status: {}", status);
        if !status.is_success() {
            return Err(NarrativeError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str::<NarrativeSections>(&body)?)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DossierOutcome {
    pub result: CalculationResult,
    pub dossier: Dossier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative_error: Option<String>,
}

/// Runs the engine, assembles the dossier and, when a generator is given,
/// makes a single bounded attempt to replace the placeholder prose.
pub async fn compose_dossier(
    country: &CountryStats,
    query: &TargetQuery,
    lang: Language,
    generator: Option<&dyn NarrativeGenerator>,
    timeout: Duration,
) -> engine::Result<DossierOutcome> {
    let result = engine::calculate(country, query, lang)?;
    let dossier = engine::assemble(&result, query, country, lang);

    let Some(generator) = generator else {
        return Ok(DossierOutcome {
            result,
            dossier,
            narrative_error: None,
        });
    };

    let summary = NarrativeSummary::build(query, &result, country, lang);
    let generated = match tokio::time::timeout(timeout, generator.generate(&summary)).await {
        Ok(outcome) => outcome,
        Err(_) => Err(NarrativeError::TimedOut(timeout)),
    };

    match generated {
        Ok(sections) => Ok(DossierOutcome {
            result,
            dossier: dossier.with_sections(sections),
            narrative_error: None,
        }),
        Err(e) => {
            tracing::warn!(
                reference_id = %dossier.reference_id,
                "Narrative generation failed, keeping placeholder sections: {e}"
            );
            Ok(DossierOutcome {
                result,
                dossier,
                narrative_error: Some(e.to_string()),
            })
        }
    }
}
