mod classify;
mod countries;
mod dossier;
mod engine;
mod error;
mod model;
mod reports;
mod types;

pub use classify::{IncomeBreakpoints, classify_deviation, classify_rarity, rarity_index};
pub use countries::{countries, country_by_id};
pub use dossier::{REFERENCE_PREFIX, assemble, assemble_at, reference_id, reference_seed};
pub use engine::{
    JOINT_PROBABILITY_FLOOR, calculate, joint_probability, pool_count, validate_country,
    validate_query,
};
pub use error::{CoreError, Result};
pub use model::{
    ADULT_AGE_MAX, ADULT_AGE_MIN, age_range_probability, erf, income_survival_probability,
};
pub use reports::{catalog, select_report};
pub use types::{
    CalculationResult, CountryStats, DeviationLevel, Dossier, IncomeStats, IntelligenceReport,
    Language, NarrativeSections, RarityTier, TargetQuery,
};
