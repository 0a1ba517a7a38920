use serde::Serialize;

use crate::core::{CalculationResult, CountryStats, Language, TargetQuery};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncomePosition {
    Foundational,
    ActiveGrowth,
    Standard,
    PeakAutonomy,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifePhase {
    Formation,
    Construction,
    Consolidation,
    PeakStability,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Optionality {
    High,
    ModerateToLow,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncomeAsymmetry {
    TargetAnchored,
    SeekerAnchored,
    Symmetric,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeekerPhase {
    Formation,
    Construction,
    Maturity,
}

/// Categorical digest handed to the narrative generator. Carries no raw
/// probabilities.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeSummary {
    pub location: String,
    pub income_position: IncomePosition,
    pub life_phase: LifePhase,
    pub optionality: Optionality,
    pub asymmetry: IncomeAsymmetry,
    pub seeker_age: Option<u32>,
    pub seeker_income: f64,
    pub seeker_phase: Option<SeekerPhase>,
    pub language: Language,
}

impl NarrativeSummary {
    pub fn build(
        query: &TargetQuery,
        result: &CalculationResult,
        country: &CountryStats,
        lang: Language,
    ) -> Self {
        Self {
            location: country.display_name(lang).to_string(),
            income_position: income_position(query.target_income, country),
            life_phase: life_phase(query.age_min, query.age_max),
            optionality: if result.tier.is_scarce() {
                Optionality::High
            } else {
                Optionality::ModerateToLow
            },
            asymmetry: asymmetry(query.target_income, query.user_income),
            seeker_age: query.user_age,
            seeker_income: query.user_income,
            seeker_phase: query.user_age.map(seeker_phase),
            language: lang,
        }
    }
}

fn income_position(target: f64, country: &CountryStats) -> IncomePosition {
    if target >= country.income_median && target <= country.income_mean {
        IncomePosition::ActiveGrowth
    } else if target < country.income_median {
        IncomePosition::Foundational
    } else if target > country.income_mean * 3.0 {
        IncomePosition::PeakAutonomy
    } else {
        IncomePosition::Standard
    }
}

// Midpoint of the raw requested ages, before any adult-span clamping.
fn life_phase(age_min: i32, age_max: i32) -> LifePhase {
    let midpoint = (age_min as f64 + age_max as f64) / 2.0;
    if midpoint < 25.0 {
        LifePhase::Formation
    } else if midpoint < 35.0 {
        LifePhase::Construction
    } else if midpoint > 48.0 {
        LifePhase::PeakStability
    } else {
        LifePhase::Consolidation
    }
}

fn asymmetry(target: f64, user: f64) -> IncomeAsymmetry {
    if target > user * 2.0 {
        IncomeAsymmetry::TargetAnchored
    } else if user > target {
        IncomeAsymmetry::SeekerAnchored
    } else {
        IncomeAsymmetry::Symmetric
    }
}

fn seeker_phase(age: u32) -> SeekerPhase {
    if age < 25 {
        SeekerPhase::Formation
    } else if age > 45 {
        SeekerPhase::Maturity
    } else {
        SeekerPhase::Construction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{calculate, country_by_id};

    fn query(target_income: f64, user_income: f64, age_min: i32, age_max: i32) -> TargetQuery {
        TargetQuery {
            target_income,
            age_min,
            age_max,
            user_income,
            user_age: Some(28),
        }
    }

    fn summarize(q: &TargetQuery) -> NarrativeSummary {
        let country = country_by_id("bra").expect("catalog entry");
        let result = calculate(country, q, Language::Pt).expect("valid inputs");
        NarrativeSummary::build(q, &result, country, Language::Pt)
    }

    #[test]
    fn income_position_bands() {
        // bra: median 2100, mean 3000
        assert_eq!(
            summarize(&query(1_000.0, 0.0, 25, 40)).income_position,
            IncomePosition::Foundational
        );
        assert_eq!(
            summarize(&query(2_500.0, 0.0, 25, 40)).income_position,
            IncomePosition::ActiveGrowth
        );
        assert_eq!(
            summarize(&query(5_000.0, 0.0, 25, 40)).income_position,
            IncomePosition::Standard
        );
        assert_eq!(
            summarize(&query(9_500.0, 0.0, 25, 40)).income_position,
            IncomePosition::PeakAutonomy
        );
    }

    #[test]
    fn life_phase_uses_age_midpoint() {
        assert_eq!(life_phase(18, 30), LifePhase::Formation);
        assert_eq!(life_phase(25, 40), LifePhase::Consolidation);
        assert_eq!(life_phase(25, 35), LifePhase::Construction);
        assert_eq!(life_phase(45, 60), LifePhase::PeakStability);
        assert_eq!(life_phase(40, 56), LifePhase::Consolidation);
    }

    #[test]
    fn asymmetry_compares_target_with_user_income() {
        assert_eq!(asymmetry(6_001.0, 3_000.0), IncomeAsymmetry::TargetAnchored);
        assert_eq!(asymmetry(6_000.0, 3_000.0), IncomeAsymmetry::Symmetric);
        assert_eq!(asymmetry(2_000.0, 3_000.0), IncomeAsymmetry::SeekerAnchored);
    }

    #[test]
    fn optionality_follows_scarce_tiers() {
        assert_eq!(summarize(&query(9_500.0, 0.0, 25, 40)).optionality, Optionality::High);
        assert_eq!(summarize(&query(2_000.0, 0.0, 25, 40)).optionality, Optionality::ModerateToLow);
    }

    #[test]
    fn seeker_phase_is_absent_without_age() {
        let mut q = query(3_000.0, 2_000.0, 25, 40);
        q.user_age = None;
        let summary = summarize(&q);
        assert_eq!(summary.seeker_phase, None);
        assert_eq!(summary.location, "Brasil");

        assert_eq!(seeker_phase(22), SeekerPhase::Formation);
        assert_eq!(seeker_phase(30), SeekerPhase::Construction);
        assert_eq!(seeker_phase(50), SeekerPhase::Maturity);
    }
}
