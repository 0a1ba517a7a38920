use super::classify::{IncomeBreakpoints, classify_deviation, classify_rarity, rarity_index};
use super::error::{CoreError, Result};
use super::model::{age_range_probability, income_survival_probability};
use super::types::{CalculationResult, CountryStats, IncomeStats, Language, TargetQuery};

/// Smallest joint probability ever reported. Reads as "vanishingly rare"
/// rather than "impossible".
pub const JOINT_PROBABILITY_FLOOR: f64 = 1e-6;

pub fn validate_country(country: &CountryStats) -> Result<()> {
    for (field, value) in [
        ("incomeMedian", country.income_median),
        ("incomeMean", country.income_mean),
        ("incomeMode", country.income_mode),
        ("incomeStdDev", country.income_std_dev),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(CoreError::InvalidCountry {
                field,
                message: format!("must be a finite number > 0 (got {value}) for {}", country.id),
            });
        }
    }

    if country.single_eligible_adults == 0 {
        return Err(CoreError::InvalidCountry {
            field: "singleEligibleAdults",
            message: format!("must be > 0 for {}", country.id),
        });
    }

    Ok(())
}

pub fn validate_query(query: &TargetQuery) -> Result<()> {
    for (field, value) in [
        ("targetIncome", query.target_income),
        ("userIncome", query.user_income),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(CoreError::InvalidQuery {
                field,
                message: format!("must be a finite number >= 0 (got {value})"),
            });
        }
    }
    Ok(())
}

pub fn joint_probability(income_probability: f64, age_probability: f64) -> f64 {
    (income_probability * age_probability).max(JOINT_PROBABILITY_FLOOR)
}

pub fn pool_count(single_eligible_adults: u64, joint_probability: f64) -> u64 {
    (single_eligible_adults as f64 * joint_probability).round() as u64
}

pub fn calculate(
    country: &CountryStats,
    query: &TargetQuery,
    lang: Language,
) -> Result<CalculationResult> {
    validate_country(country)?;
    validate_query(query)?;

    let income_probability = income_survival_probability(
        query.target_income,
        country.income_median,
        country.income_std_dev,
    );
    let age_probability = age_range_probability(query.age_min, query.age_max);
    let joint = joint_probability(income_probability, age_probability);

    let breakpoints = IncomeBreakpoints {
        mode: country.income_mode,
        median: country.income_median,
        mean: country.income_mean,
    };
    let tier = classify_rarity(query.target_income, breakpoints, joint);
    let deviation = classify_deviation(query.target_income, country.income_mean);

    tracing::debug!(
        country = %country.id,
        target_income = query.target_income,
        income_probability,
        age_probability,
        joint_probability = joint,
        tier = tier.as_str(),
        "calculated pool estimate"
    );

    Ok(CalculationResult {
        income_probability,
        age_probability,
        joint_probability: joint,
        pool_count: pool_count(country.single_eligible_adults, joint),
        matches_per_hundred: matches_per_hundred(joint),
        rarity_index: rarity_index(query.target_income, country.income_mean),
        tier,
        deviation,
        local_income_stats: IncomeStats {
            median: country.income_median,
            mean: country.income_mean,
            mode: country.income_mode,
        },
        probability_statement: probability_statement(joint, country, lang),
    })
}

fn matches_per_hundred(joint: f64) -> u32 {
    (joint * 100.0).ceil().clamp(0.0, 100.0) as u32
}

fn probability_statement(joint: f64, country: &CountryStats, lang: Language) -> String {
    let pct = joint * 100.0;
    let name = country.display_name(lang);
    match lang {
        Language::En => format!("{pct:.4}% of single adults in {name} meet these criteria."),
        Language::Pt => {
            format!("{pct:.4}% dos adultos solteiros em {name} atendem a estes critérios.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DeviationLevel, RarityTier};
    use proptest::prelude::{prop_assert, proptest};

    fn assert_approx_tol(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    fn sample_country() -> CountryStats {
        CountryStats {
            id: "tst".to_string(),
            name_en: "Testland".to_string(),
            name_pt: "Terra de Teste".to_string(),
            currency: "TST".to_string(),
            ppp_conversion: 1.0,
            total_population: 3_000_000,
            adult_population: 2_000_000,
            single_eligible_adults: 1_000_000,
            income_median: 3_000.0,
            income_mean: 3_500.0,
            income_mode: 2_000.0,
            income_std_dev: 0.6,
            source: String::new(),
            reliability: 1.0,
        }
    }

    fn query(target_income: f64, age_min: i32, age_max: i32) -> TargetQuery {
        TargetQuery {
            target_income,
            age_min,
            age_max,
            user_income: 3_000.0,
            user_age: None,
        }
    }

    #[test]
    fn scenario_rare_target_within_age_window() {
        let result = calculate(&sample_country(), &query(6_000.0, 25, 40), Language::En)
            .expect("valid inputs");

        assert_approx_tol(result.income_probability, 0.124, 5e-4);
        assert_approx_tol(result.age_probability, 15.0 / 62.0, 1e-12);
        assert_approx_tol(result.joint_probability, 0.0300, 1e-4);
        assert_eq!(result.pool_count, 29_999);
        assert_eq!(result.matches_per_hundred, 3);
        assert_eq!(result.tier, RarityTier::Rare);
        assert_eq!(result.deviation, DeviationLevel::AroundMean);
        assert_approx_tol(result.rarity_index, 28.571_428_6, 1e-6);
        assert_eq!(result.local_income_stats.mode, 2_000.0);
    }

    #[test]
    fn scenario_zero_target_income() {
        let result = calculate(&sample_country(), &query(0.0, 25, 40), Language::En)
            .expect("valid inputs");

        assert_eq!(result.income_probability, 1.0);
        assert_eq!(result.tier, RarityTier::ZeroIncome);
        assert_eq!(result.deviation, DeviationLevel::BelowMean);
        assert_eq!(result.rarity_index, 0.0);
    }

    #[test]
    fn scenario_far_above_mean_is_phantom() {
        let result = calculate(&sample_country(), &query(25_000.0, 25, 40), Language::En)
            .expect("valid inputs");

        assert_eq!(result.tier, RarityTier::Phantom);
        assert_eq!(result.deviation, DeviationLevel::FarAboveMean);
        assert_eq!(result.rarity_index, 100.0);
    }

    #[test]
    fn scenario_inverted_age_range_floors_joint_probability() {
        let result = calculate(&sample_country(), &query(6_000.0, 50, 30), Language::En)
            .expect("valid inputs");

        assert_eq!(result.age_probability, 0.0);
        assert_eq!(result.joint_probability, JOINT_PROBABILITY_FLOOR);
        assert_eq!(result.pool_count, 1);
        // Above the mean with a floored density, so the override fires.
        assert_eq!(result.tier, RarityTier::Phantom);
    }

    #[test]
    fn statement_is_localized() {
        let en = calculate(&sample_country(), &query(6_000.0, 25, 40), Language::En)
            .expect("valid inputs");
        let pt = calculate(&sample_country(), &query(6_000.0, 25, 40), Language::Pt)
            .expect("valid inputs");
        assert_eq!(
            en.probability_statement,
            "2.9999% of single adults in Testland meet these criteria."
        );
        assert!(pt.probability_statement.contains("Terra de Teste"));
        assert!(pt.probability_statement.starts_with("2.9999%"));
    }

    #[test]
    fn rejects_non_positive_country_parameters() {
        let mut country = sample_country();
        country.income_std_dev = 0.0;
        let err = calculate(&country, &query(6_000.0, 25, 40), Language::En)
            .expect_err("must reject zero sigma");
        assert!(matches!(
            err,
            CoreError::InvalidCountry { field: "incomeStdDev", .. }
        ));

        let mut country = sample_country();
        country.income_median = -1.0;
        let err = validate_country(&country).expect_err("must reject negative median");
        assert!(err.to_string().contains("incomeMedian"));

        let mut country = sample_country();
        country.single_eligible_adults = 0;
        let err = validate_country(&country).expect_err("must reject empty population");
        assert!(err.to_string().contains("singleEligibleAdults"));

        let mut country = sample_country();
        country.income_mean = f64::NAN;
        assert!(validate_country(&country).is_err());
    }

    #[test]
    fn rejects_negative_or_non_finite_incomes() {
        let err = calculate(&sample_country(), &query(-1.0, 25, 40), Language::En)
            .expect_err("must reject negative target");
        assert!(matches!(err, CoreError::InvalidQuery { field: "targetIncome", .. }));

        let mut q = query(6_000.0, 25, 40);
        q.user_income = f64::INFINITY;
        let err = calculate(&sample_country(), &q, Language::En)
            .expect_err("must reject infinite user income");
        assert!(matches!(err, CoreError::InvalidQuery { field: "userIncome", .. }));
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_result_invariants_hold(
            target in 0u32..1_000_000,
            age_min in -20i32..120,
            age_max in -20i32..120,
            sigma_bp in 100u32..20_000
        ) {
            let mut country = sample_country();
            country.income_std_dev = sigma_bp as f64 / 10_000.0;
            let result = calculate(&country, &query(target as f64, age_min, age_max), Language::En)
                .expect("valid inputs");

            prop_assert!(result.joint_probability >= JOINT_PROBABILITY_FLOOR);
            prop_assert!(result.joint_probability <= 1.0);
            prop_assert!((0.0..=100.0).contains(&result.rarity_index));
            prop_assert!(result.matches_per_hundred <= 100);
            prop_assert!(result.pool_count <= country.single_eligible_adults);
        }
    }
}
