use chrono::{DateTime, Utc};

use super::reports::select_report;
use super::types::{
    CalculationResult, CountryStats, Dossier, Language, NarrativeSections, TargetQuery,
};

pub const REFERENCE_PREFIX: &str = "RC";

const SEED_POOL_MODULUS: u64 = 997;
const SEED_RANGE: f64 = 100.0;

pub fn assemble(
    result: &CalculationResult,
    query: &TargetQuery,
    country: &CountryStats,
    lang: Language,
) -> Dossier {
    assemble_at(result, query, country, lang, Utc::now())
}

pub fn assemble_at(
    result: &CalculationResult,
    query: &TargetQuery,
    country: &CountryStats,
    lang: Language,
    timestamp: DateTime<Utc>,
) -> Dossier {
    Dossier {
        reference_id: reference_id(result, query),
        timestamp,
        country_name: country.display_name(lang).to_string(),
        intelligence_report: Some(select_report(result.tier, lang)),
        sections: NarrativeSections::placeholder(lang),
    }
}

/// Reproducible, not unique: distinct queries may share an id.
pub fn reference_seed(result: &CalculationResult, query: &TargetQuery) -> u32 {
    let spread = (query.target_income - query.user_income).abs();
    let pool_part = (result.pool_count % SEED_POOL_MODULUS) as f64;
    ((spread + pool_part) % SEED_RANGE).trunc() as u32
}

pub fn reference_id(result: &CalculationResult, query: &TargetQuery) -> String {
    let tier = result.tier.as_str();
    format!(
        "{REFERENCE_PREFIX}-{}-{}",
        &tier[..2],
        reference_seed(result, query)
    )
}

impl NarrativeSections {
    /// Fixed prose used when no narrative generator is reachable.
    pub fn placeholder(lang: Language) -> Self {
        let (body, commitment, alignment, distance, mirror, conclusion) = match lang {
            Language::En => (
                "Structural analysis in progress. Patterns observed in this group point toward \
                 stability built on mutual growth and everyday loyalty.",
                "Commitment and the decision to end a bond tend to track how aligned each side \
                 feels, and what else seems available within the same group.",
                "How a partnership is perceived here is shaped by the search for emotional ease \
                 and a routine that keeps a sense of purpose intact.",
                "Emotional distance usually builds quietly. When a person feels their path is not \
                 valued, or home has lost its calm, withdrawal starts long before any exit.",
                "This section looks at how the selected group reads age and income signals. For \
                 most people, calm and cooperation outweigh outward status.",
                "CONCLUSION: Realism is the most useful tool for choosing freely.",
            ),
            Language::Pt => (
                "Análise estrutural em andamento. Os padrões observados neste grupo apontam para \
                 estabilidade construída sobre crescimento mútuo e lealdade cotidiana.",
                "O compromisso e a decisão de encerrar um vínculo costumam acompanhar o quanto \
                 cada lado se sente alinhado e o que parece disponível no mesmo grupo.",
                "A forma como a parceria é percebida aqui passa pela busca de leveza emocional e \
                 de uma rotina que preserve o senso de propósito.",
                "O distanciamento emocional costuma crescer em silêncio. Quando alguém sente que \
                 sua trajetória não é valorizada, ou que o lar perdeu a calma, o afastamento \
                 começa muito antes de qualquer saída.",
                "Esta seção observa como o grupo selecionado lê sinais de idade e renda. Para a \
                 maioria das pessoas, calma e cooperação pesam mais que status.",
                "CONCLUSÃO: O realismo é a ferramenta mais útil para escolher com liberdade.",
            ),
        };

        Self {
            personal_insights: body.to_string(),
            structure_of_choice: body.to_string(),
            behavioral_mapping: body.to_string(),
            socioeconomic_symmetries: body.to_string(),
            relationship_stability: body.to_string(),
            commitment_patterns: commitment.to_string(),
            perceptual_alignment: alignment.to_string(),
            architecture_of_distance: distance.to_string(),
            through_the_mirror: mirror.to_string(),
            final_conclusion: conclusion.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{RarityTier, calculate};
    use chrono::TimeZone;

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

    fn sample_query(target_income: f64) -> TargetQuery {
        TargetQuery {
            target_income,
            age_min: 25,
            age_max: 40,
            user_income: 3_000.0,
            user_age: Some(28),
        }
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn reference_id_follows_seed_formula() {
        let country = sample_country();
        let query = sample_query(6_000.0);
        let result = calculate(&country, &query, Language::En).expect("valid inputs");
        assert_eq!(result.pool_count, 29_999);

        // (3000 + 29999 % 997) % 100 = (3000 + 89) % 100
        assert_eq!(reference_seed(&result, &query), 89);
        assert_eq!(reference_id(&result, &query), "RC-RA-89");
    }

    #[test]
    fn reference_id_uses_two_letter_tier_prefix() {
        let country = sample_country();
        let query = sample_query(0.0);
        let result = calculate(&country, &query, Language::En).expect("valid inputs");
        assert_eq!(result.tier, RarityTier::ZeroIncome);
        assert!(reference_id(&result, &query).starts_with("RC-ZE-"));
    }

    #[test]
    fn assemble_is_deterministic_for_a_fixed_timestamp() {
        let country = sample_country();
        let query = sample_query(6_000.0);
        let result = calculate(&country, &query, Language::Pt).expect("valid inputs");

        let a = assemble_at(&result, &query, &country, Language::Pt, fixed_time());
        let b = assemble_at(&result, &query, &country, Language::Pt, fixed_time());
        assert_eq!(a, b);
        assert_eq!(a.country_name, "Terra de Teste");
        assert_eq!(a.intelligence_report.map(|r| r.id), Some("RPT-PT-PH-001"));
        assert_eq!(a.sections, NarrativeSections::placeholder(Language::Pt));
    }

    #[test]
    fn with_sections_replaces_prose_only() {
        let country = sample_country();
        let query = sample_query(6_000.0);
        let result = calculate(&country, &query, Language::En).expect("valid inputs");
        let dossier = assemble_at(&result, &query, &country, Language::En, fixed_time());

        let mut prose = NarrativeSections::placeholder(Language::En);
        prose.final_conclusion = "Generated conclusion.".to_string();
        let updated = dossier.clone().with_sections(prose);

        assert_eq!(updated.reference_id, dossier.reference_id);
        assert_eq!(updated.intelligence_report, dossier.intelligence_report);
        assert_eq!(updated.sections.final_conclusion, "Generated conclusion.");
    }

    #[test]
    fn placeholders_differ_by_language() {
        let en = NarrativeSections::placeholder(Language::En);
        let pt = NarrativeSections::placeholder(Language::Pt);
        assert_ne!(en.personal_insights, pt.personal_insights);
        assert!(en.final_conclusion.starts_with("CONCLUSION"));
        assert!(pt.final_conclusion.starts_with("CONCLUSÃO"));
    }
}
