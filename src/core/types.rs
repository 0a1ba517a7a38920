use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Language {
    #[default]
    En,
    Pt,
}

impl Language {
    /// Resolves a loose language tag (`en`, `PT`, `pt-BR`, ...). Anything
    /// unsupported falls back to the default language.
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "pt" => Language::Pt,
            _ => Language::default(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Language::En => "EN",
            Language::Pt => "PT",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RarityTier {
    ZeroIncome,
    MinimumWage,
    ExtremelyCommon,
    Common,
    Rare,
    ExtremelyRare,
    Phantom,
}

impl RarityTier {
    pub const ALL: [RarityTier; 7] = [
        RarityTier::ZeroIncome,
        RarityTier::MinimumWage,
        RarityTier::ExtremelyCommon,
        RarityTier::Common,
        RarityTier::Rare,
        RarityTier::ExtremelyRare,
        RarityTier::Phantom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RarityTier::ZeroIncome => "ZERO_INCOME",
            RarityTier::MinimumWage => "MINIMUM_WAGE",
            RarityTier::ExtremelyCommon => "EXTREMELY_COMMON",
            RarityTier::Common => "COMMON",
            RarityTier::Rare => "RARE",
            RarityTier::ExtremelyRare => "EXTREMELY_RARE",
            RarityTier::Phantom => "PHANTOM",
        }
    }

    /// Tiers at or above `RARE` on the scarcity side.
    pub fn is_scarce(self) -> bool {
        matches!(
            self,
            RarityTier::Rare | RarityTier::ExtremelyRare | RarityTier::Phantom
        )
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviationLevel {
    BelowMean,
    AroundMean,
    AboveMean,
    FarAboveMean,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryStats {
    pub id: String,
    pub name_en: String,
    pub name_pt: String,
    pub currency: String,
    #[serde(default = "default_ppp_conversion")]
    pub ppp_conversion: f64,
    #[serde(default)]
    pub total_population: u64,
    #[serde(default)]
    pub adult_population: u64,
    pub single_eligible_adults: u64,
    pub income_median: f64,
    pub income_mean: f64,
    pub income_mode: f64,
    /// Used directly as the log-space shape parameter of the income model.
    pub income_std_dev: f64,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub reliability: f64,
}

fn default_ppp_conversion() -> f64 {
    1.0
}

impl CountryStats {
    pub fn display_name(&self, lang: Language) -> &str {
        match lang {
            Language::En => &self.name_en,
            Language::Pt => &self.name_pt,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetQuery {
    pub target_income: f64,
    pub age_min: i32,
    pub age_max: i32,
    pub user_income: f64,
    pub user_age: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStats {
    pub median: f64,
    pub mean: f64,
    pub mode: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub income_probability: f64,
    pub age_probability: f64,
    pub joint_probability: f64,
    pub pool_count: u64,
    pub matches_per_hundred: u32,
    pub rarity_index: f64,
    pub tier: RarityTier,
    pub deviation: DeviationLevel,
    pub local_income_stats: IncomeStats,
    pub probability_statement: String,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntelligenceReport {
    pub id: &'static str,
    pub rarity_tier: RarityTier,
    pub deviation: DeviationLevel,
    pub percentile_band: &'static str,
    pub tags: &'static [&'static str],
    pub content: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeSections {
    pub personal_insights: String,
    pub structure_of_choice: String,
    pub behavioral_mapping: String,
    pub socioeconomic_symmetries: String,
    pub relationship_stability: String,
    pub commitment_patterns: String,
    pub perceptual_alignment: String,
    pub architecture_of_distance: String,
    pub through_the_mirror: String,
    pub final_conclusion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dossier {
    pub reference_id: String,
    pub timestamp: DateTime<Utc>,
    pub country_name: String,
    pub intelligence_report: Option<&'static IntelligenceReport>,
    pub sections: NarrativeSections,
}

impl Dossier {
    /// Same dossier, carrying externally generated prose instead of the
    /// placeholder sections.
    pub fn with_sections(self, sections: NarrativeSections) -> Self {
        Self { sections, ..self }
    }
}
