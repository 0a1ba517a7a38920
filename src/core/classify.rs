use super::types::{DeviationLevel, RarityTier};

const DENSITY_EXTREMELY_RARE: f64 = 1e-4;
const DENSITY_PHANTOM: f64 = 1e-5;

/// Income breakpoints the tier is read from.
#[derive(Debug, Clone, Copy)]
pub struct IncomeBreakpoints {
    pub mode: f64,
    pub median: f64,
    pub mean: f64,
}

/// Ordered decision list over the target income, followed by the density
/// override. First matching rule wins.
pub fn classify_rarity(
    target_income: f64,
    breakpoints: IncomeBreakpoints,
    joint_probability: f64,
) -> RarityTier {
    let tier = income_tier(target_income, breakpoints);
    apply_density_override(tier, target_income, breakpoints.mean, joint_probability)
}

fn income_tier(target_income: f64, bp: IncomeBreakpoints) -> RarityTier {
    let ratio_to_mean = target_income / bp.mean;

    if target_income <= 0.0 {
        RarityTier::ZeroIncome
    } else if target_income < bp.mode * 0.75 {
        RarityTier::MinimumWage
    } else if target_income <= bp.mode * 1.3 {
        RarityTier::ExtremelyCommon
    } else if target_income <= bp.median * 1.6 {
        RarityTier::Common
    } else if ratio_to_mean <= 2.5 {
        RarityTier::Rare
    } else if ratio_to_mean <= 5.5 {
        RarityTier::ExtremelyRare
    } else {
        RarityTier::Phantom
    }
}

/// Only escalates, and only above the mean. The second check reads the same
/// joint probability, so one pass can go straight to `Phantom`.
fn apply_density_override(
    mut tier: RarityTier,
    target_income: f64,
    mean: f64,
    joint_probability: f64,
) -> RarityTier {
    if target_income <= mean {
        return tier;
    }

    if joint_probability < DENSITY_EXTREMELY_RARE
        && !matches!(tier, RarityTier::Phantom | RarityTier::ExtremelyRare)
    {
        tier = RarityTier::ExtremelyRare;
    }
    if joint_probability < DENSITY_PHANTOM {
        tier = RarityTier::Phantom;
    }
    tier
}

pub fn classify_deviation(target_income: f64, mean: f64) -> DeviationLevel {
    if target_income < mean * 0.7 {
        DeviationLevel::BelowMean
    } else if target_income > mean * 4.0 {
        DeviationLevel::FarAboveMean
    } else if target_income > mean * 1.8 {
        DeviationLevel::AboveMean
    } else {
        DeviationLevel::AroundMean
    }
}

/// Continuous 0..=100 scarcity scale; six times the mean saturates it.
pub fn rarity_index(target_income: f64, mean: f64) -> f64 {
    (target_income / mean / 6.0 * 100.0).clamp(0.0, 100.0)
}
