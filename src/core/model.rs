//! Closed-form probability models behind the pool estimate.

const ERF_A1: f64 = 0.254829592;
const ERF_A2: f64 = -0.284496736;
const ERF_A3: f64 = 1.421413741;
const ERF_A4: f64 = -1.453152027;
const ERF_A5: f64 = 1.061405429;
const ERF_P: f64 = 0.3275911;

pub const ADULT_AGE_MIN: i32 = 18;
pub const ADULT_AGE_MAX: i32 = 80;
const ADULT_SPAN_YEARS: f64 = (ADULT_AGE_MAX - ADULT_AGE_MIN) as f64;

/// Abramowitz-Stegun 7.1.26 rational approximation of the error function.
/// Max absolute error is about 1.5e-7.
pub fn erf(x: f64) -> f64 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let ax = x.abs();
    let k = 1.0 / (1.0 + ERF_P * ax);
    let poly = ((((ERF_A5 * k + ERF_A4) * k + ERF_A3) * k + ERF_A2) * k + ERF_A1) * k;
    sign * (1.0 - poly * (-ax * ax).exp())
}

/// P(income >= threshold) for a log-normal income with the given median and
/// log-space shape `sigma`.
pub fn income_survival_probability(threshold: f64, median: f64, sigma: f64) -> f64 {
    if threshold <= 0.0 {
        return 1.0;
    }

    let mu = median.ln();
    let x = (threshold.ln() - mu) / (sigma * std::f64::consts::SQRT_2);
    let cdf = 0.5 * (1.0 + erf(x));
    (1.0 - cdf).clamp(0.0, 1.0)
}

/// Share of the 18..80 adult span covered by `[min, max]` after clamping.
pub fn age_range_probability(min: i32, max: i32) -> f64 {
    let lo = min.max(ADULT_AGE_MIN);
    let hi = max.min(ADULT_AGE_MAX);
    if hi <= lo {
        return 0.0;
    }
    f64::from(hi - lo) / ADULT_SPAN_YEARS
}
