use std::sync::LazyLock;

use super::types::CountryStats;

// Monthly income figures in local currency. Illustrative, not sourced survey
// output.
static COUNTRIES: LazyLock<Vec<CountryStats>> = LazyLock::new(|| {
    vec![
        country(CountryRow {
            id: "bra",
            name_en: "Brazil",
            name_pt: "Brasil",
            currency: "BRL",
            ppp_conversion: 2.45,
            total_population: 203_080_000,
            adult_population: 156_400_000,
            single_eligible_adults: 38_500_000,
            income_median: 2_100.0,
            income_mean: 3_000.0,
            income_mode: 1_412.0,
            income_std_dev: 0.85,
            source: "IBGE PNAD Continua (rounded)",
            reliability: 0.8,
        }),
        country(CountryRow {
            id: "prt",
            name_en: "Portugal",
            name_pt: "Portugal",
            currency: "EUR",
            ppp_conversion: 0.58,
            total_population: 10_470_000,
            adult_population: 8_690_000,
            single_eligible_adults: 2_050_000,
            income_median: 1_100.0,
            income_mean: 1_350.0,
            income_mode: 870.0,
            income_std_dev: 0.55,
            source: "INE Inquerito as Condicoes de Vida (rounded)",
            reliability: 0.75,
        }),
        country(CountryRow {
            id: "usa",
            name_en: "United States",
            name_pt: "Estados Unidos",
            currency: "USD",
            ppp_conversion: 1.0,
            total_population: 334_900_000,
            adult_population: 261_000_000,
            single_eligible_adults: 61_800_000,
            income_median: 4_200.0,
            income_mean: 5_600.0,
            income_mode: 3_000.0,
            income_std_dev: 0.8,
            source: "Census CPS ASEC (rounded)",
            reliability: 0.85,
        }),
        country(CountryRow {
            id: "gbr",
            name_en: "United Kingdom",
            name_pt: "Reino Unido",
            currency: "GBP",
            ppp_conversion: 0.68,
            total_population: 68_300_000,
            adult_population: 53_700_000,
            single_eligible_adults: 12_900_000,
            income_median: 2_600.0,
            income_mean: 3_100.0,
            income_mode: 2_000.0,
            income_std_dev: 0.6,
            source: "ONS ASHE (rounded)",
            reliability: 0.8,
        }),
    ]
});

struct CountryRow {
    id: &'static str,
    name_en: &'static str,
    name_pt: &'static str,
    currency: &'static str,
    ppp_conversion: f64,
    total_population: u64,
    adult_population: u64,
    single_eligible_adults: u64,
    income_median: f64,
    income_mean: f64,
    income_mode: f64,
    income_std_dev: f64,
    source: &'static str,
    reliability: f64,
}

fn country(row: CountryRow) -> CountryStats {
    CountryStats {
        id: row.id.to_string(),
        name_en: row.name_en.to_string(),
        name_pt: row.name_pt.to_string(),
        currency: row.currency.to_string(),
        ppp_conversion: row.ppp_conversion,
        total_population: row.total_population,
        adult_population: row.adult_population,
        single_eligible_adults: row.single_eligible_adults,
        income_median: row.income_median,
        income_mean: row.income_mean,
        income_mode: row.income_mode,
        income_std_dev: row.income_std_dev,
        source: row.source.to_string(),
        reliability: row.reliability,
    }
}

pub fn countries() -> &'static [CountryStats] {
    &COUNTRIES
}

pub fn country_by_id(id: &str) -> Option<&'static CountryStats> {
    let id = id.trim();
    COUNTRIES.iter().find(|c| c.id.eq_ignore_ascii_case(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validate_country;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(country_by_id("BRA").map(|c| c.id.as_str()), Some("bra"));
        assert_eq!(country_by_id(" gbr ").map(|c| c.id.as_str()), Some("gbr"));
        assert!(country_by_id("atlantis").is_none());
    }

    #[test]
    fn every_catalog_entry_passes_validation() {
        for c in countries() {
            validate_country(c).unwrap_or_else(|e| panic!("{}: {e}", c.id));
            assert!(c.income_mode <= c.income_median && c.income_median <= c.income_mean);
            assert!(c.single_eligible_adults <= c.adult_population);
            assert!(c.adult_population <= c.total_population);
        }
    }

    #[test]
    fn ids_are_unique() {
        let mut ids: Vec<&str> = countries().iter().map(|c| c.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), countries().len());
    }
}
