use super::types::{DeviationLevel, IntelligenceReport, Language, RarityTier};

static REPORTS_EN: [IntelligenceReport; 3] = [
    IntelligenceReport {
        id: "RPT-EN-ZERO",
        rarity_tier: RarityTier::ZeroIncome,
        deviation: DeviationLevel::BelowMean,
        percentile_band: "Inactive Base",
        tags: &["Dependency", "Role Strain", "Dissolution Risk"],
        content: "When one side of a household carries no productive income, the partnership \
                  tends to drift into one-sided support. The earning partner takes on the whole \
                  financial load, and what usually follows is a slow loss of mutual regard. \
                  Arrangements of this shape show the highest separation rates in the pool.",
    },
    IntelligenceReport {
        id: "RPT-EN-COMMON",
        rarity_tier: RarityTier::Common,
        deviation: DeviationLevel::AroundMean,
        percentile_band: "Realistic Equilibrium",
        tags: &["Growth Phase", "Loyalty", "Potential"],
        content: "This profile sits where stable long-term partnerships are most likely. People \
                  in their growth and consolidation years form the bulk of the population and \
                  tend to invest heavily in home life. Paired with someone who values building \
                  together, daily life is marked by predictability and calm rather than status \
                  contests.",
    },
    IntelligenceReport {
        id: "RPT-EN-PH-001",
        rarity_tier: RarityTier::Phantom,
        deviation: DeviationLevel::FarAboveMean,
        percentile_band: "High Optionality Elite",
        tags: &["Volatility", "Low Tolerance", "Selectivity"],
        content: "Chasing the extreme top of the income curve tends to ignore the cost of high \
                  optionality. People with that much financial autonomy face an abundance of \
                  choice and little incentive to invest deeply in a single relationship. \
                  Tolerance for everyday friction is low, and long-term stability becomes the \
                  riskiest variable in the arrangement.",
    },
];

static REPORTS_PT: [IntelligenceReport; 3] = [
    IntelligenceReport {
        id: "RPT-PT-ZERO",
        rarity_tier: RarityTier::ZeroIncome,
        deviation: DeviationLevel::BelowMean,
        percentile_band: "Base Inativa",
        tags: &["Dependência", "Sobrecarga de Papéis", "Risco de Dissolução"],
        content: "Quando um dos lados do lar não tem renda produtiva, a parceria tende a virar \
                  amparo unilateral. Quem ganha assume toda a carga financeira e o que costuma \
                  acontecer é uma erosão lenta da admiração mútua. Arranjos com esse formato \
                  apresentam as maiores taxas de separação do grupo.",
    },
    IntelligenceReport {
        id: "RPT-PT-COMMON",
        rarity_tier: RarityTier::Common,
        deviation: DeviationLevel::AroundMean,
        percentile_band: "Equilíbrio Realista",
        tags: &["Fase de Crescimento", "Lealdade", "Potencial"],
        content: "Este perfil fica na zona onde parcerias estáveis de longo prazo são mais \
                  prováveis. Pessoas em fase de crescimento e consolidação formam a maior parte \
                  da população e costumam investir muito na vida doméstica. Ao lado de alguém que \
                  valoriza a construção conjunta, o cotidiano é marcado por previsibilidade e \
                  calma, longe de disputas de status.",
    },
    IntelligenceReport {
        id: "RPT-PT-PH-001",
        rarity_tier: RarityTier::Phantom,
        deviation: DeviationLevel::FarAboveMean,
        percentile_band: "Elite de Alta Opcionalidade",
        tags: &["Volatilidade", "Baixa Tolerância", "Seletividade"],
        content: "Buscar o topo extremo da curva de renda costuma ignorar o custo da alta \
                  opcionalidade. Quem tem tanta autonomia financeira enfrenta abundância de \
                  escolhas e pouco incentivo para investir a fundo em uma única relação. A \
                  tolerância a atritos do dia a dia é baixa e a estabilidade de longo prazo vira \
                  a variável de maior risco.",
    },
];

pub fn catalog(lang: Language) -> &'static [IntelligenceReport] {
    match lang {
        Language::En => &REPORTS_EN,
        Language::Pt => &REPORTS_PT,
    }
}

/// Exact tier match first; scarce tiers fall back to the `Phantom` entry,
/// everything else to the `Common` entry, and finally to the first entry.
pub fn select_report(tier: RarityTier, lang: Language) -> &'static IntelligenceReport {
    let reports = catalog(lang);
    let find = |wanted: RarityTier| reports.iter().find(|r| r.rarity_tier == wanted);

    let fallback = if tier.is_scarce() {
        RarityTier::Phantom
    } else {
        RarityTier::Common
    };

    find(tier).or_else(|| find(fallback)).unwrap_or(&reports[0])
}
