// ============================================================================
// Métriques financières et sélection
// ============================================================================
// Chaque rangée de boutons est un enum : un seul
// variant sélectionné à la fois, et le compilateur force à gérer tous les cas
// (endpoint, libellé, unité).
// ============================================================================

/// Années proposées pour le classement annuel
pub const YEARS: [&str; 4] = ["2021", "2022", "2023", "2024"];

/// Année sélectionnée par défaut quand on choisit une métrique
pub const DEFAULT_YEAR: &str = "2024";

/// Trimestres proposés pour le classement trimestriel
pub const QUARTERS: [&str; 6] = [
    "2023-Q3", "2023-Q4", "2024-Q1", "2024-Q2", "2024-Q3", "2024-Q4",
];

/// Trimestre sélectionné par défaut quand on choisit une métrique
pub const DEFAULT_QUARTER: &str = "2024-Q1";

// ============================================================================
// Enum : RankingMetric
// ============================================================================

/// Critère de classement des pages "top100"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RankingMetric {
    MarketCap,
    Revenue,
    OperatingIncome,
    OperatingMargin,
    NetMargin,
    Roe,
    Eps,
    Per,
    Pbr,
    DividendYield,
}

impl RankingMetric {
    /// Métriques du classement annuel, dans l'ordre d'affichage
    pub const ANNUAL: [RankingMetric; 10] = [
        RankingMetric::MarketCap,
        RankingMetric::Revenue,
        RankingMetric::OperatingIncome,
        RankingMetric::OperatingMargin,
        RankingMetric::NetMargin,
        RankingMetric::Roe,
        RankingMetric::Eps,
        RankingMetric::Per,
        RankingMetric::Pbr,
        RankingMetric::DividendYield,
    ];

    /// Métriques du classement trimestriel (pas de capitalisation)
    pub const QUARTERLY: [RankingMetric; 9] = [
        RankingMetric::Revenue,
        RankingMetric::OperatingIncome,
        RankingMetric::OperatingMargin,
        RankingMetric::NetMargin,
        RankingMetric::Roe,
        RankingMetric::Eps,
        RankingMetric::Per,
        RankingMetric::Pbr,
        RankingMetric::DividendYield,
    ];

    /// Libellé affiché, aussi utilisé comme clé de colonne et paramètre `metric`
    pub fn label(&self) -> &'static str {
        match self {
            RankingMetric::MarketCap => "시가총액",
            RankingMetric::Revenue => "매출액",
            RankingMetric::OperatingIncome => "영업이익",
            RankingMetric::OperatingMargin => "영업이익률",
            RankingMetric::NetMargin => "순이익률",
            RankingMetric::Roe => "ROE",
            RankingMetric::Eps => "EPS",
            RankingMetric::Per => "PER",
            RankingMetric::Pbr => "PBR",
            RankingMetric::DividendYield => "시가배당률",
        }
    }

    /// Retrouve une métrique depuis son libellé
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ANNUAL.into_iter().find(|m| m.label() == label)
    }

    /// La capitalisation boursière est la seule métrique sans année
    pub fn needs_year(&self) -> bool {
        !matches!(self, RankingMetric::MarketCap)
    }

    /// PER et PBR ont un sens de tri (haut / bas)
    pub fn has_direction(&self) -> bool {
        matches!(self, RankingMetric::Per | RankingMetric::Pbr)
    }

    /// Chemin de l'endpoint de classement annuel
    pub fn annual_endpoint(&self, direction: SortDirection) -> &'static str {
        match (self, direction) {
            (RankingMetric::MarketCap, _) => "top-marketcap",
            (RankingMetric::Revenue, _) => "top-revenue",
            (RankingMetric::OperatingIncome, _) => "top-operating-income",
            (RankingMetric::OperatingMargin, _) => "top-operating-income-rate",
            (RankingMetric::NetMargin, _) => "top-net-income",
            (RankingMetric::Roe, _) => "top-roe",
            (RankingMetric::Eps, _) => "top-eps",
            (RankingMetric::Per, SortDirection::Top) => "top-per",
            (RankingMetric::Per, SortDirection::Bottom) => "bottom-per",
            (RankingMetric::Pbr, SortDirection::Top) => "top-pbr",
            (RankingMetric::Pbr, SortDirection::Bottom) => "bottom-pbr",
            (RankingMetric::DividendYield, _) => "top-dividend-yield",
        }
    }
}

// ============================================================================
// Enum : SortDirection
// ============================================================================

/// Sens du classement PER / PBR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Top,
    Bottom,
}

impl SortDirection {
    /// Inverse le sens
    pub fn toggle(&self) -> Self {
        match self {
            SortDirection::Top => SortDirection::Bottom,
            SortDirection::Bottom => SortDirection::Top,
        }
    }

    /// Flèche affichée à côté du bouton
    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Top => "↑",
            SortDirection::Bottom => "↓",
        }
    }
}

// ============================================================================
// Enum : SeriesMetric
// ============================================================================
// Séries historiques d'une action, affichées en graphique à barres sur la
// page de recherche. Chaque métrique a un endpoint annuel et un trimestriel,
// et la liste est rangée sous une clé différente dans la réponse.
// ============================================================================

/// Série financière d'une action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesMetric {
    Sales,
    OperatingProfit,
    OperatingMargin,
    NetIncome,
    DebtRatio,
}

impl SeriesMetric {
    pub const ALL: [SeriesMetric; 5] = [
        SeriesMetric::Sales,
        SeriesMetric::OperatingProfit,
        SeriesMetric::OperatingMargin,
        SeriesMetric::NetIncome,
        SeriesMetric::DebtRatio,
    ];

    /// Libellé affiché, aussi clé de la valeur dans chaque point de la série
    pub fn label(&self) -> &'static str {
        match self {
            SeriesMetric::Sales => "매출액",
            SeriesMetric::OperatingProfit => "영업이익",
            SeriesMetric::OperatingMargin => "영업이익률",
            SeriesMetric::NetIncome => "순이익",
            SeriesMetric::DebtRatio => "부채비율",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|m| m.label() == label)
    }

    /// Les ratios s'affichent en %, les montants en 억
    pub fn is_percentage(&self) -> bool {
        matches!(self, SeriesMetric::OperatingMargin | SeriesMetric::DebtRatio)
    }

    /// Unité de l'axe des valeurs
    pub fn unit(&self) -> &'static str {
        if self.is_percentage() {
            "%"
        } else {
            "억"
        }
    }

    pub fn annual_endpoint(&self) -> &'static str {
        match self {
            SeriesMetric::Sales => "financial-annual-sales",
            SeriesMetric::OperatingProfit => "financial-operating-profit",
            SeriesMetric::OperatingMargin => "financial-operating-income-rate",
            SeriesMetric::NetIncome => "financial-net-income",
            SeriesMetric::DebtRatio => "financial-debt-ratio",
        }
    }

    /// Clé de la liste dans la réponse annuelle
    pub fn annual_key(&self) -> &'static str {
        match self {
            SeriesMetric::Sales => "annual_sales",
            SeriesMetric::OperatingProfit => "operating_profit",
            SeriesMetric::OperatingMargin => "operating_income_rate",
            SeriesMetric::NetIncome => "net_income",
            SeriesMetric::DebtRatio => "debt_ratio",
        }
    }

    pub fn quarterly_endpoint(&self) -> &'static str {
        match self {
            SeriesMetric::Sales => "financial-quarterly-sales",
            SeriesMetric::OperatingProfit => "financial-quarterly-operating-profit",
            SeriesMetric::OperatingMargin => "financial-quarterly-operating-income-rate",
            SeriesMetric::NetIncome => "financial-quarterly-net-income",
            SeriesMetric::DebtRatio => "financial-quarterly-debt-ratio",
        }
    }

    /// Clé de la liste dans la réponse trimestrielle
    pub fn quarterly_key(&self) -> &'static str {
        match self {
            SeriesMetric::Sales => "quarterly_sales",
            SeriesMetric::OperatingProfit => "quarterly_operating_profit",
            SeriesMetric::OperatingMargin => "quarterly_operating_income_rate",
            SeriesMetric::NetIncome => "quarterly_net_income",
            SeriesMetric::DebtRatio => "quarterly_debt_ratio",
        }
    }
}

// ============================================================================
// Sélections envoyées au serveur
// ============================================================================

/// Sélection courante du classement annuel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingSelection {
    pub metric: RankingMetric,
    /// None pour la capitalisation boursière
    pub year: Option<String>,
    pub direction: SortDirection,
}

/// Sélection courante du classement trimestriel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuarterlySelection {
    pub metric: RankingMetric,
    pub quarter: String,
}

impl QuarterlySelection {
    /// Titre de colonne, qui est aussi la clé de la valeur dans chaque ligne
    pub fn column_title(&self) -> String {
        format!("{} ({})", self.metric.label(), self.quarter)
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
