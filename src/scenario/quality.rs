use serde::Serialize;

/// Qualitative drainage class derived from an infiltration rate in inches per hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InfiltrationQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl InfiltrationQuality {
    /// Lower bounds are inclusive. Missing, non-finite or non-positive rates are unclassified.
    pub fn classify(rate: Option<f64>) -> Option<Self> {
        let rate = rate.filter(|r| r.is_finite() && *r > 0.0)?;
        Some(if rate >= 0.5 {
            Self::Excellent
        } else if rate >= 0.3 {
            Self::Good
        } else if rate >= 0.1 {
            Self::Fair
        } else {
            Self::Poor
        })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Excellent => "#22c55e",
            Self::Good => "#84cc16",
            Self::Fair => "#f59e0b",
            Self::Poor => "#ef4444",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Excellent => "Fast drainage — ideal for rain gardens",
            Self::Good => "Moderate drainage — performs well",
            Self::Fair => "Slower drainage — may need maintenance",
            Self::Poor => "Very slow drainage — check for clogging",
        }
    }
}
