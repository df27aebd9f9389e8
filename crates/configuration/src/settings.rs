use crate::error::ConfigError;
use core_types::EmotionCategory;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Upper bound for each scoring weight.
pub const MAX_WEIGHT: Decimal = dec!(100);

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.analytics.validate()
    }
}

/// Tuning for the emotion aggregation and the psychological score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// A tag whose leaning value exceeds `+threshold` is "Buy Leaning", below
    /// `-threshold` it is "Sell Leaning". Expressed in percentage points.
    pub leaning_threshold: Decimal,
    /// Multiplier applied to a tag's trade count to get the radar chart ceiling.
    pub full_mark_factor: Decimal,
    pub weights: ScoringWeights,
    pub categories: EmotionCategories,
}

/// Weights for the emotional state score:
/// `positive * w_pos + neutral * w_neu - negative * w_neg`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub positive: Decimal,
    pub neutral: Decimal,
    pub negative: Decimal,
}

/// Emotion tags recognised by the scorer, per category. Compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmotionCategories {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    pub neutral: Vec<String>,
}

// --- Default Implementations ---
// This allows a user to omit any section from their toml
// and still have it work with the standard scoring model.

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            leaning_threshold: dec!(15),
            full_mark_factor: dec!(1.2),
            weights: ScoringWeights::default(),
            categories: EmotionCategories::default(),
        }
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            positive: dec!(2.0),
            neutral: dec!(1.0),
            negative: dec!(1.5),
        }
    }
}

impl Default for EmotionCategories {
    fn default() -> Self {
        let tags = |names: &[&str]| names.iter().map(|s| s.to_string()).collect();
        Self {
            positive: tags(&["DISCIPLINE", "CONFIDENCE", "PATIENCE"]),
            negative: tags(&["TILT", "REVENGE", "IMPATIENCE"]),
            neutral: tags(&["NEUTRAL", "ANALYTICAL"]),
        }
    }
}

impl EmotionCategories {
    pub fn tags(&self, category: EmotionCategory) -> &[String] {
        match category {
            EmotionCategory::Positive => &self.positive,
            EmotionCategory::Negative => &self.negative,
            EmotionCategory::Neutral => &self.neutral,
        }
    }

    /// Checks that no tag is blank and that no tag appears in more than one category.
    pub fn ensure_disjoint(&self) -> Result<(), ConfigError> {
        let mut seen: HashMap<String, EmotionCategory> = HashMap::new();
        for category in EmotionCategory::ALL {
            for tag in self.tags(category) {
                let key = tag.trim().to_uppercase();
                if key.is_empty() {
                    return Err(ConfigError::ValidationError(format!(
                        "empty emotion tag in the {category} category"
                    )));
                }
                if let Some(existing) = seen.insert(key.clone(), category) {
                    if existing != category {
                        return Err(ConfigError::ValidationError(format!(
                            "emotion '{key}' is listed as both {existing} and {category}"
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

impl AnalyticsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.leaning_threshold < Decimal::ZERO || self.leaning_threshold > dec!(100) {
            return Err(ConfigError::ValidationError(format!(
                "leaning_threshold must be between 0 and 100, got {}",
                self.leaning_threshold
            )));
        }

        if self.full_mark_factor < Decimal::ONE {
            return Err(ConfigError::ValidationError(format!(
                "full_mark_factor must be at least 1, got {}",
                self.full_mark_factor
            )));
        }

        let w = &self.weights;
        for (name, weight) in [
            ("positive", w.positive),
            ("neutral", w.neutral),
            ("negative", w.negative),
        ] {
            if weight.is_sign_negative() || weight > MAX_WEIGHT {
                return Err(ConfigError::ValidationError(format!(
                    "weights.{name} must be between 0 and {MAX_WEIGHT}, got {weight}"
                )));
            }
        }

        self.categories.ensure_disjoint()
    }
}
