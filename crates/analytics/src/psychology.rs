use crate::error::AnalyticsError;
use crate::report::{EmotionDatum, PsychologicalMetrics};
use configuration::{AnalyticsConfig, ScoringWeights};
use core_types::EmotionCategory;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

/// Per-category totals, normalized against `data points * 100`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryScores {
    pub positive: Decimal,
    pub negative: Decimal,
    pub neutral: Decimal,
}

/// Reduces an emotion distribution to the discipline / tilt gauge pair.
#[derive(Debug, Clone)]
pub struct PsychologyScorer {
    weights: ScoringWeights,
    categories: HashMap<String, EmotionCategory>,
}

impl PsychologyScorer {
    pub fn new(config: &AnalyticsConfig) -> Self {
        let mut categories = HashMap::new();
        for category in EmotionCategory::ALL {
            for tag in config.categories.tags(category) {
                categories
                    .entry(tag.trim().to_uppercase())
                    .or_insert(category);
            }
        }

        Self {
            weights: config.weights.clone(),
            categories,
        }
    }

    /// Case-insensitive category lookup. Unknown emotions have no category.
    pub fn classify(&self, subject: &str) -> Option<EmotionCategory> {
        self.categories.get(&subject.trim().to_uppercase()).copied()
    }

    /// Scores the distribution. Never fails: empty input or an arithmetic
    /// failure yields the neutral 50/50 reading.
    pub fn score(&self, data: &[EmotionDatum]) -> PsychologicalMetrics {
        match self.try_score(data) {
            Ok(metrics) => metrics,
            Err(AnalyticsError::NotEnoughData(reason)) => {
                tracing::debug!(%reason, "No emotion data to score, using neutral reading.");
                PsychologicalMetrics::neutral()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Psychological scoring failed, using neutral reading.");
                PsychologicalMetrics::neutral()
            }
        }
    }

    /// The fallible scoring pipeline behind [`score`](Self::score).
    pub fn try_score(&self, data: &[EmotionDatum]) -> Result<PsychologicalMetrics, AnalyticsError> {
        if data.is_empty() {
            return Err(AnalyticsError::NotEnoughData(
                "at least one emotion data point is required".to_string(),
            ));
        }

        let scores = self.category_scores(data)?;
        let ess = self.emotional_state_score(&scores)?;

        // Psychological stability index.
        let psi = ((ess + dec!(100)) / dec!(2)).clamp(Decimal::ZERO, dec!(100));
        let metrics = PsychologicalMetrics::from_discipline(psi);

        tracing::debug!(
            positive = %scores.positive,
            negative = %scores.negative,
            neutral = %scores.neutral,
            ess = %ess,
            discipline = %metrics.discipline_level,
            tilt = %metrics.tilt_control,
            "Scored psychological metrics."
        );

        Ok(metrics)
    }

    /// Sums each category's values and normalizes by `data.len() * 100`.
    ///
    /// Unclassified emotions add nothing to any category but still widen the
    /// denominator, which pulls every category share down.
    pub fn category_scores(&self, data: &[EmotionDatum]) -> Result<CategoryScores, AnalyticsError> {
        let mut raw = CategoryScores::default();

        for datum in data {
            let Some(category) = self.classify(&datum.subject) else {
                continue;
            };
            let bucket = match category {
                EmotionCategory::Positive => &mut raw.positive,
                EmotionCategory::Negative => &mut raw.negative,
                EmotionCategory::Neutral => &mut raw.neutral,
            };
            *bucket = bucket
                .checked_add(Decimal::from(datum.value))
                .ok_or_else(|| AnalyticsError::Overflow(format!("{category} score")))?;
        }

        let max_possible = Decimal::from(data.len())
            .checked_mul(dec!(100))
            .ok_or_else(|| AnalyticsError::Overflow("max possible score".to_string()))?;
        if max_possible.is_zero() {
            return Err(AnalyticsError::NotEnoughData(
                "max possible score is zero".to_string(),
            ));
        }

        let normalize = |score: Decimal, name: &str| {
            score
                .checked_div(max_possible)
                .and_then(|share| share.checked_mul(dec!(100)))
                .ok_or_else(|| AnalyticsError::Overflow(format!("normalized {name} score")))
        };

        Ok(CategoryScores {
            positive: normalize(raw.positive, "positive")?,
            negative: normalize(raw.negative, "negative")?,
            neutral: normalize(raw.neutral, "neutral")?,
        })
    }

    /// `positive * w_pos + neutral * w_neu - negative * w_neg`.
    fn emotional_state_score(&self, scores: &CategoryScores) -> Result<Decimal, AnalyticsError> {
        let w = &self.weights;
        let overflow = || AnalyticsError::Overflow("emotional state score".to_string());

        let positive = scores.positive.checked_mul(w.positive).ok_or_else(overflow)?;
        let neutral = scores.neutral.checked_mul(w.neutral).ok_or_else(overflow)?;
        let negative = scores.negative.checked_mul(w.negative).ok_or_else(overflow)?;

        positive
            .checked_add(neutral)
            .and_then(|sum| sum.checked_sub(negative))
            .ok_or_else(overflow)
    }
}

impl Default for PsychologyScorer {
    fn default() -> Self {
        Self::new(&AnalyticsConfig::default())
    }
}
