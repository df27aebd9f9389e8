use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Number of decimal places carried by the psychological scores.
pub const SCORE_DECIMALS: u32 = 2;

/// Which side of the market traders lean to while feeling a given emotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Leaning {
    #[serde(rename = "Buy Leaning")]
    BuyLeaning,
    #[serde(rename = "Sell Leaning")]
    SellLeaning,
    Balanced,
}

impl Leaning {
    /// Buckets a signed leaning percentage. Values sitting exactly on the
    /// threshold are `Balanced`.
    pub fn classify(leaning_value: Decimal, threshold: Decimal) -> Self {
        if leaning_value > threshold {
            Leaning::BuyLeaning
        } else if leaning_value < -threshold {
            Leaning::SellLeaning
        } else {
            Leaning::Balanced
        }
    }

    pub fn side(&self) -> LeaningSide {
        match self {
            Leaning::BuyLeaning => LeaningSide::Buy,
            Leaning::SellLeaning => LeaningSide::Sell,
            Leaning::Balanced => LeaningSide::Null,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Leaning::BuyLeaning => "Buy Leaning",
            Leaning::SellLeaning => "Sell Leaning",
            Leaning::Balanced => "Balanced",
        }
    }
}

/// The side column of the radar data. `Null` means no dominant side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeaningSide {
    Buy,
    Sell,
    #[serde(rename = "NULL")]
    Null,
}

impl LeaningSide {
    pub fn label(&self) -> &'static str {
        match self {
            LeaningSide::Buy => "Buy",
            LeaningSide::Sell => "Sell",
            LeaningSide::Null => "NULL",
        }
    }
}

/// One point of the emotion radar: how often an emotion was logged and
/// which side it pushed the trader towards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionDatum {
    pub subject: String,
    /// Radar magnitude. Always equal to `total_trades` for aggregated data.
    pub value: usize,
    pub total_trades: usize,
    pub buy_count: usize,
    pub sell_count: usize,
    pub null_count: usize,
    /// Display ceiling for the chart axis. Advisory only.
    pub full_mark: Decimal,
    /// `(buy - sell) / total * 100`, in [-100, 100].
    pub leaning_value: Decimal,
    pub leaning: Leaning,
    pub side: LeaningSide,
}

/// The complementary discipline / tilt gauge pair.
///
/// Both values carry exactly two decimal places and always sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PsychologicalMetrics {
    pub discipline_level: Decimal,
    pub tilt_control: Decimal,
}

impl PsychologicalMetrics {
    /// Builds the pair from a raw discipline level; tilt control is its complement.
    pub fn from_discipline(discipline_level: Decimal) -> Self {
        let hundred = dec!(100);
        let mut discipline = discipline_level
            .clamp(Decimal::ZERO, hundred)
            .round_dp_with_strategy(SCORE_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
        discipline.rescale(SCORE_DECIMALS);

        let mut tilt = hundred - discipline;
        tilt.rescale(SCORE_DECIMALS);

        Self {
            discipline_level: discipline,
            tilt_control: tilt,
        }
    }

    /// The neutral 50/50 reading used whenever there is nothing meaningful to score.
    pub fn neutral() -> Self {
        Self::from_discipline(dec!(50))
    }
}

impl Default for PsychologicalMetrics {
    fn default() -> Self {
        Self::neutral()
    }
}

/// The full output of one analysis run over a snapshot of trades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PsychologyReport {
    /// Every trade handed to the engine.
    pub trades_analyzed: usize,
    /// Trades that carried at least one emotion tag.
    pub tagged_trades: usize,
    pub emotions: Vec<EmotionDatum>,
    pub metrics: PsychologicalMetrics,
}

impl PsychologyReport {
    pub fn empty() -> Self {
        Self {
            trades_analyzed: 0,
            tagged_trades: 0,
            emotions: Vec::new(),
            metrics: PsychologicalMetrics::neutral(),
        }
    }
}

impl Default for PsychologyReport {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn threshold_boundaries_are_balanced() {
        let t = dec!(15);
        assert_eq!(Leaning::classify(dec!(15), t), Leaning::Balanced);
        assert_eq!(Leaning::classify(dec!(-15), t), Leaning::Balanced);
        assert_eq!(Leaning::classify(dec!(15.01), t), Leaning::BuyLeaning);
        assert_eq!(Leaning::classify(dec!(-15.01), t), Leaning::SellLeaning);
    }

    #[test]
    fn leaning_maps_to_side() {
        assert_eq!(Leaning::BuyLeaning.side(), LeaningSide::Buy);
        assert_eq!(Leaning::SellLeaning.side(), LeaningSide::Sell);
        assert_eq!(Leaning::Balanced.side(), LeaningSide::Null);
        assert_eq!(LeaningSide::Null.label(), "NULL");
    }

    #[test]
    fn metrics_are_complementary_with_two_decimals() {
        let m = PsychologicalMetrics::from_discipline(dec!(66.666666));
        assert_eq!(m.discipline_level, dec!(66.67));
        assert_eq!(m.tilt_control, dec!(33.33));
        assert_eq!(m.discipline_level + m.tilt_control, dec!(100));
        assert_eq!(m.discipline_level.scale(), 2);
        assert_eq!(m.tilt_control.scale(), 2);
    }

    #[test]
    fn metrics_round_half_away_from_zero_and_clamp() {
        assert_eq!(PsychologicalMetrics::from_discipline(dec!(12.345)).discipline_level, dec!(12.35));
        assert_eq!(PsychologicalMetrics::from_discipline(dec!(140)).discipline_level, dec!(100));
        assert_eq!(PsychologicalMetrics::from_discipline(dec!(-3)).tilt_control, dec!(100));
    }

    #[test]
    fn neutral_default_is_fifty_fifty() {
        let m = PsychologicalMetrics::default();
        assert_eq!(m.discipline_level, dec!(50));
        assert_eq!(m.tilt_control, dec!(50));
    }

    #[test]
    fn labels_serialize_as_the_dashboard_expects() {
        assert_eq!(serde_json::to_value(Leaning::BuyLeaning).unwrap(), json!("Buy Leaning"));
        assert_eq!(serde_json::to_value(Leaning::Balanced).unwrap(), json!("Balanced"));
        assert_eq!(serde_json::to_value(LeaningSide::Null).unwrap(), json!("NULL"));
        assert_eq!(Leaning::SellLeaning.label(), "Sell Leaning");
    }
}
