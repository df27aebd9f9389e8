use crate::emotions::EmotionAggregator;
use crate::error::AnalyticsError;
use crate::psychology::PsychologyScorer;
use crate::report::{EmotionDatum, PsychologicalMetrics, PsychologyReport};
use configuration::AnalyticsConfig;
use core_types::TradeRecord;

/// A stateless calculator for deriving emotion analytics from journaled trades.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    aggregator: EmotionAggregator,
    scorer: PsychologyScorer,
}

impl AnalyticsEngine {
    /// Builds an engine from validated settings.
    pub fn new(config: &AnalyticsConfig) -> Result<Self, AnalyticsError> {
        config.validate()?;
        Ok(Self {
            aggregator: EmotionAggregator::new(config),
            scorer: PsychologyScorer::new(config),
        })
    }

    /// The main entry point for analysing a snapshot of trades.
    ///
    /// # Arguments
    ///
    /// * `trades` - The trades to analyse. Filtering (date range, symbol) is the
    ///   caller's job; every record passed in is considered.
    ///
    /// # Returns
    ///
    /// A `PsychologyReport` holding the radar data and the discipline / tilt pair.
    /// This never fails; with no usable data the metrics are a neutral 50/50.
    pub fn analyze(&self, trades: &[TradeRecord]) -> PsychologyReport {
        if trades.is_empty() {
            return PsychologyReport::empty();
        }

        let emotions = self.emotions(trades);
        let metrics = self.metrics(&emotions);

        PsychologyReport {
            trades_analyzed: trades.len(),
            tagged_trades: trades.iter().filter(|t| t.has_emotions()).count(),
            emotions,
            metrics,
        }
    }

    pub fn emotions(&self, trades: &[TradeRecord]) -> Vec<EmotionDatum> {
        self.aggregator.aggregate(trades)
    }

    /// Scores radar data produced by [`emotions`](Self::emotions) or built elsewhere.
    pub fn metrics(&self, emotions: &[EmotionDatum]) -> PsychologicalMetrics {
        self.scorer.score(emotions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Side;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_trades_give_empty_report() {
        let report = AnalyticsEngine::default().analyze(&[]);
        assert_eq!(report, PsychologyReport::empty());
        assert_eq!(report.metrics.discipline_level, dec!(50));
    }

    #[test]
    fn analyze_chains_aggregation_and_scoring() {
        let trades = vec![
            TradeRecord::new(Some(Side::Buy), ["DISCIPLINE"]),
            TradeRecord::new(Some(Side::Buy), ["DISCIPLINE", "FOMO"]),
            TradeRecord::new(Some(Side::Sell), ["TILT"]),
            TradeRecord::new(None, Vec::<String>::new()),
        ];

        let engine = AnalyticsEngine::default();
        let report = engine.analyze(&trades);

        assert_eq!(report.trades_analyzed, 4);
        assert_eq!(report.tagged_trades, 3);
        assert_eq!(report.emotions.len(), 3);
        assert_eq!(report.emotions[0].subject, "DISCIPLINE");
        assert_eq!(report.metrics, engine.metrics(&report.emotions));

        // max 300: discipline 2/300*100, tilt 1/300*100 -> ess 0.8333.. -> psi 50.4166..
        assert_eq!(report.metrics.discipline_level, dec!(50.42));
        assert_eq!(report.metrics.tilt_control, dec!(49.58));
    }

    #[test]
    fn only_untagged_trades_score_neutral() {
        let trades = vec![TradeRecord::new(Some(Side::Buy), Vec::<String>::new())];
        let report = AnalyticsEngine::default().analyze(&trades);

        assert_eq!(report.trades_analyzed, 1);
        assert_eq!(report.tagged_trades, 0);
        assert!(report.emotions.is_empty());
        assert_eq!(report.metrics, PsychologicalMetrics::neutral());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = AnalyticsConfig {
            full_mark_factor: dec!(0),
            ..AnalyticsConfig::default()
        };
        assert!(matches!(
            AnalyticsEngine::new(&config),
            Err(AnalyticsError::Config(_))
        ));
    }

    #[test]
    fn report_serializes_with_camel_case_keys() {
        let trades = vec![TradeRecord::new(Some(Side::Sell), ["REVENGE"])];
        let report = AnalyticsEngine::default().analyze(&trades);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["tradesAnalyzed"], 1);
        assert_eq!(json["emotions"][0]["subject"], "REVENGE");
        assert_eq!(json["emotions"][0]["totalTrades"], 1);
        assert_eq!(json["emotions"][0]["leaning"], "Sell Leaning");
        assert_eq!(json["emotions"][0]["side"], "Sell");
        assert!(json["metrics"]["disciplineLevel"].is_string());
    }
}
