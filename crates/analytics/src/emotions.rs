use crate::report::{EmotionDatum, Leaning};
use configuration::AnalyticsConfig;
use core_types::{Side, TradeRecord};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

/// Running buy / sell / no-side tally for one emotion tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmotionAggregate {
    pub subject: String,
    pub buy_count: usize,
    pub sell_count: usize,
    pub null_count: usize,
}

impl EmotionAggregate {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            ..Self::default()
        }
    }

    pub fn record(&mut self, side: Option<Side>) {
        match side {
            Some(Side::Buy) => self.buy_count += 1,
            Some(Side::Sell) => self.sell_count += 1,
            None => self.null_count += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.buy_count + self.sell_count + self.null_count
    }

    /// Converts the tally into a radar point.
    pub fn to_datum(&self, leaning_threshold: Decimal, full_mark_factor: Decimal) -> EmotionDatum {
        let total = self.total();

        // An aggregate that was never recorded into has no leaning.
        let leaning_value = if total == 0 {
            Decimal::ZERO
        } else {
            (Decimal::from(self.buy_count) - Decimal::from(self.sell_count)) / Decimal::from(total)
                * dec!(100)
        };
        let leaning = Leaning::classify(leaning_value, leaning_threshold);

        EmotionDatum {
            subject: self.subject.clone(),
            value: total,
            total_trades: total,
            buy_count: self.buy_count,
            sell_count: self.sell_count,
            null_count: self.null_count,
            full_mark: Decimal::from(total.max(1)) * full_mark_factor,
            leaning_value,
            leaning,
            side: leaning.side(),
        }
    }
}

/// Buckets trades by emotion tag and the side they were taken on.
#[derive(Debug, Clone)]
pub struct EmotionAggregator {
    leaning_threshold: Decimal,
    full_mark_factor: Decimal,
}

impl EmotionAggregator {
    pub fn new(config: &AnalyticsConfig) -> Self {
        Self {
            leaning_threshold: config.leaning_threshold,
            full_mark_factor: config.full_mark_factor,
        }
    }

    /// Tallies every (trade, tag) pair, keeping tags in first-seen order.
    ///
    /// Tags are case-sensitive and duplicates within one trade are each counted.
    /// Trades without tags contribute nothing.
    pub fn tally(&self, trades: &[TradeRecord]) -> Vec<EmotionAggregate> {
        let mut order: Vec<EmotionAggregate> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for trade in trades.iter().filter(|t| t.has_emotions()) {
            for tag in &trade.emotional_state {
                let slot = *index.entry(tag.as_str()).or_insert_with(|| {
                    order.push(EmotionAggregate::new(tag.as_str()));
                    order.len() - 1
                });
                order[slot].record(trade.side);
            }
        }

        order
    }

    pub fn aggregate(&self, trades: &[TradeRecord]) -> Vec<EmotionDatum> {
        let data: Vec<EmotionDatum> = self
            .tally(trades)
            .iter()
            .map(|agg| agg.to_datum(self.leaning_threshold, self.full_mark_factor))
            .collect();

        tracing::debug!(
            trades = trades.len(),
            emotions = data.len(),
            "Aggregated emotion distribution."
        );

        data
    }
}

impl Default for EmotionAggregator {
    fn default() -> Self {
        Self::new(&AnalyticsConfig::default())
    }
}
