use chrono::NaiveDate;
use core_types::TradeRecord;

/// Upstream narrowing of the journal before it reaches the analytics engine.
#[derive(Debug, Clone, Default)]
pub struct TradeFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub symbol: Option<String>,
}

impl TradeFilter {
    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none() && self.symbol.is_none()
    }

    /// Date bounds are inclusive. With any bound set, undated trades are excluded.
    /// Symbols match case-insensitively.
    pub fn matches(&self, trade: &TradeRecord) -> bool {
        if self.from.is_some() || self.to.is_some() {
            let Some(date) = trade.date else {
                return false;
            };
            if self.from.is_some_and(|from| date < from) {
                return false;
            }
            if self.to.is_some_and(|to| date > to) {
                return false;
            }
        }

        match (&self.symbol, &trade.symbol) {
            (Some(wanted), Some(actual)) => wanted.eq_ignore_ascii_case(actual),
            (Some(_), None) => false,
            (None, _) => true,
        }
    }

    pub fn apply(&self, trades: Vec<TradeRecord>) -> Vec<TradeRecord> {
        if self.is_empty() {
            return trades;
        }
        trades.into_iter().filter(|t| self.matches(t)).collect()
    }
}
