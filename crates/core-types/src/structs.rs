use crate::enums::Side;
use crate::error::CoreError;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Keys accepted for each field, in priority order.
const SIDE_KEYS: &[&str] = &["side"];
const TAG_KEYS: &[&str] = &["emotionalState", "emotional_state"];
const SYMBOL_KEYS: &[&str] = &["symbol"];
const DATE_KEYS: &[&str] = &["date", "trade_date", "entry_date"];

/// A single journaled trade, as far as the psychology analytics care about it.
///
/// Journal exports are loosely shaped, so every field is parsed leniently: a field
/// with an unexpected shape is treated as absent rather than rejecting the record.
/// When a row carries several spellings of one field, the first non-null key in
/// priority order wins and the others are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    pub side: Option<Side>,

    /// Emotion tags in the order they were logged. Duplicates are kept.
    pub emotional_state: Vec<String>,

    pub symbol: Option<String>,

    pub date: Option<NaiveDate>,
}

impl TradeRecord {
    pub fn new<I, S>(side: Option<Side>, emotions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            side,
            emotional_state: emotions.into_iter().map(Into::into).collect(),
            symbol: None,
            date: None,
        }
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Whether the trade carries at least one emotion tag.
    pub fn has_emotions(&self) -> bool {
        !self.emotional_state.is_empty()
    }

    /// Builds a record from one exported row. Anything other than an object
    /// yields an empty record (no side, no tags).
    pub fn from_json(row: &Value) -> Self {
        let Value::Object(map) = row else {
            return Self::default();
        };
        let field = |keys: &[&str]| {
            keys.iter()
                .filter_map(|key| map.get(*key))
                .find(|value| !value.is_null())
        };

        Self {
            side: field(SIDE_KEYS).and_then(lenient_side),
            emotional_state: field(TAG_KEYS).map(lenient_tags).unwrap_or_default(),
            symbol: field(SYMBOL_KEYS).and_then(|v| v.as_str()).map(str::to_string),
            date: field(DATE_KEYS).and_then(lenient_date),
        }
    }
}

impl<'de> Deserialize<'de> for TradeRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let row = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&row))
    }
}

/// Parses a journal export into trade records.
///
/// Accepts either a bare JSON array of trades or an object holding a `trades` array.
/// A malformed row never fails the export; at worst it becomes an empty record.
pub fn parse_trades(json: &str) -> Result<Vec<TradeRecord>, CoreError> {
    let root: Value = serde_json::from_str(json)?;

    let rows = match root {
        Value::Array(rows) => rows,
        Value::Object(mut map) => match map.remove("trades") {
            Some(Value::Array(rows)) => rows,
            _ => {
                return Err(CoreError::InvalidInput(
                    "trades".to_string(),
                    "expected an array of trades or an object with a `trades` array".to_string(),
                ));
            }
        },
        other => {
            return Err(CoreError::InvalidInput(
                "trades".to_string(),
                format!("unexpected top-level JSON value: {}", type_name(&other)),
            ));
        }
    };

    Ok(rows.iter().map(TradeRecord::from_json).collect())
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn lenient_side(value: &Value) -> Option<Side> {
    value.as_str().and_then(|s| s.parse().ok())
}

fn lenient_tags(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

fn lenient_date(value: &Value) -> Option<NaiveDate> {
    let raw = value.as_str()?;
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(raw).ok().map(|ts| ts.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> TradeRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn parses_well_formed_trade() {
        let trade = record(json!({
            "side": "Buy",
            "emotionalState": ["FOMO", "CONFIDENT"],
            "symbol": "AAPL",
            "date": "2024-03-01"
        }));

        assert_eq!(trade.side, Some(Side::Buy));
        assert_eq!(trade.emotional_state, vec!["FOMO", "CONFIDENT"]);
        assert_eq!(trade.symbol.as_deref(), Some("AAPL"));
        assert_eq!(trade.date, NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[test]
    fn unknown_or_missing_side_is_none() {
        assert_eq!(record(json!({ "side": "buy" })).side, None);
        assert_eq!(record(json!({ "side": null })).side, None);
        assert_eq!(record(json!({ "side": 1 })).side, None);
        assert_eq!(record(json!({})).side, None);
    }

    #[test]
    fn malformed_tags_become_empty() {
        assert!(record(json!({ "emotionalState": null })).emotional_state.is_empty());
        assert!(record(json!({ "emotionalState": "FOMO" })).emotional_state.is_empty());
        assert!(!record(json!({})).has_emotions());

        let mixed = record(json!({ "emotionalState": ["TILT", 3, null, "TILT"] }));
        assert_eq!(mixed.emotional_state, vec!["TILT", "TILT"]);
    }

    #[test]
    fn accepts_snake_case_columns_and_timestamps() {
        let trade = record(json!({
            "emotional_state": ["PATIENCE"],
            "entry_date": "2024-05-06T14:30:00+00:00"
        }));

        assert_eq!(trade.emotional_state, vec!["PATIENCE"]);
        assert_eq!(trade.date, NaiveDate::from_ymd_opt(2024, 5, 6));
        assert_eq!(record(json!({ "date": "yesterday" })).date, None);
    }

    #[test]
    fn parse_trades_accepts_array_and_wrapped_object() {
        let bare = parse_trades(r#"[{"side":"Sell","emotionalState":["TILT"]}, 42]"#).unwrap();
        assert_eq!(bare.len(), 2);
        assert_eq!(bare[0].side, Some(Side::Sell));
        assert_eq!(bare[1], TradeRecord::default());

        let wrapped = parse_trades(r#"{"trades":[{"side":"Buy"}]}"#).unwrap();
        assert_eq!(wrapped.len(), 1);
    }

    #[test]
    fn repeated_field_spellings_take_the_first_non_null_key() {
        let trades = parse_trades(
            r#"[
                {"side":"Buy","emotionalState":["FOMO"]},
                {"side":"Sell","emotionalState":["TILT"],"date":"2024-01-01","trade_date":"2024-01-02"},
                {"trade_date":"2024-02-03","entry_date":"2024-02-01"},
                {"emotionalState":["PATIENCE"],"emotional_state":["REVENGE"]},
                {"emotionalState":null,"emotional_state":["REVENGE"],"date":null,"entry_date":"2024-04-05"}
            ]"#,
        )
        .unwrap();

        assert_eq!(trades.len(), 5);
        assert_eq!(trades[0].emotional_state, vec!["FOMO"]);
        assert_eq!(trades[1].date, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(trades[2].date, NaiveDate::from_ymd_opt(2024, 2, 3));
        assert_eq!(trades[3].emotional_state, vec!["PATIENCE"]);
        assert_eq!(trades[4].emotional_state, vec!["REVENGE"]);
        assert_eq!(trades[4].date, NaiveDate::from_ymd_opt(2024, 4, 5));
    }

    #[test]
    fn non_object_record_deserializes_empty() {
        assert_eq!(record(json!(42)), TradeRecord::default());
        assert_eq!(record(json!(["Buy"])), TradeRecord::default());
    }

    #[test]
    fn parse_trades_rejects_non_collections() {
        assert!(matches!(parse_trades("\"nope\""), Err(CoreError::InvalidInput(..))));
        assert!(matches!(parse_trades(r#"{"rows":[]}"#), Err(CoreError::InvalidInput(..))));
        assert!(matches!(parse_trades("not json"), Err(CoreError::Parse(_))));
    }
}
