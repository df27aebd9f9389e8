use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The direction of a journaled trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "Buy",
            Side::Sell => "Sell",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a side exactly as the journal stores it. Matching is case-sensitive:
/// `"buy"` or `"SELL"` are rejected.
impl FromStr for Side {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Buy" => Ok(Side::Buy),
            "Sell" => Ok(Side::Sell),
            other => Err(CoreError::InvalidInput("side".to_string(), other.to_string())),
        }
    }
}

/// The psychological bucket an emotion tag belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionCategory {
    Positive,
    Negative,
    Neutral,
}

impl EmotionCategory {
    pub const ALL: [EmotionCategory; 3] = [
        EmotionCategory::Positive,
        EmotionCategory::Negative,
        EmotionCategory::Neutral,
    ];
}

impl fmt::Display for EmotionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EmotionCategory::Positive => "positive",
            EmotionCategory::Negative => "negative",
            EmotionCategory::Neutral => "neutral",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_parsing_is_case_sensitive() {
        assert_eq!("Buy".parse::<Side>().unwrap(), Side::Buy);
        assert_eq!("Sell".parse::<Side>().unwrap(), Side::Sell);
        assert!("buy".parse::<Side>().is_err());
        assert!("SELL".parse::<Side>().is_err());
        assert!("".parse::<Side>().is_err());
    }
}
