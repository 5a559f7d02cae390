use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl From<String> for SentimentLabel {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "positive" => SentimentLabel::Positive,
            "negative" => SentimentLabel::Negative,
            _ => SentimentLabel::Neutral,
        }
    }
}

impl SentimentLabel {
    pub fn label(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Negative => "Negative",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentSource {
    Cache,
    Computed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentData {
    pub label: SentimentLabel,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub source: Option<SentimentSource>,
}
