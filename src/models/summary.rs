use serde::{Deserialize, Serialize};

/// Which tier of the backend's summary pipeline produced the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummarySource {
    Cache,
    Generated,
    Description,
    #[default]
    Placeholder,
}

impl SummarySource {
    pub fn label(&self) -> &'static str {
        match self {
            SummarySource::Cache => "cached",
            SummarySource::Generated => "AI generated",
            SummarySource::Description => "from description",
            SummarySource::Placeholder => "placeholder",
        }
    }

    /// Fallback tiers exist for paywalled sources where no body was readable.
    pub fn is_fallback(&self) -> bool {
        matches!(self, SummarySource::Description | SummarySource::Placeholder)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryData {
    #[serde(default)]
    pub source: SummarySource,
    pub summary: String,
    #[serde(default)]
    pub original_url: Option<String>,
}
