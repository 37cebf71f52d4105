use serde::{Deserialize, Serialize};

/// One row of a name + color search, shown before a number is picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSummary {
    pub card_no: String,
    pub card_name: String,
    pub thumb_url: Option<String>,
}
