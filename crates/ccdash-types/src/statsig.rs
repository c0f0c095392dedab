//! Feature-flag cache written by the CLI under `statsig/`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsigData {
    pub session_id: String,
    pub stable_id: String,
    /// Cached evaluation files keyed by file name.
    pub evaluations: BTreeMap<String, Value>,
    pub last_update: DateTime<Utc>,
}
