//! Feature-flag cache under `<claude_dir>/statsig`.

use crate::normalize::parse_timestamp;
use crate::{DashboardError, Result};
use ccdash_types::StatsigData;
use chrono::Utc;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

const SESSION_PREFIX: &str = "statsig.session_id.";
const STABLE_PREFIX: &str = "statsig.stable_id.";
const EVALUATIONS_PREFIX: &str = "statsig.cached.evaluations.";

/// Read the statsig cache. `None` when the directory, the session id file or
/// the stable id file is missing, or when any of them fails to parse.
pub fn read_statsig(statsig_dir: &Path) -> Option<StatsigData> {
    match try_read_statsig(statsig_dir) {
        Ok(data) => data,
        Err(e) => {
            debug!(target: "ccdash::reader", "Error reading statsig in {:?}: {}", statsig_dir, e);
            None
        }
    }
}

fn try_read_statsig(statsig_dir: &Path) -> Result<Option<StatsigData>> {
    let mut files: Vec<String> = fs::read_dir(statsig_dir)?
        .flatten()
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .collect();
    files.sort();

    let session_file = files.iter().find(|f| f.starts_with(SESSION_PREFIX));
    let stable_file = files.iter().find(|f| f.starts_with(STABLE_PREFIX));
    let (Some(session_file), Some(stable_file)) = (session_file, stable_file) else {
        return Ok(None);
    };

    let read_json = |name: &str| -> Result<Value> {
        let content = fs::read_to_string(statsig_dir.join(name))?;
        Ok(serde_json::from_str(&content)?)
    };

    let session = read_json(session_file)?;
    let stable = read_json(stable_file)?;

    let session_id = session
        .get("sessionID")
        .and_then(Value::as_str)
        .ok_or_else(|| DashboardError::MalformedRecord(format!("{} has no sessionID", session_file)))?;

    // Older CLI versions store the stable id as a bare JSON string.
    let stable_id = stable
        .get("stableID")
        .and_then(Value::as_str)
        .or_else(|| stable.as_str())
        .ok_or_else(|| DashboardError::MalformedRecord(format!("{} has no stableID", stable_file)))?;

    let mut evaluations = BTreeMap::new();
    for name in files.iter().filter(|f| f.starts_with(EVALUATIONS_PREFIX)) {
        evaluations.insert(name.clone(), read_json(name)?);
    }

    Ok(Some(StatsigData {
        session_id: session_id.to_string(),
        stable_id: stable_id.to_string(),
        evaluations,
        last_update: parse_timestamp(session.get("lastUpdate")).unwrap_or_else(Utc::now),
    }))
}
