//! Measurement model received from the ingestion layer.

use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::traits::Record;

/// Column order for persisted measurements. `Record::flatten`
/// implementations must emit fields in exactly this order.
pub const COLUMNS: [&str; 3] = ["device_id", "recorded_at", "value"];

/// One datapoint reported by a device.
///
/// `metadata` travels with the record through the ingestion layer but is
/// not persisted by the current flatten contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measurement {
    pub device_id: Uuid,
    pub value: f64,
    pub recorded_at: DateTime<Utc>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

impl Measurement {
    pub fn new(device_id: Uuid, value: f64, recorded_at: DateTime<Utc>) -> Self {
        Self {
            device_id,
            value,
            recorded_at,
            metadata: None,
        }
    }
}

impl Record for Measurement {
    fn flatten(&self) -> Vec<Value> {
        vec![
            Value::Text(self.device_id.to_string()),
            Value::Integer(self.recorded_at.timestamp_micros()),
            Value::Real(self.value),
        ]
    }
}
