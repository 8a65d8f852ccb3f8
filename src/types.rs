/// Shared serializable output types for all commands.
///
/// These types are what gets written to stdout — either as JSON or rendered
/// as a table. They are decoupled from the internal `InstanceRecord` / `RenderModel` types.
use serde::{Deserialize, Serialize};

use crate::inventory::{InstanceRecord, InventoryError, Tag};

/// A collected instance, attributed to the region it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceOutput {
    /// Region the instance was collected from (e.g., "us-east-1").
    pub region: String,
    /// Availability zone (e.g., "us-east-1a").
    pub zone: String,
    /// Value of the configured host field.
    pub address: String,
    /// Tags in provider order.
    pub tags: Vec<Tag>,
}

impl InstanceOutput {
    #[must_use]
    pub fn new(region: &str, record: &InstanceRecord) -> Self {
        Self {
            region: region.to_owned(),
            zone: record.zone.clone(),
            address: record.address.clone(),
            tags: record.tags.clone(),
        }
    }
}

/// A region that will be queried.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionOutput {
    pub name: String,
    /// `configured` or `discovered`.
    pub source: String,
}

/// One line of the rendered inventory with its section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionEntryOutput {
    pub section: String,
    pub entry: String,
}

/// Summary of a `generate` run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOutput {
    /// Destination path, or null on `--dry-run`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub datacenters: usize,
    pub groups: usize,
    pub hosts: usize,
    /// Regions skipped because their collection failed.
    pub failed_regions: Vec<String>,
}

/// A structured error envelope for JSON error output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the JSON error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (snake_case).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorOutput {
    /// Construct from an `InventoryError`.
    #[must_use]
    pub fn from_inventory_error(err: &InventoryError) -> Self {
        Self {
            ok: false,
            error: ErrorDetail {
                code: err.code().to_owned(),
                message: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope() {
        let out = ErrorOutput::from_inventory_error(&InventoryError::AllRegionsFailed { count: 3 });
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["ok"], false);
        assert_eq!(json["error"]["code"], "all_regions_failed");
        assert_eq!(json["error"]["message"], "All 3 region(s) failed to collect");
    }

    #[test]
    fn test_generate_output_omits_missing_path() {
        let out = GenerateOutput {
            path: None,
            datacenters: 1,
            groups: 2,
            hosts: 3,
            failed_regions: vec![],
        };
        let json = serde_json::to_value(&out).unwrap();
        assert!(json.get("path").is_none());
        assert_eq!(json["hosts"], 3);
    }
}
