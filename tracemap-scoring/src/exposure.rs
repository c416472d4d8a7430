//! Categorical exposure labels derived from the flagship signals

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::email::SignalBundle;

const PUBLIC_PRESENCE_THRESHOLD: u32 = 20;
const PLATFORM_REUSE_THRESHOLD: u32 = 20;
const DEVELOPER_EXPOSURE_THRESHOLD: u32 = 12;
const METADATA_VISIBILITY_THRESHOLD: u32 = 12;

/// Human-readable category for each flagship signal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ExposureSummary {
    #[schema(example = "Significant Public Footprint")]
    pub public_presence: String,
    #[schema(example = "Extensive Cross-Platform Reuse")]
    pub platform_reuse: String,
    #[schema(example = "Minimal Technical Footprint")]
    pub developer_exposure: String,
    #[schema(example = "Restricted Metadata Clues")]
    pub metadata_visibility: String,
}

impl ExposureSummary {
    /// Map each signal to its higher- or lower-exposure label.
    pub fn from_signals(signals: &SignalBundle) -> Self {
        Self {
            public_presence: pick(
                signals.public_presence > PUBLIC_PRESENCE_THRESHOLD,
                "Significant Public Footprint",
                "Moderate Public Footprint",
            ),
            platform_reuse: pick(
                signals.platform_reuse > PLATFORM_REUSE_THRESHOLD,
                "Extensive Cross-Platform Reuse",
                "Limited Correlation Signals",
            ),
            developer_exposure: pick(
                signals.developer_exposure > DEVELOPER_EXPOSURE_THRESHOLD,
                "Advanced Technical Trail",
                "Minimal Technical Footprint",
            ),
            metadata_visibility: pick(
                signals.metadata_visibility > METADATA_VISIBILITY_THRESHOLD,
                "High Metadata Exposure",
                "Restricted Metadata Clues",
            ),
        }
    }
}

fn pick(high: bool, high_label: &str, low_label: &str) -> String {
    let label = if high { high_label } else { low_label };
    label.to_string()
}
