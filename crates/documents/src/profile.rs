//! Fixed business/payment footer metadata.

use serde::{Deserialize, Serialize};

/// The footer block printed under the line table, in fixed order: carrier
/// for the tracking number, payment instructions, business address.
///
/// Deserializes from the application config; the defaults mirror the text
/// the business prints today so a missing config section still produces a
/// complete document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessProfile {
    /// Carrier label printed next to the tracking number.
    pub carrier: String,
    /// Payment instructions, one printed line each.
    pub payment_lines: Vec<String>,
    /// Business name and address, one printed line each.
    pub business_lines: Vec<String>,
}

impl Default for BusinessProfile {
    fn default() -> Self {
        Self {
            carrier: "UPS".to_string(),
            payment_lines: vec![
                "Please make payment to PayPal".to_string(),
                "Zelle: billing@surplussupply.example".to_string(),
            ],
            business_lines: vec![
                "Surplus Supply Co.".to_string(),
                "1200 Commerce Way".to_string(),
                "Redding, CA 96002".to_string(),
            ],
        }
    }
}

impl BusinessProfile {
    /// The first footer line: "Tracking #: <number>   <carrier>".
    pub fn tracking_line(&self, tracking_number: &str) -> String {
        format!("Tracking #: {tracking_number}   {}", self.carrier)
    }
}
