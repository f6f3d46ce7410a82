use serde::Serialize;
use std::fmt;

use crate::domain::PrecinctAttributes;

pub const WEBSITE_BASE: &str = "https://www.dallascounty.org/government/jpcourts";

/// Human-readable view of a precinct feature, one line per field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrecinctSummary {
    pub precinct: String,
    pub judge: String,
    pub address: String,
    pub phone: String,
    pub website: String,
}

impl PrecinctSummary {
    pub fn from_attributes(attributes: &PrecinctAttributes) -> Self {
        let precinct = attributes.text("PRECINCT");

        let judge = ["TITLE1", "FIRSTNAME1", "LASTNAME1"]
            .iter()
            .filter_map(|key| attributes.text(key))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string();

        let or = |key: &str, placeholder: &str| {
            attributes
                .text(key)
                .unwrap_or_else(|| placeholder.to_string())
        };

        let address = format!(
            "{}, {}, {} {}",
            or("ADDRESS1", "Address Not Found"),
            or("CITY1", "City Not Found"),
            or("STATE1", "State Not Found"),
            or("ZIP1", "ZIP Not Found"),
        );

        Self {
            website: precinct.as_deref().map_or_else(
                || "Website Not Found".to_string(),
                |number| format!("{WEBSITE_BASE}/{number}/"),
            ),
            precinct: precinct.unwrap_or_else(|| "Not Found".to_string()),
            judge: if judge.is_empty() {
                "Not Found".to_string()
            } else {
                judge
            },
            address,
            phone: or("TEL1", "Phone Not Found"),
        }
    }
}

impl fmt::Display for PrecinctSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Precinct Number: {}", self.precinct)?;
        writeln!(f, "Judge: {}", self.judge)?;
        writeln!(f, "Address: {}", self.address)?;
        writeln!(f, "Phone: {}", self.phone)?;
        write!(f, "Website: {}", self.website)
    }
}
