// Maintenance category value object

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaintenanceCategory {
    #[serde(rename = "OIL & LUBE")]
    OilLube,
    #[serde(rename = "DRIVE SYSTEM")]
    DriveSystem,
    #[serde(rename = "AIR SYSTEM")]
    AirSystem,
    #[serde(rename = "FLUIDS")]
    Fluids,
    #[serde(rename = "BRAKES")]
    Brakes,
    #[serde(rename = "ELECTRICAL")]
    Electrical,
    #[serde(rename = "TIRES")]
    Tires,
    #[serde(rename = "CLEANING")]
    Cleaning,
    #[serde(rename = "MECHANICAL")]
    Mechanical,
}

impl MaintenanceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceCategory::OilLube => "OIL & LUBE",
            MaintenanceCategory::DriveSystem => "DRIVE SYSTEM",
            MaintenanceCategory::AirSystem => "AIR SYSTEM",
            MaintenanceCategory::Fluids => "FLUIDS",
            MaintenanceCategory::Brakes => "BRAKES",
            MaintenanceCategory::Electrical => "ELECTRICAL",
            MaintenanceCategory::Tires => "TIRES",
            MaintenanceCategory::Cleaning => "CLEANING",
            MaintenanceCategory::Mechanical => "MECHANICAL",
        }
    }
}

impl fmt::Display for MaintenanceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
