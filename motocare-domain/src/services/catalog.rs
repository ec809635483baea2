// Seed catalog of trackable maintenance items

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{MaintenanceItem, MaintenanceRegistry};
use crate::error::DomainError;
use crate::value_objects::{ItemId, MaintenanceCategory, ServiceAction};

pub const ENGINE_OIL_ID: &str = "engine-oil";

/// Catalog entry without service markers. Also the shape of the YAML
/// catalog override file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogDefinition {
    pub id: String,
    pub category: MaintenanceCategory,
    pub name: String,
    pub description: String,
    pub action: ServiceAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_km: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_months: Option<i32>,
    #[serde(default)]
    pub tracks_service_count: bool,
}

impl CatalogDefinition {
    pub fn into_item(self, seeded_at: DateTime<Utc>) -> MaintenanceItem {
        MaintenanceItem {
            id: ItemId::new(self.id.trim()),
            category: self.category,
            name: self.name,
            interval_km: self.interval_km,
            interval_months: self.interval_months,
            description: self.description,
            action: self.action,
            last_service_odo: 0,
            last_service_date: seeded_at,
            engine_oil_count: self.tracks_service_count.then_some(0),
            tracks_service_count: self.tracks_service_count,
        }
    }
}

fn entry(
    id: &str,
    category: MaintenanceCategory,
    name: &str,
    description: &str,
    action: ServiceAction,
    interval_km: Option<i64>,
    interval_months: Option<i32>,
) -> CatalogDefinition {
    CatalogDefinition {
        id: id.to_string(),
        category,
        name: name.to_string(),
        description: description.to_string(),
        action,
        interval_km,
        interval_months,
        tracks_service_count: false,
    }
}

pub fn builtin_catalog() -> Vec<CatalogDefinition> {
    use MaintenanceCategory::*;
    use ServiceAction::*;

    let mut engine_oil = entry(
        ENGINE_OIL_ID,
        OilLube,
        "Engine Oil",
        "Drain and refill engine oil to keep internals lubricated and cool.",
        Change,
        Some(3_000),
        None,
    );
    engine_oil.tracks_service_count = true;

    vec![
        engine_oil,
        entry(
            "gear-oil",
            OilLube,
            "Gear Oil",
            "Final drive gear oil; replace every second engine oil change.",
            Change,
            Some(6_000),
            None,
        ),
        entry(
            "oil-strainer",
            OilLube,
            "Oil Strainer",
            "Clean the engine oil strainer screen of sludge and debris.",
            Clean,
            Some(6_000),
            None,
        ),
        entry(
            "cvt-cleaning",
            DriveSystem,
            "CVT Cleaning",
            "Blow out belt dust and inspect the clutch and pulley faces.",
            Clean,
            Some(10_000),
            None,
        ),
        entry(
            "drive-belt",
            DriveSystem,
            "Drive Belt",
            "Replace the CVT drive belt before cracks or glazing appear.",
            Change,
            Some(24_000),
            None,
        ),
        entry(
            "roller-weights",
            DriveSystem,
            "Roller Weights & Sliders",
            "Check variator rollers and slider pieces for flat spots.",
            Check,
            Some(12_000),
            None,
        ),
        entry(
            "air-filter",
            AirSystem,
            "Air Filter",
            "Replace the intake air filter element.",
            Change,
            Some(12_000),
            None,
        ),
        entry(
            "throttle-body",
            AirSystem,
            "Throttle Body",
            "Clean carbon build-up from the throttle body and idle passage.",
            Clean,
            Some(10_000),
            None,
        ),
        entry(
            "coolant",
            Fluids,
            "Coolant",
            "Flush and refill radiator coolant.",
            Flush,
            Some(20_000),
            Some(24),
        ),
        entry(
            "brake-fluid",
            Fluids,
            "Brake Fluid",
            "Brake fluid absorbs moisture; flush and bleed the system.",
            Flush,
            None,
            Some(24),
        ),
        entry(
            "brake-pads",
            Brakes,
            "Brake Pads & Shoes",
            "Check remaining pad and shoe thickness front and rear.",
            Check,
            Some(5_000),
            None,
        ),
        entry(
            "spark-plug",
            Electrical,
            "Spark Plug",
            "Replace the spark plug for clean starts and complete combustion.",
            Change,
            Some(8_000),
            None,
        ),
        entry(
            "battery",
            Electrical,
            "Battery",
            "Check battery voltage and terminal corrosion.",
            Check,
            None,
            Some(6),
        ),
        entry(
            "tire-pressure",
            Tires,
            "Tire Pressure",
            "Check cold tire pressure against the manufacturer placard.",
            Check,
            None,
            Some(1),
        ),
        entry(
            "tires",
            Tires,
            "Tire Tread",
            "Inspect tread depth, sidewall cracks and embedded objects.",
            Check,
            Some(10_000),
            None,
        ),
        entry(
            "wash",
            Cleaning,
            "Wash & Detail",
            "Wash off road grime and re-lube pivot points after drying.",
            Clean,
            None,
            Some(1),
        ),
        entry(
            "valve-clearance",
            Mechanical,
            "Valve Clearance",
            "Check and adjust valve clearance to specification.",
            Check,
            Some(12_000),
            None,
        ),
        entry(
            "bolts-torque",
            Mechanical,
            "Nuts & Bolts",
            "Check torque on axle nuts, handlebar and body fasteners.",
            Check,
            None,
            Some(3),
        ),
    ]
}

/// Builds the item registry of a freshly created account.
pub fn seed_registry(
    definitions: Vec<CatalogDefinition>,
    seeded_at: DateTime<Utc>,
) -> Result<MaintenanceRegistry, DomainError> {
    let items = definitions
        .into_iter()
        .map(|definition| definition.into_item(seeded_at))
        .collect::<Vec<_>>();
    if let Some(blank) = items.iter().find(|item| item.id.as_str().is_empty()) {
        return Err(DomainError::InvalidInput(format!(
            "catalog entry '{}' has an empty id",
            blank.name
        )));
    }
    MaintenanceRegistry::new(items)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn builtin_catalog_seeds_unique_items() {
        let seeded_at = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let registry = seed_registry(builtin_catalog(), seeded_at).expect("builtin catalog is valid");
        assert_eq!(registry.len(), builtin_catalog().len());
        assert!(registry.iter().all(|item| item.is_trackable()));
        assert!(registry
            .iter()
            .all(|item| item.last_service_odo == 0 && item.last_service_date == seeded_at));
    }

    #[test]
    fn only_engine_oil_tracks_service_count() {
        let registry = seed_registry(builtin_catalog(), Utc::now()).expect("builtin catalog");
        let tracking = registry
            .iter()
            .filter(|item| item.tracks_service_count)
            .map(|item| item.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(tracking, vec![ENGINE_OIL_ID]);
        let oil = registry.get(&ItemId::from(ENGINE_OIL_ID)).expect("engine oil");
        assert_eq!(oil.engine_oil_count, Some(0));
    }

    #[test]
    fn seed_rejects_duplicate_or_blank_ids() {
        let mut definitions = builtin_catalog();
        definitions.push(definitions[0].clone());
        assert!(seed_registry(definitions, Utc::now()).is_err());

        let mut blank = builtin_catalog();
        blank[1].id = "  ".to_string();
        assert!(matches!(
            seed_registry(blank, Utc::now()),
            Err(DomainError::InvalidInput(_))
        ));
    }
}
