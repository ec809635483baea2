// Maintenance item registry
// The item collection of one state, unique by id

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::entities::MaintenanceItem;
use crate::error::DomainError;
use crate::value_objects::ItemId;

/// Serialized as a plain array; deserializing rejects duplicate ids. Items
/// stored with an `engineOilCount` but no `tracksServiceCount` keep counting.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<MaintenanceItem>", into = "Vec<MaintenanceItem>")]
pub struct MaintenanceRegistry {
    items: Vec<MaintenanceItem>,
}

impl MaintenanceRegistry {
    pub fn new(items: Vec<MaintenanceItem>) -> Result<Self, DomainError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(&item.id) {
                return Err(DomainError::DuplicateItem(item.id.clone()));
            }
        }
        Ok(Self { items })
    }

    pub fn get(&self, id: &ItemId) -> Option<&MaintenanceItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MaintenanceItem> {
        self.items.iter()
    }

    pub fn ids(&self) -> Vec<ItemId> {
        self.items.iter().map(|item| item.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns a copy with the item sharing `updated.id` swapped out.
    pub fn with_item(&self, updated: MaintenanceItem) -> Result<Self, DomainError> {
        let position = self
            .items
            .iter()
            .position(|item| item.id == updated.id)
            .ok_or_else(|| DomainError::NotFound(updated.id.clone()))?;
        let mut items = self.items.clone();
        items[position] = updated;
        Ok(Self { items })
    }
}

impl TryFrom<Vec<MaintenanceItem>> for MaintenanceRegistry {
    type Error = DomainError;

    fn try_from(mut items: Vec<MaintenanceItem>) -> Result<Self, Self::Error> {
        for item in items.iter_mut().filter(|item| item.engine_oil_count.is_some()) {
            item.tracks_service_count = true;
        }
        Self::new(items)
    }
}

impl From<MaintenanceRegistry> for Vec<MaintenanceItem> {
    fn from(registry: MaintenanceRegistry) -> Self {
        registry.items
    }
}

impl<'a> IntoIterator for &'a MaintenanceRegistry {
    type Item = &'a MaintenanceItem;
    type IntoIter = std::slice::Iter<'a, MaintenanceItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::value_objects::{MaintenanceCategory, ServiceAction};

    fn item(id: &str) -> MaintenanceItem {
        MaintenanceItem {
            id: ItemId::from(id),
            category: MaintenanceCategory::Brakes,
            name: id.to_string(),
            interval_km: Some(5_000),
            interval_months: None,
            description: String::new(),
            action: ServiceAction::Check,
            last_service_odo: 0,
            last_service_date: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            engine_oil_count: None,
            tracks_service_count: false,
        }
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = MaintenanceRegistry::new(vec![item("a"), item("b"), item("a")])
            .expect_err("duplicate must be rejected");
        assert_eq!(err, DomainError::DuplicateItem(ItemId::from("a")));
    }

    #[test]
    fn deserializing_rejects_duplicate_ids() {
        let json = serde_json::to_string(&vec![item("a"), item("a")]).expect("serialize items");
        let parsed: Result<MaintenanceRegistry, _> = serde_json::from_str(&json);
        assert!(parsed.is_err());
    }

    #[test]
    fn stored_oil_count_without_flag_keeps_counting() {
        let json = serde_json::json!({
            "modelName": "Vario 160",
            "currentOdo": 12_400,
            "maintenanceItems": [{
                "id": "engine-oil",
                "category": "OIL & LUBE",
                "name": "Engine Oil",
                "intervalKm": 2_000,
                "intervalMonths": 2,
                "description": "Replace engine oil",
                "action": "Change",
                "lastServiceOdo": 10_000,
                "lastServiceDate": "2025-03-01T08:00:00Z",
                "engineOilCount": 4
            }],
            "history": []
        });
        let state: crate::entities::MotorbikeState = serde_json::from_value(json).expect("stored state");
        let oil = ItemId::from("engine-oil");
        assert!(state.item(&oil).map(|i| i.tracks_service_count).unwrap_or_default());

        let at = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        let next = crate::services::record_service(&state, &oil, at).expect("record");
        assert_eq!(next.item(&oil).and_then(|i| i.engine_oil_count), Some(5));
    }

    #[test]
    fn items_without_oil_count_stay_untracked() {
        let json = serde_json::to_string(&vec![item("a")]).expect("serialize items");
        let registry: MaintenanceRegistry = serde_json::from_str(&json).expect("registry");
        assert!(!registry.get(&ItemId::from("a")).map(|i| i.tracks_service_count).unwrap_or(true));
    }

    #[test]
    fn with_item_replaces_only_the_matching_entry() {
        let registry = MaintenanceRegistry::new(vec![item("a"), item("b")]).expect("registry");
        let mut changed = item("b");
        changed.last_service_odo = 900;
        let next = registry.with_item(changed).expect("replace b");
        assert_eq!(next.get(&ItemId::from("b")).map(|i| i.last_service_odo), Some(900));
        assert_eq!(next.get(&ItemId::from("a")), registry.get(&ItemId::from("a")));
        assert_eq!(registry.get(&ItemId::from("b")).map(|i| i.last_service_odo), Some(0));
    }

    #[test]
    fn with_item_reports_unknown_id() {
        let registry = MaintenanceRegistry::new(vec![item("a")]).expect("registry");
        let err = registry.with_item(item("zz")).expect_err("unknown id");
        assert_eq!(err, DomainError::NotFound(ItemId::from("zz")));
    }
}
