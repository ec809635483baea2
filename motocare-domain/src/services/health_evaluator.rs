use chrono::{DateTime, Datelike, Utc};

use crate::entities::{HealthStatus, MaintenanceItem, RemainingUnit};
use crate::services::status_classifier::classify;
use crate::value_objects::{HealthLevel, TieBreak};

/// Health of `item` at `current_odo` / `now`, distance taking precedence
/// over time when both intervals are set.
pub fn evaluate(item: &MaintenanceItem, current_odo: u32, now: DateTime<Utc>) -> HealthStatus {
    evaluate_with(item, current_odo, now, TieBreak::DistanceFirst)
}

pub fn evaluate_with(
    item: &MaintenanceItem,
    current_odo: u32,
    now: DateTime<Utc>,
    tie_break: TieBreak,
) -> HealthStatus {
    match tie_break {
        TieBreak::DistanceFirst => {
            if let Some(interval_km) = item.interval_km {
                distance_health(interval_km, item.last_service_odo, current_odo)
            } else if let Some(interval_months) = item.interval_months {
                time_health(interval_months, item.last_service_date, now)
            } else {
                HealthStatus::fully_healthy()
            }
        }
        TieBreak::WorstOf => {
            let distance = item
                .interval_km
                .map(|interval| distance_health(interval, item.last_service_odo, current_odo));
            let time = item
                .interval_months
                .map(|interval| time_health(interval, item.last_service_date, now));
            match (distance, time) {
                (Some(distance), Some(time)) => {
                    if time.percentage < distance.percentage {
                        time
                    } else {
                        distance
                    }
                }
                (Some(distance), None) => distance,
                (None, Some(time)) => time,
                (None, None) => HealthStatus::fully_healthy(),
            }
        }
    }
}

/// Whole calendar months from `from` to `to`; day-of-month is ignored.
pub fn months_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    let years = i64::from(to.year()) - i64::from(from.year());
    let months = i64::from(to.month()) - i64::from(from.month());
    years * 12 + months
}

fn distance_health(interval_km: i64, last_service_odo: u32, current_odo: u32) -> HealthStatus {
    let elapsed = i64::from(current_odo) - i64::from(last_service_odo);
    interval_health(interval_km, elapsed, RemainingUnit::Km)
}

fn time_health(interval_months: i32, last_service: DateTime<Utc>, now: DateTime<Utc>) -> HealthStatus {
    let elapsed = months_between(last_service, now);
    interval_health(i64::from(interval_months), elapsed, RemainingUnit::Months)
}

fn interval_health(interval: i64, elapsed: i64, unit: RemainingUnit) -> HealthStatus {
    let remaining = interval.saturating_sub(elapsed);
    if interval <= 0 {
        // A non-positive interval is never divided into.
        return HealthStatus {
            percentage: 0.0,
            status: HealthLevel::Critical,
            remaining,
            unit,
        };
    }
    let percentage = (remaining as f64 / interval as f64 * 100.0).clamp(0.0, 100.0);
    HealthStatus {
        percentage,
        status: classify(percentage),
        remaining,
        unit,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::value_objects::{ItemId, MaintenanceCategory, ServiceAction};

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 9, 30, 0).unwrap()
    }

    fn item(interval_km: Option<i64>, interval_months: Option<i32>) -> MaintenanceItem {
        MaintenanceItem {
            id: ItemId::from("engine-oil"),
            category: MaintenanceCategory::OilLube,
            name: "Engine Oil".to_string(),
            interval_km,
            interval_months,
            description: "Keeps the engine lubricated".to_string(),
            action: ServiceAction::Change,
            last_service_odo: 10_000,
            last_service_date: at(2025, 1, 15),
            engine_oil_count: Some(4),
            tracks_service_count: true,
        }
    }

    #[test]
    fn distance_interval_scenario() {
        let health = evaluate(&item(Some(3_000), None), 12_500, at(2025, 2, 1));
        assert!((health.percentage - 16.67).abs() < 0.01);
        assert_eq!(health.rounded_percentage(), 16.67);
        assert_eq!(health.status, HealthLevel::Warning);
        assert_eq!(health.remaining, 500);
        assert_eq!(health.unit, RemainingUnit::Km);
    }

    #[test]
    fn distance_interval_boundaries() {
        let now = at(2025, 2, 1);
        let fresh = evaluate(&item(Some(4_000), None), 10_000, now);
        assert_eq!(fresh.percentage, 100.0);
        assert_eq!(fresh.status, HealthLevel::Good);

        let quarter = evaluate(&item(Some(4_000), None), 13_000, now);
        assert_eq!(quarter.percentage, 25.0);
        assert_eq!(quarter.status, HealthLevel::Warning);

        let due = evaluate(&item(Some(4_000), None), 14_000, now);
        assert_eq!(due.percentage, 0.0);
        assert_eq!(due.status, HealthLevel::Critical);
        assert_eq!(due.remaining, 0);

        let overdue = evaluate(&item(Some(4_000), None), 15_500, now);
        assert_eq!(overdue.percentage, 0.0);
        assert_eq!(overdue.remaining, -1_500);
    }

    #[test]
    fn odometer_behind_last_service_clamps_at_full() {
        let health = evaluate(&item(Some(3_000), None), 9_000, at(2025, 2, 1));
        assert_eq!(health.remaining, 4_000);
        assert_eq!(health.percentage, 100.0);
        assert_eq!(health.status, HealthLevel::Good);
    }

    #[test]
    fn time_interval_overdue_scenario() {
        let mut six_months = item(None, Some(6));
        six_months.last_service_date = at(2024, 9, 28);
        let health = evaluate(&six_months, 0, at(2025, 4, 1));
        assert_eq!(health.remaining, -1);
        assert_eq!(health.percentage, 0.0);
        assert_eq!(health.status, HealthLevel::Critical);
        assert_eq!(health.unit, RemainingUnit::Months);
    }

    #[test]
    fn time_interval_ignores_day_of_month() {
        let mut monthly = item(None, Some(4));
        monthly.last_service_date = at(2025, 1, 31);
        let early = evaluate(&monthly, 0, at(2025, 2, 1));
        let late = evaluate(&monthly, 0, at(2025, 2, 28));
        assert_eq!(early, late);
        assert_eq!(early.remaining, 3);
        assert_eq!(early.percentage, 75.0);
    }

    #[test]
    fn months_between_crosses_years() {
        assert_eq!(months_between(at(2024, 11, 20), at(2025, 2, 3)), 3);
        assert_eq!(months_between(at(2025, 3, 1), at(2025, 3, 31)), 0);
        assert_eq!(months_between(at(2025, 5, 1), at(2025, 3, 1)), -2);
    }

    #[test]
    fn distance_takes_precedence_by_default() {
        let mut both = item(Some(3_000), Some(6));
        both.last_service_date = at(2020, 1, 1);
        let health = evaluate(&both, 10_500, at(2025, 1, 1));
        assert_eq!(health.unit, RemainingUnit::Km);
        assert_eq!(health.status, HealthLevel::Good);
        assert_eq!(health.remaining, 2_500);
    }

    #[test]
    fn worst_of_reports_the_lower_axis() {
        let mut both = item(Some(3_000), Some(6));
        both.last_service_date = at(2024, 12, 1);
        let now = at(2025, 5, 10);

        let worst = evaluate_with(&both, 10_500, now, TieBreak::WorstOf);
        assert_eq!(worst.unit, RemainingUnit::Months);
        assert_eq!(worst.remaining, 1);
        assert_eq!(worst.status, HealthLevel::Warning);

        let distance_worse = evaluate_with(&both, 12_900, now, TieBreak::WorstOf);
        assert_eq!(distance_worse.unit, RemainingUnit::Km);
        assert_eq!(distance_worse.remaining, 100);
    }

    #[test]
    fn no_interval_is_always_fully_healthy() {
        let none = item(None, None);
        for (odo, now) in [(0, at(2000, 1, 1)), (999_999, at(2099, 12, 31))] {
            let health = evaluate(&none, odo, now);
            assert_eq!(health.percentage, 100.0);
            assert_eq!(health.status, HealthLevel::Good);
            assert_eq!(health.remaining, 0);
            assert_eq!(evaluate_with(&none, odo, now, TieBreak::WorstOf), health);
        }
    }

    #[test]
    fn non_positive_interval_is_forced_critical() {
        let now = at(2025, 2, 1);
        for broken in [item(Some(0), None), item(Some(-500), None), item(None, Some(0))] {
            let health = evaluate(&broken, 10_000, now);
            assert_eq!(health.status, HealthLevel::Critical);
            assert_eq!(health.percentage, 0.0);
            assert!(health.percentage.is_finite());
        }
    }

    #[test]
    fn evaluation_is_deterministic_for_injected_now() {
        let subject = item(Some(3_000), Some(6));
        let now = at(2025, 6, 1) + Duration::hours(3);
        assert_eq!(evaluate(&subject, 11_000, now), evaluate(&subject, 11_000, now));
    }
}
