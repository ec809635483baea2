use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    odometer_updates: AtomicU64,
    odometer_rejections: AtomicU64,
    service_events: AtomicU64,
    snapshot_replacements: AtomicU64,
    save_errors: AtomicU64,
    advice_requests: AtomicU64,
    advice_fallbacks: AtomicU64,
}

impl Metrics {
    pub fn record_odometer_update(&self) {
        self.odometer_updates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_odometer_rejection(&self) {
        self.odometer_rejections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_service_event(&self) {
        self.service_events.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_snapshot_replacement(&self) {
        self.snapshot_replacements.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_save_error(&self) {
        self.save_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_advice(&self, fallback: bool) {
        self.advice_requests.fetch_add(1, Ordering::Relaxed);
        if fallback {
            self.advice_fallbacks.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn odometer_rejections(&self) -> u64 {
        self.odometer_rejections.load(Ordering::Relaxed)
    }

    pub fn save_errors(&self) -> u64 {
        self.save_errors.load(Ordering::Relaxed)
    }

    pub fn render_prometheus(&self) -> String {
        let odometer_updates = self.odometer_updates.load(Ordering::Relaxed);
        let odometer_rejections = self.odometer_rejections.load(Ordering::Relaxed);
        let service_events = self.service_events.load(Ordering::Relaxed);
        let snapshot_replacements = self.snapshot_replacements.load(Ordering::Relaxed);
        let save_errors = self.save_errors.load(Ordering::Relaxed);
        let advice_requests = self.advice_requests.load(Ordering::Relaxed);
        let advice_fallbacks = self.advice_fallbacks.load(Ordering::Relaxed);

        format!(
            "# TYPE motocare_odometer_updates_total counter\n\
motocare_odometer_updates_total {}\n\
# TYPE motocare_odometer_rejections_total counter\n\
motocare_odometer_rejections_total {}\n\
# TYPE motocare_service_events_total counter\n\
motocare_service_events_total {}\n\
# TYPE motocare_snapshot_replacements_total counter\n\
motocare_snapshot_replacements_total {}\n\
# TYPE motocare_save_errors_total counter\n\
motocare_save_errors_total {}\n\
# TYPE motocare_advice_requests_total counter\n\
motocare_advice_requests_total {}\n\
# TYPE motocare_advice_fallbacks_total counter\n\
motocare_advice_fallbacks_total {}\n",
            odometer_updates,
            odometer_rejections,
            service_events,
            snapshot_replacements,
            save_errors,
            advice_requests,
            advice_fallbacks
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prometheus_output_reflects_counters() {
        let metrics = Metrics::default();
        metrics.record_service_event();
        metrics.record_advice(true);
        metrics.record_advice(false);
        let text = metrics.render_prometheus();
        assert!(text.contains("motocare_service_events_total 1\n"));
        assert!(text.contains("motocare_advice_requests_total 2\n"));
        assert!(text.contains("motocare_advice_fallbacks_total 1\n"));
        assert!(text.contains("motocare_save_errors_total 0\n"));
    }
}
