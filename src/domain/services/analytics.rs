use serde::Serialize;

use crate::domain::models::event::Event;

/// Dashboard rollup for one event. Computed from plain (possibly slightly
/// stale) counts; this read path takes no locks.
#[derive(Debug, Serialize)]
pub struct EventAnalytics {
    pub total_registrations: i64,
    pub confirmed_count: i64,
    pub waitlist_count: i64,
    pub seats_filled_percentage: f64,
}

impl EventAnalytics {
    pub fn compute(event: &Event, confirmed_count: i64, waitlist_count: i64) -> Self {
        let seats_filled_percentage = if event.capacity > 0 {
            (event.capacity - event.seats_remaining) as f64 / event.capacity as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total_registrations: confirmed_count + waitlist_count,
            confirmed_count,
            waitlist_count,
            seats_filled_percentage,
        }
    }
}
