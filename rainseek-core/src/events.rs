//! Search progress events and the sink they stream through.
//!
//! Each event serializes as a JSON frame tagged by `"type"`, the wire shape
//! consumed by front ends. The driver may call a sink from several worker
//! threads at once, so implementations must be `Send + Sync` and cheap;
//! anything slow should buffer internally rather than stall the scan.

use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use crate::weather::WeatherDetail;

/// One progress frame emitted during a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SearchEvent {
    /// Emitted once before any worker starts.
    Start { total: i64 },
    /// Periodic throughput report; at most one in flight per interval.
    #[serde(rename_all = "camelCase")]
    Progress {
        checked_count: i64,
        total: i64,
        /// Percentage of the range scanned, rounded to 2 decimals.
        progress: f64,
        /// Seeds per second, rounded to a whole number.
        speed: f64,
        /// Wall-clock seconds since the search started, rounded to 2 decimals.
        elapsed: f64,
    },
    /// A seed satisfied every condition.
    #[serde(rename_all = "camelCase")]
    Found {
        seed: i32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        weather_detail: Option<WeatherDetail>,
    },
    /// Emitted once after all workers joined.
    #[serde(rename_all = "camelCase")]
    Complete { total_found: usize, elapsed: f64 },
}

/// Receiver for search events.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: SearchEvent);
}

/// Sink that drops every event; useful when only the summary matters.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: SearchEvent) {}
}

/// Sink that records every event in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<SearchEvent>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything captured so far.
    ///
    /// # Panics
    ///
    /// Panics if a previous holder of the event buffer panicked.
    #[must_use]
    pub fn events(&self) -> Vec<SearchEvent> {
        self.events.lock().expect("event buffer poisoned").clone()
    }

    /// Seeds carried by captured `found` events, in arrival order.
    #[must_use]
    pub fn found_seeds(&self) -> Vec<i32> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SearchEvent::Found { seed, .. } => Some(seed),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for MemorySink {
    fn emit(&self, event: SearchEvent) {
        self.events.lock().expect("event buffer poisoned").push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn frames_serialize_with_type_tags() {
        let start = serde_json::to_value(SearchEvent::Start { total: 1001 }).unwrap();
        assert_eq!(start, json!({"type": "start", "total": 1001}));

        let progress = serde_json::to_value(SearchEvent::Progress {
            checked_count: 5000,
            total: 100_001,
            progress: 5.0,
            speed: 250_000.0,
            elapsed: 0.02,
        })
        .unwrap();
        assert_eq!(
            progress,
            json!({
                "type": "progress",
                "checkedCount": 5000,
                "total": 100_001,
                "progress": 5.0,
                "speed": 250_000.0,
                "elapsed": 0.02
            })
        );

        let complete = serde_json::to_value(SearchEvent::Complete {
            total_found: 7,
            elapsed: 1.25,
        })
        .unwrap();
        assert_eq!(
            complete,
            json!({"type": "complete", "totalFound": 7, "elapsed": 1.25})
        );
    }

    #[test]
    fn found_frame_omits_missing_detail() {
        let bare = serde_json::to_value(SearchEvent::Found {
            seed: 59,
            weather_detail: None,
        })
        .unwrap();
        assert_eq!(bare, json!({"type": "found", "seed": 59}));
    }

    #[test]
    fn found_frame_round_trips_detail() {
        let event = SearchEvent::Found {
            seed: 59,
            weather_detail: Some(WeatherDetail {
                spring_rain: vec![3, 6, 7, 9, 10],
                summer_rain: vec![13, 26],
                fall_rain: vec![1, 2],
                green_rain_day: 7,
            }),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["weatherDetail"]["greenRainDay"], json!(7));
        let back: SearchEvent = serde_json::from_value(value).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn memory_sink_preserves_arrival_order() {
        let sink = MemorySink::new();
        sink.emit(SearchEvent::Start { total: 3 });
        sink.emit(SearchEvent::Found {
            seed: 2,
            weather_detail: None,
        });
        sink.emit(SearchEvent::Complete {
            total_found: 1,
            elapsed: 0.0,
        });
        assert_eq!(sink.found_seeds(), vec![2]);
        assert_eq!(sink.events().len(), 3);
    }
}
