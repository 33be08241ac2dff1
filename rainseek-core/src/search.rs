//! Parallel seed-range scanner.
//!
//! The driver shards a contiguous seed range across OS threads, streams
//! `found` events to the caller's sink under an output cap, and returns the
//! matched seeds sorted ascending so results are identical for any worker
//! count. Workers share nothing but the result buffer (mutex), the checked
//! counter, the progress watermark and the stop flag (atomics); everything
//! else, including the oracle scratch, is worker-local.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crate::events::{EventSink, SearchEvent};
use crate::feature::{SearchFeature, WeatherFeature};
use crate::model::{RequestError, SearchRequest};
use crate::numbers::{i64_to_f64, percent, round2};
use crate::weather::{self, WeatherDetail};

/// Ranges below this size are scanned on a single worker.
const SINGLE_WORKER_BELOW: i64 = 10_000;

/// Progress interval for small ranges, in checked seeds.
const SMALL_RANGE_INTERVAL: i64 = 1_000;

/// Progress interval for everything else.
const LARGE_RANGE_INTERVAL: i64 = 5_000;

/// Clonable handle that stops a running search at the next seed boundary.
///
/// The same flag is raised internally when the output cap fills, so a
/// token observed cancelled does not imply the caller cancelled it.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a graceful stop; partial results are still returned.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Optional knobs for a search run.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Fixed worker count; `None` derives one from the range size.
    pub workers: Option<usize>,
    /// Attach per-season rain listings to `found` events.
    pub include_weather_detail: bool,
    /// External cancellation handle.
    pub cancel: Option<CancelToken>,
}

/// Outcome of a completed (or cancelled) search.
#[derive(Debug, Clone)]
pub struct SearchSummary {
    /// Matched seeds, sorted ascending.
    pub matches: Vec<i32>,
    /// Seeds actually evaluated before the scan ended.
    pub checked: i64,
    /// Workers that participated in the scan.
    pub workers: usize,
    pub elapsed: Duration,
}

/// Run a search with derived worker count and default options.
///
/// # Errors
///
/// Returns `RequestError` when the request fails validation; no events
/// are emitted in that case.
pub fn search(request: &SearchRequest, sink: &dyn EventSink) -> Result<SearchSummary, RequestError> {
    search_with(request, sink, &SearchOptions::default())
}

/// Run a search with explicit options.
///
/// Emits `start`, throttled `progress`, per-match `found`, a final
/// `progress` with the true checked count, and `complete` — in that
/// order relative to each worker, though `found` events from different
/// workers may interleave out of seed order.
///
/// # Errors
///
/// Returns `RequestError` when the request fails validation; no events
/// are emitted in that case.
///
/// # Panics
///
/// A panicking worker aborts the search and the panic resumes on the
/// calling thread once the remaining workers stop.
pub fn search_with(
    request: &SearchRequest,
    sink: &dyn EventSink,
    options: &SearchOptions,
) -> Result<SearchSummary, RequestError> {
    request.validate()?;

    let features = build_features(request);
    for feature in &features {
        log::info!("feature {}: {}", feature.name(), feature.describe());
    }

    let started = Instant::now();
    let total = request.total_seeds();
    let workers = options
        .workers
        .unwrap_or_else(|| worker_count_for(total))
        .max(1);
    log::info!(
        "scanning {} seeds in [{}, {}] on {} workers",
        total,
        request.start_seed,
        request.end_seed,
        workers
    );

    sink.emit(SearchEvent::Start { total });

    let limit = usize::try_from(request.output_limit).unwrap_or(usize::MAX);
    let cancel = options.cancel.clone().unwrap_or_default();
    let shared = ScanShared {
        request,
        sink,
        results: Mutex::new(Vec::with_capacity(limit.min(4096))),
        checked: AtomicI64::new(0),
        last_reported: AtomicI64::new(0),
        stop: cancel,
        limit,
        total,
        interval: if total < SINGLE_WORKER_BELOW {
            SMALL_RANGE_INTERVAL
        } else {
            LARGE_RANGE_INTERVAL
        },
        started,
        include_detail: options.include_weather_detail,
    };

    // Contiguous shards keep the sorted result set independent of the
    // worker count; the last shard absorbs the division remainder.
    let span = (total / workers as i64).max(1);
    let mut spawned = 0;
    thread::scope(|scope| {
        for worker_id in 0..workers {
            let lo = request.start_seed + worker_id as i64 * span;
            if lo > request.end_seed {
                break;
            }
            let hi = if worker_id == workers - 1 {
                request.end_seed
            } else {
                (lo + span - 1).min(request.end_seed)
            };
            let shared = &shared;
            scope.spawn(move || scan_range(shared, lo, hi));
            spawned += 1;
        }
    });

    let checked = shared.checked.load(Ordering::SeqCst);
    emit_progress(&shared, checked);

    let mut matches = shared
        .results
        .into_inner()
        .expect("a panicking worker already aborted the search");
    matches.sort_unstable();

    let elapsed = started.elapsed();
    sink.emit(SearchEvent::Complete {
        total_found: matches.len(),
        elapsed: round2(elapsed.as_secs_f64()),
    });
    log::info!("checked {} seeds, found {} matches", checked, matches.len());

    Ok(SearchSummary {
        matches,
        checked,
        workers: spawned,
        elapsed,
    })
}

/// Worker count policy derived from range size and available cores.
#[must_use]
pub fn worker_count_for(total_seeds: i64) -> usize {
    let ncpu = thread::available_parallelism().map_or(1, NonZeroUsize::get);
    let workers = if total_seeds < SINGLE_WORKER_BELOW {
        1
    } else if total_seeds < 100_000 {
        (ncpu / 2).min(2)
    } else if total_seeds < 1_000_000 {
        (ncpu / 2).min(4)
    } else {
        ncpu.min(8)
    };
    workers.max(1)
}

struct ScanShared<'a> {
    request: &'a SearchRequest,
    sink: &'a dyn EventSink,
    results: Mutex<Vec<i32>>,
    checked: AtomicI64,
    last_reported: AtomicI64,
    stop: CancelToken,
    limit: usize,
    total: i64,
    interval: i64,
    started: Instant,
    include_detail: bool,
}

fn build_features(request: &SearchRequest) -> Vec<SearchFeature> {
    if request.weather_conditions.is_empty() {
        return Vec::new();
    }
    vec![SearchFeature::Weather(WeatherFeature::new(
        request.weather_conditions.iter().copied(),
    ))]
}

#[allow(clippy::cast_possible_truncation)]
fn scan_range(shared: &ScanShared<'_>, lo: i64, hi: i64) {
    let mut features = build_features(shared.request);
    let legacy = shared.request.use_legacy_random;

    let mut seed = lo;
    while seed <= hi {
        if shared.stop.is_cancelled() {
            return;
        }

        let game_seed = seed as i32;
        let matched = features
            .iter_mut()
            .all(|feature| !feature.is_enabled() || feature.check(game_seed, legacy));
        if matched && !record_match(shared, game_seed, legacy) {
            return;
        }

        let current = shared.checked.fetch_add(1, Ordering::SeqCst) + 1;
        maybe_report_progress(shared, current);
        seed += 1;
    }
}

/// Append a match under the cap. Returns false once the scan must stop.
fn record_match(shared: &ScanShared<'_>, game_seed: i32, legacy: bool) -> bool {
    let mut guard = shared
        .results
        .lock()
        .expect("another worker panicked while appending results");
    if guard.len() >= shared.limit {
        drop(guard);
        shared.stop.cancel();
        return false;
    }
    guard.push(game_seed);
    let count = guard.len();
    drop(guard);

    let weather_detail = shared.include_detail.then(|| {
        let calendar = weather::predict(game_seed, legacy);
        WeatherDetail::from_calendar(&calendar, weather::green_rain_day(game_seed, legacy))
    });
    shared.sink.emit(SearchEvent::Found {
        seed: game_seed,
        weather_detail,
    });
    log::debug!("matched seed {game_seed}");

    if count >= shared.limit {
        shared.stop.cancel();
        return false;
    }
    true
}

fn maybe_report_progress(shared: &ScanShared<'_>, current: i64) {
    if current % shared.interval != 0 && current != shared.total {
        return;
    }
    let previous = shared.last_reported.load(Ordering::SeqCst);
    if current - previous < shared.interval {
        return;
    }
    // The winning thread reports; losers retry on their own next interval.
    if shared
        .last_reported
        .compare_exchange(previous, current, Ordering::SeqCst, Ordering::SeqCst)
        .is_ok()
    {
        emit_progress(shared, current);
    }
}

fn emit_progress(shared: &ScanShared<'_>, checked: i64) {
    let elapsed = round2(shared.started.elapsed().as_secs_f64());
    let speed = if elapsed > 0.0 {
        (i64_to_f64(checked) / elapsed).round()
    } else {
        0.0
    };
    shared.sink.emit(SearchEvent::Progress {
        checked_count: checked,
        total: shared.total,
        progress: percent(checked, shared.total),
        speed,
        elapsed,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::NullSink;
    use crate::model::{Season, WeatherCondition};

    fn request(start: i64, end: i64, limit: i32) -> SearchRequest {
        SearchRequest {
            start_seed: start,
            end_seed: end,
            use_legacy_random: false,
            weather_conditions: vec![WeatherCondition {
                season: Season::Spring,
                start_day: 1,
                end_day: 10,
                min_rain_days: 5,
            }],
            output_limit: limit,
        }
    }

    #[test]
    fn worker_policy_scales_with_range() {
        assert_eq!(worker_count_for(1), 1);
        assert_eq!(worker_count_for(9_999), 1);
        assert!(worker_count_for(50_000) <= 2);
        assert!(worker_count_for(500_000) <= 4);
        assert!(worker_count_for(5_000_000) <= 8);
        assert!(worker_count_for(i64::from(i32::MAX)) >= 1);
    }

    #[test]
    fn invalid_requests_fail_before_any_event() {
        let sink = crate::events::MemorySink::new();
        let mut bad = request(0, 1000, 10);
        bad.output_limit = 0;
        assert!(search(&bad, &sink).is_err());
        assert!(sink.events().is_empty());
    }

    #[test]
    fn summary_reports_checked_and_workers() {
        let summary = search(&request(0, 999, 10), &NullSink).expect("valid request");
        assert_eq!(summary.checked, 1000);
        assert_eq!(summary.workers, 1);
        assert_eq!(summary.matches, vec![59, 73, 101, 142, 659, 932, 938]);
    }

    #[test]
    fn pre_cancelled_search_returns_empty() {
        let token = CancelToken::new();
        token.cancel();
        let options = SearchOptions {
            cancel: Some(token),
            ..SearchOptions::default()
        };
        let summary =
            search_with(&request(0, 100_000, 10), &NullSink, &options).expect("valid request");
        assert!(summary.matches.is_empty());
        assert_eq!(summary.checked, 0);
    }

    #[test]
    fn shards_cover_tiny_ranges_with_many_workers() {
        let options = SearchOptions {
            workers: Some(8),
            ..SearchOptions::default()
        };
        let mut req = request(0, 2, 10);
        req.weather_conditions.clear();
        let summary = search_with(&req, &NullSink, &options).expect("valid request");
        assert_eq!(summary.matches, vec![0, 1, 2]);
        assert_eq!(summary.checked, 3);
        assert!(summary.workers <= 3);
    }
}
