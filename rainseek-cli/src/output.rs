//! Event sinks for the two CLI output modes.

use colored::Colorize;
use rainseek_core::events::{EventSink, SearchEvent};

/// Human-readable progress written to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl EventSink for ConsoleSink {
    fn emit(&self, event: SearchEvent) {
        match event {
            SearchEvent::Start { total } => {
                println!("Scanning {} seeds...", total.to_string().bold());
            }
            SearchEvent::Progress {
                checked_count,
                total,
                progress,
                speed,
                elapsed,
            } => {
                println!(
                    "{}",
                    format!(
                        "  {checked_count}/{total} ({progress:.2}%) - {speed:.0} seeds/s - {elapsed:.2}s"
                    )
                    .dimmed()
                );
            }
            SearchEvent::Found {
                seed,
                weather_detail,
            } => {
                println!("{} {}", "Found seed".green(), seed.to_string().green().bold());
                if let Some(detail) = weather_detail {
                    println!("  Spring rain: {:?}", detail.spring_rain);
                    println!(
                        "  Summer rain: {:?} (green rain on {})",
                        detail.summer_rain, detail.green_rain_day
                    );
                    println!("  Fall rain:   {:?}", detail.fall_rain);
                }
            }
            SearchEvent::Complete { .. } => {}
        }
    }
}

/// One JSON frame per line, for machine consumption.
#[derive(Debug, Clone, Copy, Default)]
pub struct NdjsonSink;

impl EventSink for NdjsonSink {
    fn emit(&self, event: SearchEvent) {
        let line = serde_json::to_string(&event).expect("events always serialize");
        println!("{line}");
    }
}
