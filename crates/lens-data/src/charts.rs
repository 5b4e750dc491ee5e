//! Chart-ready series derived from a [`ChatStatistics`].
//!
//! Pure transforms, no mutation: per-person pivots over the fixed weekday
//! and hour-of-day axes, totals series for both axes, and a chronological
//! points series over the date buckets.

use indexmap::IndexMap;
use lens_core::models::{BucketStats, ChatStatistics};
use lens_core::time_utils::{self, HOUR_LABELS, WEEKDAY_NAMES};
use serde::{Deserialize, Serialize};

// ── Series types ──────────────────────────────────────────────────────────────

/// One participant's counts aligned to a fixed bucket axis
/// (7 entries for weekdays, 24 for hours), zero-filled where inactive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonSeries {
    pub name: String,
    pub data: Vec<u64>,
}

/// One point of the chronological totals series: epoch milliseconds of the
/// date bucket paired with its message count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimePoint {
    pub x: i64,
    pub y: u64,
}

/// All derived series for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub weekday_per_person: Vec<PersonSeries>,
    pub hourly_per_person: Vec<PersonSeries>,
    pub weekday_totals: Vec<u64>,
    pub hourly_totals: Vec<u64>,
    pub daily_totals: Vec<TimePoint>,
}

impl ChartData {
    /// Derive every chart series from the aggregated statistics.
    ///
    /// `daily_totals` follows the date buckets' insertion order (first seen
    /// in the transcript), not calendar order; use [`daily_totals_sorted`]
    /// for an explicitly chronological series.
    pub fn from_stats(stats: &ChatStatistics) -> Self {
        Self {
            weekday_per_person: weekday_per_person(stats),
            hourly_per_person: hourly_per_person(stats),
            weekday_totals: weekday_totals(stats),
            hourly_totals: hourly_totals(stats),
            daily_totals: daily_totals(stats),
        }
    }
}

// ── Per-person pivots ─────────────────────────────────────────────────────────

/// Per-participant weekday counts, 7-wide, Monday..Sunday.
pub fn weekday_per_person(stats: &ChatStatistics) -> Vec<PersonSeries> {
    pivot_per_person(&stats.weekday_chats, &WEEKDAY_NAMES)
}

/// Per-participant hour-of-day counts, 24-wide, `"00"`..`"23"`.
pub fn hourly_per_person(stats: &ChatStatistics) -> Vec<PersonSeries> {
    pivot_per_person(&stats.hourly_chats, &HOUR_LABELS)
}

/// Pivot `buckets` into one fixed-length row per participant, aligned to
/// the canonical `axis` order. A participant appears as soon as any bucket
/// mentions them, zero-filled everywhere else.
fn pivot_per_person(buckets: &IndexMap<String, BucketStats>, axis: &[&str]) -> Vec<PersonSeries> {
    let mut rows: IndexMap<String, Vec<u64>> = IndexMap::new();
    for (index, label) in axis.iter().enumerate() {
        if let Some(bucket) = buckets.get(*label) {
            for (person, count) in &bucket.by_person {
                rows.entry(person.clone())
                    .or_insert_with(|| vec![0; axis.len()])[index] = *count;
            }
        }
    }
    rows.into_iter()
        .map(|(name, data)| PersonSeries { name, data })
        .collect()
}

// ── Totals series ─────────────────────────────────────────────────────────────

/// Weekday bucket totals in canonical order; zero where no bucket exists.
pub fn weekday_totals(stats: &ChatStatistics) -> Vec<u64> {
    axis_totals(&stats.weekday_chats, &WEEKDAY_NAMES)
}

/// Hour-of-day bucket totals in canonical order; zero where no bucket exists.
pub fn hourly_totals(stats: &ChatStatistics) -> Vec<u64> {
    axis_totals(&stats.hourly_chats, &HOUR_LABELS)
}

fn axis_totals(buckets: &IndexMap<String, BucketStats>, axis: &[&str]) -> Vec<u64> {
    axis.iter()
        .map(|label| buckets.get(*label).map(|b| b.total).unwrap_or(0))
        .collect()
}

/// One point per date bucket, in the buckets' insertion order.
pub fn daily_totals(stats: &ChatStatistics) -> Vec<TimePoint> {
    stats
        .daily_chats
        .iter()
        .map(|(label, bucket)| {
            let (yy, mm, dd) = time_utils::parse_date_label(label);
            TimePoint {
                x: time_utils::unix_millis(yy, mm, dd),
                y: bucket.total,
            }
        })
        .collect()
}

/// [`daily_totals`] with an explicit chronological sort.
pub fn daily_totals_sorted(stats: &ChatStatistics) -> Vec<TimePoint> {
    let mut points = daily_totals(stats);
    points.sort_by_key(|p| p.x);
    points
}

// ── Tests ─────────────────────────────────────────────────────────────────────
