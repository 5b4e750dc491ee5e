//! Top-level analysis pipeline for chat-lens.
//!
//! Orchestrates parsing, aggregation and chart derivation, returning a
//! [`ChatReport`] ready for the presentation layer. Stateless: every call
//! works on fresh accumulators and nothing survives the invocation.

use chrono::Utc;
use lens_core::models::ChatStatistics;
use serde::{Deserialize, Serialize};

use crate::aggregator::StatsAggregator;
use crate::charts::ChartData;
use crate::parser::TranscriptParser;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the analysis result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMetadata {
    /// ISO-8601 timestamp when this report was generated.
    pub generated_at: String,
    /// Number of transcript lines scanned.
    pub lines_scanned: usize,
    /// Number of messages that survived the drop rules.
    pub messages_emitted: usize,
    /// Number of messages dropped (ignored participant + system notices).
    pub messages_dropped: usize,
    /// Whether the transcript was analysed as a group chat.
    pub is_group_chat: bool,
    /// The excluded first-seen sender, when the transcript is a group chat.
    pub ignored_participant: Option<String>,
    /// Wall-clock seconds spent parsing.
    pub parse_time_seconds: f64,
    /// Wall-clock seconds spent aggregating and deriving charts.
    pub aggregate_time_seconds: f64,
}

/// The complete output of [`analyze`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReport {
    /// Aggregated statistics (totals, participants, bucketed tallies).
    pub stats: ChatStatistics,
    /// Chart-ready derived series.
    pub charts: ChartData,
    /// Metadata about this analysis run.
    pub metadata: AnalysisMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full analysis pipeline over an in-memory transcript.
///
/// 1. Parse the text into the finalized message sequence.
/// 2. Aggregate totals, participant counters and bucketed tallies, then
///    derive the highest-value flags.
/// 3. Derive the chart series.
///
/// Total over any input, including the empty string.
pub fn analyze(text: &str) -> ChatReport {
    let parse_start = std::time::Instant::now();
    let parser = TranscriptParser::new();
    let (messages, summary) = parser.parse_with_summary(text);
    let parse_time = parse_start.elapsed().as_secs_f64();

    let aggregate_start = std::time::Instant::now();
    let stats = StatsAggregator::aggregate(&messages);
    let charts = ChartData::from_stats(&stats);
    let aggregate_time = aggregate_start.elapsed().as_secs_f64();

    let metadata = AnalysisMetadata {
        generated_at: Utc::now().to_rfc3339(),
        lines_scanned: summary.lines_scanned,
        messages_emitted: summary.messages_emitted,
        messages_dropped: summary.dropped_ignored + summary.dropped_notice,
        is_group_chat: summary.is_group_chat,
        ignored_participant: summary.ignored_participant,
        parse_time_seconds: parse_time,
        aggregate_time_seconds: aggregate_time,
    };

    ChatReport {
        stats,
        charts,
        metadata,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
