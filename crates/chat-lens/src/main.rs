mod bootstrap;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use lens_core::formatting::{format_count, percentage};
use lens_core::models::ChatStatistics;
use lens_core::time_utils::{self, HOUR_LABELS, WEEKDAY_NAMES};
use lens_data::analysis::{analyze, ChatReport};
use lens_data::extract::load_transcript;

/// Statistics for exported WhatsApp chat transcripts.
#[derive(Debug, Parser)]
#[command(name = "chat-lens", version, about)]
struct Cli {
    /// Path to a .txt transcript or a .zip export archive containing one.
    path: PathBuf,

    /// Emit the full report as JSON instead of tables.
    #[arg(long)]
    json: bool,

    /// Print the per-day series in chronological order instead of
    /// first-seen-in-transcript order.
    #[arg(long)]
    sort_daily: bool,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "warn", env = "CHAT_LENS_LOG")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    bootstrap::setup_logging(&cli.log_level)?;
    tracing::info!("chat-lens v{} starting", env!("CARGO_PKG_VERSION"));

    let text = load_transcript(&cli.path)?;
    let report = analyze(&text);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_summary(&report);
    print_participants(&report.stats);
    print_axis_table("Chats by weekday", &WEEKDAY_NAMES, &report.charts.weekday_totals);
    print_axis_table("Chats by hour", &HOUR_LABELS, &report.charts.hourly_totals);
    print_days(&report.stats, cli.sort_daily);

    Ok(())
}

// ── Rendering ─────────────────────────────────────────────────────────────────

fn print_summary(report: &ChatReport) {
    println!("Total chats: {}", format_count(report.stats.total_chats));
    println!("Total words: {}", format_count(report.stats.total_words));
    if report.metadata.is_group_chat {
        if let Some(ignored) = &report.metadata.ignored_participant {
            println!(
                "Group chat: messages from \"{}\" (first-seen sender) were excluded",
                ignored
            );
        }
    }
    println!();
}

fn print_participants(stats: &ChatStatistics) {
    if stats.persons.is_empty() {
        println!("No messages found.");
        return;
    }

    let name_width = stats
        .persons
        .keys()
        .map(|name| name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    println!(
        "{:<name_width$}  {:>10}  {:>10}  {:>8}  {:>8}  {:>8}  {:>9}  {:>6}",
        "Name", "Chats", "Words", "Texts", "Images", "Videos", "Stickers", "Share"
    );
    for (name, person) in &stats.persons {
        println!(
            "{:<name_width$}  {:>10}  {:>10}  {:>8}  {:>8}  {:>8}  {:>9}  {:>5.1}%",
            name,
            cell(person.total_chats, person.is_highest_chats),
            cell(person.total_words, person.is_highest_words),
            cell(person.total_texts, person.is_highest_texts),
            cell(person.total_images, person.is_highest_images),
            cell(person.total_videos, person.is_highest_videos),
            cell(person.total_stickers, person.is_highest_stickers),
            percentage(person.total_chats as f64, stats.total_chats as f64, 1),
        );
    }
    println!();
}

/// Render one counter cell, starring the highest holder(s) of the metric.
///
/// An all-zero metric flags every participant, so the star is shown only
/// for positive values; that gate belongs to this layer, the flags
/// themselves are left untouched.
fn cell(value: u64, is_highest: bool) -> String {
    if is_highest && value > 0 {
        format!("{}*", format_count(value))
    } else {
        format_count(value)
    }
}

fn print_axis_table(title: &str, labels: &[&str], totals: &[u64]) {
    println!("{}", title);
    for (label, total) in labels.iter().zip(totals) {
        println!("  {:<9}  {:>10}", label, format_count(*total));
    }
    println!();
}

fn print_days(stats: &ChatStatistics, sort: bool) {
    if stats.daily_chats.is_empty() {
        return;
    }

    let mut rows: Vec<(&str, u64, i64)> = stats
        .daily_chats
        .iter()
        .map(|(label, bucket)| {
            let (yy, mm, dd) = time_utils::parse_date_label(label);
            (label.as_str(), bucket.total, time_utils::unix_millis(yy, mm, dd))
        })
        .collect();
    if sort {
        rows.sort_by_key(|&(_, _, millis)| millis);
    }

    println!("Chats by day");
    for (label, total, _) in rows {
        println!("  {:<9}  {:>10}", label, format_count(total));
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
