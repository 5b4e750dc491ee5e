use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::time_utils::{self, WEEKDAY_NAMES};

/// System notice WhatsApp injects at the top of every exported chat.
/// Messages whose body equals this string are discarded by the parser.
pub const ENCRYPTION_NOTICE: &str = "Messages and calls are end-to-end encrypted. \
No one outside of this chat, not even WhatsApp, can read or listen to them.";

/// Placeholder body emitted by the exporter in place of an image.
pub const IMAGE_OMITTED: &str = "image omitted";
/// Placeholder body emitted by the exporter in place of a video.
pub const VIDEO_OMITTED: &str = "video omitted";
/// Placeholder body emitted by the exporter in place of a sticker.
pub const STICKER_OMITTED: &str = "sticker omitted";

// ── MessageKind ───────────────────────────────────────────────────────────────

/// Content classification of a single chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Image,
    Video,
    Sticker,
    Text,
}

impl MessageKind {
    /// Classify a message body by exact equality with the exporter's
    /// media placeholders. The body is trimmed before comparison; anything
    /// that is not a known placeholder is text.
    pub fn classify(body: &str) -> Self {
        match body.trim() {
            IMAGE_OMITTED => MessageKind::Image,
            VIDEO_OMITTED => MessageKind::Video,
            STICKER_OMITTED => MessageKind::Sticker,
            _ => MessageKind::Text,
        }
    }
}

// ── Timestamp ─────────────────────────────────────────────────────────────────

/// The bracketed timestamp of a message header, kept as the raw two-digit
/// fields from the transcript (`[dd/mm/yy, hh.mm.ss]`).
///
/// The fields are deliberately not validated against the calendar: the
/// exporter writes them, and downstream derivation tolerates any two-digit
/// values (see [`time_utils::rolled_date`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    pub day: u32,
    pub month: u32,
    pub year: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl Timestamp {
    pub fn new(day: u32, month: u32, year: u32, hour: u32, minute: u32, second: u32) -> Self {
        Self {
            day,
            month,
            year,
            hour,
            minute,
            second,
        }
    }

    /// Date bucket key, exactly as written in the transcript: `"dd/mm/yy"`.
    pub fn date_key(&self) -> String {
        format!("{:02}/{:02}/{:02}", self.day, self.month, self.year)
    }

    /// Hour bucket key: the two-digit hour, `"00"`..`"23"`.
    pub fn hour_key(&self) -> String {
        format!("{:02}", self.hour)
    }

    /// English weekday name of the message's calendar date (year `2000 + yy`).
    pub fn weekday_name(&self) -> &'static str {
        time_utils::weekday_name(self.year, self.month, self.day)
    }

    /// Epoch milliseconds of local-time midnight of the message's date,
    /// used for chronological chart ordering.
    pub fn unix_millis(&self) -> i64 {
        time_utils::unix_millis(self.year, self.month, self.day)
    }
}

// ── Message ───────────────────────────────────────────────────────────────────

/// One logical chat entry: a header line plus any continuation lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Parsed header timestamp.
    pub timestamp: Timestamp,
    /// Sender display name, verbatim from the header.
    pub sender: String,
    /// Full body. Continuation lines are joined with single spaces and the
    /// joiner leaves one trailing space on the body.
    pub body: String,
    /// Content classification of the trimmed body.
    pub kind: MessageKind,
}

impl Message {
    /// Number of whitespace-separated words in the body.
    pub fn word_count(&self) -> u64 {
        self.body.split_whitespace().count() as u64
    }
}

// ── ParticipantStats ──────────────────────────────────────────────────────────

/// Per-participant accumulator, keyed by sender name in [`ChatStatistics`].
///
/// Invariant: `total_chats == total_images + total_videos + total_stickers
/// + total_texts`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantStats {
    pub total_chats: u64,
    pub total_words: u64,
    pub total_images: u64,
    pub total_videos: u64,
    pub total_stickers: u64,
    pub total_texts: u64,
    /// Highest-value flags, derived only after the tally pass completes.
    /// Ties are not broken; several participants may hold a flag at once.
    #[serde(default)]
    pub is_highest_chats: bool,
    #[serde(default)]
    pub is_highest_words: bool,
    #[serde(default)]
    pub is_highest_images: bool,
    #[serde(default)]
    pub is_highest_videos: bool,
    #[serde(default)]
    pub is_highest_stickers: bool,
    #[serde(default)]
    pub is_highest_texts: bool,
}

// ── BucketStats ───────────────────────────────────────────────────────────────

/// Tally for one aggregation bucket (a date, an hour-of-day, or a weekday).
///
/// Invariant: `total == sum(by_person.values())`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketStats {
    pub total: u64,
    /// Per-sender counts within this bucket, in first-seen order.
    pub by_person: IndexMap<String, u64>,
}

// ── ChatStatistics ────────────────────────────────────────────────────────────

/// Aggregate root produced by one analysis run.
///
/// `daily_chats` and `hourly_chats` buckets are created lazily in
/// first-seen order; `weekday_chats` is pre-seeded with all seven weekday
/// names (Monday..Sunday) so the canonical order is fixed even for empty
/// input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatStatistics {
    /// Count of all messages that survived parsing.
    pub total_chats: u64,
    /// Word count across all text-kind messages.
    pub total_words: u64,
    /// Per-participant accumulators, in first-seen order.
    pub persons: IndexMap<String, ParticipantStats>,
    pub daily_chats: IndexMap<String, BucketStats>,
    pub hourly_chats: IndexMap<String, BucketStats>,
    pub weekday_chats: IndexMap<String, BucketStats>,
}

impl ChatStatistics {
    pub fn new() -> Self {
        let mut weekday_chats = IndexMap::with_capacity(WEEKDAY_NAMES.len());
        for name in WEEKDAY_NAMES {
            weekday_chats.insert(name.to_string(), BucketStats::default());
        }
        Self {
            total_chats: 0,
            total_words: 0,
            persons: IndexMap::new(),
            daily_chats: IndexMap::new(),
            hourly_chats: IndexMap::new(),
            weekday_chats,
        }
    }
}

impl Default for ChatStatistics {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── MessageKind ───────────────────────────────────────────────────────────

    #[test]
    fn test_classify_image() {
        assert_eq!(MessageKind::classify("image omitted"), MessageKind::Image);
    }

    #[test]
    fn test_classify_video() {
        assert_eq!(MessageKind::classify("video omitted"), MessageKind::Video);
    }

    #[test]
    fn test_classify_sticker() {
        assert_eq!(
            MessageKind::classify("sticker omitted"),
            MessageKind::Sticker
        );
    }

    #[test]
    fn test_classify_trims_before_comparing() {
        assert_eq!(MessageKind::classify("image omitted "), MessageKind::Image);
        assert_eq!(MessageKind::classify("  video omitted"), MessageKind::Video);
    }

    #[test]
    fn test_classify_text() {
        assert_eq!(MessageKind::classify("hello there"), MessageKind::Text);
        // Near-misses are text, not media.
        assert_eq!(MessageKind::classify("image omitted!"), MessageKind::Text);
        assert_eq!(MessageKind::classify("Image omitted"), MessageKind::Text);
    }

    // ── Timestamp ─────────────────────────────────────────────────────────────

    #[test]
    fn test_timestamp_date_key_zero_padded() {
        let ts = Timestamp::new(5, 1, 24, 9, 0, 0);
        assert_eq!(ts.date_key(), "05/01/24");
    }

    #[test]
    fn test_timestamp_hour_key() {
        let ts = Timestamp::new(25, 12, 24, 7, 30, 0);
        assert_eq!(ts.hour_key(), "07");
        let ts = Timestamp::new(25, 12, 24, 14, 30, 0);
        assert_eq!(ts.hour_key(), "14");
    }

    #[test]
    fn test_timestamp_weekday() {
        // 01/01/22 is a Saturday.
        let ts = Timestamp::new(1, 1, 22, 0, 0, 0);
        assert_eq!(ts.weekday_name(), "Saturday");
    }

    // ── Message ───────────────────────────────────────────────────────────────

    #[test]
    fn test_message_word_count_ignores_trailing_space() {
        let msg = Message {
            timestamp: Timestamp::new(1, 1, 24, 10, 0, 0),
            sender: "Alice".to_string(),
            body: "line one line two ".to_string(),
            kind: MessageKind::Text,
        };
        assert_eq!(msg.word_count(), 4);
    }

    #[test]
    fn test_message_word_count_empty_body() {
        let msg = Message {
            timestamp: Timestamp::new(1, 1, 24, 10, 0, 0),
            sender: "Alice".to_string(),
            body: " ".to_string(),
            kind: MessageKind::Text,
        };
        assert_eq!(msg.word_count(), 0);
    }

    // ── ChatStatistics ────────────────────────────────────────────────────────

    #[test]
    fn test_new_statistics_preseeds_weekdays_in_order() {
        let stats = ChatStatistics::new();
        let keys: Vec<&str> = stats.weekday_chats.keys().map(|k| k.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
                "Sunday"
            ]
        );
        assert!(stats.weekday_chats.values().all(|b| b.total == 0));
    }

    #[test]
    fn test_statistics_serialize_camel_case() {
        let stats = ChatStatistics::new();
        let json = serde_json::to_value(&stats).unwrap();
        assert!(json.get("totalChats").is_some());
        assert!(json.get("weekdayChats").is_some());
        assert!(json.get("persons").is_some());
    }

    #[test]
    fn test_participant_stats_serialize_flags() {
        let stats = ParticipantStats {
            total_chats: 3,
            is_highest_chats: true,
            ..Default::default()
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["totalChats"], 3);
        assert_eq!(json["isHighestChats"], true);
    }
}
