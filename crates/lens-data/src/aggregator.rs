//! Statistics aggregation over the finalized message sequence.
//!
//! Two passes over fresh accumulators: a single tally pass over the
//! messages, then a flag-derivation pass over the completed participant
//! records. The derivation must only ever see fully tallied counters.

use indexmap::IndexMap;
use lens_core::models::{BucketStats, ChatStatistics, Message, MessageKind, ParticipantStats};
use tracing::debug;

/// Stateless helper that folds messages into a [`ChatStatistics`].
pub struct StatsAggregator;

impl StatsAggregator {
    /// Aggregate a finalized message sequence (the parser's drop rules have
    /// already been applied). Deterministic; the empty sequence yields all
    /// zeros with the seven pre-seeded weekday buckets.
    pub fn aggregate(messages: &[Message]) -> ChatStatistics {
        let mut stats = ChatStatistics::new();
        for message in messages {
            Self::tally(&mut stats, message);
        }
        Self::derive_highest_flags(&mut stats);

        debug!(
            "aggregated {} messages across {} participants and {} dates",
            stats.total_chats,
            stats.persons.len(),
            stats.daily_chats.len()
        );
        stats
    }

    /// Mark, for each of the six metrics independently, every participant
    /// holding the maximum value. Ties are not broken, and an all-zero
    /// metric flags everyone (the maximum starts from zero); callers that
    /// display the flags gate them on `value > 0`.
    ///
    /// Pure function of the current counters, so re-running it is a no-op.
    pub fn derive_highest_flags(stats: &mut ChatStatistics) {
        let mut max = ParticipantStats::default();
        for person in stats.persons.values() {
            max.total_chats = max.total_chats.max(person.total_chats);
            max.total_words = max.total_words.max(person.total_words);
            max.total_images = max.total_images.max(person.total_images);
            max.total_videos = max.total_videos.max(person.total_videos);
            max.total_stickers = max.total_stickers.max(person.total_stickers);
            max.total_texts = max.total_texts.max(person.total_texts);
        }
        for person in stats.persons.values_mut() {
            person.is_highest_chats = person.total_chats == max.total_chats;
            person.is_highest_words = person.total_words == max.total_words;
            person.is_highest_images = person.total_images == max.total_images;
            person.is_highest_videos = person.total_videos == max.total_videos;
            person.is_highest_stickers = person.total_stickers == max.total_stickers;
            person.is_highest_texts = person.total_texts == max.total_texts;
        }
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    /// Fold one message into the accumulators.
    fn tally(stats: &mut ChatStatistics, message: &Message) {
        let words = message.word_count();

        stats.total_chats += 1;
        if message.kind == MessageKind::Text {
            stats.total_words += words;
        }

        let person = stats.persons.entry(message.sender.clone()).or_default();
        match message.kind {
            MessageKind::Image => person.total_images += 1,
            MessageKind::Video => person.total_videos += 1,
            MessageKind::Sticker => person.total_stickers += 1,
            MessageKind::Text => {
                person.total_texts += 1;
                person.total_words += words;
            }
        }
        person.total_chats += 1;

        Self::bump(
            &mut stats.daily_chats,
            message.timestamp.date_key(),
            &message.sender,
        );
        Self::bump(
            &mut stats.hourly_chats,
            message.timestamp.hour_key(),
            &message.sender,
        );
        Self::bump(
            &mut stats.weekday_chats,
            message.timestamp.weekday_name().to_string(),
            &message.sender,
        );
    }

    /// Increment one bucket's total and per-sender count, creating the
    /// bucket on first sight (weekday buckets always pre-exist).
    fn bump(buckets: &mut IndexMap<String, BucketStats>, key: String, sender: &str) {
        let bucket = buckets.entry(key).or_default();
        bucket.total += 1;
        *bucket.by_person.entry(sender.to_string()).or_insert(0) += 1;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
