//! Transcript parser for the bracketed 24-hour WhatsApp export format.
//!
//! Turns raw export text into a sequence of [`Message`]s: one per header
//! line (`[dd/mm/yy, hh.mm.ss] Sender: body`), with continuation lines
//! joined into the preceding message's body. The parser is total: malformed
//! lines are never an error, they simply become continuations.

use lens_core::models::{Message, MessageKind, Timestamp, ENCRYPTION_NOTICE};
use regex::Regex;
use tracing::debug;

/// Matches a message header line. The sender capture is non-greedy, so a
/// name may contain a bare `:` but never the `": "` delimiter itself.
const HEADER_PATTERN: &str =
    r"^\[(\d{2})/(\d{2})/(\d{2}), (\d{2})\.(\d{2})\.(\d{2})\] (.*?): (.*)$";

/// Left-to-right mark the exporter inserts before certain tokens.
const LEFT_TO_RIGHT_MARK: char = '\u{200E}';

// ── ParseSummary ──────────────────────────────────────────────────────────────

/// Counters and group-detection facts gathered during one parse run.
#[derive(Debug, Clone, Default)]
pub struct ParseSummary {
    /// Number of input lines scanned.
    pub lines_scanned: usize,
    /// Number of header lines matched.
    pub headers_seen: usize,
    /// Number of messages emitted after the drop rules.
    pub messages_emitted: usize,
    /// Messages dropped because they belong to the ignored participant.
    pub dropped_ignored: usize,
    /// Messages dropped because their body is the encryption system notice.
    pub dropped_notice: usize,
    /// Whether more than two distinct senders were observed.
    pub is_group_chat: bool,
    /// First-seen sender of a group chat, excluded from all statistics.
    pub ignored_participant: Option<String>,
}

// ── TranscriptParser ──────────────────────────────────────────────────────────

/// Single-pass line scanner over an in-memory transcript.
pub struct TranscriptParser {
    header: Regex,
}

/// A message whose continuation lines are still being collected.
struct PendingMessage {
    timestamp: Timestamp,
    sender: String,
    body: String,
}

impl TranscriptParser {
    pub fn new() -> Self {
        Self {
            header: Regex::new(HEADER_PATTERN).expect("header pattern is valid"),
        }
    }

    /// Parse `text` into the finalized message sequence.
    ///
    /// Deterministic and total; see [`TranscriptParser::parse_with_summary`]
    /// for the variant that also reports drop counters.
    pub fn parse(&self, text: &str) -> Vec<Message> {
        self.parse_with_summary(text).0
    }

    /// Parse `text`, returning the messages plus a [`ParseSummary`].
    ///
    /// The algorithm:
    /// 1. Split on line feeds; strip the left-to-right mark before matching.
    /// 2. Group-detection pre-pass: record distinct header senders in
    ///    first-seen order. More than two distinct senders makes this a
    ///    group chat, and the very first sender becomes the ignored
    ///    participant (exported group logs open with a system account).
    /// 3. Scan lines; a header finalizes the in-progress message and seeds a
    ///    new one from the text after the first `:`. Any other line is a
    ///    continuation, appended trimmed with a trailing space.
    /// 4. Finalization drops messages from the ignored participant and
    ///    messages whose trimmed body is the encryption notice.
    pub fn parse_with_summary(&self, text: &str) -> (Vec<Message>, ParseSummary) {
        let lines: Vec<String> = text
            .split('\n')
            .map(|line| line.replace(LEFT_TO_RIGHT_MARK, ""))
            .collect();

        let mut summary = ParseSummary {
            lines_scanned: lines.len(),
            ..Default::default()
        };

        let ignored = self.detect_ignored_participant(&lines, &mut summary);

        let mut messages: Vec<Message> = Vec::new();
        let mut current: Option<PendingMessage> = None;

        for line in &lines {
            if let Some(caps) = self.header.captures(line) {
                summary.headers_seen += 1;
                if let Some(pending) = current.take() {
                    Self::finalize(pending, ignored.as_deref(), &mut messages, &mut summary);
                }

                let timestamp = Timestamp::new(
                    two_digits(&caps[1]),
                    two_digits(&caps[2]),
                    two_digits(&caps[3]),
                    two_digits(&caps[4]),
                    two_digits(&caps[5]),
                    two_digits(&caps[6]),
                );
                let sender = caps[7].to_string();
                // Seed the body from everything after the first colon in the
                // line, which is the sender delimiter (the timestamp uses
                // dots, not colons).
                let seed = match line.find(':') {
                    Some(idx) => line[idx + 1..].trim(),
                    None => "",
                };
                current = Some(PendingMessage {
                    timestamp,
                    sender,
                    body: format!("{} ", seed),
                });
            } else if let Some(pending) = current.as_mut() {
                pending.body.push_str(line.trim());
                pending.body.push(' ');
            }
            // Continuations before the first header have nothing to attach
            // to and are discarded.
        }

        if let Some(pending) = current.take() {
            Self::finalize(pending, ignored.as_deref(), &mut messages, &mut summary);
        }

        summary.messages_emitted = messages.len();
        debug!(
            "parsed {} messages from {} lines ({} headers, {} ignored, {} notices)",
            messages.len(),
            summary.lines_scanned,
            summary.headers_seen,
            summary.dropped_ignored,
            summary.dropped_notice,
        );

        (messages, summary)
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    /// Group-detection pre-pass over all header lines.
    ///
    /// Returns the ignored participant when the transcript has more than two
    /// distinct senders; the first-seen sender is the one dropped.
    fn detect_ignored_participant(
        &self,
        lines: &[String],
        summary: &mut ParseSummary,
    ) -> Option<String> {
        let mut first_seen: Vec<String> = Vec::new();
        for line in lines {
            if let Some(caps) = self.header.captures(line) {
                let sender = &caps[7];
                if !first_seen.iter().any(|s| s == sender) {
                    first_seen.push(sender.to_string());
                }
            }
        }

        if first_seen.len() > 2 {
            summary.is_group_chat = true;
            let ignored = first_seen[0].clone();
            debug!(
                "group chat detected ({} senders); ignoring first-seen participant \"{}\"",
                first_seen.len(),
                ignored
            );
            summary.ignored_participant = Some(ignored.clone());
            Some(ignored)
        } else {
            None
        }
    }

    /// Emit a pending message unless a drop rule applies.
    fn finalize(
        pending: PendingMessage,
        ignored: Option<&str>,
        messages: &mut Vec<Message>,
        summary: &mut ParseSummary,
    ) {
        if pending.body.trim() == ENCRYPTION_NOTICE {
            summary.dropped_notice += 1;
            return;
        }
        if let Some(ignored) = ignored {
            if pending.sender.trim() == ignored.trim() {
                summary.dropped_ignored += 1;
                return;
            }
        }

        let kind = MessageKind::classify(&pending.body);
        messages.push(Message {
            timestamp: pending.timestamp,
            sender: pending.sender,
            body: pending.body,
            kind,
        });
    }
}

impl Default for TranscriptParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a two-digit capture group.
fn two_digits(s: &str) -> u32 {
    s.parse().expect("capture is two ASCII digits")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
