//! Property-based tests for chatstats.
//!
//! These tests generate random exports to check the counting invariants
//! that hold between pipeline stages.

use proptest::prelude::*;

use chatstats::core::{ContentKind, aggregate, extract_by_kind, timeline};
use chatstats::models::{ChatExport, MediaRef, Message, Reaction};
use chatstats::parsing::parse_export;

// 2001-09-09 .. 2033-05-18, well inside chrono's range
const MIN_MS: i64 = 1_000_000_000_000;
const MAX_MS: i64 = 2_000_000_000_000;

fn arb_media(prefix: &'static str) -> impl Strategy<Value = Vec<MediaRef>> {
    prop::collection::vec(0u32..1000, 0..4).prop_map(move |ids| {
        ids.into_iter()
            .map(|id| MediaRef::new(format!("{}/{}.bin", prefix, id)))
            .collect()
    })
}

/// Generate a random Message from fixed pools
fn arb_message() -> impl Strategy<Value = Message> {
    (
        prop::sample::select(vec!["Alice", "Bob", "Charlie", "Иван", "🔥", ""]),
        MIN_MS..MAX_MS,
        prop::option::of(prop::sample::select(vec![
            "Hello",
            "",
            "   ",
            "Special;chars\"here\nnewline",
            "🎉🔥💀 emoji",
        ])),
        arb_media("photos"),
        arb_media("videos"),
        arb_media("audio"),
        0usize..3,
    )
        .prop_map(|(sender, ts, content, photos, videos, audio, reactions)| {
            let mut msg = Message::new(sender, ts);
            if let Some(text) = content {
                msg = msg.with_content(text);
            }
            for photo in photos {
                msg = msg.with_photo(photo);
            }
            for video in videos {
                msg = msg.with_video(video);
            }
            for clip in audio {
                msg = msg.with_audio(clip);
            }
            for _ in 0..reactions {
                msg = msg.with_reaction(Reaction::new("❤️", "Alice"));
            }
            msg
        })
}

fn arb_export() -> impl Strategy<Value = ChatExport> {
    (
        prop::collection::vec(arb_message(), 0..40),
        prop::collection::vec(prop::sample::select(vec!["Alice", "Bob", "Charlie"]), 0..4),
    )
        .prop_map(|(messages, participants)| {
            let mut export = ChatExport::new("prop");
            for name in participants {
                export = export.with_participant(name);
            }
            export.messages = messages;
            export
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================
    // STATISTICS PROPERTIES
    // ============================================

    /// Aggregating twice yields identical results
    #[test]
    fn aggregate_is_idempotent(export in arb_export()) {
        prop_assert_eq!(aggregate(&export), aggregate(&export));
    }

    /// Every message is credited to exactly one sender
    #[test]
    fn sender_counts_sum_to_message_count(export in arb_export()) {
        let stats = aggregate(&export);
        let total: usize = stats.top_senders.iter().map(|s| s.count).sum();
        prop_assert_eq!(total, stats.message_count);
        prop_assert_eq!(stats.message_count, export.messages.len());
    }

    /// Media tallies equal the per-message list lengths
    #[test]
    fn media_counts_are_conserved(export in arb_export()) {
        let stats = aggregate(&export);
        let photos: usize = export.messages.iter().map(|m| m.photos().len()).sum();
        let videos: usize = export.messages.iter().map(|m| m.videos().len()).sum();
        let audio: usize = export.messages.iter().map(|m| m.audio_files().len()).sum();
        prop_assert_eq!(stats.media_count.photos, photos);
        prop_assert_eq!(stats.media_count.videos, videos);
        prop_assert_eq!(stats.media_count.audio, audio);
    }

    /// First date never follows last date
    #[test]
    fn first_date_not_after_last(export in arb_export()) {
        let stats = aggregate(&export);
        if stats.message_count > 0 {
            let first = stats.first_message_date.unwrap();
            let last = stats.last_message_date.unwrap();
            prop_assert!(first <= last);
        } else {
            prop_assert!(stats.first_message_date.is_none());
        }
    }

    /// Ranking is descending by count
    #[test]
    fn top_senders_descending(export in arb_export()) {
        let stats = aggregate(&export);
        for pair in stats.top_senders.windows(2) {
            prop_assert!(pair[0].count >= pair[1].count);
        }
    }

    // ============================================
    // TIMELINE PROPERTIES
    // ============================================

    /// Buckets cover every message exactly once
    #[test]
    fn timeline_covers_all_messages(export in arb_export()) {
        let buckets = timeline(&export).unwrap();
        let total: usize = buckets.iter().map(|b| b.message_count).sum();
        prop_assert_eq!(total, export.messages.len());
    }

    /// Periods are strictly ascending and never empty
    #[test]
    fn timeline_periods_ascending(export in arb_export()) {
        let buckets = timeline(&export).unwrap();
        for pair in buckets.windows(2) {
            prop_assert!(pair[0].period < pair[1].period);
        }
        prop_assert!(buckets.iter().all(|b| b.message_count > 0 && b.period.len() == 7));
    }

    // ============================================
    // EXTRACTOR PROPERTIES
    // ============================================

    /// One photo record per photo
    #[test]
    fn photo_records_match_photo_count(export in arb_export()) {
        let stats = aggregate(&export);
        prop_assert_eq!(
            extract_by_kind(&export, ContentKind::Photos).len(),
            stats.media_count.photos
        );
        prop_assert_eq!(
            extract_by_kind(&export, ContentKind::Audio).len(),
            stats.media_count.audio
        );
    }

    /// Records are sorted newest first
    #[test]
    fn extracted_records_descending(export in arb_export()) {
        for kind in [ContentKind::Text, ContentKind::Photos, ContentKind::Videos] {
            let records = extract_by_kind(&export, kind);
            for pair in records.windows(2) {
                prop_assert!(pair[0].timestamp >= pair[1].timestamp);
            }
        }
    }

    /// Text records never carry empty content
    #[test]
    fn text_records_non_empty(export in arb_export()) {
        let records = extract_by_kind(&export, ContentKind::Text);
        prop_assert!(records.iter().all(|r| !r.content.as_display().is_empty()));
    }

    // ============================================
    // VALIDATION PROPERTIES
    // ============================================

    /// Serialized exports validate back to the same document
    #[test]
    fn serialized_export_validates(export in arb_export()) {
        let json = serde_json::to_string(&export).unwrap();
        let parsed = parse_export(&json).unwrap();
        prop_assert_eq!(parsed, export);
    }

    /// Arbitrary text never panics the validator
    #[test]
    fn validator_never_panics(text in "\\PC{0,64}") {
        let _ = parse_export(&text);
    }
}
