use serde::Deserialize;

use crate::models::CaptionItem;

/// Outcome of interpreting a fetched caption payload.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptionPayload {
    /// Structured-segment JSON was recognized and flattened
    Segments(String),
    /// Payload kept verbatim. Timed-text formats land here with their
    /// timestamps and markup intact.
    Raw(String),
}

impl CaptionPayload {
    pub fn into_text(self) -> String {
        match self {
            CaptionPayload::Segments(text) | CaptionPayload::Raw(text) => text,
        }
    }
}

/// Structured-segment caption track: timed events, each holding text segments.
#[derive(Debug, Deserialize)]
struct SegmentedTrack {
    events: Option<Vec<SegmentedEvent>>,
}

#[derive(Debug, Deserialize)]
struct SegmentedEvent {
    #[serde(default, rename = "tStartMs")]
    start_ms: Option<f64>,
    #[serde(default, rename = "dDurationMs")]
    duration_ms: Option<f64>,
    #[serde(default)]
    segs: Option<Vec<TextSegment>>,
}

#[derive(Debug, Deserialize)]
struct TextSegment {
    #[serde(default)]
    utf8: Option<String>,
}

/// Interpret a fetched caption payload.
///
/// Tries the structured-segment JSON shape first; if the body is not JSON or
/// the `events` array is absent, the payload passes through verbatim. This
/// never fails: unrecognized content degrades to `Raw`, it does not error.
pub fn parse_caption_payload(body: &str) -> CaptionPayload {
    let track = match serde_json::from_str::<SegmentedTrack>(body) {
        Ok(track) => track,
        Err(_) => return CaptionPayload::Raw(body.to_string()),
    };

    let Some(events) = track.events else {
        return CaptionPayload::Raw(body.to_string());
    };

    let mut fragments = Vec::new();
    for event in events {
        let Some(segs) = event.segs else { continue };
        for seg in segs {
            if let Some(text) = seg.utf8 {
                fragments.push(text);
            }
        }
    }

    CaptionPayload::Segments(fragments.join(" "))
}

/// View a structured-segment payload as timed caption items, one per event.
///
/// Returns `None` when the body is not a structured-segment track, so callers
/// that need items (rather than flattened text) can classify the failure.
pub fn caption_items_from_segments(body: &str) -> Option<Vec<CaptionItem>> {
    let track = serde_json::from_str::<SegmentedTrack>(body).ok()?;
    let events = track.events?;

    let mut items = Vec::with_capacity(events.len());
    for event in events {
        let Some(segs) = event.segs else { continue };
        let text = segs
            .into_iter()
            .filter_map(|seg| seg.utf8)
            .collect::<Vec<_>>()
            .join(" ");
        let text = text.trim().to_string();
        if text.is_empty() {
            continue;
        }
        items.push(CaptionItem {
            text,
            start: event.start_ms.map(|ms| ms / 1000.0),
            duration: event.duration_ms.map(|ms| ms / 1000.0),
        });
    }

    Some(items)
}

/// Flatten a caption item sequence into raw transcript text: each item's text
/// joined with single spaces, original order preserved.
pub fn join_caption_items(items: &[CaptionItem]) -> String {
    items
        .iter()
        .map(|item| item.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
