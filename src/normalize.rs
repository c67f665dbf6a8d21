/// Maximum transcript length forwarded to the summarization service.
pub const TRANSCRIPT_CHAR_CAP: usize = 15_000;

/// Literal suffix appended when the transcript is cut at the cap.
pub const TRUNCATION_MARKER: &str = "... [Truncated]";

/// Enforce the transcript length cap before summarization.
///
/// Text at or under `cap` characters passes through unchanged. Longer text is
/// cut to exactly `cap` characters and the truncation marker is appended. The
/// cut lands on a character boundary, never on a sentence or cue boundary.
pub fn truncate_transcript(text: &str, cap: usize) -> String {
    if text.chars().count() <= cap {
        return text.to_string();
    }

    let mut out: String = text.chars().take(cap).collect();
    out.push_str(TRUNCATION_MARKER);
    out
}
