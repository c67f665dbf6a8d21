use std::collections::BTreeMap;

use serde::Deserialize;

/// General video metadata, restricted to the caption-bearing fields.
///
/// Matches the shape of a yt-dlp info dump: per-language lists of candidate
/// source locations, ordered by preference (first = most preferred). Either
/// map may be absent upstream; both default to empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoMetadata {
    #[serde(default)]
    pub subtitles: BTreeMap<String, Vec<CaptionLocation>>,
    #[serde(default)]
    pub automatic_captions: BTreeMap<String, Vec<CaptionLocation>>,
}

/// One candidate source location for a caption track.
#[derive(Debug, Clone, Deserialize)]
pub struct CaptionLocation {
    pub url: String,
    #[serde(default)]
    pub ext: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_metadata_with_both_maps() {
        let json = r#"{
            "id": "abc123",
            "title": "Some video",
            "subtitles": {
                "en": [
                    {"url": "https://example.com/manual.json3", "ext": "json3"},
                    {"url": "https://example.com/manual.vtt", "ext": "vtt"}
                ]
            },
            "automatic_captions": {
                "en": [{"url": "https://example.com/auto.vtt", "ext": "vtt"}]
            }
        }"#;

        let meta: VideoMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(meta.subtitles["en"].len(), 2);
        assert_eq!(meta.subtitles["en"][0].url, "https://example.com/manual.json3");
        assert_eq!(meta.automatic_captions["en"].len(), 1);
    }

    #[test]
    fn test_missing_caption_fields_default_to_empty() {
        let meta: VideoMetadata = serde_json::from_str(r#"{"id": "abc123"}"#).unwrap();
        assert!(meta.subtitles.is_empty());
        assert!(meta.automatic_captions.is_empty());
    }
}
