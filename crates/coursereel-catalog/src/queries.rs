//! Catalog queries.
//!
//! This module answers the three read operations served by coursereel:
//! listing a module, keyword search, and transcript export. Every query takes
//! an already loaded [`Dataset`] and preserves its row order.

use bytes::Bytes;

use crate::models::{
    Dataset, ModuleTag, TranscriptExport, VideoRecord, VideoSearchResult, VideoSummary,
    MODULE_TAG_PREFIX,
};
use crate::{Error, Result};

/// Number of characters of `key_phrases` shown in a preview.
pub const PREVIEW_CHARS: usize = 200;

/// Appended to previews that were cut short.
pub const PREVIEW_ELLIPSIS: &str = "...";

/// Extension stripped from identifiers when deriving titles.
pub const VIDEO_EXTENSION: &str = ".mp4";

/// Content type of exported transcripts.
pub const TRANSCRIPT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// List the videos of one module.
///
/// A record belongs to module `n` when its identifier starts with the
/// zero-padded tag (`Mod01` for module 1). Module numbers of 100 and above
/// cannot be expressed in a two-digit tag and always yield an empty list.
///
/// # Examples
///
/// ```
/// use coursereel_catalog::{queries, Dataset, VideoRecord};
///
/// let dataset = Dataset::from(vec![
///     VideoRecord::new("Mod01 Intro.mp4", "", "Welcome"),
///     VideoRecord::new("Mod10 Trees.mp4", "", "Decision trees"),
/// ]);
///
/// let module_one = queries::list_by_module(&dataset, 1, "https://cdn/");
/// assert_eq!(module_one.len(), 1);
/// assert_eq!(module_one[0].title, "Intro");
/// ```
pub fn list_by_module(dataset: &Dataset, module: u32, base_url: &str) -> Vec<VideoSummary> {
    let tag = ModuleTag::new(module);
    if !tag.is_addressable() {
        tracing::debug!(module, "Module number exceeds the two-digit tag width");
        return Vec::new();
    }

    let prefix = tag.prefix();
    let videos: Vec<VideoSummary> = dataset
        .iter()
        .filter(|record| record.video.starts_with(&prefix))
        .map(|record| VideoSummary {
            id: record.video.clone(),
            title: derive_title(&record.video, &prefix),
            transcript: transcript_preview(&record.key_phrases),
            url: video_url(base_url, &record.video),
        })
        .collect();

    tracing::debug!(
        module,
        prefix = %prefix,
        found = videos.len(),
        "Listed module videos"
    );
    videos
}

/// Case-insensitive substring search over identifiers and key phrases.
///
/// Blank queries match nothing. The module of each hit is recovered from its
/// identifier; identifiers without a well-formed tag still match, with a
/// best-effort module label.
pub fn search(dataset: &Dataset, query: &str, base_url: &str) -> Vec<VideoSearchResult> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    let videos: Vec<VideoSearchResult> = dataset
        .iter()
        .filter(|record| matches_query(record, &needle))
        .map(|record| {
            let raw_number = ModuleTag::raw_number(&record.video);
            let tag = format!("{MODULE_TAG_PREFIX}{raw_number}");
            VideoSearchResult {
                id: record.video.clone(),
                title: derive_title(&record.video, &tag),
                transcript: transcript_preview(&record.key_phrases),
                url: video_url(base_url, &record.video),
                module: module_label(&record.video),
            }
        })
        .collect();

    tracing::debug!(query, found = videos.len(), "Searched catalog");
    videos
}

/// Exact, case-sensitive lookup by identifier.
pub fn find_by_video_id<'a>(dataset: &'a Dataset, id: &str) -> Result<&'a VideoRecord> {
    dataset
        .iter()
        .find(|record| record.video == id)
        .ok_or_else(|| Error::not_found("video", id))
}

/// Render a video's key phrases as a text attachment named
/// `{id}_transcript.txt`.
pub fn export_transcript(dataset: &Dataset, id: &str) -> Result<TranscriptExport> {
    let record = find_by_video_id(dataset, id)?;
    Ok(TranscriptExport {
        file_name: transcript_file_name(id),
        content_type: TRANSCRIPT_CONTENT_TYPE,
        body: Bytes::from(record.key_phrases.clone()),
    })
}

/// Download name of a transcript export.
pub fn transcript_file_name(id: &str) -> String {
    format!("{id}_transcript.txt")
}

/// Title shown for a video: the identifier without its module tag and
/// `.mp4` extension, trimmed of surrounding whitespace and underscores.
pub fn derive_title(video: &str, tag: &str) -> String {
    video
        .replace(tag, "")
        .replace(VIDEO_EXTENSION, "")
        .trim_matches(|c: char| c.is_whitespace() || c == '_')
        .to_string()
}

/// First [`PREVIEW_CHARS`] characters of `text`, followed by
/// [`PREVIEW_ELLIPSIS`] when anything was cut.
pub fn transcript_preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}{PREVIEW_ELLIPSIS}", &text[..cut]),
        None => text.to_string(),
    }
}

/// Public location of a video in object storage.
pub fn video_url(base_url: &str, video: &str) -> String {
    format!("{base_url}{video}")
}

/// `Module {n}` label for the module a video identifier is tagged with.
///
/// Falls back to the raw tag characters when they are not a number.
pub fn module_label(video: &str) -> String {
    ModuleTag::from_video(video)
        .map(ModuleTag::label)
        .unwrap_or_else(|| format!("Module {}", ModuleTag::raw_number(video)))
}

fn matches_query(record: &VideoRecord, needle: &str) -> bool {
    record.video.to_lowercase().contains(needle)
        || record.key_phrases.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://bucket.example/";

    fn sample_dataset() -> Dataset {
        Dataset::from(vec![
            VideoRecord::new(
                "Mod01_WhatIsML.mp4",
                "Today we talk about supervised learning.",
                "Supervised learning basics",
            ),
            VideoRecord::new("Mod01 Data Prep.mp4", "", "Cleaning and splitting data"),
            VideoRecord::new("Mod02 Regression.mp4", "", "Linear models and loss"),
            VideoRecord::new("Mod10 Ensembles.mp4", "", "Bagging, boosting, SUPERVISED stacking"),
            VideoRecord::new("Bonus.mp4", "", "Extra material"),
        ])
    }

    #[test]
    fn test_list_by_module_filters_prefix() {
        let dataset = sample_dataset();
        let videos = list_by_module(&dataset, 1, BASE);

        let ids: Vec<_> = videos.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, ["Mod01_WhatIsML.mp4", "Mod01 Data Prep.mp4"]);
        assert!(videos.iter().all(|v| v.id.starts_with("Mod01")));
    }

    #[test]
    fn test_list_by_module_derives_fields() {
        let dataset = sample_dataset();
        let videos = list_by_module(&dataset, 1, BASE);

        assert_eq!(videos[0].title, "WhatIsML");
        assert_eq!(videos[0].transcript, "Supervised learning basics");
        assert_eq!(videos[0].url, "https://bucket.example/Mod01_WhatIsML.mp4");
        assert_eq!(videos[1].title, "Data Prep");
    }

    #[test]
    fn test_module_one_and_ten_do_not_collide() {
        let dataset = sample_dataset();
        let ten = list_by_module(&dataset, 10, BASE);
        assert_eq!(ten.len(), 1);
        assert_eq!(ten[0].id, "Mod10 Ensembles.mp4");
        assert!(list_by_module(&dataset, 1, BASE)
            .iter()
            .all(|v| !v.id.starts_with("Mod10")));
    }

    #[test]
    fn test_list_by_module_empty_results() {
        let dataset = sample_dataset();
        assert!(list_by_module(&dataset, 5, BASE).is_empty());
        assert!(list_by_module(&dataset, 0, BASE).is_empty());
        assert!(list_by_module(&Dataset::default(), 1, BASE).is_empty());
    }

    #[test]
    fn test_list_by_module_out_of_range() {
        let dataset = Dataset::from(vec![VideoRecord::new("Mod100 Wide.mp4", "", "x")]);
        assert!(list_by_module(&dataset, 100, BASE).is_empty());
        assert!(list_by_module(&dataset, 1000, BASE).is_empty());
    }

    #[test]
    fn test_search_blank_query() {
        let dataset = sample_dataset();
        assert!(search(&dataset, "", BASE).is_empty());
        assert!(search(&dataset, "   ", BASE).is_empty());
        assert!(search(&dataset, "\t\n", BASE).is_empty());
    }

    #[test]
    fn test_search_case_insensitive_both_fields() {
        let dataset = sample_dataset();
        let hits = search(&dataset, "supervised", BASE);

        let ids: Vec<_> = hits.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, ["Mod01_WhatIsML.mp4", "Mod10 Ensembles.mp4"]);
        assert_eq!(hits[0].module, "Module 1");
        assert_eq!(hits[0].title, "WhatIsML");
        assert_eq!(hits[1].module, "Module 10");
        assert_eq!(hits[1].title, "Ensembles");

        let by_name = search(&dataset, "REGRESSION", BASE);
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].module, "Module 2");
        assert_eq!(by_name[0].url, "https://bucket.example/Mod02 Regression.mp4");
    }

    #[test]
    fn test_search_ignores_full_transcription() {
        let dataset = sample_dataset();
        assert!(search(&dataset, "today we talk", BASE).is_empty());
    }

    #[test]
    fn test_search_malformed_identifier_label() {
        let dataset = sample_dataset();
        let hits = search(&dataset, "extra", BASE);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "Bonus.mp4");
        assert_eq!(hits[0].module, "Module us");
    }

    #[test]
    fn test_find_by_video_id_exact() {
        let dataset = Dataset::from(vec![VideoRecord::new("Mod01_Intro.mp4", "", "hello")]);
        assert_eq!(
            find_by_video_id(&dataset, "Mod01_Intro.mp4").unwrap().key_phrases,
            "hello"
        );

        let err = find_by_video_id(&dataset, "mod01_intro.mp4").unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
        assert!(find_by_video_id(&dataset, "Mod01_Intro").is_err());
    }

    #[test]
    fn test_export_transcript_bytes() {
        let text = "Key phrases: gradient, descent\nsecond line — ünïcode";
        let dataset = Dataset::from(vec![VideoRecord::new("Mod03_GD.mp4", "", text)]);

        let export = export_transcript(&dataset, "Mod03_GD.mp4").unwrap();
        assert_eq!(export.file_name, "Mod03_GD.mp4_transcript.txt");
        assert_eq!(export.content_type, "text/plain; charset=utf-8");
        assert_eq!(&export.body[..], text.as_bytes());

        let err = export_transcript(&dataset, "Unknown.mp4").unwrap_err();
        assert_eq!(err.http_status(), 404);
    }

    #[test]
    fn test_transcript_preview_lengths() {
        let short = "a".repeat(200);
        assert_eq!(transcript_preview(&short), short);

        let long = "b".repeat(201);
        let preview = transcript_preview(&long);
        assert_eq!(preview.chars().count(), 203);
        assert!(preview.ends_with("..."));
        assert_eq!(&preview[..200], &long[..200]);

        assert_eq!(transcript_preview(""), "");
    }

    #[test]
    fn test_transcript_preview_counts_chars() {
        let long = "é".repeat(250);
        let preview = transcript_preview(&long);
        assert_eq!(preview.chars().count(), 203);
        assert!(preview.starts_with(&"é".repeat(200)));
    }

    #[test]
    fn test_derive_title() {
        assert_eq!(derive_title("Mod01_WhatIsML.mp4", "Mod01"), "WhatIsML");
        assert_eq!(derive_title("Mod02 Linear Models.mp4", "Mod02"), "Linear Models");
        assert_eq!(derive_title("Mod03 - Trees .mp4", "Mod03"), "- Trees");
        assert_eq!(derive_title("Mod05_Boosting-v2.mp4", "Mod05"), "Boosting-v2");
        assert_eq!(derive_title("Mod04 Clip.mov", "Mod04"), "Clip.mov");
    }

    #[test]
    fn test_module_label() {
        assert_eq!(module_label("Mod01_Intro.mp4"), "Module 1");
        assert_eq!(module_label("Mod12 Trees.mp4"), "Module 12");
        assert_eq!(module_label("Modxy.mp4"), "Module xy");
        assert_eq!(module_label("Bonus.mp4"), "Module us");
    }
}
