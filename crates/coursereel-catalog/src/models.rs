//! Catalog models.
//!
//! [`VideoRecord`] mirrors one row of the backing table. The transfer records
//! ([`VideoSummary`], [`VideoSearchResult`]) are what the HTTP layer
//! serializes; they never carry the full `transcription` text.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal that starts every module tag in a video identifier.
pub const MODULE_TAG_PREFIX: &str = "Mod";

/// Width of the zero-padded module number inside a video identifier.
pub const MODULE_NUMBER_WIDTH: usize = 2;

/// One row of the backing video table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VideoRecord {
    /// Identifier and file name, e.g. `Mod01_WhatIsML.mp4`.
    pub video: String,
    /// Full transcript text. Not exposed to clients.
    pub transcription: String,
    /// Summary text used for previews, search and downloads.
    pub key_phrases: String,
}

impl VideoRecord {
    pub fn new(
        video: impl Into<String>,
        transcription: impl Into<String>,
        key_phrases: impl Into<String>,
    ) -> Self {
        Self {
            video: video.into(),
            transcription: transcription.into(),
            key_phrases: key_phrases.into(),
        }
    }
}

/// Ordered collection of video records, in backing-file row order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<VideoRecord>,
}

impl Dataset {
    pub fn new(records: Vec<VideoRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VideoRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[VideoRecord] {
        &self.records
    }
}

impl From<Vec<VideoRecord>> for Dataset {
    fn from(records: Vec<VideoRecord>) -> Self {
        Self::new(records)
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a VideoRecord;
    type IntoIter = std::slice::Iter<'a, VideoRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Module number as encoded in a video identifier (`Mod` + two digits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModuleTag(u32);

impl ModuleTag {
    pub fn new(number: u32) -> Self {
        Self(number)
    }

    pub fn number(self) -> u32 {
        self.0
    }

    /// Whether the number fits the two-digit tag width.
    ///
    /// Numbers of 100 and above would need a wider tag, which no identifier
    /// uses, so they never match anything.
    pub fn is_addressable(self) -> bool {
        self.0 < 100
    }

    /// The tag string, e.g. `Mod01` for module 1.
    pub fn prefix(self) -> String {
        format!(
            "{MODULE_TAG_PREFIX}{:0width$}",
            self.0,
            width = MODULE_NUMBER_WIDTH
        )
    }

    /// Human-readable label, e.g. `Module 1`.
    pub fn label(self) -> String {
        format!("Module {}", self.0)
    }

    /// Raw two-character module number found at char offsets 3..5 of a video
    /// identifier. Shorter identifiers yield whatever characters exist there.
    pub fn raw_number(video: &str) -> String {
        video
            .chars()
            .skip(MODULE_TAG_PREFIX.len())
            .take(MODULE_NUMBER_WIDTH)
            .collect()
    }

    /// Recover the module tag from a video identifier, if its number parses.
    pub fn from_video(video: &str) -> Option<Self> {
        Self::raw_number(video).trim().parse().ok().map(Self)
    }
}

impl fmt::Display for ModuleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix())
    }
}

/// A video as listed inside a module.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VideoSummary {
    pub id: String,
    pub title: String,
    /// Preview of `key_phrases` (at most 200 characters plus `...`).
    pub transcript: String,
    pub url: String,
}

/// A video matched by a keyword search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VideoSearchResult {
    pub id: String,
    pub title: String,
    pub transcript: String,
    pub url: String,
    /// Display label such as `Module 3`.
    pub module: String,
}

/// A transcript rendered as a downloadable text attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptExport {
    pub file_name: String,
    pub content_type: &'static str,
    pub body: Bytes,
}
