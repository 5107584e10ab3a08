//! Encoding detection for legacy Czech/Slovak text.
//!
//! Decides between UTF-8, WINDOWS-1250 and ISO-8859-2 by looking at the raw
//! bytes only. UTF-8 is recognised solely by its byte order mark; the two
//! 8-bit code pages are told apart by counting marker bytes that are specific
//! to one of them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// UTF-8 byte order mark.
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Bytes that carry letters in WINDOWS-1250 but are C1 controls in ISO-8859-2.
///
/// Š=0x8A, Ť=0x8D, Ž=0x8E, š=0x9A, ť=0x9D, ž=0x9E
pub const WINDOWS_1250_MARKERS: [u8; 6] = [0x8A, 0x8D, 0x8E, 0x9A, 0x9D, 0x9E];

/// Bytes holding a different letter in ISO-8859-2 than in WINDOWS-1250.
///
/// Ľ=0xA5, Ś=0xA6, Ť=0xAB, ľ=0xB5, ś=0xB6, ť=0xBB, ź=0xBC
pub const ISO_8859_2_MARKERS: [u8; 7] = [0xA5, 0xA6, 0xAB, 0xB5, 0xB6, 0xBB, 0xBC];

/// Range that ISO-8859-2 leaves to C1 control codes.
const CONTROL_RANGE: std::ops::RangeInclusive<u8> = 0x80..=0x9F;

/// One of the three encodings the detector can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Encoding {
    #[serde(rename = "utf-8")]
    Utf8,
    #[serde(rename = "windows-1250")]
    Windows1250,
    #[serde(rename = "iso-8859-2")]
    Iso88592,
}

impl Encoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Windows1250 => "windows-1250",
            Self::Iso88592 => "iso-8859-2",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Encoding {
    type Err = UnknownEncoding;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "windows-1250" | "cp1250" | "x-cp1250" => Ok(Self::Windows1250),
            "iso-8859-2" | "iso8859-2" | "latin2" | "l2" => Ok(Self::Iso88592),
            _ => Err(UnknownEncoding(s.to_string())),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown encoding label: {0}")]
pub struct UnknownEncoding(pub String);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DetectError {
    #[error("empty input data")]
    EmptyInput,
}

/// Number of marker bytes found for each 8-bit code page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MarkerCounts {
    pub windows_1250: usize,
    pub iso_8859_2: usize,
}

/// Which step of the heuristic produced the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionReason {
    ByteOrderMark,
    Majority,
    ControlRangeTieBreak,
    Ascii,
    Fallback,
}

/// Detected encoding together with the evidence behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Detection {
    pub encoding: Encoding,
    pub counts: MarkerCounts,
    pub reason: DetectionReason,
}

/// Count marker bytes in a single pass.
pub fn count_markers(data: &[u8]) -> MarkerCounts {
    data.iter().fold(MarkerCounts::default(), |mut counts, byte| {
        if WINDOWS_1250_MARKERS.contains(byte) {
            counts.windows_1250 += 1;
        }
        if ISO_8859_2_MARKERS.contains(byte) {
            counts.iso_8859_2 += 1;
        }
        counts
    })
}

/// Detect the encoding of `data`.
///
/// Never reports an undecided result: any non-empty input resolves to one of
/// the three encodings, with WINDOWS-1250 as the default guess.
pub fn classify(data: &[u8]) -> Result<Encoding, DetectError> {
    detect(data).map(|detection| detection.encoding)
}

/// Same as [`classify`], but also returns the marker counts and the step that
/// decided.
pub fn detect(data: &[u8]) -> Result<Detection, DetectError> {
    if data.is_empty() {
        return Err(DetectError::EmptyInput);
    }

    if data.starts_with(&UTF8_BOM) {
        let detection = Detection {
            encoding: Encoding::Utf8,
            counts: MarkerCounts::default(),
            reason: DetectionReason::ByteOrderMark,
        };
        debug!(len = data.len(), "UTF-8 byte order mark found");
        return Ok(detection);
    }

    let counts = count_markers(data);
    let decide = |encoding: Encoding, reason: DetectionReason| {
        debug!(
            windows_1250 = counts.windows_1250,
            iso_8859_2 = counts.iso_8859_2,
            ?reason,
            "detected {}",
            encoding
        );
        Ok(Detection {
            encoding,
            counts,
            reason,
        })
    };

    if counts.windows_1250 > 0 && counts.windows_1250 > counts.iso_8859_2 {
        return decide(Encoding::Windows1250, DetectionReason::Majority);
    }
    if counts.iso_8859_2 > 0 && counts.iso_8859_2 > counts.windows_1250 {
        return decide(Encoding::Iso88592, DetectionReason::Majority);
    }

    // Only reachable with equal, non-zero counts.
    if counts.windows_1250 > 0 && counts.iso_8859_2 > 0 {
        let in_control_range = data
            .iter()
            .any(|b| CONTROL_RANGE.contains(b) && WINDOWS_1250_MARKERS.contains(b));
        if in_control_range {
            return decide(Encoding::Windows1250, DetectionReason::ControlRangeTieBreak);
        }
    }

    if data.is_ascii() {
        return decide(Encoding::Windows1250, DetectionReason::Ascii);
    }

    decide(Encoding::Windows1250, DetectionReason::Fallback)
}
