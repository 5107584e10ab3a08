//! Encoding utilities for converting WINDOWS-1250 / ISO-8859-2 to UTF-8.
//!
//! Uses the encoding_rs tables, which define all 256 byte values for both code
//! pages. Bytes without an assigned letter map to the C1 control code point of
//! the same value, so a strict conversion never fails in practice.

use encoding_rs::{ISO_8859_2, WINDOWS_1250};
use thiserror::Error;
use tracing::warn;

use crate::core::detector::Encoding;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConvertError {
    #[error("input is already UTF-8, nothing to convert")]
    AlreadyUtf8,
    #[error("byte at offset {offset} cannot be translated from {encoding}")]
    Untranslatable { encoding: Encoding, offset: usize },
}

fn code_page(source: Encoding) -> Result<&'static encoding_rs::Encoding, ConvertError> {
    match source {
        Encoding::Windows1250 => Ok(WINDOWS_1250),
        Encoding::Iso88592 => Ok(ISO_8859_2),
        Encoding::Utf8 => Err(ConvertError::AlreadyUtf8),
    }
}

/// Remap `data` from a single-byte code page to UTF-8.
///
/// Fails on the first byte the code page cannot translate.
pub fn remap_to_utf8(data: &[u8], source: Encoding) -> Result<Vec<u8>, ConvertError> {
    let encoding = code_page(source)?;
    match encoding.decode_without_bom_handling_and_without_replacement(data) {
        Some(decoded) => Ok(decoded.into_owned().into_bytes()),
        None => {
            // Single-byte code page: the offending byte decodes on its own.
            let offset = data
                .iter()
                .position(|b| {
                    encoding
                        .decode_without_bom_handling_and_without_replacement(std::slice::from_ref(b))
                        .is_none()
                })
                .unwrap_or(0);
            Err(ConvertError::Untranslatable {
                encoding: source,
                offset,
            })
        }
    }
}

/// Remap `data` to UTF-8, substituting U+FFFD for untranslatable bytes.
pub fn remap_to_utf8_lossy(data: &[u8], source: Encoding) -> Result<Vec<u8>, ConvertError> {
    let encoding = code_page(source)?;
    let (decoded, had_errors) = encoding.decode_without_bom_handling(data);
    if had_errors {
        warn!(encoding = %source, "replaced untranslatable bytes with U+FFFD");
    }
    Ok(decoded.into_owned().into_bytes())
}

/// Decode bytes using the specified encoding.
/// UTF-8 input is decoded lossily, with a leading byte order mark removed.
pub fn decode_bytes(data: &[u8], source: Encoding) -> String {
    match code_page(source) {
        Ok(encoding) => encoding.decode_without_bom_handling(data).0.into_owned(),
        Err(_) => encoding_rs::UTF_8.decode_with_bom_removal(data).0.into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passthrough() {
        let data = b"Hello, World!";
        assert_eq!(
            remap_to_utf8(data, Encoding::Windows1250).unwrap(),
            data.to_vec()
        );
        assert_eq!(remap_to_utf8(data, Encoding::Iso88592).unwrap(), data.to_vec());
    }

    #[test]
    fn test_windows_1250_conversion() {
        // "Příliš žluťoučký kůň" in WINDOWS-1250
        let data: &[u8] = &[
            0x50, 0xF8, 0xED, 0x6C, 0x69, 0x9A, 0x20, 0x9E, 0x6C, 0x75, 0x9D, 0x6F, 0x75, 0xE8,
            0x6B, 0xFD, 0x20, 0x6B, 0xF9, 0xF2,
        ];
        let result = remap_to_utf8(data, Encoding::Windows1250).unwrap();
        assert_eq!(String::from_utf8(result).unwrap(), "Příliš žluťoučký kůň");
    }

    #[test]
    fn test_iso_8859_2_conversion() {
        // "ľúbosť" in ISO-8859-2
        let data: &[u8] = &[0xB5, 0xFA, 0x62, 0x6F, 0x73, 0xBB];
        let result = remap_to_utf8(data, Encoding::Iso88592).unwrap();
        assert_eq!(String::from_utf8(result).unwrap(), "ľúbosť");
    }

    #[test]
    fn test_same_byte_differs_between_code_pages() {
        assert_eq!(decode_bytes(&[0xA5], Encoding::Windows1250), "Ą");
        assert_eq!(decode_bytes(&[0xA5], Encoding::Iso88592), "Ľ");
        assert_eq!(decode_bytes(&[0x8A], Encoding::Windows1250), "Š");
        assert_eq!(decode_bytes(&[0x8A], Encoding::Iso88592), "\u{8A}");
    }

    #[test]
    fn test_every_byte_translates() {
        let all: Vec<u8> = (0..=u8::MAX).collect();
        for source in [Encoding::Windows1250, Encoding::Iso88592] {
            let result = remap_to_utf8(&all, source).unwrap();
            let text = String::from_utf8(result).unwrap();
            assert_eq!(text.chars().count(), 256);
        }
    }

    #[test]
    fn test_lossy_matches_strict() {
        let data: &[u8] = &[0x8A, 0xA5, 0x41, 0xFF];
        for source in [Encoding::Windows1250, Encoding::Iso88592] {
            assert_eq!(
                remap_to_utf8_lossy(data, source).unwrap(),
                remap_to_utf8(data, source).unwrap()
            );
        }
    }

    #[test]
    fn test_utf8_source_rejected() {
        assert_eq!(
            remap_to_utf8(b"abc", Encoding::Utf8),
            Err(ConvertError::AlreadyUtf8)
        );
        assert_eq!(
            remap_to_utf8_lossy(b"abc", Encoding::Utf8),
            Err(ConvertError::AlreadyUtf8)
        );
    }

    #[test]
    fn test_decode_utf8_strips_bom() {
        let data = [0xEF, 0xBB, 0xBF, b'o', b'k'];
        assert_eq!(decode_bytes(&data, Encoding::Utf8), "ok");
    }
}
