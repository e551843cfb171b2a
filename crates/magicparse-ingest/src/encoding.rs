//! Character decoding.

use std::borrow::Cow;

use encoding_rs::Encoding;
use magicparse_model::{ConfigError, Result};

/// Resolves an encoding label.
///
/// Labels follow the WHATWG Encoding Standard (`utf-8`, `iso-8859-5`,
/// `windows-1252`...). Underscore spellings such as `iso8859_5` or `utf_8`
/// are accepted as well.
pub fn resolve_encoding(label: &str) -> Result<&'static Encoding> {
    let trimmed = label.trim();
    Encoding::for_label(trimmed.as_bytes())
        .or_else(|| Encoding::for_label(trimmed.replace('_', "-").as_bytes()))
        .or_else(|| Encoding::for_label(trimmed.replace('_', "").as_bytes()))
        .ok_or_else(|| ConfigError::UnknownEncoding {
            label: label.to_string(),
        })
}

/// Decodes bytes, dropping a leading byte order mark for `encoding`.
///
/// Malformed sequences become U+FFFD and are logged; decoding never fails.
pub fn decode<'a>(bytes: &'a [u8], encoding: &'static Encoding) -> Cow<'a, str> {
    let (text, had_errors) = encoding.decode_with_bom_removal(bytes);
    if had_errors {
        tracing::warn!(
            encoding = encoding.name(),
            bytes = bytes.len(),
            "input contains malformed sequences, replaced with U+FFFD"
        );
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_default() {
        assert_eq!(resolve_encoding("utf-8").unwrap(), encoding_rs::UTF_8);
        assert_eq!(resolve_encoding(" UTF8 ").unwrap(), encoding_rs::UTF_8);
        assert_eq!(resolve_encoding("utf_8").unwrap(), encoding_rs::UTF_8);
    }

    #[test]
    fn test_resolve_underscore_spelling() {
        assert_eq!(resolve_encoding("iso8859_5").unwrap(), encoding_rs::ISO_8859_5);
        assert_eq!(resolve_encoding("iso-8859-5").unwrap(), encoding_rs::ISO_8859_5);
    }

    #[test]
    fn test_resolve_unknown() {
        let err = resolve_encoding("klingon").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownEncoding { .. }));
        assert_eq!(err.to_string(), "unknown encoding 'klingon'");
    }

    #[test]
    fn test_decode_strips_bom() {
        let text = decode(b"\xef\xbb\xbfA,B", encoding_rs::UTF_8);
        assert_eq!(text, "A,B");
    }

    #[test]
    fn test_decode_iso_8859_5() {
        // "Да" in ISO-8859-5
        let text = decode(&[0xb4, 0xd0], encoding_rs::ISO_8859_5);
        assert_eq!(text, "Да");
    }

    #[test]
    fn test_decode_malformed_is_lossy() {
        let text = decode(b"a\xffb", encoding_rs::UTF_8);
        assert_eq!(text, "a\u{fffd}b");
    }
}
