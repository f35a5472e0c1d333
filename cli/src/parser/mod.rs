//! Record loader with encoding auto-detection.
//!
//! Splits flat text files into records on a literal separator token, and
//! decomposes email records into their fixed-position header lines and body.

use serde::Serialize;
use std::path::Path;

use crate::error::{LoadError, LoadResult};
use crate::models::EmailRecord;

/// Separator token between records.
pub const DEFAULT_SEPARATOR: &str = "END";

/// Minimum line count of an email record (From, To, Subject, marker).
pub const MIN_EMAIL_LINES: usize = 4;

const FROM_PREFIX: &str = "From:";
const TO_PREFIX: &str = "To:";
const SUBJECT_PREFIX: &str = "Subject:";
const BODY_MARKER: &str = "Body:\n";

/// Decoded file content with the encoding it was read as
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub content: String,
    pub encoding: String,
}

/// An email record dropped for having too few lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    /// 1-based position among the non-empty records
    pub position: usize,
    pub line_count: usize,
}

/// Result of parsing an email file
#[derive(Debug, Clone, Default)]
pub struct EmailBatch {
    pub records: Vec<EmailRecord>,
    pub skipped: Vec<SkippedRecord>,
}

/// Detect the encoding of raw bytes.
///
/// Valid UTF-8 is taken as-is; anything else goes through chardet, whose
/// label is kept (lowercased) so ISO-8859-1 and ISO-8859-15 stay distinct.
pub fn detect_encoding(bytes: &[u8]) -> String {
    if std::str::from_utf8(bytes).is_ok() {
        return "utf-8".to_string();
    }

    let charset = chardet::detect(bytes).0.to_lowercase();
    match charset.as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Resolve a charset label to an `encoding_rs` decoder.
///
/// Uses the WHATWG label table, so `iso-8859-1` decodes as Windows-1252
/// (identical to Latin-1 for 0xA0-0xFF). `None` for unknown labels.
fn resolve_encoding(label: &str) -> Option<&'static encoding_rs::Encoding> {
    match label.trim().to_lowercase().as_str() {
        // WHATWG maps "ascii" to Windows-1252; ASCII input is valid UTF-8 anyway
        "ascii" | "utf8" => Some(encoding_rs::UTF_8),
        "latin-1" => Some(encoding_rs::WINDOWS_1252),
        other => encoding_rs::Encoding::for_label(other.as_bytes()),
    }
}

/// Decode bytes to a string using the given encoding.
///
/// Malformed sequences and unknown labels fall back to lossy UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    match resolve_encoding(encoding) {
        Some(decoder) => decoder.decode_with_bom_removal(bytes).0.into_owned(),
        None => String::from_utf8_lossy(bytes).into_owned(),
    }
}

/// Read and decode an input file.
pub fn read_input<P: AsRef<Path>>(path: P) -> LoadResult<LoadedFile> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let encoding = detect_encoding(&bytes);
    let content = decode_content(&bytes, &encoding);
    Ok(LoadedFile { content, encoding })
}

/// Split content into trimmed, non-empty records.
///
/// # Example
/// ```ignore
/// let records: Vec<&str> = split_records("first\nEND\n\nEND second", "END").collect();
/// assert_eq!(records, vec!["first", "second"]);
/// ```
pub fn split_records<'a>(content: &'a str, separator: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    let parts: Box<dyn Iterator<Item = &'a str> + 'a> = if separator.is_empty() {
        Box::new(std::iter::once(content))
    } else {
        Box::new(content.split(separator))
    };
    parts.map(str::trim).filter(|record| !record.is_empty())
}

/// Parse one email record.
///
/// Returns `None` when the record has fewer than [`MIN_EMAIL_LINES`] lines.
pub fn parse_email(record: &str) -> Option<EmailRecord> {
    let lines: Vec<&str> = record.trim().lines().collect();
    if lines.len() < MIN_EMAIL_LINES {
        return None;
    }

    let body = lines[MIN_EMAIL_LINES..]
        .join("\n")
        .replace(BODY_MARKER, "")
        .trim()
        .to_string();

    Some(EmailRecord {
        from: strip_header(lines[0], FROM_PREFIX),
        to: strip_header(lines[1], TO_PREFIX),
        subject: strip_header(lines[2], SUBJECT_PREFIX),
        body,
    })
}

/// Parse every email record in a file's content.
pub fn parse_emails(content: &str, separator: &str) -> EmailBatch {
    let mut batch = EmailBatch::default();

    for (i, record) in split_records(content, separator).enumerate() {
        match parse_email(record) {
            Some(email) => batch.records.push(email),
            None => batch.skipped.push(SkippedRecord {
                position: i + 1,
                line_count: record.lines().count(),
            }),
        }
    }

    batch
}

fn strip_header(line: &str, prefix: &str) -> String {
    line.trim()
        .strip_prefix(prefix)
        .unwrap_or(line)
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_split_records_trims_and_drops_empty() {
        let content = "  Great phone.\nEND\n\nEND\nTerrible kettle.\nEND\n";
        let records: Vec<&str> = split_records(content, "END").collect();
        assert_eq!(records, vec!["Great phone.", "Terrible kettle."]);
    }

    #[test]
    fn test_split_records_without_trailing_separator() {
        let records: Vec<&str> = split_records("one END two", "END").collect();
        assert_eq!(records, vec!["one", "two"]);
    }

    #[test]
    fn test_split_records_empty_content() {
        assert_eq!(split_records("  \n ", "END").count(), 0);
    }

    #[test]
    fn test_split_records_empty_separator_keeps_whole_content() {
        let records: Vec<&str> = split_records(" a b ", "").collect();
        assert_eq!(records, vec!["a b"]);
    }

    #[test]
    fn test_parse_email_fields() {
        let email = parse_email("From: a@x.com\nTo: b@x.com\nSubject: Hi\nBody:\nHello there").unwrap();
        assert_eq!(email.from, "a@x.com");
        assert_eq!(email.to, "b@x.com");
        assert_eq!(email.subject, "Hi");
        assert_eq!(email.body, "Hello there");
    }

    #[test]
    fn test_parse_email_multiline_body_and_crlf() {
        let record = "From: a@x.com\r\nTo: b@x.com\r\nSubject: Order\r\nBody:\r\nLine one\r\nLine two\r\n";
        let email = parse_email(record).unwrap();
        assert_eq!(email.subject, "Order");
        assert_eq!(email.body, "Line one\nLine two");
    }

    #[test]
    fn test_parse_email_missing_prefix_keeps_line() {
        let email = parse_email("a@x.com\nTo: b@x.com\nSubject: Hi\n\nBody").unwrap();
        assert_eq!(email.from, "a@x.com");
        assert_eq!(email.body, "Body");
    }

    #[test]
    fn test_parse_email_too_short() {
        assert!(parse_email("From: a@x.com\nTo: b@x.com\nSubject: Hi").is_none());
    }

    #[test]
    fn test_parse_emails_counts_skipped() {
        let content = "From: a\nTo: b\nSubject: one\nBody:\nfirst\nEND\n\
                       From: c\nTo: d\nEND\n\
                       From: e\nTo: f\nSubject: three\nBody:\nthird\nEND\n";
        let batch = parse_emails(content, DEFAULT_SEPARATOR);
        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.records[1].subject, "three");
        assert_eq!(batch.skipped, vec![SkippedRecord { position: 2, line_count: 2 }]);
    }

    #[test]
    fn test_detect_encoding_utf8() {
        assert_eq!(detect_encoding("Señor café".as_bytes()), "utf-8");
    }

    /// Encode text whose characters all sit in U+0000..=U+00FF as Latin-1 bytes.
    fn latin1_bytes(text: &str) -> Vec<u8> {
        text.chars().map(|c| u8::try_from(u32::from(c)).unwrap()).collect()
    }

    #[test]
    fn test_latin1_decoding() {
        let text = "Precio ½ kilo, tasa ¤5, niño, Señora López, Société";
        let decoded = decode_content(&latin1_bytes(text), "iso-8859-1");
        assert_eq!(decoded, text);

        // 0xBD and 0xA4 differ between Latin-1 and Latin-9
        assert_eq!(decode_content(&[0xBD, 0xA4], "ISO-8859-1"), "½¤");
        assert_eq!(decode_content(&[0xBD, 0xA4], "latin-1"), "½¤");
    }

    #[test]
    fn test_latin9_kept_distinct() {
        assert_eq!(decode_content(&[0xBD, 0xA4], "iso-8859-15"), "œ€");
    }

    #[test]
    fn test_windows_1252_decoding() {
        // 0x80 is the euro sign, 0x93/0x94 curly quotes
        assert_eq!(decode_content(&[0x80, 0x93, 0x61, 0x94], "windows-1252"), "€\u{201C}a\u{201D}");
    }

    #[test]
    fn test_invalid_utf8_is_lossy_not_fatal() {
        let decoded = decode_content(b"caf\xE9 ok", "utf-8");
        assert_eq!(decoded, "caf\u{FFFD} ok");
    }

    #[test]
    fn test_unknown_label_falls_back_to_lossy_utf8() {
        assert_eq!(decode_content("año".as_bytes(), "no-such-charset"), "año");
    }

    #[test]
    fn test_utf8_bom_removed() {
        let bytes = b"\xEF\xBB\xBFhello";
        assert_eq!(decode_content(bytes, "utf-8"), "hello");
    }

    #[test]
    fn test_read_input_latin1_file_round_trips() {
        let text = "Precio ½ kilo, tasa ¤5, niño feliz. Señora López pagó el año pasado.\nEND\n";
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&latin1_bytes(text)).unwrap();

        let loaded = read_input(file.path()).unwrap();
        assert_ne!(loaded.encoding, "utf-8");
        assert_eq!(loaded.content, text);
    }

    #[test]
    fn test_read_input_missing_file() {
        let err = read_input("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_read_input_preserves_non_ascii() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Niño feliz\nEND\n").unwrap();

        let loaded = read_input(file.path()).unwrap();
        assert_eq!(loaded.encoding, "utf-8");
        assert_eq!(split_records(&loaded.content, "END").collect::<Vec<_>>(), vec!["Niño feliz"]);
    }
}
