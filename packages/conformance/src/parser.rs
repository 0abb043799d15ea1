//! Line-oriented parser for CAVS `.rsp` response files
//!
//! Input is split on `\n` and each line is trimmed, then classified. Comment
//! lines are skipped undecoded; every other line must be UTF-8.
//!
//! - blank or `#` comment: record terminator, commits a complete pending record
//! - `[L = N]`: digest length in bytes for the whole file (last one wins)
//! - `Len = N`, `Msg = hex`, `MD = hex`: pending record fields (last write wins)
//! - anything else: ignored
//!
//! A record is complete once `Len` and `MD` are set and either `Msg` is set or
//! `Len = 0`. Incomplete records reaching a terminator are dropped with a
//! warning. Bad hex, unparsable numbers and digests that disagree with the
//! header abort the whole parse.

use crate::error::ParseError;
use crate::vectors::{TestVector, VectorFile};
use log::{debug, warn};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const INITIAL_CAPACITY: usize = 10;

/// Parse the response file at `path`
///
/// # Errors
///
/// Returns `ParseError::NotFound` if the file cannot be opened, `ParseError::Io`
/// if it cannot be read, and the errors of [`parse_bytes`] otherwise.
pub fn parse(path: impl AsRef<Path>) -> Result<VectorFile, ParseError> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|_| ParseError::NotFound {
        path: path.to_path_buf(),
    })?;

    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed = parse_bytes(&bytes)?;
    debug!(
        "Parsed {} vectors ([L = {}]) from {}",
        parsed.len(),
        parsed.digest_length_bytes,
        path.display()
    );
    Ok(parsed)
}

/// Parse response-file text held in memory
///
/// # Errors
///
/// See [`parse_bytes`].
pub fn parse_str(text: &str) -> Result<VectorFile, ParseError> {
    parse_bytes(text.as_bytes())
}

/// Parse raw response-file contents
///
/// Lines are split on `\n`. Comment lines are skipped without decoding, so
/// only header and field lines need to be UTF-8.
///
/// # Errors
///
/// Returns `ParseError::Malformed` for a non-UTF-8 header or field line,
/// invalid hex, an unparsable `Len` or `[L = N]` value, vectors without a
/// digest-length header, or a digest whose length disagrees with the header.
/// Returns `ParseError::Allocation` if the vector sequence cannot grow.
pub fn parse_bytes(bytes: &[u8]) -> Result<VectorFile, ParseError> {
    let mut parser = VectorParser::new();
    let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    for line in body.split(|&b| b == b'\n') {
        parser.feed_bytes(line)?;
    }
    parser.finish()
}

/// Fields seen since the last commit
#[derive(Debug, Default)]
struct PendingRecord {
    length_bits: Option<u64>,
    message: Option<String>,
    digest: Option<String>,
}

impl PendingRecord {
    fn is_complete(&self) -> bool {
        match (self.length_bits, &self.message, &self.digest) {
            (Some(_), Some(_), Some(_)) => true,
            // A zero-length message needs no `Msg` text.
            (Some(0), None, Some(_)) => true,
            _ => false,
        }
    }

    fn missing_fields(&self) -> String {
        let mut missing = Vec::new();
        if self.length_bits.is_none() {
            missing.push("Len");
        }
        if self.message.is_none() && self.length_bits != Some(0) {
            missing.push("Msg");
        }
        if self.digest.is_none() {
            missing.push("MD");
        }
        missing.join(", ")
    }
}

#[derive(Debug)]
enum ParserState {
    Idle,
    Accumulating(PendingRecord),
}

enum Line<'a> {
    Terminator,
    Header(&'a str),
    Field { key: &'a str, value: &'a str },
    Other,
}

fn classify(line: &str) -> Line<'_> {
    if line.is_empty() || line.starts_with('#') {
        return Line::Terminator;
    }
    if let Some(inner) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
        return Line::Header(inner);
    }
    match line.split_once('=') {
        Some((key, value)) => Line::Field {
            key: key.trim(),
            value: value.trim(),
        },
        None => Line::Other,
    }
}

fn decode_hex(text: &str, field: &str, line: usize) -> Result<Vec<u8>, ParseError> {
    hex::decode(text)
        .map_err(|err| ParseError::malformed(line, format!("{field} is not valid hex: {err}")))
}

struct VectorParser {
    state: ParserState,
    file: VectorFile,
    header_seen: bool,
    // Line at which each vector was committed, for digest-length errors.
    commit_lines: Vec<usize>,
    line: usize,
}

impl VectorParser {
    fn new() -> Self {
        Self {
            state: ParserState::Idle,
            file: VectorFile::default(),
            header_seen: false,
            commit_lines: Vec::new(),
            line: 0,
        }
    }

    fn feed_bytes(&mut self, raw: &[u8]) -> Result<(), ParseError> {
        let trimmed = raw.trim_ascii();
        if trimmed.starts_with(b"#") {
            return self.feed("#");
        }
        let text = std::str::from_utf8(trimmed).map_err(|err| {
            ParseError::malformed(self.line + 1, format!("line is not valid UTF-8: {err}"))
        })?;
        self.feed(text)
    }

    fn feed(&mut self, raw: &str) -> Result<(), ParseError> {
        self.line += 1;
        match classify(raw.trim()) {
            Line::Terminator => self.flush(),
            Line::Header(inner) => self.header(inner),
            Line::Field { key, value } => self.field(key, value),
            Line::Other => Ok(()),
        }
    }

    fn header(&mut self, inner: &str) -> Result<(), ParseError> {
        let Some((key, value)) = inner.split_once('=') else {
            return Ok(());
        };
        if key.trim() != "L" {
            return Ok(());
        }
        let value = value.trim();
        self.file.digest_length_bytes = value.parse().map_err(|_| {
            ParseError::malformed(self.line, format!("digest length `{value}` is not an integer"))
        })?;
        self.header_seen = true;
        Ok(())
    }

    fn field(&mut self, key: &str, value: &str) -> Result<(), ParseError> {
        let length_bits = match key {
            "Len" => Some(value.parse::<u64>().map_err(|_| {
                ParseError::malformed(
                    self.line,
                    format!("Len `{value}` is not a non-negative integer"),
                )
            })?),
            "Msg" | "MD" => None,
            _ => return Ok(()),
        };

        if let ParserState::Idle = self.state {
            self.state = ParserState::Accumulating(PendingRecord::default());
        }
        if let ParserState::Accumulating(pending) = &mut self.state {
            match key {
                "Len" => pending.length_bits = length_bits,
                "Msg" => pending.message = Some(value.to_string()),
                _ => pending.digest = Some(value.to_string()),
            }
        }
        Ok(())
    }

    /// Commit a complete pending record and return to `Idle`
    fn flush(&mut self) -> Result<(), ParseError> {
        match std::mem::replace(&mut self.state, ParserState::Idle) {
            ParserState::Idle => Ok(()),
            ParserState::Accumulating(pending) if pending.is_complete() => self.commit(pending),
            ParserState::Accumulating(pending) => {
                warn!(
                    "Dropping incomplete record at line {} (missing {})",
                    self.line,
                    pending.missing_fields()
                );
                Ok(())
            }
        }
    }

    fn commit(&mut self, pending: PendingRecord) -> Result<(), ParseError> {
        let line = self.line;
        let length_bits = pending.length_bits.unwrap_or_default();
        let message = match (length_bits, pending.message.as_deref()) {
            (0, _) | (_, None) => Vec::new(),
            (_, Some(text)) => decode_hex(text, "Msg", line)?,
        };
        let digest = decode_hex(pending.digest.as_deref().unwrap_or_default(), "MD", line)?;

        self.reserve_slot()?;
        self.file.vectors.push(TestVector {
            length_bits,
            message,
            digest,
        });
        self.commit_lines.push(line);
        Ok(())
    }

    /// Grow the vector sequence by doubling, reporting failure instead of aborting
    fn reserve_slot(&mut self) -> Result<(), ParseError> {
        let vectors = &mut self.file.vectors;
        if vectors.len() < vectors.capacity()
            && self.commit_lines.len() < self.commit_lines.capacity()
        {
            return Ok(());
        }
        let additional = vectors.capacity().max(INITIAL_CAPACITY);
        let requested = vectors.len() + additional;
        vectors
            .try_reserve_exact(additional)
            .and_then(|()| self.commit_lines.try_reserve_exact(additional))
            .map_err(|_| ParseError::Allocation { requested })
    }

    fn finish(mut self) -> Result<VectorFile, ParseError> {
        // A final record without a trailing terminator is still committed.
        self.flush()?;

        let expected = self.file.digest_length_bytes;
        if !self.file.vectors.is_empty() && (!self.header_seen || expected == 0) {
            let line = self.commit_lines.first().copied().unwrap_or(self.line);
            return Err(ParseError::malformed(
                line,
                "vectors present without a non-zero [L = N] digest length header",
            ));
        }

        for (vector, &line) in self.file.vectors.iter().zip(&self.commit_lines) {
            if vector.digest.len() != expected {
                return Err(ParseError::malformed(
                    line,
                    format!(
                        "MD is {} bytes but the header declares [L = {expected}]",
                        vector.digest.len()
                    ),
                ));
            }
        }

        Ok(self.file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_lines() {
        assert!(matches!(classify(""), Line::Terminator));
        assert!(matches!(classify("#  CAVS 11.0"), Line::Terminator));
        assert!(matches!(classify("[L = 32]"), Line::Header("L = 32")));
        assert!(matches!(
            classify("Msg = 00"),
            Line::Field {
                key: "Msg",
                value: "00"
            }
        ));
        assert!(matches!(classify("garbage"), Line::Other));
    }

    #[test]
    fn test_pending_record_completeness() {
        let mut pending = PendingRecord {
            length_bits: Some(8),
            digest: Some("aa".into()),
            ..PendingRecord::default()
        };
        assert!(!pending.is_complete());
        assert_eq!(pending.missing_fields(), "Msg");

        pending.length_bits = Some(0);
        assert!(pending.is_complete());
    }

    #[test]
    fn test_vector_storage_grows_by_doubling() {
        let mut text = String::from("[L = 1]\n\n");
        for _ in 0..25 {
            text.push_str("Len = 8\nMsg = ab\nMD = cd\n\n");
        }
        let mut parser = VectorParser::new();
        for line in text.lines() {
            parser.feed(line).expect("line should parse");
        }
        assert_eq!(parser.file.vectors.len(), 25);
        assert_eq!(parser.file.vectors.capacity(), 40);
    }

    #[test]
    fn test_header_with_other_key_is_ignored() {
        let parsed = parse_str("[L = 4]\n[Mode = fast]\nLen = 0\nMD = 00112233\n")
            .expect("file should parse");
        assert_eq!(parsed.digest_length_bytes, 4);
        assert_eq!(parsed.len(), 1);
    }
}
