//! Parsing of the RCSB sequence feed.
//!
//! The feed is FASTA-like: each record starts with a header such as
//! `>1ABC:A|PDBID|CHAIN|SEQUENCE` followed by one or more sequence lines.

use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FastaError {
    #[error("Malformed record header on line {line}: '{content}'")]
    MalformedHeader { line: usize, content: String },
}

/// The `ID:CHAIN` token of a record header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordHeader {
    pub pdb_id: String,
    pub chain_id: String,
}

impl RecordHeader {
    /// Parses a header line. Returns `None` when the line is not a header or
    /// lacks the `ID:CHAIN` token.
    pub fn parse(line: &str) -> Option<Self> {
        let token = line.trim().strip_prefix('>')?.split('|').next()?;
        let mut parts = token.split(':');
        let pdb_id = parts.next()?.trim();
        let chain_id = parts.next()?.trim();
        Some(Self {
            pdb_id: pdb_id.to_string(),
            chain_id: chain_id.to_string(),
        })
    }

    pub fn matches(&self, pdb_id: &str, chain_id: &str) -> bool {
        self.pdb_id.eq_ignore_ascii_case(pdb_id) && self.chain_id.eq_ignore_ascii_case(chain_id)
    }
}

fn is_header(line: &str) -> bool {
    line.starts_with('>')
}

fn content_lines<'a>(
    lines: impl IntoIterator<Item = &'a str>,
) -> impl Iterator<Item = (usize, &'a str)> {
    lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

/// Collects every record of the feed into a chain id -> sequence map.
///
/// The running sequence is flushed into the map whenever a new header starts
/// and once more at the end of the feed. A repeated chain id keeps the last
/// sequence. Sequence lines before the first header are ignored.
pub fn parse_all_chains<'a>(
    lines: impl IntoIterator<Item = &'a str>,
) -> Result<BTreeMap<String, String>, FastaError> {
    let mut records = BTreeMap::new();
    let mut current: Option<(String, String)> = None;

    for (line_num, line) in content_lines(lines) {
        if is_header(line) {
            if let Some((chain, seq)) = current.take() {
                records.insert(chain, seq);
            }
            let header = RecordHeader::parse(line).ok_or_else(|| FastaError::MalformedHeader {
                line: line_num,
                content: line.to_string(),
            })?;
            current = Some((header.chain_id, String::new()));
        } else if let Some((_, seq)) = current.as_mut() {
            seq.push_str(line);
        }
    }

    if let Some((chain, seq)) = current {
        records.insert(chain, seq);
    }
    Ok(records)
}

/// Returns the sequence of the record whose header names `pdb_id:chain_id`
/// (case-insensitive), or `None` if no such record exists.
pub fn parse_single_chain<'a>(
    lines: impl IntoIterator<Item = &'a str>,
    pdb_id: &str,
    chain_id: &str,
) -> Option<String> {
    let mut seq: Option<String> = None;

    for (_, line) in content_lines(lines) {
        if is_header(line) {
            if seq.is_some() {
                break;
            }
            if RecordHeader::parse(line).is_some_and(|h| h.matches(pdb_id, chain_id)) {
                seq = Some(String::new());
            }
        } else if let Some(seq) = seq.as_mut() {
            seq.push_str(line);
        }
    }

    seq
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = "\
>1ABC:A|PDBID|CHAIN|SEQUENCE
MKT
AYI

>1ABC:B|PDBID|CHAIN|SEQUENCE
GHV
";

    #[test]
    fn header_parse_extracts_id_and_chain() {
        let header = RecordHeader::parse(">101M:A|PDBID|CHAIN|SEQUENCE").unwrap();
        assert_eq!(header.pdb_id, "101M");
        assert_eq!(header.chain_id, "A");
    }

    #[test]
    fn header_parse_rejects_lines_without_chain_token() {
        assert!(RecordHeader::parse(">101M_1|Chain A|MYOGLOBIN").is_none());
        assert!(RecordHeader::parse("MKT").is_none());
    }

    #[test]
    fn header_matches_ignores_case() {
        let header = RecordHeader::parse(">1abc:a|x").unwrap();
        assert!(header.matches("1ABC", "A"));
        assert!(!header.matches("1ABC", "B"));
    }

    #[test]
    fn all_chains_collects_two_record_feed() {
        let feed = ">1ABC:A|...\nMKT\n>1ABC:B|...\nGHV\n";
        let records = parse_all_chains(feed.lines()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records["A"], "MKT");
        assert_eq!(records["B"], "GHV");
    }

    #[test]
    fn all_chains_joins_multi_line_sequences_and_skips_blank_lines() {
        let records = parse_all_chains(FEED.lines()).unwrap();
        assert_eq!(records["A"], "MKTAYI");
        assert_eq!(records["B"], "GHV");
    }

    #[test]
    fn all_chains_keeps_last_duplicate_chain() {
        let feed = ">X:A|\nAAA\n>X:A|\nCCC\n";
        let records = parse_all_chains(feed.lines()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records["A"], "CCC");
    }

    #[test]
    fn all_chains_keeps_trailing_empty_record() {
        let records = parse_all_chains(">X:A|\nAAA\n>X:B|\n".lines()).unwrap();
        assert_eq!(records["B"], "");
    }

    #[test]
    fn all_chains_fails_on_malformed_header() {
        let result = parse_all_chains(">1ABC:A|x\nMKT\n>broken\nGHV\n".lines());
        assert_eq!(
            result,
            Err(FastaError::MalformedHeader {
                line: 3,
                content: ">broken".to_string()
            })
        );
    }

    #[test]
    fn all_chains_of_empty_feed_is_empty() {
        assert!(parse_all_chains("".lines()).unwrap().is_empty());
    }

    #[test]
    fn single_chain_returns_requested_record_only() {
        assert_eq!(
            parse_single_chain(FEED.lines(), "1abc", "a"),
            Some("MKTAYI".to_string())
        );
        assert_eq!(
            parse_single_chain(FEED.lines(), "1ABC", "B"),
            Some("GHV".to_string())
        );
    }

    #[test]
    fn single_chain_does_not_match_chain_prefix() {
        let feed = ">1ABC:AB|x\nKKK\n>1ABC:A|x\nMMM\n";
        assert_eq!(
            parse_single_chain(feed.lines(), "1ABC", "A"),
            Some("MMM".to_string())
        );
    }

    #[test]
    fn single_chain_returns_none_when_absent() {
        assert_eq!(parse_single_chain(FEED.lines(), "1ABC", "C"), None);
    }
}
