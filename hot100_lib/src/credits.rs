//! Artist credit parsing.
//!
//! A chart row credits its performers in one element whose text is split
//! across sub-elements, e.g. `<a>SZA</a> Featuring <a>Phoebe Bridgers</a>`.
//! The parser turns those text segments into individual names.

use regex::Regex;

use crate::error::ParseError;

/// Connector tokens that are never artist names on their own.
pub const STOPLIST: [&str; 3] = [",", "x", "With"];

const FEATURING_PATTERN: &str = r"(?i)\b(?:featuring\b|ft\.)";

/// Splits credit text into performer names.
#[derive(Debug, Clone)]
pub struct CreditParser {
    featuring: Regex,
}

impl CreditParser {
    pub fn new() -> Result<Self, ParseError> {
        Ok(Self {
            featuring: Regex::new(FEATURING_PATTERN)?,
        })
    }

    /// Parses a single raw credit string.
    pub fn parse(&self, raw: &str) -> Vec<String> {
        self.parse_segments(&[raw])
    }

    /// Parses the text segments of one credit element, in order.
    ///
    /// Returns an empty list when nothing usable remains; callers treat
    /// that as a data-quality problem rather than an error.
    pub fn parse_segments<S: AsRef<str>>(&self, segments: &[S]) -> Vec<String> {
        let segments: Vec<&str> = segments
            .iter()
            .map(|s| s.as_ref().trim())
            .filter(|s| !s.is_empty())
            .collect();

        let names = match segments.as_slice() {
            [single] => self.split_single(single),
            _ => segments.iter().flat_map(|s| self.split_segment(s)).collect(),
        };

        names
            .into_iter()
            .filter(|name| !STOPLIST.contains(&name.trim()))
            .map(|name| collapse_whitespace(&name.replace(',', "")))
            .filter(|name| !name.is_empty())
            .collect()
    }

    /// Splits one segment of a multi-segment credit.
    ///
    /// A featuring keyword splits once, on its first match, and the halves
    /// are not split further. Otherwise a single `&` separates two artists,
    /// while two or more mark a group name that keeps all but the first `&`.
    pub fn split_segment(&self, segment: &str) -> Vec<String> {
        if let Some(parts) = self.split_featuring(segment) {
            return parts;
        }

        match segment.matches('&').count() {
            0 => vec![segment.to_string()],
            1 => split_ampersand(segment),
            _ => vec![segment.replacen('&', "", 1)],
        }
    }

    /// Splits a credit that arrived as one plain-text segment.
    ///
    /// Without sub-elements a comma cannot be told apart from part of a
    /// name, so a comma counts like an extra `&`: only `A & B` splits, and
    /// any longer list stays one name with its first `&` removed.
    fn split_single(&self, segment: &str) -> Vec<String> {
        if let Some(parts) = self.split_featuring(segment) {
            return parts;
        }

        let ampersands = segment.matches('&').count();
        let commas = segment.matches(',').count();
        if ampersands == 1 && commas == 0 {
            split_ampersand(segment)
        } else {
            vec![segment.replacen('&', "", 1)]
        }
    }

    fn split_featuring(&self, segment: &str) -> Option<Vec<String>> {
        let m = self.featuring.find(segment)?;
        Some(non_empty_parts([&segment[..m.start()], &segment[m.end()..]]))
    }
}

fn split_ampersand(segment: &str) -> Vec<String> {
    non_empty_parts(segment.split('&'))
}

fn non_empty_parts<'a>(parts: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    parts
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Display form of a credit: whitespace runs collapsed and `Featuring`
/// abbreviated to `ft.`.
pub fn abbreviate_featuring(credits: &str) -> String {
    collapse_whitespace(credits).replace("Featuring", "ft.")
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
