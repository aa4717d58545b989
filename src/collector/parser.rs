//! Parser for the memcached text protocol `stats` family of replies.
//!
//! Pure functions over `&str` so they can be tested with captured replies.
//! Every malformed line becomes a [`LineError`]; callers skip such lines and
//! keep going.

use crate::model::CapacityError;

/// Reason a reply line was not applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineError {
    /// Line does not start with the `STAT` token (`END`, junk).
    #[error("not a STAT line")]
    NotStat,
    /// Fewer than three whitespace-separated tokens.
    #[error("expected `STAT <key> <value>`")]
    MissingTokens,
    /// Text before the first colon is not an integer.
    #[error("slab id `{0}` is not an integer")]
    BadSlabId(String),
    /// Slab ids are 1-based.
    #[error("slab id {0} is not positive")]
    NonPositiveSlabId(i64),
    /// Numeric field with a non-numeric value.
    #[error("value `{value}` of `{field}` is not a number")]
    BadNumber { field: String, value: String },
    /// Slab id beyond the snapshot bound.
    #[error(transparent)]
    OutOfRange(#[from] CapacityError),
}

/// One `STAT <key> <value>` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatLine<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

/// Scope encoded in a stat key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKey<'a> {
    /// Server-wide key such as `cmd_get`, `active_slabs`.
    Global(&'a str),
    /// `<slab_id>:<field>`, optionally prefixed with `items:`.
    Slab { id: u32, field: &'a str },
}

impl<'a> StatKey<'a> {
    /// Splits a key into its scope.
    ///
    /// `"1:chunk_size"` and `"items:1:evicted"` are slab keys for slab 1,
    /// `"uptime"` is global.
    pub fn parse(key: &'a str) -> Result<Self, LineError> {
        let key = key.strip_prefix("items:").unwrap_or(key);
        let Some((id, field)) = key.split_once(':') else {
            return Ok(StatKey::Global(key));
        };
        let id: i64 = id
            .parse()
            .map_err(|_| LineError::BadSlabId(id.to_string()))?;
        if id <= 0 {
            return Err(LineError::NonPositiveSlabId(id));
        }
        let id = u32::try_from(id).map_err(|_| LineError::BadSlabId(id.to_string()))?;
        Ok(StatKey::Slab { id, field })
    }
}

/// Splits a reply blob into lines on CR/LF, dropping empty fragments.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(['\r', '\n']).filter(|l| !l.is_empty())
}

/// Parses a single reply line.
///
/// Tokens beyond the third are ignored.
pub fn parse_line(line: &str) -> Result<StatLine<'_>, LineError> {
    let mut tokens = line.split_whitespace();
    if tokens.next() != Some("STAT") {
        return Err(LineError::NotStat);
    }
    match (tokens.next(), tokens.next()) {
        (Some(key), Some(value)) => Ok(StatLine { key, value }),
        _ => Err(LineError::MissingTokens),
    }
}

/// Parses every line of a reply blob.
pub fn parse_reply(text: &str) -> impl Iterator<Item = Result<StatLine<'_>, LineError>> {
    split_lines(text).map(parse_line)
}

/// Parses a counter or gauge value.
pub fn parse_number(field: &str, value: &str) -> Result<u64, LineError> {
    value.parse().map_err(|_| LineError::BadNumber {
        field: field.to_string(),
        value: value.to_string(),
    })
}
