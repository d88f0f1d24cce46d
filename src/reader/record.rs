#![allow(missing_docs)]

use crate::error::{Error, Result};
use crate::types::Logic;

/// A single line of the value-change section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record<'a> {
    /// `<bit><id>`
    Scalar { value: Logic, id: &'a str },
    /// `b<bits> <id>`
    Vector { bits: &'a str, id: &'a str },
    /// `#<time>`
    Timestamp(u64),
    /// Directives (`$dumpvars`, `$end`, ...) and real-valued changes, which are not sampled.
    Ignored,
}

/// Classifies a body line by its leading character.
///
/// Returns `Ok(None)` for blank lines. Only the first word of a line is considered,
/// except for vector records whose identifier is the second word.
pub fn parse_record(line: &str) -> Result<Option<Record<'_>>> {
    let mut words = line.split_whitespace();
    let Some(first) = words.next() else {
        return Ok(None);
    };
    let mut chars = first.chars();
    let Some(lead) = chars.next() else {
        return Ok(None);
    };
    let rest = chars.as_str();

    let record = match lead {
        '$' | 'r' => Record::Ignored,
        'b' => {
            if rest.is_empty() {
                return Err(Error::invalid(format!("empty vector value: {line}")));
            }
            let id = words
                .next()
                .ok_or_else(|| Error::invalid(format!("vector value without identifier: {line}")))?;
            Record::Vector { bits: rest, id }
        }
        '#' => {
            let time = rest
                .parse::<u64>()
                .map_err(|_| Error::invalid(format!("bad timestamp `{first}`")))?;
            Record::Timestamp(time)
        }
        other => match Logic::from_char(other) {
            Some(value) => Record::Scalar { value, id: rest },
            None => return Err(Error::UnexpectedToken(other)),
        },
    };
    Ok(Some(record))
}
