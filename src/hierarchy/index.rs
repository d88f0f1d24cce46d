use std::io::BufRead;

use smallvec::SmallVec;
use tracing::debug;

use super::{PATH_SEPARATOR, PathTable, SignalDef};
use crate::error::{Error, Result};
use crate::reader::TraceReader;

/// Reads the declaration section of a trace up to and including `$enddefinitions`.
///
/// Scopes are tracked on a stack; every `$var` is recorded under the path formed by the
/// open scopes and its name. On return the reader is positioned on the first line of
/// the value-change section.
pub fn index_header<R: BufRead>(reader: &mut TraceReader<R>) -> Result<PathTable> {
    let mut scopes: SmallVec<[String; 8]> = SmallVec::new();
    let mut table = PathTable::default();

    loop {
        let Some(line) = reader.next_line()? else {
            return Err(Error::malformed("can't find word \"$enddefinitions\""));
        };
        let mut words = line.split_whitespace();
        let Some(keyword) = words.next() else {
            continue;
        };

        match keyword {
            "$enddefinitions" => break,
            "$scope" => {
                let name = words
                    .nth(1)
                    .ok_or_else(|| Error::malformed("$scope without a name"))?;
                scopes.push(name.to_string());
            }
            "$var" => {
                let (Some(_kind), Some(width), Some(id), Some(name)) =
                    (words.next(), words.next(), words.next(), words.next())
                else {
                    return Err(Error::malformed(format!("incomplete declaration: {line}")));
                };
                let width: u32 = width
                    .parse()
                    .ok()
                    .filter(|w| *w > 0)
                    .ok_or_else(|| Error::malformed(format!("bad width `{width}` for `{name}`")))?;

                let mut path = String::new();
                for scope in &scopes {
                    path.push_str(scope);
                    path.push(PATH_SEPARATOR);
                }
                path.push_str(name);
                table.insert(path, SignalDef::new(name, id, width));
            }
            "$upscope" => {
                scopes
                    .pop()
                    .ok_or_else(|| Error::malformed("$upscope without an open scope"))?;
            }
            _ => {}
        }
    }

    debug!(
        signals = table.len(),
        clock = table.clock_path().unwrap_or_default(),
        "indexed trace header"
    );
    Ok(table)
}
