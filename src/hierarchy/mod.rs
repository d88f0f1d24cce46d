//! Signal declarations indexed by hierarchical path.

use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::types::DisplayFormat;

mod index;
pub use index::index_header;

/// Separator used between scope names and the variable name of a path.
pub const PATH_SEPARATOR: char = '/';

/// Declaration of a single traced variable.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SignalDef {
    /// Variable name without its scope prefix.
    pub name: String,
    /// Identifier code used by value-change records.
    pub id: String,
    /// Declared bit width.
    pub width: u32,
    /// Explicit display format, if one was assigned.
    pub format: Option<DisplayFormat>,
}

impl SignalDef {
    /// Creates a declaration without a display format.
    pub fn new(name: impl Into<String>, id: impl Into<String>, width: u32) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            width,
            format: None,
        }
    }

    /// Format used for data labels, falling back to lower-case hexadecimal.
    pub fn display_format(&self) -> DisplayFormat {
        self.format.unwrap_or_default()
    }

    /// Returns `true` for vectors, which carry a data string in the output.
    pub fn is_multi_bit(&self) -> bool {
        self.width > 1
    }
}

/// Strips leading and trailing separators from a user supplied path.
pub fn normalize_path(path: &str) -> &str {
    path.trim_matches(PATH_SEPARATOR)
}

/// Ordered set of unique signal paths. The first path designates the clock.
///
/// The order never changes after construction and decides the row order of the
/// generated document.
#[derive(Debug, Clone, Default)]
pub struct PathTable {
    paths: Vec<String>,
    signals: HashMap<String, SignalDef>,
}

impl PathTable {
    /// Appends a declaration. A path that was already declared keeps its first definition.
    pub(crate) fn insert(&mut self, path: String, def: SignalDef) {
        if self.signals.contains_key(&path) {
            debug!(%path, "ignoring re-declared variable");
            return;
        }
        self.paths.push(path.clone());
        self.signals.insert(path, def);
    }

    /// Paths in table order.
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Looks up the declaration of `path`.
    pub fn get(&self, path: &str) -> Option<&SignalDef> {
        self.signals.get(normalize_path(path))
    }

    /// Path of the clock signal, i.e. the first entry.
    pub fn clock_path(&self) -> Option<&str> {
        self.paths.first().map(String::as_str)
    }

    /// Declaration of the clock signal.
    pub fn clock(&self) -> Option<&SignalDef> {
        self.clock_path().and_then(|path| self.signals.get(path))
    }

    /// Iterates over `(path, declaration)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SignalDef)> + '_ {
        self.paths
            .iter()
            .filter_map(|path| self.signals.get(path).map(|def| (path.as_str(), def)))
    }

    /// Iterates over every entry but the clock.
    pub fn data_signals(&self) -> impl Iterator<Item = (&str, &SignalDef)> + '_ {
        self.iter().skip(1)
    }

    /// Restricts the table to `paths`, in the given order.
    ///
    /// An empty request keeps every declared signal in declaration order. Unknown paths
    /// fail with [`Error::UnknownSignal`]; repeated paths are dropped.
    pub fn select<I, S>(self, paths: I) -> Result<PathTableBuilder>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selected = PathTable::default();
        for requested in paths {
            let path = normalize_path(requested.as_ref());
            if selected.signals.contains_key(path) {
                warn!(%path, "dropping repeated signal path");
                continue;
            }
            let def = self
                .signals
                .get(path)
                .ok_or_else(|| Error::UnknownSignal(path.to_string()))?;
            selected.insert(path.to_string(), def.clone());
        }

        let table = if selected.is_empty() { self } else { selected };
        Ok(PathTableBuilder { table })
    }
}

/// Final configuration step of a [`PathTable`]: assigns display formats before sampling.
#[derive(Debug, Clone)]
pub struct PathTableBuilder {
    table: PathTable,
}

impl PathTableBuilder {
    /// Read-only view of the table being configured.
    pub fn table(&self) -> &PathTable {
        &self.table
    }

    /// Assigns the display format of `path` from its character code.
    pub fn set_format(&mut self, path: &str, code: char) -> Result<&mut Self> {
        let format = DisplayFormat::from_char(code)?;
        let path = normalize_path(path);
        let def = self
            .table
            .signals
            .get_mut(path)
            .ok_or_else(|| Error::UnknownSignal(path.to_string()))?;
        debug!(%path, format = %code, "display format assigned");
        def.format = Some(format);
        Ok(self)
    }

    /// Freezes the table. Fails when there is no clock to sample against.
    pub fn build(self) -> Result<PathTable> {
        if self.table.is_empty() {
            return Err(Error::invalid("no signals to sample"));
        }
        Ok(self.table)
    }
}
