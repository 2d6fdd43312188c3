//! Class lists and their index/name lookup tables.
//!
//! A class file assigns each class name an index by its position among the
//! non-empty lines of the file. Two views are kept side by side:
//! index→name, which always has one entry per class line, and name→index,
//! where a repeated name keeps the index of its last occurrence.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::RemapError;

const YAML_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// A class index as it appears in the first column of a YOLO label line.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassIndex(pub u64);

impl ClassIndex {
    /// Creates a new ClassIndex.
    #[inline]
    pub fn new(index: u64) -> Self {
        Self(index)
    }

    /// Returns the underlying u64 value.
    #[inline]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ClassIndex {
    fn from(index: u64) -> Self {
        Self(index)
    }
}

impl fmt::Debug for ClassIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassIndex({})", self.0)
    }
}

impl fmt::Display for ClassIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Both lookup views over one class list.
///
/// Immutable once built; a run builds one table for the original class file
/// and one for the target class file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassTable {
    index_to_name: BTreeMap<ClassIndex, String>,
    name_to_index: BTreeMap<String, ClassIndex>,
    duplicates: Vec<String>,
}

impl ClassTable {
    /// Builds a table from class names in file order.
    ///
    /// Names are trimmed; names that are empty after trimming are skipped and
    /// do not consume an index.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = names
            .into_iter()
            .filter_map(|name| {
                let trimmed = name.as_ref().trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .enumerate()
            .map(|(index, name)| (ClassIndex::new(index as u64), name));

        Self::from_entries(entries)
    }

    /// Builds a table from explicit `(index, name)` pairs.
    ///
    /// Entries are applied in iteration order, so a later entry with the same
    /// name wins in the name→index view.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (ClassIndex, String)>,
    {
        let mut table = Self::default();

        for (index, name) in entries {
            if let Some(previous) = table.name_to_index.insert(name.clone(), index) {
                if previous != index && !table.duplicates.contains(&name) {
                    table.duplicates.push(name.clone());
                }
            }
            table.index_to_name.insert(index, name);
        }

        table
    }

    /// Parses a newline-delimited class list.
    pub fn parse_text(text: &str) -> Self {
        Self::from_names(text.lines())
    }

    /// Reads a class list from disk.
    ///
    /// `.yaml`/`.yml` files are read as an Ultralytics dataset config and
    /// their `names` key is used; any other file is a plain text list.
    pub fn read(path: &Path) -> Result<Self, RemapError> {
        let data = fs::read_to_string(path).map_err(|source| RemapError::ClassFileRead {
            path: path.to_path_buf(),
            source,
        })?;

        if is_yaml_path(path) {
            parse_data_yaml(&data, path)
        } else {
            Ok(Self::parse_text(&data))
        }
    }

    /// Looks up the name for a class index.
    pub fn name(&self, index: ClassIndex) -> Option<&str> {
        self.index_to_name.get(&index).map(String::as_str)
    }

    /// Looks up the index for a class name (last occurrence wins).
    pub fn index_of(&self, name: &str) -> Option<ClassIndex> {
        self.name_to_index.get(name).copied()
    }

    /// Number of classes in the index→name view.
    pub fn len(&self) -> usize {
        self.index_to_name.len()
    }

    /// Returns true if the class list has no classes.
    pub fn is_empty(&self) -> bool {
        self.index_to_name.is_empty()
    }

    /// Number of distinct names, i.e. the size of the name→index view.
    pub fn distinct_names(&self) -> usize {
        self.name_to_index.len()
    }

    /// Names that appeared more than once, in order of first repetition.
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }

    pub fn index_to_name(&self) -> &BTreeMap<ClassIndex, String> {
        &self.index_to_name
    }

    pub fn name_to_index(&self) -> &BTreeMap<String, ClassIndex> {
        &self.name_to_index
    }
}

#[derive(Debug, Deserialize)]
struct DataYaml {
    names: DataYamlNames,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DataYamlNames {
    Sequence(Vec<String>),
    Mapping(BTreeMap<u64, String>),
}

fn parse_data_yaml(data: &str, path: &Path) -> Result<ClassTable, RemapError> {
    let parsed: DataYaml =
        serde_yaml::from_str(data).map_err(|source| RemapError::ClassFileYamlParse {
            path: path.to_path_buf(),
            source,
        })?;

    let table = match parsed.names {
        DataYamlNames::Sequence(names) => ClassTable::from_names(names),
        DataYamlNames::Mapping(mapping) => ClassTable::from_entries(
            mapping
                .into_iter()
                .map(|(index, name)| (ClassIndex::new(index), name.trim().to_string()))
                .filter(|(_, name)| !name.is_empty()),
        ),
    };

    Ok(table)
}

fn is_yaml_path(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };

    YAML_EXTENSIONS
        .iter()
        .any(|yaml_ext| ext.eq_ignore_ascii_case(yaml_ext))
}
