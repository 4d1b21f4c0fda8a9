use std::collections::BTreeMap;
use std::fs;

use camino::Utf8Path;
use formkit_conf::TagColumns;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

use crate::AttributeStore;
use crate::TagDefinition;

const BUILTIN_TABLE: &str = include_str!("../tags/html.toml");

#[derive(Debug, Error)]
pub enum TagTableError {
    #[error("Failed to read tag table: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Tag table entry has an empty name")]
    EmptyTagName,
}

#[derive(Debug, Default, Deserialize)]
struct TableFile {
    #[serde(default)]
    tags: BTreeMap<String, TagColumns>,
}

/// Tag definitions keyed by tag name, stored as their raw columns.
///
/// Every lookup parses the columns afresh; wrap the table in a
/// [`CachedStore`](crate::CachedStore) to memoize.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TagTable(FxHashMap<String, TagColumns>);

impl TagTable {
    /// Build a table from `(name, columns)` rows, rejecting blank names.
    pub fn from_columns<I, K>(rows: I) -> Result<Self, TagTableError>
    where
        I: IntoIterator<Item = (K, TagColumns)>,
        K: Into<String>,
    {
        let mut table = FxHashMap::default();
        for (name, columns) in rows {
            let name = name.into();
            let name = name.trim();
            if name.is_empty() {
                return Err(TagTableError::EmptyTagName);
            }
            table.insert(name.to_string(), columns);
        }
        Ok(TagTable(table))
    }

    /// Parse a table from TOML text with `[tags.<name>]` entries.
    pub fn from_toml_str(content: &str) -> Result<Self, TagTableError> {
        let file: TableFile = toml::from_str(content)?;
        Self::from_columns(file.tags)
    }

    pub fn load_from_toml(path: &Utf8Path) -> Result<Self, TagTableError> {
        let content = fs::read_to_string(path)?;
        let table = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded {} tag definition(s) from {}", table.len(), path);
        Ok(table)
    }

    /// The HTML form table shipped with the crate.
    pub fn builtin() -> Result<Self, TagTableError> {
        Self::from_toml_str(BUILTIN_TABLE)
    }

    /// Merge another table into this one, with the other taking precedence
    pub fn merge(&mut self, other: TagTable) -> &mut Self {
        self.0.extend(other.0);
        self
    }

    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains_key(tag)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl AttributeStore for TagTable {
    fn lookup(&self, tag: &str) -> Option<TagDefinition> {
        let Some(columns) = self.0.get(tag) else {
            tracing::debug!("No tag definition for '{}'", tag);
            return None;
        };
        Some(TagDefinition::from_columns(tag, columns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(allowed: &str, standard: &str) -> TagColumns {
        TagColumns {
            allowed_attributes: allowed.to_string(),
            standard_attributes: standard.to_string(),
        }
    }

    mod builtin {
        use super::*;

        #[test]
        fn test_builtin_table_loads() {
            let table = TagTable::builtin().unwrap();
            assert!(!table.is_empty());
            for name in table.names() {
                assert!(!name.is_empty(), "Tag name should not be empty");
            }
        }

        #[test]
        fn test_builtin_form_and_p() {
            let table = TagTable::builtin().unwrap();

            let form = table.lookup("form").expect("form tag should be present");
            assert!(form.is_allowed("action"));
            assert!(form.is_allowed("method"));
            assert_eq!(form.standard_attributes(), ["action", "method"]);

            let p = table.lookup("p").expect("p tag should be present");
            assert!(p.is_allowed("class"));
            assert!(!p.is_allowed("bogus"));
            assert_eq!(p.standard_attributes(), ["class", "id"]);
        }

        #[test]
        fn test_builtin_has_no_script() {
            let table = TagTable::builtin().unwrap();
            assert!(table.lookup("script").is_none());
        }
    }

    mod loading {
        use std::fs;

        use super::*;

        #[test]
        fn test_from_toml_str() {
            let content = r#"
[tags.section]
allowed_attributes = "class, id"
standard_attributes = "id"
"#;
            let table = TagTable::from_toml_str(content).unwrap();
            let section = table.lookup("section").unwrap();
            assert!(section.is_allowed("id"));
            assert_eq!(section.standard_attributes(), ["id"]);
        }

        #[test]
        fn test_missing_tags_table_is_empty() {
            let table = TagTable::from_toml_str("title = \"unrelated\"").unwrap();
            assert!(table.is_empty());
        }

        #[test]
        fn test_load_from_toml_file() {
            let dir = tempfile::tempdir().unwrap();
            let path = Utf8Path::from_path(dir.path()).unwrap().join("tags.toml");
            fs::write(&path, "[tags.hr]\nallowed_attributes = \"class\"\n").unwrap();

            let table = TagTable::load_from_toml(&path).unwrap();
            assert!(table.contains("hr"));
        }

        #[test]
        fn test_load_missing_file_is_io_error() {
            let dir = tempfile::tempdir().unwrap();
            let path = Utf8Path::from_path(dir.path()).unwrap().join("absent.toml");
            assert!(matches!(
                TagTable::load_from_toml(&path),
                Err(TagTableError::Io(_))
            ));
        }

        #[test]
        fn test_invalid_toml() {
            assert!(matches!(
                TagTable::from_toml_str("[tags.p\nallowed_attributes ="),
                Err(TagTableError::Toml(_))
            ));
        }

        #[test]
        fn test_blank_name_rejected() {
            let result = TagTable::from_columns([("  ", columns("class", ""))]);
            assert!(matches!(result, Err(TagTableError::EmptyTagName)));
        }
    }

    mod merging {
        use super::*;

        #[test]
        fn test_merge_other_takes_precedence() {
            let mut base = TagTable::from_columns([
                ("p", columns("class", "class")),
                ("div", columns("class", "")),
            ])
            .unwrap();
            let overrides = TagTable::from_columns([
                ("p", columns("class,lang", "lang")),
                ("section", columns("id", "")),
            ])
            .unwrap();

            base.merge(overrides);

            assert_eq!(base.len(), 3);
            let p = base.lookup("p").unwrap();
            assert!(p.is_allowed("lang"));
            assert_eq!(p.standard_attributes(), ["lang"]);
            assert!(base.contains("div"));
        }
    }

    #[test]
    fn test_lookup_returns_fresh_definition() {
        let table = TagTable::from_columns([("p", columns("class", "class"))]).unwrap();
        assert_eq!(table.lookup("p"), table.lookup("p"));
        assert!(table.lookup("P").is_none());
    }
}
