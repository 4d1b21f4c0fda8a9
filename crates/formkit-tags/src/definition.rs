use formkit_conf::TagColumns;
use rustc_hash::FxHashSet;

/// Attribute rules for one tag, as read from the attribute store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDefinition {
    name: String,
    allowed_attributes: FxHashSet<String>,
    standard_attributes: Vec<String>,
}

impl TagDefinition {
    #[must_use]
    pub fn new<A, S>(name: impl Into<String>, allowed: A, standard: S) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        let mut standard_attributes: Vec<String> = Vec::new();
        for attr in standard {
            let attr = attr.into();
            if !standard_attributes.contains(&attr) {
                standard_attributes.push(attr);
            }
        }

        Self {
            name: name.into(),
            allowed_attributes: allowed.into_iter().map(Into::into).collect(),
            standard_attributes,
        }
    }

    /// Build a definition from its two comma-separated columns.
    #[must_use]
    pub fn from_columns(name: impl Into<String>, columns: &TagColumns) -> Self {
        Self::new(
            name,
            split_column(&columns.allowed_attributes),
            split_column(&columns.standard_attributes),
        )
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_allowed(&self, attribute: &str) -> bool {
        self.allowed_attributes.contains(attribute)
    }

    #[must_use]
    pub fn allowed_attributes(&self) -> &FxHashSet<String> {
        &self.allowed_attributes
    }

    /// Attributes rendered, with empty values, when the caller supplies none.
    #[must_use]
    pub fn standard_attributes(&self) -> &[String] {
        &self.standard_attributes
    }
}

/// Split a comma-separated column into trimmed, non-empty entries.
pub fn split_column(column: &str) -> impl Iterator<Item = &str> {
    column.split(',').map(str::trim).filter(|entry| !entry.is_empty())
}
