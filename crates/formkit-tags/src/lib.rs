//! The attribute store: which attributes each HTML tag accepts.
//!
//! A tag is described by two comma-separated columns, `allowed_attributes`
//! and `standard_attributes`. [`TagTable`] holds those rows (builtin, loaded
//! from TOML, or taken from project settings) and answers
//! [`AttributeStore::lookup`] with a parsed [`TagDefinition`].
//! [`CachedStore`] memoizes any store.

mod definition;
mod store;
mod table;

pub use definition::split_column;
pub use definition::TagDefinition;
pub use store::AttributeStore;
pub use store::CachedStore;
pub use table::TagTable;
pub use table::TagTableError;
