//! Build HTML `<form>` markup from tag fragments checked against an
//! attribute allow-list.
//!
//! ## Key Components
//!
//! - [`Attributes`] and [`render_attributes`]: ordered attribute maps and
//!   their ` name="value"` serialization
//! - [`build_tag`] / [`build_form_tag`]: one opening tag, with attributes
//!   filtered through an [`AttributeStore`]
//! - [`FormDocument`]: the ordered fragment list, with append, reorder,
//!   escape and render-to-file
//!
//! ## Example
//!
//! ```no_run
//! use formkit::{Attributes, FormDocument, Settings};
//! use camino::Utf8Path;
//!
//! let settings = Settings::new(Utf8Path::new("."))?;
//! let store = formkit::open_store(&settings)?;
//!
//! let attrs = Attributes::from([("action", "/subscribe"), ("method", "post")]);
//! let mut form = FormDocument::from_settings("newsletter", Some(&attrs), store, &settings);
//! form.append("input", Some(&Attributes::from([("type", "email"), ("name", "email")])));
//! form.append("button", None);
//! form.render_to_text(None)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod attributes;
mod builder;
mod document;
mod error;
mod escape;

pub use attributes::render_attributes;
pub use attributes::Attributes;
pub use builder::build_form_tag;
pub use builder::build_tag;
pub use document::FormDocument;
pub use document::TagRequest;
pub use error::RenderError;
pub use error::ReorderError;
pub use escape::escape_fragment;
pub use escape::escape_fragments;
pub use formkit_conf::Settings;
pub use formkit_tags::AttributeStore;
pub use formkit_tags::CachedStore;
pub use formkit_tags::TagDefinition;
pub use formkit_tags::TagTable;
pub use formkit_tags::TagTableError;

/// The builtin tag table with the project's `[tags]` entries layered on top.
pub fn load_tag_table(settings: &Settings) -> Result<TagTable, TagTableError> {
    let mut table = TagTable::builtin()?;
    table.merge(TagTable::from_columns(settings.tags.clone())?);
    Ok(table)
}

/// [`load_tag_table`], memoized unless `cache_lookups` is off.
pub fn open_store(settings: &Settings) -> Result<Box<dyn AttributeStore>, TagTableError> {
    let table = load_tag_table(settings)?;
    if settings.cache_lookups {
        Ok(Box::new(CachedStore::new(table)))
    } else {
        Ok(Box::new(table))
    }
}
