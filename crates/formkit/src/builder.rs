//! Opening-tag construction validated against an [`AttributeStore`].
//!
//! There is one entry point for every tag: the tag name is a runtime string
//! looked up in the store, and the store's columns decide which attributes
//! survive.

use formkit_tags::AttributeStore;
use formkit_tags::TagDefinition;

use crate::attributes::render_attributes;
use crate::Attributes;

const FORM_TAG: &str = "form";

/// Build the opening tag for `tag`, or `None` if the store does not know it.
///
/// With no attributes (or an empty set) the tag's standard attributes are
/// rendered with empty values. Otherwise only the allowed attributes are
/// kept, in the caller's order; the rest are dropped without error.
pub fn build_tag<S>(store: &S, tag: &str, attrs: Option<&Attributes>) -> Option<String>
where
    S: AttributeStore + ?Sized,
{
    let definition = store.lookup(tag)?;
    let resolved = resolve_attributes(&definition, attrs);
    Some(open_tag(tag, &resolved))
}

/// Build the `<form>` opening tag that seeds every document.
///
/// Unlike [`build_tag`] this always yields a fragment. Without a `form`
/// definition in the store, explicit attributes pass through unfiltered.
pub fn build_form_tag<S>(store: &S, attrs: Option<&Attributes>) -> String
where
    S: AttributeStore + ?Sized,
{
    match store.lookup(FORM_TAG) {
        Some(definition) => open_tag(FORM_TAG, &resolve_attributes(&definition, attrs)),
        None => open_tag(FORM_TAG, attrs.unwrap_or(&Attributes::new())),
    }
}

fn resolve_attributes(definition: &TagDefinition, attrs: Option<&Attributes>) -> Attributes {
    let Some(attrs) = attrs.filter(|attrs| !attrs.is_empty()) else {
        return definition
            .standard_attributes()
            .iter()
            .map(|name| (name.as_str(), ""))
            .collect();
    };

    let mut kept = Attributes::new();
    for (name, value) in attrs.iter() {
        if definition.is_allowed(name) {
            kept.insert(name, value);
        } else {
            tracing::debug!(
                "Dropping attribute '{}' not allowed on <{}>",
                name,
                definition.name()
            );
        }
    }
    kept
}

fn open_tag(tag: &str, attrs: &Attributes) -> String {
    format!("<{tag}{}>", render_attributes(attrs))
}
