use std::borrow::Cow;

/// Escape `&`, `<`, `>`, `"` and `'` in one fragment.
#[must_use]
pub fn escape_fragment(fragment: &str) -> Cow<'_, str> {
    html_escape::encode_quoted_attribute(fragment)
}

/// Escape every fragment, leaving the source sequence untouched.
#[must_use]
pub fn escape_fragments<T: AsRef<str>>(fragments: &[T]) -> Vec<String> {
    fragments
        .iter()
        .map(|fragment| escape_fragment(fragment.as_ref()).into_owned())
        .collect()
}
