use std::fs;

use camino::Utf8Path;
use camino::Utf8PathBuf;
use formkit_conf::Settings;
use formkit_tags::AttributeStore;

use crate::builder::build_form_tag;
use crate::builder::build_tag;
use crate::escape::escape_fragment;
use crate::escape::escape_fragments;
use crate::Attributes;
use crate::RenderError;
use crate::ReorderError;

const FORM_CLOSE: &str = "</form>";

/// One `{ tag, attrs }` pair for [`FormDocument::append_many`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRequest {
    pub tag: String,
    pub attrs: Option<Attributes>,
}

impl TagRequest {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: None,
        }
    }

    #[must_use]
    pub fn with_attributes(mut self, attrs: impl Into<Attributes>) -> Self {
        self.attrs = Some(attrs.into());
        self
    }
}

/// An HTML form under construction.
///
/// Holds the rendered opening tags in order. The first fragment is always
/// the `<form>` tag; the closing `</form>` is only added on output.
#[derive(Debug)]
pub struct FormDocument<S> {
    name: String,
    fragments: Vec<String>,
    store: S,
    output_dir: Option<Utf8PathBuf>,
}

impl<S: AttributeStore> FormDocument<S> {
    pub fn new(name: impl Into<String>, attrs: Option<&Attributes>, store: S) -> Self {
        let form = build_form_tag(&store, attrs);
        Self {
            name: name.into(),
            fragments: vec![form],
            store,
            output_dir: None,
        }
    }

    /// Like [`FormDocument::new`], taking the output directory from settings.
    pub fn from_settings(
        name: impl Into<String>,
        attrs: Option<&Attributes>,
        store: S,
        settings: &Settings,
    ) -> Self {
        let mut document = Self::new(name, attrs, store);
        document.output_dir.clone_from(&settings.output_dir);
        document
    }

    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<Utf8PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn output_dir(&self) -> Option<&Utf8Path> {
        self.output_dir.as_deref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Append the opening tag for `tag`.
    ///
    /// Returns `false`, leaving the document untouched, when the store has
    /// no definition for `tag`.
    pub fn append(&mut self, tag: &str, attrs: Option<&Attributes>) -> bool {
        match build_tag(&self.store, tag, attrs) {
            Some(fragment) => {
                self.fragments.push(fragment);
                true
            }
            None => {
                tracing::debug!("Skipping unknown tag <{}> in form '{}'", tag, self.name);
                false
            }
        }
    }

    /// Append each request in order, returning how many produced a fragment.
    pub fn append_many<I>(&mut self, requests: I) -> usize
    where
        I: IntoIterator<Item = TagRequest>,
    {
        let mut appended = 0;
        for request in requests {
            if self.append(&request.tag, request.attrs.as_ref()) {
                appended += 1;
            }
        }
        appended
    }

    /// The fragments, escaped. The document itself is not changed.
    pub fn escaped(&self) -> Vec<String> {
        escape_fragments(&self.fragments)
    }

    /// Rearrange the interior fragments.
    ///
    /// `new_order` lists 1-based positions and must be as long as the
    /// fragment list. Entries naming the first or last position are skipped:
    /// those two fragments never move. The remaining entries must name each
    /// interior position exactly once.
    pub fn reorder(&mut self, new_order: &[usize]) -> Result<(), ReorderError> {
        let len = self.fragments.len();
        if new_order.len() != len {
            return Err(ReorderError::LengthMismatch {
                expected: len,
                actual: new_order.len(),
            });
        }

        let mut seen = vec![false; len];
        let mut interior = Vec::with_capacity(len.saturating_sub(2));
        for &position in new_order {
            if position == 0 || position > len {
                return Err(ReorderError::InvalidPosition { position, len });
            }
            if position == 1 || position == len {
                continue;
            }
            if std::mem::replace(&mut seen[position - 1], true) {
                return Err(ReorderError::DuplicatePosition(position));
            }
            interior.push(position - 1);
        }

        if let Some(missing) = (2..len).find(|&position| !seen[position - 1]) {
            return Err(ReorderError::MissingPosition(missing));
        }

        if interior.is_empty() {
            return Ok(());
        }

        let reordered = std::iter::once(0)
            .chain(interior)
            .chain(std::iter::once(len - 1))
            .map(|index| self.fragments[index].clone())
            .collect();
        self.fragments = reordered;
        Ok(())
    }

    /// The closed, escaped, concatenated form.
    pub fn render(&self) -> String {
        self.fragments
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(FORM_CLOSE))
            .map(escape_fragment)
            .collect()
    }

    /// Write [`render`](Self::render) to `<dir>/<name>.txt`.
    ///
    /// `path` overrides the configured output directory. The directory must
    /// already exist. Returns the path written.
    pub fn render_to_text(&self, path: Option<&Utf8Path>) -> Result<Utf8PathBuf, RenderError> {
        self.render_to_text_as(&self.name, path)
    }

    /// Like [`render_to_text`](Self::render_to_text) with another file stem.
    pub fn render_to_text_as(
        &self,
        file_stem: &str,
        path: Option<&Utf8Path>,
    ) -> Result<Utf8PathBuf, RenderError> {
        if file_stem.trim().is_empty() || file_stem.contains(['/', '\\']) {
            return Err(RenderError::InvalidFileName(file_stem.to_string()));
        }

        let dir = path
            .or(self.output_dir.as_deref())
            .ok_or(RenderError::MissingOutputDir)?;
        let file = dir.join(format!("{file_stem}.txt"));

        if let Err(source) = fs::write(&file, self.render()) {
            return Err(RenderError::Io { path: file, source });
        }

        tracing::info!("Rendered form '{}' to {}", self.name, file);
        Ok(file)
    }
}
