use std::collections::BTreeMap;

use camino::Utf8Path;
use camino::Utf8PathBuf;
use config::Config;
use config::ConfigError as ExternalConfigError;
use config::File;
use config::FileFormat;
use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration build/deserialize error")]
    Config(#[from] ExternalConfigError),
}

/// The two comma-separated columns describing one tag.
///
/// ```toml
/// [tags.p]
/// allowed_attributes = "class,id,style,title"
/// standard_attributes = "class,id"
/// ```
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct TagColumns {
    pub allowed_attributes: String,
    pub standard_attributes: String,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Directory rendered forms are written to when the caller passes none.
    pub output_dir: Option<Utf8PathBuf>,
    /// Memoize attribute lookups per tag name.
    pub cache_lookups: bool,
    /// Project tag definitions, layered over the builtin table.
    pub tags: BTreeMap<String, TagColumns>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: None,
            cache_lookups: true,
            tags: BTreeMap::new(),
        }
    }
}

#[must_use]
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "formkit", "formkit")
}

impl Settings {
    pub fn new(project_root: &Utf8Path) -> Result<Self, ConfigError> {
        let user_config_file = project_dirs().and_then(|dirs| {
            Utf8PathBuf::from_path_buf(dirs.config_dir().join("formkit.toml")).ok()
        });

        Self::load_from_paths(project_root, user_config_file.as_deref())
    }

    /// Load settings with an explicit user config file instead of the
    /// platform config directory.
    ///
    /// A relative `output_dir` is resolved against `project_root`.
    pub fn load_from_paths(
        project_root: &Utf8Path,
        user_config_path: Option<&Utf8Path>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = user_config_path {
            builder = builder.add_source(
                File::from(path.as_std_path())
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        builder = builder.add_source(
            File::from(project_root.join(".formkit.toml").as_std_path())
                .format(FileFormat::Toml)
                .required(false),
        );

        builder = builder.add_source(
            File::from(project_root.join("formkit.toml").as_std_path())
                .format(FileFormat::Toml)
                .required(false),
        );

        let mut settings: Settings = builder.build()?.try_deserialize()?;
        if let Some(dir) = settings.output_dir.take() {
            settings.output_dir = Some(if dir.is_relative() {
                project_root.join(dir)
            } else {
                dir
            });
        }
        tracing::debug!(
            "Loaded settings for {}: {} project tag(s), output_dir={:?}",
            project_root,
            settings.tags.len(),
            settings.output_dir,
        );
        Ok(settings)
    }
}
