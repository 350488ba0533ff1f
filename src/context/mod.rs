//! Per-invocation context: tool settings plus the document the user is on.

use std::path::{Path, PathBuf};

use crate::config::ToolSettings;
use crate::document::ConfigDocument;
use crate::locate::locate;
use crate::Error;

/// Everything a command needs to find the config file it works on.
///
/// ## Example
///
/// ```no_run
/// use wp_debug_mode::{AppContext, Config, ToolSettings};
///
/// let ctx = AppContext::builder()
///     .with_settings(Config::builder().with_env("WPDM", "__").build::<ToolSettings>()?)
///     .with_active_document("wp-content/themes/site/functions.php")
///     .build()?;
///
/// let document = ctx.config_document()?;
/// # Ok::<(), wp_debug_mode::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct AppContext {
    settings: ToolSettings,
    active_document: PathBuf,
}

impl AppContext {
    pub fn builder() -> AppContextBuilder {
        AppContextBuilder::default()
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    pub fn active_document(&self) -> &Path {
        &self.active_document
    }

    /// Directory the upward search starts from.
    ///
    /// A directory is used as is; anything else (including paths that no
    /// longer exist) is replaced by its parent. A bare relative file name
    /// starts from the working directory.
    pub fn search_start(&self) -> PathBuf {
        if self.active_document.is_dir() {
            return self.active_document.clone();
        }
        self.active_document
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    }

    /// Locates the config file for the active document.
    ///
    /// When the start directory does not exist and a fallback directory is
    /// configured, the search is retried from there.
    pub fn config_document(&self) -> Result<ConfigDocument, Error> {
        let start = self.search_start();
        let file_name = &self.settings.target_file;

        let found = locate(&start, file_name).or_else(|| {
            let fallback = self.settings.fallback_dir.as_deref()?;
            if start.is_dir() {
                return None;
            }
            tracing::debug!(
                fallback = %fallback.display(),
                "start directory missing, using fallback"
            );
            locate(fallback, file_name)
        });

        match found {
            Some(location) => {
                tracing::debug!(path = %location.path().display(), "config file located");
                Ok(ConfigDocument::new(location))
            }
            None => Err(Error::ConfigNotFound {
                start,
                file_name: file_name.clone(),
            }),
        }
    }
}

/// Builder for [`AppContext`].
///
/// Settings default to [`ToolSettings::default`]; an active document is
/// required.
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct AppContextBuilder {
    settings: Option<ToolSettings>,
    active_document: Option<PathBuf>,
}

impl AppContextBuilder {
    pub fn with_settings(mut self, settings: ToolSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn with_active_document(mut self, path: impl Into<PathBuf>) -> Self {
        self.active_document = Some(path.into());
        self
    }

    /// Like [`with_active_document`](Self::with_active_document) but accepts
    /// the absence of one.
    pub fn with_optional_document(mut self, path: Option<PathBuf>) -> Self {
        self.active_document = path;
        self
    }

    pub fn build(self) -> Result<AppContext, Error> {
        let active_document = self
            .active_document
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(Error::NoActiveDocument)?;

        Ok(AppContext {
            settings: self.settings.unwrap_or_default(),
            active_document,
        })
    }
}
