use crate::error::{Error, Result};
use crate::output::Newline;
use crate::style::sort::SortPolicy;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// A task file: shared options plus any number of `[[target]]` tables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub options: Options,
    #[serde(default, rename = "target")]
    pub targets: Vec<Target>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Log a line per media group.
    pub log: bool,
    pub hide_comments: bool,
    /// Also write the cumulative `base_<id>` files.
    pub breakpoint_collections: bool,
    pub sort: SortPolicy,
    pub newline: Newline,
    /// Treat a file without any `@media` block as a failure instead of a
    /// warning.
    pub fail_on_missing_media: bool,
}

/// Source patterns and where their output goes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Target {
    pub src: Vec<String>,
    pub dest: PathBuf,
}

pub fn load(path: &Path) -> Result<Config> {
    let text = fs::read_to_string(path).map_err(|err| Error::Config {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    toml::from_str(&text).map_err(|err| Error::Config {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}
