use crate::error::{Error, Result};
use clap::ValueEnum;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Line-ending convention of written files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Newline {
    #[default]
    Lf,
    Crlf,
    /// `crlf` on Windows, `lf` elsewhere.
    Native,
}

impl Newline {
    pub fn apply(self, text: &str) -> String {
        let text = text.replace("\r\n", "\n");
        let crlf = match self {
            Newline::Lf => false,
            Newline::Crlf => true,
            Newline::Native => cfg!(windows),
        };
        if crlf {
            text.replace('\n', "\r\n")
        } else {
            text
        }
    }
}

/// Where the buckets of `source` go. A destination that already names the
/// source file (or any `.css` file) is used as is; anything else is a
/// directory the source file name is joined onto.
pub fn resolve_destination(source: &Path, dest: &Path) -> PathBuf {
    let Some(file_name) = source.file_name() else {
        return dest.to_path_buf();
    };

    let names_file = dest
        .to_string_lossy()
        .contains(&*file_name.to_string_lossy())
        || dest.extension().is_some_and(|ext| ext == "css");
    if names_file {
        dest.to_path_buf()
    } else {
        dest.join(file_name)
    }
}

/// `dist/styles.css` + `base` -> `dist/styles-base.css`.
pub fn bucket_path(destination: &Path, tag: &str) -> PathBuf {
    let stem = destination
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    destination.with_file_name(format!("{}-{}.css", stem, tag))
}

/// Write one bucket, creating parent directories as needed.
pub fn write_bucket(path: &Path, css: &str, newline: Newline) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    fs::write(path, newline.apply(css)).map_err(|e| Error::io(path, e))
}
