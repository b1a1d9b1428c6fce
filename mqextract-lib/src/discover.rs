use crate::config::Target;
use crate::error::{Error, Result};
use crate::output::resolve_destination;
use log::warn;
use std::collections::HashSet;
use std::path::PathBuf;

/// One stylesheet to process and the path its buckets are named after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub destination: PathBuf,
}

/// Expand the patterns of a target into existing files, in pattern order and
/// without duplicates.
pub fn discover(target: &Target) -> Result<Vec<SourceFile>> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for pattern in &target.src {
        let entries = glob::glob(pattern).map_err(|source| Error::Pattern {
            pattern: pattern.clone(),
            source,
        })?;
        for entry in entries {
            let path = match entry {
                Ok(path) => path,
                Err(err) => {
                    warn!("Skipping {}: {}", err.path().display(), err.error());
                    continue;
                }
            };
            if !path.is_file() || !seen.insert(path.clone()) {
                continue;
            }
            files.push(SourceFile {
                destination: resolve_destination(&path, &target.dest),
                path,
            });
        }
    }

    if files.is_empty() {
        return Err(Error::NoInputMatched {
            patterns: target.src.clone(),
        });
    }
    Ok(files)
}
