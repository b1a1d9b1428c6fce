use crate::config::{Options, Target};
use crate::discover::{discover, SourceFile};
use crate::error::{Error, Result};
use crate::output;
use crate::parser::css::{parse_stylesheet, ParseError};
use crate::style::classify::classify;
use crate::style::collection::compose;
use crate::style::owned_css::Stylesheet;
use crate::style::serialize::Serializer;
use crate::style::sort::sort;
use log::{info, warn};
use std::fs;
use std::path::PathBuf;

pub const BASE_TAG: &str = "base";
pub const KEYFRAMES_TAG: &str = "keyframes";

/// A named piece of output, one per file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub tag: String,
    pub css: String,
}

/// Everything extracted from one stylesheet, in write order: base, media
/// groups (sorted), keyframes, then collections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub buckets: Vec<Bucket>,
    pub media_groups: usize,
}

impl Extraction {
    pub fn has_media(&self) -> bool {
        self.media_groups > 0
    }

    pub fn bucket(&self, tag: &str) -> Option<&Bucket> {
        self.buckets.iter().find(|bucket| bucket.tag == tag)
    }
}

pub fn extract(css_text: &str, options: &Options) -> std::result::Result<Extraction, ParseError> {
    let sheet = parse_stylesheet(css_text)?;
    Ok(extract_sheet(&sheet, options))
}

/// Classify, sort and serialize an already parsed stylesheet.
pub fn extract_sheet(sheet: &Stylesheet, options: &Options) -> Extraction {
    let mut processed = classify(&sheet.rules);
    sort(&mut processed.media_groups, options.sort);

    let serializer = Serializer::new(options.hide_comments);
    let base = serializer.base(&processed.base);

    if options.log && processed.has_media() {
        info!("Processed media queries:");
    }
    let media: Vec<Bucket> = processed
        .media_groups
        .iter()
        .map(|group| {
            if options.log {
                info!("{}", group);
            }
            Bucket {
                tag: group.id.clone(),
                css: serializer.media_group(group),
            }
        })
        .collect();

    let mut buckets = Vec::with_capacity(media.len() * 2 + 2);
    if !processed.base.is_empty() {
        buckets.push(Bucket {
            tag: BASE_TAG.to_string(),
            css: base.clone(),
        });
    }
    buckets.extend(media.iter().cloned());
    if !processed.keyframes.is_empty() {
        buckets.push(Bucket {
            tag: KEYFRAMES_TAG.to_string(),
            css: serializer.keyframes(&processed.keyframes),
        });
    }
    if options.breakpoint_collections {
        buckets.extend(compose(&base, &media));
    }

    Extraction {
        buckets,
        media_groups: media.len(),
    }
}

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub source: PathBuf,
    pub written: Vec<PathBuf>,
    pub media_groups: usize,
}

/// Read, extract and write one stylesheet.
pub fn extract_file(source: &SourceFile, options: &Options) -> Result<FileReport> {
    info!("File {} found", source.path.display());

    let css_text = fs::read_to_string(&source.path).map_err(|e| Error::io(&source.path, e))?;
    let extraction = extract(&css_text, options).map_err(|err| Error::Parse {
        path: source.path.clone(),
        source: err,
    })?;

    if !extraction.has_media() {
        if options.fail_on_missing_media {
            return Err(Error::NoMediaQueries {
                path: source.path.clone(),
            });
        }
        warn!("No media queries found in {}", source.path.display());
    }

    let mut written = Vec::with_capacity(extraction.buckets.len());
    for bucket in &extraction.buckets {
        let path = output::bucket_path(&source.destination, &bucket.tag);
        output::write_bucket(&path, &bucket.css, options.newline)?;
        info!("{} written successfully", path.display());
        written.push(path);
    }

    Ok(FileReport {
        source: source.path.clone(),
        written,
        media_groups: extraction.media_groups,
    })
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub files: Vec<FileReport>,
    /// Files that failed; the rest of the run carried on.
    pub failures: Vec<Error>,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Process every target in order. A target matching no file stops the run;
/// a failing file is recorded and the next one is processed.
pub fn run(targets: &[Target], options: &Options) -> Result<RunSummary> {
    let mut summary = RunSummary::default();
    for target in targets {
        for source in discover(target)? {
            match extract_file(&source, options) {
                Ok(report) => summary.files.push(report),
                Err(err) => summary.failures.push(err),
            }
        }
    }
    Ok(summary)
}
