use clap::Parser;
use log::{error, info};
use mqextract_lib::config::{self, Config, Target};
use mqextract_lib::extract;
use mqextract_lib::output::Newline;
use mqextract_lib::style::sort::SortPolicy;
use std::path::PathBuf;

const MQEXTRACT_INTRO: &str = "mqextract - split stylesheets into mobile-first breakpoint files";

#[derive(Parser)]
#[command(name = "mqextract")]
#[command(about = "Combine and extract media queries for mobile-first responsive design")]
struct Args {
    /// Source files or glob patterns.
    sources: Vec<String>,

    /// Destination directory (or file) for the positional sources.
    #[arg(short, long, default_value = ".")]
    dest: PathBuf,

    /// TOML task file with [options] and [[target]] tables.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log every processed media query.
    #[arg(long)]
    log: bool,

    /// Leave comments out of the output.
    #[arg(long)]
    hide_comments: bool,

    /// Also write cumulative base_<breakpoint> files.
    #[arg(long)]
    collections: bool,

    /// Breakpoint order: ascending or min-width-last.
    #[arg(long, value_enum)]
    sort: Option<SortPolicy>,

    /// Line endings of written files: lf, crlf or native.
    #[arg(long, value_enum)]
    newline: Option<Newline>,

    /// Fail on files without any media query.
    #[arg(long)]
    strict: bool,
}

impl Args {
    /// Config file (if any) with the command-line flags layered on top.
    fn into_config(self) -> Result<Config, mqextract_lib::Error> {
        let mut config = match &self.config {
            Some(path) => config::load(path)?,
            None => Config::default(),
        };

        let options = &mut config.options;
        options.log |= self.log;
        options.hide_comments |= self.hide_comments;
        options.breakpoint_collections |= self.collections;
        options.fail_on_missing_media |= self.strict;
        if let Some(sort) = self.sort {
            options.sort = sort;
        }
        if let Some(newline) = self.newline {
            options.newline = newline;
        }

        if !self.sources.is_empty() {
            config.targets.push(Target {
                src: self.sources,
                dest: self.dest,
            });
        }
        Ok(config)
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    // parse the args given in terminal
    let args: Args = Args::parse();

    let config = match args.into_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    if config.targets.is_empty() {
        error!("No sources given; pass files or a config with [[target]] entries");
        std::process::exit(1);
    }

    if config.options.log {
        info!("{}", MQEXTRACT_INTRO);
    }

    match extract::run(&config.targets, &config.options) {
        Ok(summary) => {
            for failure in &summary.failures {
                error!("{}", failure);
            }
            if !summary.is_success() {
                std::process::exit(1);
            }
        }
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}
