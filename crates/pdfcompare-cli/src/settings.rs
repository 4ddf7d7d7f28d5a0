use std::path::PathBuf;

use pdfcompare_core::config_file::ConfigFile;
use pdfcompare_core::{CompareOptions, DiffOptions, NormalizeOptions};
use pdfcompare_reporting::DEFAULT_REPORT_NAME;

const DEFAULT_CONTEXT: usize = 3;
const DEFAULT_WRAP_COLUMN: usize = 80;

/// Values given on the command line; `None`/`false` means "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub output: Option<PathBuf>,
    pub context: Option<usize>,
    pub full_diff: bool,
    pub wrap_column: Option<usize>,
    pub left_label: Option<String>,
    pub right_label: Option<String>,
    pub expand_ligatures: bool,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// `None` renders every line.
    pub context: Option<usize>,
    pub wrap_column: usize,
    pub report_path: PathBuf,
    pub left_label: String,
    pub right_label: String,
    pub expand_ligatures: bool,
    pub autojunk: bool,
}

impl Settings {
    /// Resolve configuration: CLI flags > `PDFCOMPARE_REPORT` > config file > defaults.
    pub fn resolve(cli: Overrides, config: ConfigFile, env_report: Option<String>) -> Self {
        let diff = config.diff.unwrap_or_default();
        let report = config.report.unwrap_or_default();
        let normalize = config.normalize.unwrap_or_default();
        let matching = config.matching.unwrap_or_default();

        let full = cli.full_diff || (cli.context.is_none() && diff.full.unwrap_or(false));
        let context = if full {
            None
        } else {
            Some(cli.context.or(diff.context).unwrap_or(DEFAULT_CONTEXT))
        };

        let report_path = cli
            .output
            .or_else(|| env_report.filter(|s| !s.is_empty()).map(PathBuf::from))
            .or_else(|| report.path.map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_NAME));

        Settings {
            context,
            wrap_column: cli
                .wrap_column
                .or(diff.wrap_column)
                .unwrap_or(DEFAULT_WRAP_COLUMN),
            report_path,
            left_label: cli
                .left_label
                .or(report.left_label)
                .unwrap_or_else(|| "PDF 1".to_string()),
            right_label: cli
                .right_label
                .or(report.right_label)
                .unwrap_or_else(|| "PDF 2".to_string()),
            expand_ligatures: cli.expand_ligatures || normalize.expand_ligatures.unwrap_or(false),
            autojunk: matching.autojunk.unwrap_or(true),
        }
    }

    pub fn compare_options(&self, build_diff: bool) -> CompareOptions {
        CompareOptions {
            normalize: NormalizeOptions {
                expand_ligatures: self.expand_ligatures,
            },
            diff: DiffOptions {
                context: self.context,
                autojunk: self.autojunk,
            },
            autojunk: self.autojunk,
            build_diff,
        }
    }
}
