//! Dispatch of inputs to format-specific converters.
//!
//! Inputs are classified into a [`DocumentKind`]. Spreadsheets are handled
//! here; every other kind goes to a [`DocumentHandler`] registered on the
//! [`Converter`].

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::common::{Error, Result};
use crate::config::Settings;
use crate::markdown::MarkdownOptions;

use super::report::{BatchItem, BatchReport};
use super::{convert_sheet_with_options, list_sheet_names, safe_filename};

/// Kind of document an input holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Pdf,
    Spreadsheet,
    Presentation,
    Document,
    WebPage,
}

impl DocumentKind {
    /// Classify an input path or URL.
    ///
    /// URLs are web pages; files are classified by extension
    /// (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sheetmark::convert::DocumentKind;
    ///
    /// assert_eq!(DocumentKind::detect("Budget.XLSX")?, DocumentKind::Spreadsheet);
    /// assert_eq!(DocumentKind::detect("https://example.com")?, DocumentKind::WebPage);
    /// assert!(DocumentKind::detect("notes.odt").is_err());
    /// # Ok::<(), sheetmark::Error>(())
    /// ```
    pub fn detect(input: &str) -> Result<Self> {
        if is_url(input) {
            return Ok(DocumentKind::WebPage);
        }

        let extension = Path::new(input)
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => Ok(DocumentKind::Pdf),
            "xlsx" => Ok(DocumentKind::Spreadsheet),
            "pptx" => Ok(DocumentKind::Presentation),
            "docx" | "tex" => Ok(DocumentKind::Document),
            _ => Err(Error::Unsupported(format!("unsupported file format: {}", input))),
        }
    }

    /// Lowercase display name.
    pub fn name(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Spreadsheet => "spreadsheet",
            DocumentKind::Presentation => "presentation",
            DocumentKind::Document => "document",
            DocumentKind::WebPage => "web page",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn is_url(input: &str) -> bool {
    let lower = input.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Converter for a non-spreadsheet document kind.
pub trait DocumentHandler: Send + Sync {
    /// Convert `input` into Markdown files under `output_dir` and return
    /// the files written.
    fn convert(&self, input: &str, output_dir: &Path, settings: &Settings) -> Result<Vec<PathBuf>>;
}

/// Which sheets of each spreadsheet to convert.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SheetSelection {
    /// Every sheet in workbook order
    #[default]
    All,
    /// The named sheets, in the order given
    Named(Vec<String>),
}

/// Converts inputs to Markdown files according to [`Settings`].
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
/// use sheetmark::config::Settings;
/// use sheetmark::convert::{Converter, SheetSelection};
///
/// let converter = Converter::new(Settings::default());
/// let report = converter.convert_all(
///     &["sales.xlsx".to_string()],
///     &SheetSelection::Named(vec!["Q1".to_string()]),
///     Some(Path::new("out")),
/// );
/// for item in report.items() {
///     println!("{}", item);
/// }
/// ```
pub struct Converter {
    settings: Settings,
    handlers: HashMap<DocumentKind, Box<dyn DocumentHandler>>,
}

impl Converter {
    /// Create a converter with only the built-in spreadsheet support.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            handlers: HashMap::new(),
        }
    }

    /// Register the converter for a non-spreadsheet kind.
    ///
    /// Spreadsheets are always converted by the built-in parser, so a
    /// handler registered for [`DocumentKind::Spreadsheet`] is never used.
    pub fn with_handler(mut self, kind: DocumentKind, handler: Box<dyn DocumentHandler>) -> Self {
        self.handlers.insert(kind, handler);
        self
    }

    /// The settings in use.
    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Convert a batch of inputs.
    ///
    /// Each input, and each sheet of a spreadsheet input, is isolated: a
    /// failure is recorded in the report and the batch continues. Without
    /// an explicit `output_dir` the settings decide (see
    /// [`Settings::output_dir_for`]).
    pub fn convert_all(
        &self,
        inputs: &[String],
        selection: &SheetSelection,
        output_dir: Option<&Path>,
    ) -> BatchReport {
        let output_dir = match output_dir {
            Some(dir) => dir.to_path_buf(),
            None => {
                let first_file = inputs.iter().find(|i| !is_url(i)).map(Path::new);
                self.settings.output_dir_for(first_file)
            },
        };

        let mut report = BatchReport::new();
        for input in inputs {
            report.extend(self.convert_input(input, selection, &output_dir));
        }
        tracing::info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            "batch finished"
        );
        report
    }

    /// Convert a single input.
    pub fn convert_input(
        &self,
        input: &str,
        selection: &SheetSelection,
        output_dir: &Path,
    ) -> BatchReport {
        let kind = match DocumentKind::detect(input) {
            Ok(kind) => kind,
            Err(e) => return BatchReport::from_iter([BatchItem::failed(input, None, &e)]),
        };

        if kind != DocumentKind::WebPage && !Path::new(input).is_file() {
            let err = Error::Other(format!("invalid file path or URL: {}", input));
            return BatchReport::from_iter([BatchItem::failed(input, None, &err)]);
        }

        match kind {
            DocumentKind::Spreadsheet => {
                self.convert_spreadsheet(Path::new(input), selection, output_dir)
            },
            other => self.convert_external(other, input, output_dir),
        }
    }

    /// Convert the selected sheets of one workbook.
    pub fn convert_spreadsheet(
        &self,
        path: &Path,
        selection: &SheetSelection,
        output_dir: &Path,
    ) -> BatchReport {
        let input = path.display().to_string();
        let sheets = match selection {
            SheetSelection::Named(names) => names.clone(),
            SheetSelection::All => match list_sheet_names(path) {
                Ok(names) => names,
                Err(e) => return BatchReport::from_iter([BatchItem::failed(&input, None, &e)]),
            },
        };

        if sheets.is_empty() {
            let file_name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
            let err = Error::Other(format!("no sheets selected for {}", file_name));
            return BatchReport::from_iter([BatchItem::failed(&input, None, &err)]);
        }

        self.convert_sheets(path, &sheets, output_dir)
    }

    /// Convert each named sheet of `path` to `<output_dir>/<stem>-<sheet>.md`.
    ///
    /// Output paths are assigned up front by [`sheet_output_paths`], so two
    /// sheets never write the same file. Every sheet opens its own
    /// container, so sheets convert concurrently when [`Settings::parallel`]
    /// is set.
    pub fn convert_sheets(&self, path: &Path, sheets: &[String], output_dir: &Path) -> BatchReport {
        let input = path.display().to_string();
        let options = self.settings.markdown_options();
        let outputs = sheet_output_paths(path, sheets, output_dir);

        let convert = |(sheet, output): (&String, &PathBuf)| -> BatchItem {
            match write_sheet(path, sheet, &options, output) {
                Ok(()) => {
                    tracing::info!(
                        input = %input,
                        sheet = %sheet,
                        output = %output.display(),
                        "converted sheet"
                    );
                    BatchItem::converted(&input, Some(sheet.as_str()), output.clone())
                },
                Err(e) => BatchItem::failed(&input, Some(sheet.as_str()), &e),
            }
        };

        if self.settings.parallel {
            sheets
                .par_iter()
                .zip(outputs.par_iter())
                .map(convert)
                .collect::<Vec<_>>()
                .into_iter()
                .collect()
        } else {
            sheets.iter().zip(outputs.iter()).map(convert).collect()
        }
    }

    fn convert_external(&self, kind: DocumentKind, input: &str, output_dir: &Path) -> BatchReport {
        let Some(handler) = self.handlers.get(&kind) else {
            let err = Error::Unsupported(format!("no converter available for {} input", kind));
            return BatchReport::from_iter([BatchItem::failed(input, None, &err)]);
        };

        let result = fs::create_dir_all(output_dir)
            .map_err(Error::from)
            .and_then(|()| handler.convert(input, output_dir, &self.settings));
        match result {
            Ok(outputs) => outputs
                .into_iter()
                .map(|output| BatchItem::converted(input, None, output))
                .collect(),
            Err(e) => BatchReport::from_iter([BatchItem::failed(input, None, &e)]),
        }
    }
}

/// Label used when a sheet name has no file-name-safe characters.
const FALLBACK_SHEET_LABEL: &str = "sheet";

/// `<output_dir>/<file stem>-<sheet>.md`, with the sheet name reduced to
/// characters that are safe in file names.
///
/// A name that reduces to nothing (`"***"`) becomes `sheet`.
pub fn sheet_output_path(path: &Path, sheet: &str, output_dir: &Path) -> PathBuf {
    output_dir.join(format!("{}.md", sheet_file_stem(path, sheet)))
}

/// Output paths for several sheets of `path`, one per sheet and in order.
///
/// Distinct sheet names can reduce to the same safe name (`Q1/Q2` and
/// `Q1Q2`). Later sheets then get a numeric suffix (`book-Q1Q2-2.md`), so
/// no two paths collide. Names are compared case-insensitively because
/// output directories may live on case-insensitive file systems.
pub fn sheet_output_paths(path: &Path, sheets: &[String], output_dir: &Path) -> Vec<PathBuf> {
    let mut taken = HashSet::with_capacity(sheets.len());
    sheets
        .iter()
        .map(|sheet| {
            let base = sheet_file_stem(path, sheet);
            let mut stem = base.clone();
            let mut suffix = 1;
            while !taken.insert(stem.to_lowercase()) {
                suffix += 1;
                stem = format!("{}-{}", base, suffix);
            }
            if suffix > 1 {
                tracing::debug!(sheet = %sheet, file = %stem, "renamed colliding output file");
            }
            output_dir.join(format!("{}.md", stem))
        })
        .collect()
}

fn sheet_file_stem(path: &Path, sheet: &str) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let label = safe_filename(sheet);
    let label = if label.is_empty() { FALLBACK_SHEET_LABEL } else { label.as_str() };
    format!("{}-{}", stem, label)
}

fn write_sheet(path: &Path, sheet: &str, options: &MarkdownOptions, output: &Path) -> Result<()> {
    let markdown = convert_sheet_with_options(path, sheet, options)?;
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, markdown)?;
    Ok(())
}
