//! Merging of several Markdown files into one.
//!
//! Each input becomes a section headed by its file name:
//!
//! ```text
//! # [notes.md]
//! ## Content
//! <file content>
//! ---
//! ```
//!
//! Sections are joined with a blank line and written to
//! `merged_markdown.md` in the output directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::common::{Error, Result};

/// File name of the merged output.
pub const MERGED_FILE_NAME: &str = "merged_markdown.md";

/// Build the merged document from `(file name, content)` pairs.
pub fn merge_sections<'a, I>(sections: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    sections
        .into_iter()
        .map(|(name, content)| format!("# [{}]\n## Content\n{}\n---\n", name, content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Merge the given Markdown files into `output_dir/merged_markdown.md`.
///
/// Inputs are read as UTF-8 in the order given. The output directory is
/// created if it does not exist. Returns the path of the merged file.
pub fn merge_markdown_files<P: AsRef<Path>>(files: &[P], output_dir: &Path) -> Result<PathBuf> {
    let mut contents = Vec::with_capacity(files.len());
    for file in files {
        let path = file.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| Error::Other(format!("'{}' is not a file path", path.display())))?;
        let content = fs::read_to_string(path)?;
        contents.push((name, content));
    }

    let merged = merge_sections(
        contents
            .iter()
            .map(|(name, content)| (name.as_str(), content.as_str())),
    );

    fs::create_dir_all(output_dir)?;
    let output = output_dir.join(MERGED_FILE_NAME);
    fs::write(&output, merged)?;

    tracing::info!(inputs = files.len(), output = %output.display(), "merged markdown files");
    Ok(output)
}
