//! Batch driver for remapping many annotation files in one run.
//!
//! Files are processed one at a time, in the order given. Each file's
//! rewritten content is computed fully in memory; it is then printed
//! (preview), offered for confirmation, or written back atomically.
//!
//! # Failure policy
//!
//! By default a file whose lines cannot be remapped is aborted on its own and
//! the batch continues; the run is reported as failed at the end. With
//! [`BatchOptions::strict`] the first such file stops the whole batch.
//! I/O failures always stop the batch.

pub mod prompt;
pub mod report;

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::error::RemapError;
use crate::remap::{rewrite_annotation, ClassRemap};

pub use prompt::{is_affirmative, LinePrompt, Prompt};
pub use report::{BatchReport, FileOutcome, FileStatus};

const LABEL_EXTENSION: &str = "txt";
const CLASSES_FILE_NAME: &str = "classes.txt";

/// Options controlling how the batch driver treats each file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchOptions {
    /// Print rewritten content instead of writing it. Never writes.
    pub preview: bool,
    /// Show original and rewritten content and ask before writing each file.
    pub confirm: bool,
    /// Stop the whole batch at the first file that cannot be remapped.
    pub strict: bool,
}

/// Drives remapping over a list of annotation files.
///
/// Generic over the confirmation prompt and the writer that receives
/// previews and warnings, so tests can script both.
pub struct BatchDriver<'a, P, W> {
    remap: ClassRemap<'a>,
    options: &'a BatchOptions,
    prompt: P,
    out: W,
}

impl<'a, P: Prompt, W: Write> BatchDriver<'a, P, W> {
    pub fn new(remap: ClassRemap<'a>, options: &'a BatchOptions, prompt: P, out: W) -> Self {
        Self {
            remap,
            options,
            prompt,
            out,
        }
    }

    /// Checks class list sizes before touching any file.
    ///
    /// Returns `Ok(false)` if the target list is smaller and the user chose
    /// not to continue.
    pub fn preflight(
        &mut self,
        original_path: &Path,
        target_path: &Path,
    ) -> Result<bool, RemapError> {
        for (path, table) in [
            (original_path, self.remap.original()),
            (target_path, self.remap.target()),
        ] {
            for name in table.duplicates() {
                warn!(
                    "class '{}' appears more than once in {}; its last index is used",
                    name,
                    path.display()
                );
            }
        }

        if !self.remap.target_is_smaller() {
            return Ok(true);
        }

        writeln!(
            self.out,
            "Warning: Number of classes in {} is fewer than that in {}. \
             Some classes might not be remapped successfully.",
            target_path.display(),
            original_path.display()
        )
        .map_err(RemapError::Output)?;
        self.out.flush().map_err(RemapError::Output)?;

        self.prompt.confirm("Continue [N/y]? ")
    }

    /// Processes every file in order and collects their outcomes.
    pub fn run(&mut self, files: &[PathBuf]) -> Result<BatchReport, RemapError> {
        let mut report = BatchReport::new();

        for path in files {
            match self.process_file(path) {
                Ok(outcome) => report.add(outcome),
                Err(err) if err.is_per_file() && !self.options.strict => {
                    error!("Aborted: {err}");
                    report.add(FileOutcome::aborted(path, err.to_string()));
                }
                Err(err) => return Err(err),
            }
        }

        Ok(report)
    }

    /// Takes one file from pending to a terminal state.
    ///
    /// Per-file remap failures are returned as errors; [`Self::run`] decides
    /// whether they abort the batch.
    pub fn process_file(&mut self, path: &Path) -> Result<FileOutcome, RemapError> {
        let original = fs::read_to_string(path).map_err(|source| RemapError::AnnotationRead {
            path: path.to_path_buf(),
            source,
        })?;

        let rewritten = rewrite_annotation(&original, &self.remap, path)?;
        debug!("{}: {} line(s) remapped", path.display(), rewritten.lines);

        if self.options.preview {
            writeln!(self.out, "Updated {}: ", path.display()).map_err(RemapError::Output)?;
            writeln!(self.out, "{}", rewritten.content).map_err(RemapError::Output)?;
            return Ok(FileOutcome::skipped(path, rewritten.lines, true));
        }

        if self.options.confirm {
            writeln!(self.out, "Original {}: ", path.display()).map_err(RemapError::Output)?;
            write!(self.out, "{}", original).map_err(RemapError::Output)?;
            if !original.is_empty() && !original.ends_with('\n') {
                writeln!(self.out).map_err(RemapError::Output)?;
            }
            writeln!(self.out, "Updated {}: ", path.display()).map_err(RemapError::Output)?;
            writeln!(self.out, "{}", rewritten.content).map_err(RemapError::Output)?;
            self.out.flush().map_err(RemapError::Output)?;

            let accepted = self
                .prompt
                .confirm(&format!("Update '{}' [N/y]? ", path.display()))?;
            writeln!(self.out).map_err(RemapError::Output)?;

            if !accepted {
                return Ok(FileOutcome::skipped(path, rewritten.lines, false));
            }
        }

        write_atomic(path, rewritten.content.as_bytes()).map_err(|source| {
            RemapError::AnnotationWrite {
                path: path.to_path_buf(),
                source,
            }
        })?;
        info!("Updated {}", path.display());

        Ok(FileOutcome::committed(path, rewritten.lines))
    }

    /// Consumes the driver, returning its output writer.
    pub fn into_output(self) -> W {
        self.out
    }
}

/// Expands annotation arguments into the list of files to process.
///
/// Files are kept as given. A directory expands in place to every `.txt`
/// file beneath it, sorted by path, skipping `classes.txt` and any file in
/// `exclude` (the class lists of the run, which often live next to labels).
pub fn collect_annotation_files(
    inputs: &[PathBuf],
    exclude: &[&Path],
) -> Result<Vec<PathBuf>, RemapError> {
    let excluded: Vec<PathBuf> = exclude
        .iter()
        .filter_map(|path| fs::canonicalize(path).ok())
        .collect();
    let mut files = Vec::new();

    for input in inputs {
        if !input.is_dir() {
            files.push(input.clone());
            continue;
        }

        let mut found = Vec::new();
        for entry in WalkDir::new(input).follow_links(true) {
            let entry = entry.map_err(|source| RemapError::InputWalk {
                path: input.clone(),
                message: source.to_string(),
            })?;

            if !entry.file_type().is_file() || !is_label_file(entry.path()) {
                continue;
            }

            let is_excluded = fs::canonicalize(entry.path())
                .map(|real| excluded.contains(&real))
                .unwrap_or(false);
            if is_excluded {
                debug!("{}: skipping class list", entry.path().display());
                continue;
            }

            found.push(entry.path().to_path_buf());
        }
        found.sort();
        debug!(
            "{}: found {} annotation file(s)",
            input.display(),
            found.len()
        );
        files.extend(found);
    }

    Ok(files)
}

fn is_label_file(path: &Path) -> bool {
    let has_label_ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(LABEL_EXTENSION))
        .unwrap_or(false);

    let is_class_list = path
        .file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.eq_ignore_ascii_case(CLASSES_FILE_NAME))
        .unwrap_or(false);

    has_label_ext && !is_class_list
}

/// Replaces the file behind `path` with `bytes` via a temporary sibling
/// file and a rename.
///
/// Symlinks are resolved first so the link target is rewritten, and the
/// target's permissions carry over. When the directory does not allow a
/// sibling file, the file is overwritten in place.
fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let real = fs::canonicalize(path)?;
    let permissions = fs::metadata(&real)?.permissions();
    let file_name = real
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("annotation");
    let tmp = real.with_file_name(format!(".{}.tmp-{}", file_name, std::process::id()));

    let mut file = match File::create(&tmp) {
        Ok(file) => file,
        Err(err) if err.kind() == std::io::ErrorKind::PermissionDenied => {
            debug!(
                "{}: cannot create temp file ({}), writing in place",
                real.display(),
                err
            );
            return fs::write(&real, bytes);
        }
        Err(err) => return Err(err),
    };

    let result = (|| {
        file.write_all(bytes)?;
        file.sync_all()?;
        drop(file);
        fs::set_permissions(&tmp, permissions)?;
        fs::rename(&tmp, &real)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}
