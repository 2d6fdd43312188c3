//! YOLO label line rewriting.
//!
//! Only the leading class index of a line is interpreted. Every other field
//! (box geometry, confidence, polygon points) is carried through verbatim.

use std::num::IntErrorKind;
use std::path::Path;

use super::{ClassRemap, LookupError};
use crate::classes::ClassIndex;
use crate::error::RemapError;

/// Rewritten content of one label file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RewrittenAnnotation {
    /// Rewritten lines joined with `\n`, without a trailing newline.
    pub content: String,
    /// Number of data lines rewritten.
    pub lines: usize,
}

/// Rewrite the class index of a single label line.
///
/// Returns `Ok(None)` for blank lines. Fields are rejoined with single
/// spaces, and the new index is written in canonical decimal form.
pub fn rewrite_line(
    line: &str,
    remap: &ClassRemap<'_>,
    file_path: &Path,
    line_num: usize,
) -> Result<Option<String>, RemapError> {
    let mut fields = line.split_whitespace();
    let Some(first) = fields.next() else {
        return Ok(None);
    };

    let source = parse_class_index(first, file_path, line_num)?;
    let target = remap
        .remap(source)
        .map_err(|err| lookup_error_at(err, file_path, line_num))?;

    let mut rewritten = target.to_string();
    for field in fields {
        rewritten.push(' ');
        rewritten.push_str(field);
    }

    Ok(Some(rewritten))
}

/// Rewrite every line of a label file held in memory.
///
/// The first failing line aborts the whole file; nothing partial is returned.
pub fn rewrite_annotation(
    content: &str,
    remap: &ClassRemap<'_>,
    file_path: &Path,
) -> Result<RewrittenAnnotation, RemapError> {
    let mut lines = Vec::new();

    for (line_idx, line) in content.lines().enumerate() {
        if let Some(rewritten) = rewrite_line(line, remap, file_path, line_idx + 1)? {
            lines.push(rewritten);
        }
    }

    Ok(RewrittenAnnotation {
        lines: lines.len(),
        content: lines.join("\n"),
    })
}

/// Fuzz-only entrypoint for single-line rewriting against a fixed class list.
#[cfg(feature = "fuzzing")]
pub fn fuzz_rewrite_line(input: &str) -> Result<(), RemapError> {
    use crate::classes::ClassTable;

    let original = ClassTable::from_names(["person", "bicycle", "car"]);
    let target = ClassTable::from_names(["car", "person"]);
    let remap = ClassRemap::new(&original, &target);
    let _ = rewrite_line(input, &remap, Path::new("<fuzz>"), 1)?;
    Ok(())
}

fn parse_class_index(
    raw: &str,
    file_path: &Path,
    line_num: usize,
) -> Result<ClassIndex, RemapError> {
    raw.parse::<u64>()
        .map(ClassIndex::new)
        .map_err(|err| match err.kind() {
            IntErrorKind::PosOverflow => RemapError::ClassIndexOutOfRange {
                path: file_path.to_path_buf(),
                line: line_num,
                token: raw.to_string(),
            },
            _ => RemapError::MalformedAnnotationLine {
                path: file_path.to_path_buf(),
                line: line_num,
                token: raw.to_string(),
            },
        })
}

fn lookup_error_at(err: LookupError, file_path: &Path, line_num: usize) -> RemapError {
    match err {
        LookupError::UnknownSourceIndex { index } => RemapError::UnknownSourceIndex {
            path: file_path.to_path_buf(),
            line: line_num,
            index,
        },
        LookupError::Unmappable { index, name } => RemapError::UnmappableClass {
            path: file_path.to_path_buf(),
            line: line_num,
            index,
            name,
        },
    }
}
