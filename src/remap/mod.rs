//! Class index remapping.
//!
//! [`ClassRemap`] composes the original table's index→name view with the
//! target table's name→index view. The [`rewrite`] submodule applies it to
//! YOLO label lines and whole label files.

pub mod rewrite;

use thiserror::Error;

use crate::classes::{ClassIndex, ClassTable};

pub use rewrite::{rewrite_annotation, rewrite_line, RewrittenAnnotation};

/// Why a single class index could not be translated.
///
/// Carries no file context; the rewriter attaches path and line number when
/// lifting it into [`crate::RemapError`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("class index {index} is not defined in the original class list")]
    UnknownSourceIndex { index: ClassIndex },

    #[error("class index {index} ('{name}') has no counterpart in the target class list")]
    Unmappable { index: ClassIndex, name: String },
}

/// Translation from one class list's numbering to another's, by class name.
#[derive(Clone, Copy, Debug)]
pub struct ClassRemap<'a> {
    original: &'a ClassTable,
    target: &'a ClassTable,
}

impl<'a> ClassRemap<'a> {
    pub fn new(original: &'a ClassTable, target: &'a ClassTable) -> Self {
        Self { original, target }
    }

    pub fn original(&self) -> &'a ClassTable {
        self.original
    }

    pub fn target(&self) -> &'a ClassTable {
        self.target
    }

    /// Maps `source` to the target index of the class with the same name.
    pub fn remap(&self, source: ClassIndex) -> Result<ClassIndex, LookupError> {
        let name = self
            .original
            .name(source)
            .ok_or(LookupError::UnknownSourceIndex { index: source })?;

        self.target
            .index_of(name)
            .ok_or_else(|| LookupError::Unmappable {
                index: source,
                name: name.to_string(),
            })
    }

    /// True when the target list has fewer distinct names than the original
    /// list has classes, so some classes may fail to remap.
    pub fn target_is_smaller(&self) -> bool {
        self.target.distinct_names() < self.original.len()
    }
}
