#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const ORIGINAL_CLASSES: &str = "person\nbicycle\ncar\n\ndog\n";
pub const TARGET_CLASSES: &str = "dog\nperson\ncar\nbicycle\n";
pub const SMALLER_CLASSES: &str = "car\nperson\n";

/// Temp workspace holding two class files and a labels directory.
pub struct Workspace {
    pub dir: tempfile::TempDir,
    pub original: PathBuf,
    pub target: PathBuf,
}

impl Workspace {
    pub fn new(original: &str, target: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let original_path = dir.path().join("original.txt");
        let target_path = dir.path().join("target.txt");
        fs::write(&original_path, original).expect("write original classes");
        fs::write(&target_path, target).expect("write target classes");
        fs::create_dir_all(dir.path().join("labels")).expect("create labels dir");

        Self {
            dir,
            original: original_path,
            target: target_path,
        }
    }

    pub fn label(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join("labels").join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create label parent dir");
        }
        fs::write(&path, content).expect("write label file");
        path
    }

    pub fn labels_dir(&self) -> PathBuf {
        self.dir.path().join("labels")
    }
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).expect("read file")
}
