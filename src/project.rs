use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use cp_heuristics_adapter_util::paths::{ensure_not_exists, PathError};

use crate::languages::LangKind;

pub const SETTINGS_DIR_NAME: &str = ".cp-heuristics-adapter";

/// A project directory as laid out by the `init` subcommand.
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
}

impl Project {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn settings_dir(&self) -> PathBuf {
        self.root.join(SETTINGS_DIR_NAME)
    }

    pub fn inputs_dir(&self) -> PathBuf {
        self.root.join("in")
    }

    pub fn outputs_dir(&self) -> PathBuf {
        self.root.join("out")
    }

    pub fn scores_dir(&self) -> PathBuf {
        self.root.join("scores")
    }

    pub fn input_file(&self, case_id: usize) -> PathBuf {
        self.inputs_dir().join(format!("{case_id:04}.txt"))
    }

    pub fn output_file(&self, case_id: usize) -> PathBuf {
        self.outputs_dir().join(format!("{case_id:04}.txt"))
    }

    pub fn config_file(&self, lang: LangKind) -> PathBuf {
        self.settings_dir().join(lang.config_file_name())
    }

    /// Walks up from `start` until a directory containing the settings dir
    /// is found.
    pub fn search_project_root(start: &Path) -> Result<PathBuf> {
        let mut path = start;
        loop {
            if path.join(SETTINGS_DIR_NAME).exists() {
                return Ok(path.to_path_buf());
            }
            match path.parent() {
                Some(parent) => path = parent,
                None => bail!("{SETTINGS_DIR_NAME} directory not found above {}", start.display()),
            }
        }
    }

    /// Errors if any of the directories `init` would create already exists.
    pub fn assert_empty(&self) -> Result<(), PathError> {
        ensure_not_exists(&self.settings_dir())?;
        ensure_not_exists(&self.inputs_dir())?;
        ensure_not_exists(&self.outputs_dir())?;
        ensure_not_exists(&self.scores_dir())?;
        Ok(())
    }
}
