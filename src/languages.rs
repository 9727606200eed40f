use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::process::Command;

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use cp_heuristics_adapter_util::{fs, paths::ensure_file_exists};
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::runner::ProgramRunner;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildMode {
    Debug,
    Release,
}

impl BuildMode {
    /// Name of the TOML table holding this mode's settings.
    pub fn key(self) -> &'static str {
        match self {
            BuildMode::Debug => "debug",
            BuildMode::Release => "release",
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

pub trait Language {
    /// Compiles the source file if necessary and returns a runner for it.
    fn compile(&self, source_file: &Path) -> Result<ProgramRunner>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LangKind {
    Cpp,
    Python,
    Rust,
}

impl LangKind {
    pub fn detect(source_file: &Path) -> Result<Self> {
        let suffix = source_file.extension().and_then(|e| e.to_str()).unwrap_or("");
        match suffix {
            "cpp" | "cc" | "cxx" => Ok(LangKind::Cpp),
            "py" => Ok(LangKind::Python),
            "rs" => Ok(LangKind::Rust),
            _ => bail!("unsupported language: {}", source_file.display()),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LangKind::Cpp => "C++",
            LangKind::Python => "Python",
            LangKind::Rust => "Rust",
        }
    }

    pub fn config_file_name(self) -> &'static str {
        match self {
            LangKind::Cpp => "cpp_config.toml",
            LangKind::Python => "py_config.toml",
            LangKind::Rust => "rs_config.toml",
        }
    }

    pub fn load(
        self,
        build_mode: BuildMode,
        config_file: Option<&Path>,
    ) -> Result<Box<dyn Language>> {
        Ok(match self {
            LangKind::Cpp => Box::new(Cpp::new(build_mode, config_file)?),
            LangKind::Python => Box::new(Python::new(build_mode, config_file)?),
            LangKind::Rust => Box::new(Rust::new(build_mode, config_file)?),
        })
    }
}

/// Reads the `[debug]` or `[release]` table of a language config file.
/// `None` means all defaults.
fn load_config<T: DeserializeOwned + Default>(
    lang: LangKind,
    build_mode: BuildMode,
    config_file: Option<&Path>,
) -> Result<T> {
    let Some(path) = config_file else {
        info!("using default {} config", lang.name());
        return Ok(T::default());
    };
    info!("loading {} config from {}", lang.name(), path.display());
    ensure_file_exists(path)?;
    let raw = fs::read_to_string(path)?;
    let mut tables: HashMap<String, T> =
        toml::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))?;
    tables
        .remove(build_mode.key())
        .with_context(|| format!("missing [{}] table in {}", build_mode.key(), path.display()))
}

fn run_compiler(cmd: &[String]) -> Result<()> {
    info!("compiling with {cmd:?}");
    let status = Command::new(&cmd[0])
        .args(&cmd[1..])
        .status()
        .with_context(|| format!("failed to run {}", cmd[0]))?;
    if !status.success() {
        bail!("{} exited with {status}", cmd[0]);
    }
    Ok(())
}

fn exec_path(exec_file: &Path) -> String {
    if exec_file.is_relative() {
        format!("./{}", exec_file.display())
    } else {
        exec_file.display().to_string()
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct CppConfig {
    pub compiler: String,
    pub flags: Vec<String>,
}

impl Default for CppConfig {
    fn default() -> Self {
        Self {
            compiler: "g++".to_owned(),
            flags: ["-O2", "-Wall", "-Wextra"].map(|s| s.to_owned()).to_vec(),
        }
    }
}

pub struct Cpp {
    config: CppConfig,
}

impl Cpp {
    pub fn new(build_mode: BuildMode, config_file: Option<&Path>) -> Result<Self> {
        let config: CppConfig = load_config(LangKind::Cpp, build_mode, config_file)?;
        debug!("compiler: {}", config.compiler);
        debug!("flags: {:?}", config.flags);
        Ok(Self { config })
    }

    fn compile_command(&self, source_file: &Path, exec_file: &Path) -> Vec<String> {
        let mut cmd = vec![self.config.compiler.clone()];
        cmd.extend(self.config.flags.iter().cloned());
        cmd.push(source_file.display().to_string());
        cmd.push("-o".to_owned());
        cmd.push(exec_file.display().to_string());
        cmd
    }
}

impl Language for Cpp {
    fn compile(&self, source_file: &Path) -> Result<ProgramRunner> {
        let exec_file = source_file.with_extension("");
        run_compiler(&self.compile_command(source_file, &exec_file))?;
        Ok(ProgramRunner::new(vec![exec_path(&exec_file)]))
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PyConfig {
    pub python: String,
}

impl Default for PyConfig {
    fn default() -> Self {
        Self {
            python: "python".to_owned(),
        }
    }
}

pub struct Python {
    config: PyConfig,
}

impl Python {
    pub fn new(build_mode: BuildMode, config_file: Option<&Path>) -> Result<Self> {
        let config: PyConfig = load_config(LangKind::Python, build_mode, config_file)?;
        debug!("python: {}", config.python);
        Ok(Self { config })
    }
}

impl Language for Python {
    fn compile(&self, source_file: &Path) -> Result<ProgramRunner> {
        info!("compilation is not needed for python");
        Ok(ProgramRunner::new(vec![
            self.config.python.clone(),
            source_file.display().to_string(),
        ]))
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct RustConfig {
    pub compiler: String,
    pub flags: Vec<String>,
}

impl Default for RustConfig {
    fn default() -> Self {
        Self {
            compiler: "rustc".to_owned(),
            flags: vec!["-O".to_owned()],
        }
    }
}

pub struct Rust {
    config: RustConfig,
}

impl Rust {
    pub fn new(build_mode: BuildMode, config_file: Option<&Path>) -> Result<Self> {
        let config: RustConfig = load_config(LangKind::Rust, build_mode, config_file)?;
        debug!("compiler: {}", config.compiler);
        debug!("flags: {:?}", config.flags);
        Ok(Self { config })
    }

    fn compile_command(&self, source_file: &Path, exec_file: &Path) -> Vec<String> {
        let mut cmd = vec![self.config.compiler.clone()];
        cmd.extend(self.config.flags.iter().cloned());
        cmd.push(source_file.display().to_string());
        cmd.push("-o".to_owned());
        cmd.push(exec_file.display().to_string());
        cmd
    }
}

impl Language for Rust {
    fn compile(&self, source_file: &Path) -> Result<ProgramRunner> {
        let exec_file = source_file.with_extension("");
        run_compiler(&self.compile_command(source_file, &exec_file))?;
        Ok(ProgramRunner::new(vec![exec_path(&exec_file)]))
    }
}
