use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cp_heuristics_adapter_util::{fs, paths::expand_tilde};
use log::{error, info};

use crate::interact::delete_if_allowed;
use crate::project::Project;
use crate::term;

const CONFIG_TEMPLATES: [(&str, &str); 3] = [
    ("cpp_config.toml", include_str!("../../templates/cpp_config.toml")),
    ("py_config.toml", include_str!("../../templates/py_config.toml")),
    ("rs_config.toml", include_str!("../../templates/rs_config.toml")),
];

const EXAMPLE_SOLVERS: [(&str, &str); 3] = [
    ("example_solver.cpp", include_str!("../../templates/example_solver.cpp")),
    ("example_solver.py", include_str!("../../templates/example_solver.py")),
    ("example_solver.rs", include_str!("../bin/example_solver.rs")),
];

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Path to the project directory.
    #[arg(short, long, default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing files.
    #[arg(long)]
    pub overwrite: bool,

    /// Also install the example solvers into the project root.
    #[arg(long)]
    pub with_examples: bool,
}

pub fn run(args: InitArgs) -> Result<()> {
    let root = expand_tilde(&args.path);
    let project = Project::new(root.clone());

    if args.overwrite {
        info!("overwriting {}", root.display());
    } else {
        info!("checking if {} is empty", root.display());
        if let Err(err) = project.assert_empty() {
            error!("{err}");
            error!("use --overwrite to overwrite existing files");
            return Err(err.into());
        }
    }

    info!("initializing project at {}", root.display());
    for dir in [
        project.inputs_dir(),
        project.outputs_dir(),
        project.scores_dir(),
        project.settings_dir(),
    ] {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    info!("copying template config files");
    install(&project.settings_dir(), &CONFIG_TEMPLATES)?;

    if args.with_examples {
        info!("copying example solvers");
        install(&project.root, &EXAMPLE_SOLVERS)?;
    }

    term::success("Project initialized successfully");
    Ok(())
}

fn install(dir: &Path, templates: &[(&str, &str)]) -> Result<()> {
    for (name, contents) in templates {
        let dest = dir.join(name);
        if !dest.exists() || delete_if_allowed(&dest)? {
            fs::write(&dest, contents)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn bundled_config_templates_parse() {
        for (name, contents) in CONFIG_TEMPLATES {
            let tables: std::collections::HashMap<String, toml::Value> =
                toml::from_str(contents).unwrap_or_else(|e| panic!("{name}: {e}"));
            assert!(tables.contains_key("debug"), "{name} lacks [debug]");
            assert!(tables.contains_key("release"), "{name} lacks [release]");
        }
    }

    #[test]
    fn init_creates_project_layout() {
        let dir = TempDir::new().unwrap();
        run(InitArgs {
            path: dir.path().to_path_buf(),
            overwrite: false,
            with_examples: false,
        })
        .unwrap();
        let project = Project::new(dir.path());
        assert!(project.inputs_dir().is_dir());
        assert!(project.outputs_dir().is_dir());
        assert!(project.scores_dir().is_dir());
        assert!(project.config_file(crate::languages::LangKind::Cpp).is_file());
        assert!(project.config_file(crate::languages::LangKind::Python).is_file());
        assert!(project.config_file(crate::languages::LangKind::Rust).is_file());
        assert!(!dir.path().join("example_solver.rs").exists());
    }

    #[test]
    fn init_installs_examples_on_request() {
        let dir = TempDir::new().unwrap();
        run(InitArgs {
            path: dir.path().to_path_buf(),
            overwrite: false,
            with_examples: true,
        })
        .unwrap();
        assert!(dir.path().join("example_solver.cpp").is_file());
        assert!(dir.path().join("example_solver.py").is_file());
        assert!(dir.path().join("example_solver.rs").is_file());
    }

    #[test]
    fn init_refuses_non_empty_project_without_overwrite() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("in")).unwrap();
        let result = run(InitArgs {
            path: dir.path().to_path_buf(),
            overwrite: false,
            with_examples: false,
        });
        assert!(result.is_err());
    }

    #[test]
    fn init_overwrite_accepts_existing_dirs() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("in")).unwrap();
        run(InitArgs {
            path: dir.path().to_path_buf(),
            overwrite: true,
            with_examples: false,
        })
        .unwrap();
        assert!(dir.path().join("scores").is_dir());
    }
}
