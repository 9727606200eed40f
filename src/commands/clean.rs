use std::path::PathBuf;

use anyhow::Result;
use cp_heuristics_adapter_util::paths::expand_tilde;
use log::info;

use crate::interact::delete_if_allowed;
use crate::project::Project;
use crate::term;

#[derive(clap::Args, Debug)]
pub struct CleanArgs {
    /// Path to the project directory.
    #[arg(short, long, default_value = ".")]
    pub path: PathBuf,
}

pub fn run(args: CleanArgs) -> Result<()> {
    let root = expand_tilde(&args.path);
    let project = Project::new(root.clone());

    info!("cleaning project at {}", root.display());
    for dir in [
        project.settings_dir(),
        project.inputs_dir(),
        project.outputs_dir(),
        project.scores_dir(),
    ] {
        delete_if_allowed(&dir)?;
    }

    term::success("Project cleaned successfully");
    Ok(())
}
