use std::fmt;
use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::ValueEnum;
use cp_heuristics_adapter_util::{fs, paths::expand_tilde};
use itertools::{Itertools, MinMaxResult};
use log::{debug, error, info};
use tempfile::NamedTempFile;

use crate::languages::{BuildMode, LangKind};
use crate::project::Project;
use crate::runner::{ProgramRunner, RunError};
use crate::term;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreType {
    Plain,
    Log,
}

impl fmt::Display for ScoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreType::Plain => write!(f, "plain"),
            ScoreType::Log => write!(f, "log"),
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Path to the solver source file.
    pub source: PathBuf,

    /// Number of cases to run.
    pub number: usize,

    /// Build mode.
    #[arg(short, long, value_enum, default_value_t = BuildMode::Debug)]
    pub build_mode: BuildMode,

    /// Time limit per case in seconds.
    #[arg(short, long, default_value_t = 2.0)]
    pub time_limit: f64,

    /// Type of score. If standings are computed from relative scores, `log`
    /// is recommended.
    #[arg(short, long, value_enum, default_value_t = ScoreType::Plain)]
    pub score_type: ScoreType,
}

pub fn run(args: RunArgs) -> Result<()> {
    if args.number == 0 {
        bail!("number of cases must be at least 1");
    }
    if !args.time_limit.is_finite() || args.time_limit <= 0.0 {
        bail!("time limit must be positive");
    }
    let source = expand_tilde(&args.source);
    let project = Project::new(Project::search_project_root(&source)?);

    info!("detecting the language of {}", source.display());
    let kind = LangKind::detect(&source)?;
    info!("detected language: {}", kind.name());
    let language = kind.load(args.build_mode, Some(&project.config_file(kind)))?;

    info!("building the source file");
    let runner = language.compile(&source)?;

    info!("running {} cases", args.number);
    let scores = run_all_cases(&project, &runner, args.number, args.time_limit)?;

    info!("writing scores");
    let timestamp = Local::now().format("%Y%m%d-%H%M%S").to_string();
    let scores_file = project.scores_dir().join(format!("scores_{timestamp}.txt"));
    fs::write_lines(&scores_file, scores.iter().map(i64::to_string).collect_vec())?;

    info!("writing scores summary");
    let processed = match args.score_type {
        ScoreType::Plain => scores.iter().map(|&s| s as f64).collect_vec(),
        ScoreType::Log => scores.iter().map(|&s| (s as f64).ln()).collect_vec(),
    };
    let summary = ScoreSummary::new(&processed);
    let summary_file = project
        .scores_dir()
        .join(format!("scores_{timestamp}.summary.txt"));
    fs::write(&summary_file, summary.pretty())?;

    print!("{}", summary.pretty());
    term::success("All cases finished successfully");
    Ok(())
}

fn run_all_cases(
    project: &Project,
    runner: &ProgramRunner,
    number: usize,
    time_limit: f64,
) -> Result<Vec<i64>> {
    (0..number)
        .map(|case_id| run_single_case(project, runner, case_id, time_limit))
        .collect()
}

/// Runs one case with the input file on stdin and the output file on stdout.
/// The solver receives a temporary file path as its only argument and is
/// expected to leave its score there.
fn run_single_case(
    project: &Project,
    runner: &ProgramRunner,
    case_id: usize,
    time_limit: f64,
) -> Result<i64> {
    let input_file = project.input_file(case_id);
    let output_file = project.output_file(case_id);
    info!("running case {case_id:04}");

    let score_file = NamedTempFile::new().context("failed to create temporary score file")?;
    let stdin = File::open(&input_file)
        .with_context(|| format!("failed to read {}", input_file.display()))?;
    let stdout = File::create(&output_file)
        .with_context(|| format!("failed to write {}", output_file.display()))?;

    let solver_args = vec![score_file.path().display().to_string()];
    let result = runner.run(
        &solver_args,
        Some(Duration::from_secs_f64(time_limit)),
        stdin.into(),
        stdout.into(),
    );
    match &result {
        Err(RunError::Timeout) => error!("time limit exceeded on {}", input_file.display()),
        Err(RunError::NonZeroExit(_)) => error!("runtime error on {}", input_file.display()),
        _ => {}
    }
    let run = result?;
    debug!("finished in {}", run.time_with_unit());

    let raw = fs::read_to_string(score_file.path())?;
    raw.trim().parse::<i64>().with_context(|| {
        format!(
            "solver wrote an invalid score {:?} for {}",
            raw.trim(),
            input_file.display()
        )
    })
}

pub struct ScoreSummary {
    count: usize,
    sum: f64,
    min: f64,
    max: f64,
    mean: f64,
    median: f64,
    stdev: f64,
}

impl ScoreSummary {
    pub fn new(scores: &[f64]) -> Self {
        assert!(!scores.is_empty());
        let count = scores.len();
        let sum: f64 = scores.iter().sum();
        let (min, max) = match scores.iter().copied().minmax() {
            MinMaxResult::NoElements => unreachable!(),
            MinMaxResult::OneElement(x) => (x, x),
            MinMaxResult::MinMax(min, max) => (min, max),
        };
        let mean = sum / count as f64;
        let mut sorted = scores.to_vec();
        sorted.sort_by(f64::total_cmp);
        let median = if count % 2 == 1 {
            sorted[count / 2]
        } else {
            (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
        };
        // Sample standard deviation; a single case has none to speak of.
        let stdev = if count >= 2 {
            let var = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
            var.sqrt()
        } else {
            0.0
        };
        Self {
            count,
            sum,
            min,
            max,
            mean,
            median,
            stdev,
        }
    }

    pub fn pretty(&self) -> String {
        format!(
            "count: {}\n\
             sum  : {:.2}\n\
             min  : {:.2}\n\
             max  : {:.2}\n\
             mean : {:.2}\n\
             med  : {:.2}\n\
             stdev: {:.2}\n",
            self.count, self.sum, self.min, self.max, self.mean, self.median, self.stdev
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;
    use tempfile::TempDir;

    #[test]
    fn summary_of_even_count() {
        let summary = ScoreSummary::new(&[10.0, 20.0, 30.0, 40.0]);
        let expected = expect![[r#"
            count: 4
            sum  : 100.00
            min  : 10.00
            max  : 40.00
            mean : 25.00
            med  : 25.00
            stdev: 12.91
        "#]];
        expected.assert_eq(&summary.pretty());
    }

    #[test]
    fn summary_of_odd_count() {
        let summary = ScoreSummary::new(&[3.0, 1.0, 2.0]);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.median, 2.0);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 3.0);
        assert!((summary.stdev - 1.0).abs() < 1e-9);
    }

    #[test]
    fn summary_of_single_case_has_zero_stdev() {
        let summary = ScoreSummary::new(&[49.0]);
        let expected = expect![[r#"
            count: 1
            sum  : 49.00
            min  : 49.00
            max  : 49.00
            mean : 49.00
            med  : 49.00
            stdev: 0.00
        "#]];
        expected.assert_eq(&summary.pretty());
    }

    #[test]
    fn score_type_names_match_cli_values() {
        assert_eq!(ScoreType::Plain.to_string(), "plain");
        assert_eq!(ScoreType::Log.to_string(), "log");
    }

    // Exercises the score hand-off without a compiler: a shell one-liner
    // plays the solver and follows the example_solver contract.
    #[test]
    fn run_all_cases_collects_scores() {
        let dir = TempDir::new().unwrap();
        let project = Project::new(dir.path());
        std::fs::create_dir_all(project.inputs_dir()).unwrap();
        std::fs::create_dir_all(project.outputs_dir()).unwrap();
        std::fs::write(project.input_file(0), "3 4\n").unwrap();
        std::fs::write(project.input_file(1), "-2 2\n").unwrap();

        let script = r#"read a b; v=$((a + b)); echo "$v"; echo $((v * v)) > "$0""#;
        let runner = ProgramRunner::new(vec![
            "sh".to_owned(),
            "-c".to_owned(),
            script.to_owned(),
        ]);

        let scores = run_all_cases(&project, &runner, 2, 2.0).unwrap();
        assert_eq!(scores, [49, 0]);
        assert_eq!(
            std::fs::read_to_string(project.output_file(0)).unwrap(),
            "7\n"
        );
        assert_eq!(
            std::fs::read_to_string(project.output_file(1)).unwrap(),
            "0\n"
        );
    }

    #[test]
    fn failing_solver_aborts_the_run() {
        let dir = TempDir::new().unwrap();
        let project = Project::new(dir.path());
        std::fs::create_dir_all(project.inputs_dir()).unwrap();
        std::fs::create_dir_all(project.outputs_dir()).unwrap();
        std::fs::write(project.input_file(0), "3 4\n").unwrap();

        let runner = ProgramRunner::new(vec![
            "sh".to_owned(),
            "-c".to_owned(),
            "exit 1".to_owned(),
        ]);
        assert!(run_all_cases(&project, &runner, 1, 2.0).is_err());
    }

    #[test]
    fn solver_without_score_is_an_error() {
        let dir = TempDir::new().unwrap();
        let project = Project::new(dir.path());
        std::fs::create_dir_all(project.inputs_dir()).unwrap();
        std::fs::create_dir_all(project.outputs_dir()).unwrap();
        std::fs::write(project.input_file(0), "3 4\n").unwrap();

        let runner = ProgramRunner::new(vec![
            "sh".to_owned(),
            "-c".to_owned(),
            "cat > /dev/null".to_owned(),
        ]);
        let err = run_all_cases(&project, &runner, 1, 2.0).unwrap_err();
        assert!(format!("{err:#}").contains("invalid score"));
    }
}
