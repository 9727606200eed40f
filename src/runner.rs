use std::io;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use cp_heuristics_adapter_util::paths::expand_tilde;
use log::info;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to spawn program: {0}")]
    Spawn(io::Error),
    #[error("failed to wait for program: {0}")]
    Wait(io::Error),
    #[error("program exited with {0}")]
    NonZeroExit(ExitStatus),
    #[error("time limit exceeded")]
    Timeout,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunResult {
    pub time_ms: f64,
}

impl RunResult {
    pub fn time_with_unit(&self) -> String {
        format!("{:.0} ms", self.time_ms)
    }
}

/// Runs an external program given as an argv prefix.
pub struct ProgramRunner {
    pub exec_cmd: Vec<String>,
}

impl ProgramRunner {
    pub fn new(mut exec_cmd: Vec<String>) -> Self {
        assert!(!exec_cmd.is_empty());
        exec_cmd[0] = expand_tilde(Path::new(&exec_cmd[0])).display().to_string();
        Self { exec_cmd }
    }

    /// Spawns the program with `args` appended and waits for it, killing it
    /// once `timeout` elapses. Stderr is passed through.
    pub fn run(
        &self,
        args: &[String],
        timeout: Option<Duration>,
        stdin: Stdio,
        stdout: Stdio,
    ) -> Result<RunResult, RunError> {
        info!("running {:?}", self.exec_cmd.iter().chain(args).collect::<Vec<_>>());
        let start = Instant::now();
        let mut child = Command::new(&self.exec_cmd[0])
            .args(&self.exec_cmd[1..])
            .args(args)
            .stdin(stdin)
            .stdout(stdout)
            .spawn()
            .map_err(RunError::Spawn)?;
        let status = match timeout {
            None => child.wait().map_err(RunError::Wait)?,
            Some(limit) => wait_with_deadline(&mut child, start + limit)?,
        };
        let time_ms = start.elapsed().as_secs_f64() * 1000.0;
        if !status.success() {
            return Err(RunError::NonZeroExit(status));
        }
        Ok(RunResult { time_ms })
    }
}

fn wait_with_deadline(child: &mut Child, deadline: Instant) -> Result<ExitStatus, RunError> {
    loop {
        if let Some(status) = child.try_wait().map_err(RunError::Wait)? {
            return Ok(status);
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Err(RunError::Timeout);
        }
        thread::sleep(Duration::from_millis(5));
    }
}
