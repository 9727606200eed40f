use std::io::Write;
use std::time::Instant;

use anyhow::{anyhow, Result};
use log::LevelFilter;

pub fn init(verbose: bool) -> Result<()> {
    log::set_boxed_logger(Box::new(StderrLogger {
        start: Instant::now(),
    }))
    .map_err(|_| anyhow!("failed to set logger"))?;
    log::set_max_level(if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });
    Ok(())
}

struct StderrLogger {
    start: Instant,
}

impl log::Log for StderrLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        eprintln!(
            "{:0.3}: {} - {}",
            self.start.elapsed().as_secs_f32(),
            record.level(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}
