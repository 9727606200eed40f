use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use anyhow::{Context, Result};

pub fn read_to_string(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

pub fn write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("failed to read {}", path.display()))?;
    let mut res = Vec::new();
    for line in BufReader::new(file).lines() {
        res.push(line.with_context(|| format!("failed to read {}", path.display()))?);
    }
    Ok(res)
}

pub fn write_lines<P: AsRef<Path>, C: Into<String>>(path: P, lines: Vec<C>) -> Result<()> {
    let path = path.as_ref();
    let mut file = File::create(path).with_context(|| format!("failed to write {}", path.display()))?;
    for line in lines {
        file.write_all(line.into().as_bytes())
            .with_context(|| format!("failed to write {}", path.display()))?;
        file.write_all(b"\n")
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    file.flush()
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
