// src/file.rs

use std::{
    fs::{self, OpenOptions},
    io::{self, BufWriter, Write},
    path::Path,
};

use crate::Result;
use crate::csv::write_row;

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::other(format!(
            "Path exists but is not a directory: {}",
            dir.display()
        ))
        .into());
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// Create the parent directory of `path` if it has one.
pub fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    Ok(())
}

/// Missing or zero-length; either way the next append starts with a header.
pub fn is_fresh(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true)
}

/// Append rows to a CSV file, writing `headers` first when the file is fresh.
pub fn append_rows(
    path: &Path,
    headers: &[&str],
    rows: &[Vec<String>],
    sep: char,
) -> Result<()> {
    ensure_parent(path)?;
    let fresh = is_fresh(path);

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut out = BufWriter::new(file);
    if fresh {
        let header_row: Vec<String> = headers.iter().map(|h| s!(*h)).collect();
        write_row(&mut out, &header_row, sep)?;
    }
    for row in rows {
        write_row(&mut out, row, sep)?;
    }
    out.flush()?;
    Ok(())
}
