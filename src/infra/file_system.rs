use crate::core::encoding::decode_text;
use crate::domain::models::{DecodePolicy, FileFilter};
use anyhow::Context;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Paths of every file under `root` whose name carries an accepted suffix.
///
/// Directories named in the exclusion set are pruned before descent; the
/// root itself is always walked. A missing root yields no files.
pub fn list_code_files(root: &Path, filter: &FileFilter) -> anyhow::Result<Vec<PathBuf>> {
    info!("Listing code files in: {}", root.display());
    debug!("Extensions: {:?}", filter.extensions);
    debug!("Exclude dirs: {:?}", filter.exclude_dirs);

    if !root.is_dir() {
        debug!("Skipping missing directory: {}", root.display());
        return Ok(Vec::new());
    }

    let mut result = Vec::new();
    let mut scanned = 0usize;

    for entry in walkdir::WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            let excluded = e.depth() > 0
                && e.file_type().is_dir()
                && filter.excludes_dir(&e.file_name().to_string_lossy());
            if excluded {
                debug!("Pruning excluded directory: {}", e.path().display());
            }
            !excluded
        })
    {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        if entry.file_type().is_dir() {
            continue;
        }

        let is_file = entry.file_type().is_file()
            || (entry.file_type().is_symlink() && entry.path().is_file());
        if !is_file {
            continue;
        }

        scanned += 1;
        if filter.accepts_file(&entry.file_name().to_string_lossy()) {
            debug!("Found matching file: {}", entry.path().display());
            result.push(entry.into_path());
        }
    }

    info!(
        "Found {} matching files ({} scanned) in {}",
        result.len(),
        scanned,
        root.display()
    );
    Ok(result)
}

pub fn read_file_contents(path: &Path, policy: DecodePolicy) -> anyhow::Result<String> {
    debug!("Reading file contents: {}", path.display());
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read contents of {}", path.display()))?;
    if bytes.is_empty() {
        debug!("File is empty: {}", path.display());
        return Ok(String::new());
    }

    let contents = decode_text(path, &bytes, policy)?;
    debug!("Read {} bytes from file", bytes.len());
    Ok(contents)
}
