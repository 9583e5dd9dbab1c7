use crate::domain::models::{CodeFiles, DecodePolicy, FileFilter, FileRecord};
use crate::infra::file_system::{list_code_files, read_file_contents};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Read every path into a [`FileRecord`]. The first read failure aborts.
pub fn load_files(
    files: Vec<PathBuf>,
    file_reader: impl Fn(&Path) -> anyhow::Result<String>,
) -> anyhow::Result<Vec<FileRecord>> {
    debug!("Loading {} files", files.len());
    let mut records = Vec::with_capacity(files.len());
    for path in files {
        let content = file_reader(&path)?;
        records.push(FileRecord { path, content });
    }
    Ok(records)
}

/// Insert records into the accumulator. A path already present keeps its
/// position but takes the new content.
pub fn merge_records(code_files: &mut CodeFiles, records: Vec<FileRecord>) {
    for record in records {
        if let Some(previous) = code_files.insert(record.path, record.content) {
            debug!("Replaced previously collected content ({} bytes)", previous.len());
        }
    }
}

pub fn collect_code_files(
    directory: &Path,
    filter: &FileFilter,
    policy: DecodePolicy,
) -> anyhow::Result<CodeFiles> {
    let paths = list_code_files(directory, filter)?;
    let records = load_files(paths, |path| read_file_contents(path, policy))?;

    let mut code_files = CodeFiles::new();
    merge_records(&mut code_files, records);
    Ok(code_files)
}

/// Collect each root in order into one map; later roots overwrite earlier ones.
pub fn collect_from_roots(
    roots: &[PathBuf],
    filter: &FileFilter,
    policy: DecodePolicy,
) -> anyhow::Result<CodeFiles> {
    let mut code_files = CodeFiles::new();
    for root in roots {
        let found = collect_code_files(root, filter, policy)?;
        merge_records(
            &mut code_files,
            found
                .into_iter()
                .map(|(path, content)| FileRecord { path, content })
                .collect(),
        );
    }
    info!("Collected {} files from {} roots", code_files.len(), roots.len());
    Ok(code_files)
}
