use indexmap::IndexMap;
use std::path::PathBuf;

/// Collected files, keyed by path, in walk order.
pub type CodeFiles = IndexMap<PathBuf, String>;

#[derive(Debug, Clone)]
pub struct FileRecord {
    pub path: PathBuf,
    pub content: String,
}

/// What to do with byte sequences that are not valid UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodePolicy {
    /// Drop undecodable sequences.
    #[default]
    Lossy,
    Strict,
}

/// What to do with characters the PDF fonts cannot show (controls and anything past Latin-1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodePolicy {
    /// Replace them with a placeholder.
    #[default]
    Lossy,
    Strict,
}

#[derive(Debug, Clone)]
pub struct FileFilter {
    pub extensions: Vec<String>,
    pub exclude_dirs: Vec<String>,
}

impl FileFilter {
    pub fn new<E, X>(extensions: E, exclude_dirs: X) -> Self
    where
        E: IntoIterator,
        E::Item: Into<String>,
        X: IntoIterator,
        X::Item: Into<String>,
    {
        Self {
            extensions: extensions.into_iter().map(Into::into).collect(),
            exclude_dirs: exclude_dirs.into_iter().map(Into::into).collect(),
        }
    }

    /// Whole-suffix match on the file name: `data.json.bak` is not a `.json` file.
    pub fn accepts_file(&self, file_name: &str) -> bool {
        self.extensions.iter().any(|ext| file_name.ends_with(ext.as_str()))
    }

    pub fn excludes_dir(&self, dir_name: &str) -> bool {
        self.exclude_dirs.iter().any(|name| name == dir_name)
    }
}

#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub project_root: PathBuf,
    /// Scanned in order, relative to `project_root` unless absolute.
    pub base_directories: Vec<PathBuf>,
    pub filter: FileFilter,
    pub output_path: PathBuf,
    pub title: String,
    pub decode_policy: DecodePolicy,
    pub encode_policy: EncodePolicy,
}

pub const DEFAULT_TITLE: &str = "Project Code Files";
pub const DEFAULT_OUTPUT: &str = "Project_Code.pdf";
pub const DEFAULT_DIRECTORIES: &[&str] = &["src", "public", "src/app/student"];
pub const DEFAULT_EXTENSIONS: &[&str] = &[".js", ".jsx", ".css", ".mjs", ".json"];
pub const DEFAULT_EXCLUDES: &[&str] = &["node_modules", ".git", "public", "images"];

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            base_directories: DEFAULT_DIRECTORIES.iter().map(PathBuf::from).collect(),
            filter: FileFilter::new(
                DEFAULT_EXTENSIONS.iter().copied(),
                DEFAULT_EXCLUDES.iter().copied(),
            ),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            title: DEFAULT_TITLE.to_string(),
            decode_policy: DecodePolicy::default(),
            encode_policy: EncodePolicy::default(),
        }
    }
}

impl ExportConfig {
    pub fn root_directories(&self) -> Vec<PathBuf> {
        self.base_directories
            .iter()
            .map(|dir| self.project_root.join(dir))
            .collect()
    }
}
