use crate::core::collector::collect_from_roots;
use crate::core::layout::{PageGeometry, layout_document};
use crate::domain::models::{
    DEFAULT_OUTPUT, DEFAULT_TITLE, DecodePolicy, EncodePolicy, ExportConfig, FileFilter,
};
use crate::infra::logger::setup_logger;
use crate::infra::output::{print_success, write_output};
use clap::Parser;
use log::{debug, info};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "code2pdf")]
#[command(about = "Collect a project's source files into one printable PDF", long_about = None)]
pub struct Cli {
    /// Directory the scanned directories are resolved against
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Directory to scan, relative to the root; repeat for more
    #[arg(long = "dir", default_values = ["src", "public", "src/app/student"])]
    pub dirs: Vec<PathBuf>,

    #[arg(long, default_value = ".js,.jsx,.css,.mjs,.json")]
    pub ext: String,

    /// Directory names skipped wherever they appear
    #[arg(long, default_value = "node_modules,.git,public,images")]
    pub exclude: String,

    #[arg(long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    #[arg(long, default_value = DEFAULT_TITLE)]
    pub title: String,

    /// Fail on invalid UTF-8 instead of dropping the bytes
    #[arg(long)]
    pub strict_decode: bool,

    /// Fail on characters the PDF fonts cannot print instead of printing '?'
    #[arg(long)]
    pub strict_encode: bool,

    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl Cli {
    pub fn into_config(self) -> ExportConfig {
        ExportConfig {
            project_root: self.root,
            base_directories: self.dirs,
            filter: FileFilter::new(split_list(&self.ext), split_list(&self.exclude)),
            output_path: self.output,
            title: self.title,
            decode_policy: if self.strict_decode {
                DecodePolicy::Strict
            } else {
                DecodePolicy::Lossy
            },
            encode_policy: if self.strict_encode {
                EncodePolicy::Strict
            } else {
                EncodePolicy::Lossy
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
    pub files: usize,
    pub pages: usize,
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logger(cli.verbose)?;
    debug!("Command parameters: {:?}", cli);

    let config = cli.into_config();
    export(&config)?;
    print_success(&config.output_path)
}

/// Collect, lay out and write the document described by `config`.
pub fn export(config: &ExportConfig) -> anyhow::Result<ExportSummary> {
    let roots = config.root_directories();
    info!("Scanning {} directories under {}", roots.len(), config.project_root.display());
    let code_files = collect_from_roots(&roots, &config.filter, config.decode_policy)?;

    info!("Laying out {} files", code_files.len());
    let layout = layout_document(
        &code_files,
        &config.title,
        PageGeometry::a4(),
        config.encode_policy,
    )?;

    info!("Writing output");
    write_output(&layout, &config.output_path)?;

    Ok(ExportSummary {
        files: code_files.len(),
        pages: layout.pages.len(),
    })
}
