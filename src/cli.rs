use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)] // requires `derive` feature
#[command(name = "sevenz-batch")]
#[command(about = "Batch 7-Zip archiving and verification of folders", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Archive every child folder of ROOT into ROOT as "[YYYY-MM-DD] name.7z"
    /// (always asks, stops on first failure)
    Archive {
        root: PathBuf,
    },
    /// Archive every child folder of ROOT with custom naming (no prompt, keeps going on failure)
    ArchiveAdvanced(ArchiveAdvancedArgs),
    /// Archive a single folder
    ArchiveOne(ArchiveOneArgs),
    /// Test every .7z directly under ROOT (always asks, stops on first failure)
    Verify {
        root: PathBuf,
    },
    /// Test .7z files under ROOT (no prompt, keeps going on failure)
    VerifyAdvanced(VerifyAdvancedArgs),
    /// Test a single archive
    VerifyOne {
        archive: PathBuf,
    },
    /// Print the 7-Zip executable that would be used
    LocateEngine,
    /// Print configuration values
    PrintConfig,
}

#[derive(Debug, Args)]
pub struct ArchiveAdvancedArgs {
    pub root: PathBuf,
    /// Write archives here instead of ROOT
    #[arg(long)]
    pub dest: Option<PathBuf>,
    /// Prefix names with "[YYYY-MM-DD HH_mm_ss]"
    #[arg(long)]
    pub timestamp: bool,
    /// Insert ".SUFFIX" before the extension
    #[arg(long)]
    pub suffix: Option<String>,
    /// Ask before starting
    #[arg(long)]
    pub confirm: bool,
    /// Stop at the first failed folder
    #[arg(long)]
    pub stop_on_error: bool,
}

#[derive(Debug, Args)]
pub struct ArchiveOneArgs {
    pub source: PathBuf,
    /// Directory for the archive, defaults to the source's parent
    #[arg(long)]
    pub dest: Option<PathBuf>,
    /// Base name instead of the folder name
    #[arg(long)]
    pub name: Option<String>,
    /// Prefix the name with "[YYYY-MM-DD HH_mm_ss]"
    #[arg(long)]
    pub timestamp: bool,
    /// Insert ".SUFFIX" before the extension
    #[arg(long)]
    pub suffix: Option<String>,
}

#[derive(Debug, Args)]
pub struct VerifyAdvancedArgs {
    pub root: PathBuf,
    /// Also test archives in nested folders
    #[arg(long, short)]
    pub recursive: bool,
    /// Ask before starting
    #[arg(long)]
    pub confirm: bool,
    /// Stop at the first failed archive
    #[arg(long)]
    pub stop_on_error: bool,
}
