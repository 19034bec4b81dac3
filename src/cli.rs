use clap::{Parser, Subcommand};

pub const DEFAULT_INTERPRETER: &str = "python3";

#[derive(Parser, Debug)]
#[command(name = "modctl", version, about = "Module inventory and bootstrap CLI")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        default_value = ".",
        help = "Project root containing the category directories (cores/, managers/, ...)"
    )]
    pub root: String,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rescan every category directory and print the report summary.
    Scan,
    /// List discovered modules (cached scan results when available).
    List {
        #[arg(long, help = "Only categories surfaced in the workspace view")]
        workspace: bool,
    },
    /// Print the issue report for the current scan.
    Report,
    /// Show one module's record.
    Show { module: String },
    /// List the fixed module categories, or one of them by id.
    Categories {
        #[arg(long, help = "Singular category id (core, manager, plugin, util, integration)")]
        id: Option<String>,
    },
    /// Show the per-root settings this tool reads.
    Config,
    Manifest {
        #[command(subcommand)]
        command: ManifestCommands,
    },
    Init {
        #[command(subcommand)]
        command: InitCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ManifestCommands {
    /// Read a module's init.yaml.
    Get { module_dir: String },
    /// Create or update a single field in a module's init.yaml.
    Set {
        module_dir: String,
        key: String,
        value: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum InitCommands {
    /// Run one module's __init__.py initializer.
    Run {
        module: String,
        #[arg(
            long,
            help = "Working directory for the initializer (default: project root)"
        )]
        workdir: Option<String>,
        #[arg(long, default_value = DEFAULT_INTERPRETER)]
        python: String,
        #[arg(long, help = "Kill the initializer after this many seconds")]
        timeout: Option<u64>,
    },
    /// Run every module's initializer in report order, stopping at the first failure.
    RunAll {
        #[arg(
            long,
            help = "Working directory for the initializers (default: project root)"
        )]
        workdir: Option<String>,
        #[arg(long, default_value = DEFAULT_INTERPRETER)]
        python: String,
        #[arg(long, help = "Kill an initializer after this many seconds")]
        timeout: Option<u64>,
    },
}
