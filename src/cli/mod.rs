use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pyviewer-setup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Install the PyViewer server and activate its user service
    Install {
        /// Directory containing the PyViewer server files to install
        #[arg(value_name = "SOURCE_DIR")]
        source: Option<PathBuf>,

        /// Installation directory (defaults to ~/.local/share/pyviewer)
        #[arg(long, env = "PYVIEWER_INSTALL_DIR")]
        install_dir: Option<PathBuf>,

        /// Name of the systemd user unit, without the ".service" suffix
        #[arg(long)]
        service_name: Option<String>,

        /// Python interpreter used to create the virtual environment
        #[arg(long)]
        python: Option<String>,

        /// Skip service activation after installing the files
        #[arg(long)]
        no_activate: bool,
    },

    /// Enable and start (or restart) the installed service
    Activate {
        /// Name of the systemd user unit, without the ".service" suffix
        #[arg(long)]
        service_name: Option<String>,
    },

    /// Stop, disable, and remove the installed service and files
    Uninstall {
        /// Name of the systemd user unit, without the ".service" suffix
        #[arg(long)]
        service_name: Option<String>,

        /// Keep the installation directory, only remove the service
        #[arg(long)]
        keep_files: bool,
    },

    /// Check for the external binaries PyViewer needs at runtime
    Doctor {
        /// Print the report as JSON instead of a human-readable summary
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}
