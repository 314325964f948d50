use anyhow::Result;
use clap::Parser;
use pyviewer_setup::{
    cli::{Cli, Commands},
    config::Config,
    constants::service,
    doctor,
    service::{InstallConfig, InstallService, UninstallService},
    supervisor::{self, ActivationOutcome, ServiceDescriptor, SystemdUserSupervisor},
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging to stderr
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Install {
            source,
            install_dir,
            service_name,
            python,
            no_activate,
        } => {
            let config = Config::load()?;
            let install_dir = match install_dir {
                Some(dir) => dir,
                None => config.install_dir()?,
            };
            let install_config = InstallConfig {
                source_dir: source.unwrap_or_else(|| PathBuf::from(".")),
                install_dir,
                service_name: service_name.unwrap_or_else(|| config.service_name.clone()),
                python_interpreter: python.unwrap_or_else(|| config.python_interpreter.clone()),
                extra_packages: config.extra_packages.clone(),
                restart_sec: config.restart_sec,
                no_activate,
            };

            let result = InstallService::install(install_config)?;
            match result.outcome {
                Some(outcome) => report_outcome(&outcome, &result.descriptor),
                None => {
                    info!("Installation complete, service not activated");
                    println!(
                        "Installed. Activate later with: pyviewer-setup activate --service-name {}",
                        result.descriptor.name
                    );
                }
            }
        }
        Commands::Activate { service_name } => {
            let config = Config::load()?;
            let name = service_name.unwrap_or_else(|| config.service_name.clone());
            let install_dir = config.install_dir()?;
            let descriptor = ServiceDescriptor::new(
                &name,
                install_dir.join(service::WRAPPER_NAME),
                &install_dir,
            );

            let sup = SystemdUserSupervisor::new();
            let outcome = supervisor::activate(&sup, &descriptor);
            report_outcome(&outcome, &descriptor);
        }
        Commands::Uninstall {
            service_name,
            keep_files,
        } => {
            let config = Config::load()?;
            let name = service_name.unwrap_or_else(|| config.service_name.clone());
            let install_dir = config.install_dir()?;

            let sup = SystemdUserSupervisor::new();
            UninstallService::uninstall(&sup, &name, &install_dir, keep_files)?;
            println!("Uninstalled {}.service", name);
        }
        Commands::Doctor { json } => {
            let report = doctor::run();
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("External binary checks:");
                println!("{}", report.summary());
            }
            if !report.is_installable() {
                std::process::exit(1);
            }
        }
        Commands::Version => {
            println!("pyviewer-setup {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

/// Print the outcome-specific message and exit with its mapped code.
///
/// Exit codes: 0 = started, 2 = manual activation required, 1 = hard failure.
fn report_outcome(outcome: &ActivationOutcome, descriptor: &ServiceDescriptor) {
    match outcome {
        ActivationOutcome::Started => {
            println!("{} is enabled and running.", descriptor.unit_name());
            println!(
                "Check on it with: systemctl --user status {}",
                descriptor.unit_name()
            );
        }
        ActivationOutcome::ManualActivationRequired => {
            eprintln!("{}", supervisor::manual_activation_help(descriptor));
        }
        ActivationOutcome::Failed { remedy } => {
            eprintln!("Service activation failed.");
            eprintln!("{}", remedy);
        }
    }
    let code = outcome.exit_code();
    if code != 0 {
        std::process::exit(code);
    }
}
