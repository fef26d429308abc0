use crate::cli::args::*;
use crate::cli::completions::{handle_completion_command, handle_completion_helper_command};
use crate::config::Config;
use crate::exec::ShellRunner;
use crate::staging::CachingStager;
use crate::store::StoreManager;
use crate::utils::errors::Result;
use crate::utils::output::OutputFormat;
use std::io;
use std::path::Path;

type HostManager = StoreManager<ShellRunner, CachingStager>;

pub async fn handle_command(cli: Cli) -> Result<()> {
    // Initialize logging - always to stderr
    if !cli.quiet {
        let log_level = match cli.verbose {
            0 => "certstore_rs=warn",  // Default: warnings only
            1 => "certstore_rs=info",  // -v: info level
            2 => "certstore_rs=debug", // -vv: debug level
            _ => "certstore_rs=trace", // -vvv+: trace level
        };

        tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_env_filter(log_level)
            .init();
    }

    // Create output formatter
    let output = OutputFormat::new(cli.json);

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(certutil) = cli.certutil {
        config.certutil = certutil;
    }

    match cli.command {
        Commands::Completion { command } => handle_completion_command(&command),
        Commands::CompletionHelper { command } => {
            handle_completion_helper_command(&command, &config, &output)
        }
        Commands::Config { command } => handle_config_command(command, &config),
        Commands::Serial { cert_file } => {
            let manager = host_manager(&config)?;
            let serial = manager.get_cert_serial(Path::new(&cert_file)).await?;
            if serial.is_none() && !cli.quiet {
                eprintln!("No serial number found for {cert_file}");
            }
            output.print_optional(serial.as_ref())
        }
        Commands::List { store } => {
            let manager = host_manager(&config)?;
            let serials = manager.get_stored_cert_serials(&store).await?;
            output.print_list(&serials)
        }
        Commands::Add { source, store, env } => {
            let manager = host_manager(&config)?;
            let env = env.unwrap_or_else(|| config.default_env.clone());
            let raw = manager.add_store(&source, &store, &env).await?;
            output.print_command_output(&raw)
        }
        Commands::Del { source, store, env } => {
            let manager = host_manager(&config)?;
            let env = env.unwrap_or_else(|| config.default_env.clone());
            let raw = manager.del_store(&source, &store, &env).await?;
            output.print_command_output(&raw)
        }
    }
}

fn host_manager(config: &Config) -> Result<HostManager> {
    let stager = CachingStager::from_config(config)?;
    StoreManager::for_host(ShellRunner::new(), stager, &config.certutil)
}

fn handle_config_command(command: ConfigCommands, config: &Config) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            print!("{}", config.to_yaml()?);
            println!("# cache_dir resolves to {}", config.cache_dir()?.display());
            Ok(())
        }
    }
}
