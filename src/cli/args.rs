use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "certstore-rs")]
#[command(version = "1.0.0")]
#[command(about = "Manage Windows certificate store entries through certutil")]
#[command(long_about = None)]
pub struct Cli {
    /// Config file path (default: ~/.config/certstore-rs/config.yaml)
    #[arg(long, env = "CERTSTORE_CONFIG")]
    pub config: Option<String>,

    /// certutil executable to invoke (overrides the config file)
    #[arg(long, env = "CERTSTORE_CERTUTIL")]
    pub certutil: Option<String>,

    /// Enable verbose logging (repeat for more verbosity: -v INFO, -vv DEBUG, -vvv TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Emit JSON instead of plain text
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the serial number of a local certificate file
    Serial {
        /// Certificate file path
        #[arg(value_hint = clap::ValueHint::FilePath)]
        cert_file: String,
    },
    /// List the serial numbers of all certificates in a store
    List {
        /// Store name (e.g. Root, CA, TrustedPublisher)
        store: String,
    },
    /// Add a certificate to a store
    Add {
        /// Certificate source: local path, file://, salt:// or http(s):// URL
        source: String,
        /// Store name
        store: String,
        /// Environment used to resolve remote sources
        #[arg(long, short = 'e')]
        env: Option<String>,
    },
    /// Remove a certificate from a store, matched by its serial number
    Del {
        /// Certificate source: local path, file://, salt:// or http(s):// URL
        source: String,
        /// Store name
        store: String,
        /// Environment used to resolve remote sources
        #[arg(long, short = 'e')]
        env: Option<String>,
    },
    /// Configuration inspection
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completion {
        #[command(subcommand)]
        command: CompletionCommands,
    },
    /// Internal completion helpers (hidden)
    #[command(hide = true)]
    CompletionHelper {
        #[command(subcommand)]
        command: CompletionHelperCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as YAML
    Show,
}

#[derive(Subcommand)]
pub enum CompletionCommands {
    /// Generate bash completion script
    Bash,
    /// Generate zsh completion script
    Zsh,
    /// Generate fish completion script
    Fish,
    /// Generate PowerShell completion script
    PowerShell,
}

impl CompletionCommands {
    pub fn shell(&self) -> Shell {
        match self {
            CompletionCommands::Bash => Shell::Bash,
            CompletionCommands::Zsh => Shell::Zsh,
            CompletionCommands::Fish => Shell::Fish,
            CompletionCommands::PowerShell => Shell::PowerShell,
        }
    }
}

#[derive(Subcommand)]
pub enum CompletionHelperCommands {
    /// List well-known store names for completion
    Stores,
    /// List configured environments for completion
    Envs,
}
