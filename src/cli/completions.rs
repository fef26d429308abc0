use crate::cli::args::{Cli, CompletionCommands, CompletionHelperCommands};
use crate::config::Config;
use crate::utils::errors::Result;
use crate::utils::output::OutputFormat;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io;

/// System store names accepted by certutil on every Windows install
pub const WELL_KNOWN_STORES: &[&str] = &[
    "AddressBook",
    "AuthRoot",
    "CA",
    "Disallowed",
    "My",
    "Root",
    "TrustedPeople",
    "TrustedPublisher",
];

pub fn handle_completion_command(command: &CompletionCommands) -> Result<()> {
    let shell = command.shell();
    let mut cmd = Cli::command();
    let app_name = "certstore-rs";

    // For bash, add our custom completion enhancement first
    if matches!(shell, Shell::Bash) {
        println!("# Enhanced completion for certstore-rs store names and environments");
        print!(
            r#"
_certstore_rs_complete_stores() {{
    local stores
    stores=$(certstore-rs completion-helper stores 2>/dev/null)
    COMPREPLY=($(compgen -W "$stores" -- "${{cur}}"))
}}

_certstore_rs_complete_envs() {{
    local envs
    envs=$(certstore-rs completion-helper envs 2>/dev/null)
    COMPREPLY=($(compgen -W "$envs" -- "${{cur}}"))
}}

# Override the generated completion for specific arguments
_certstore_rs_override() {{
    local cur prev words cword
    _init_completion || return

    case "$prev" in
        "--env"|"-e")
            _certstore_rs_complete_envs
            return 0
            ;;
        "list")
            _certstore_rs_complete_stores
            return 0
            ;;
    esac

    # The store is the second positional of add/del
    case "${{words[1]}}" in
        "add"|"del")
            if [[ $cword -eq 3 ]]; then
                _certstore_rs_complete_stores
                return 0
            fi
            ;;
    esac

    # Fall back to the original completion
    _certstore-rs "$@"
}}

"#
        );

        // Generate the base completion
        generate(shell, &mut cmd, app_name, &mut io::stdout());

        println!();
        println!("# Override the completion function");
        println!("complete -F _certstore_rs_override certstore-rs");
    } else {
        // For non-bash shells, just generate the standard completion
        generate(shell, &mut cmd, app_name, &mut io::stdout());
    }

    Ok(())
}

pub fn handle_completion_helper_command(
    command: &CompletionHelperCommands,
    config: &Config,
    output: &OutputFormat,
) -> Result<()> {
    match command {
        CompletionHelperCommands::Stores => output.print_list(WELL_KNOWN_STORES),
        CompletionHelperCommands::Envs => {
            let mut envs: Vec<&str> = config.file_roots.keys().map(String::as_str).collect();
            if !envs.contains(&config.default_env.as_str()) {
                envs.push(&config.default_env);
            }
            envs.sort_unstable();
            output.print_list(&envs)
        }
    }
}
