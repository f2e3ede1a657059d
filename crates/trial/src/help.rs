//! Help and version output.
//!
//! Help is rendered from the same clap command that parses arguments, so
//! every registered option shows up without a second list to keep in sync.

use clap::Command;
use trial_args::CliConfig;

/// The parsing command with usage, subcommands and notes for display.
pub fn command(config: &CliConfig) -> Command {
    let mut cmd = trial_args::command(config)
        .override_usage(format!(
            "{} [command] [options] [filters...]",
            config.name
        ))
        .after_help(
            "Nested options use dot notation, e.g. `--coverage.exclude dist`.\n\
             A flag cannot be given both bare and with dot notation; use `--coverage.enabled`.",
        );

    for (name, about) in config.commands {
        cmd = cmd.subcommand(Command::new(*name).about(*about));
    }
    cmd
}

/// The full help text.
pub fn render_help(config: &CliConfig) -> String {
    command(config).render_help().to_string()
}

/// The version line: `name/version os-arch`.
pub fn render_version(config: &CliConfig) -> String {
    format!(
        "{}/{} {}-{}",
        config.name,
        config.version,
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}
