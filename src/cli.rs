// CLI module - command-line argument parsing and handlers
//
// Flags pick what feeds the session and override config values for one run.
// The `config` subcommand manages the config file:
// - config --show: Display effective configuration
// - config --reset: Regenerate config file with defaults
// - config --path: Print config file location

use crate::config::{Config, VERSION};
use crate::transport::Source;
use clap::{Parser, Subcommand};
use std::io::Write;

/// taleterm - terminal client for tagged-text MUD servers
#[derive(Parser, Debug)]
#[command(name = "taleterm")]
#[command(version = VERSION)]
#[command(about = "Terminal client for tagged-text MUD servers", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Replay a recorded session (one JSON event per line, "-" for stdin)
    #[arg(long, value_name = "FILE", conflicts_with = "demo")]
    pub replay: Option<String>,

    /// Play the built-in demo session
    #[arg(long)]
    pub demo: bool,

    /// Print the transcript to stdout instead of drawing the TUI
    #[arg(long)]
    pub headless: bool,

    /// Theme to use (overrides config)
    #[arg(long)]
    pub theme: Option<String>,

    /// Lines kept in the transcript (overrides config)
    #[arg(long, value_name = "N")]
    pub max_lines: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

impl Cli {
    /// Apply flag overrides on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(theme) = &self.theme {
            config.theme = theme.clone();
        }
        if let Some(max_lines) = self.max_lines {
            config.terminal.max_lines = max_lines;
        }
        if self.headless {
            config.enable_tui = false;
        }
        if self.demo {
            config.demo_mode = true;
        }
    }

    /// Pick the session source: an explicit replay wins over demo mode
    pub fn source(&self, config: &Config) -> Option<Source> {
        match &self.replay {
            Some(path) => Some(Source::replay(path)),
            None if config.demo_mode => Some(Source::Demo),
            None => None,
        }
    }
}

/// Handle CLI subcommands. Returns true if a command was handled (exit after).
pub fn handle_command(cli: &Cli) -> bool {
    match &cli.command {
        Some(Commands::Config { show, reset, path }) => {
            if *path {
                handle_config_path();
            } else if *show {
                handle_config_show();
            } else if *reset {
                handle_config_reset();
            } else {
                // No flag provided, show help
                println!("Usage: taleterm config [--show|--reset|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --path    Show config file path");
            }
            true
        }
        None => false, // No subcommand, run the client
    }
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

fn handle_config_show() {
    let config = Config::from_env();

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    // Show source info
    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    // Confirm if file exists
    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        let _ = std::io::stderr().flush();

        let mut input = String::new();
        if std::io::stdin().read_line(&mut input).is_err()
            || !input.trim().eq_ignore_ascii_case("y")
        {
            println!("Aborted.");
            return;
        }
    }

    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            std::process::exit(1);
        }
    }

    if let Err(e) = std::fs::write(&path, Config::default().to_toml()) {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Config reset to defaults: {}", path.display());
}
