use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};

use intl_cli::{TranslateRequest, check_project, list_codes, parse_arg, render_report, translate};
use intl_core::IntlConfig;

#[derive(Parser, Debug)]
#[command(
    name = "intl",
    about = "intl: check message catalogs and translate keys",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate every catalog of a project
    Check {
        /// Path to intl.toml
        #[arg(short = 'c', long = "config", value_name = "FILE", default_value = "intl.toml")]
        config: PathBuf,

        /// Print problems as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Translate a single key
    Translate {
        /// Path to intl.toml
        #[arg(short = 'c', long = "config", value_name = "FILE", default_value = "intl.toml")]
        config: PathBuf,

        /// Locale to use; falls back to the default locale when unsupported
        #[arg(short = 'l', long, value_name = "LOCALE")]
        locale: Option<String>,

        /// Accept-Language header value used when no locale matches
        #[arg(long = "accept-language", value_name = "HEADER")]
        accept_language: Option<String>,

        /// Namespace the key is relative to
        #[arg(short = 'n', long, value_name = "NS")]
        namespace: Option<String>,

        /// Fail instead of printing the fallback
        #[arg(long, default_value_t = false)]
        strict: bool,

        /// Placeholder values (repeatable)
        #[arg(
            short = 'a',
            long = "arg",
            value_name = "NAME=VALUE",
            value_parser = parse_arg,
            action = clap::ArgAction::Append
        )]
        args: Vec<(String, String)>,

        /// Message key
        key: String,
    },

    /// List every error code
    Codes,
}

fn load_config(path: &Path) -> anyhow::Result<IntlConfig> {
    IntlConfig::load(path).with_context(|| format!("loading {}", path.display()))
}

pub fn run(args: Cli) -> anyhow::Result<ExitCode> {
    // Initialize tracing subscriber for logging
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    match args.command {
        Command::Check { config, json } => {
            let config = load_config(&config)?;
            let problems = check_project(&config);
            print!("{}", render_report(&problems, json)?);
            if json {
                println!();
            }
            if problems.is_empty() {
                tracing::info!(locales = config.locales.len(), "all catalogs ok");
                Ok(ExitCode::SUCCESS)
            } else {
                eprintln!("{} problem(s) found", problems.len());
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Translate {
            config,
            locale,
            accept_language,
            namespace,
            strict,
            args,
            key,
        } => {
            let config = load_config(&config)?;
            let request = TranslateRequest {
                locale,
                accept_language,
                namespace,
                key,
                args,
                strict,
            };
            println!("{}", translate(&config, &request)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Codes => {
            println!("{}", list_codes());
            Ok(ExitCode::SUCCESS)
        }
    }
}

pub fn main() -> anyhow::Result<ExitCode> {
    let args = Cli::parse();
    run(args)
}
