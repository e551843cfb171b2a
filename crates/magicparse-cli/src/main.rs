//! magicparse CLI.

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::{ColorChoice, Parser};
use magicparse_cli::commands::{
    exit_code, file_type_names, load_schema, parse_file, transform_names,
};
use magicparse_cli::logging::{LogConfig, LogFormat, init_logging};
use magicparse_cli::output::{render_json, render_tables, transforms_table};
use magicparse_core::Registry;
use tracing::level_filters::LevelFilter;

mod cli;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg, OutputFormatArg, ParseArgs};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Parse(args) => match run_parse(&args) {
            Ok(code) => code,
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Transforms => {
            run_transforms();
            0
        }
    };
    std::process::exit(exit_code);
}

fn run_parse(args: &ParseArgs) -> Result<i32> {
    let schema = load_schema(&args.schema)?;
    let result = parse_file(&schema, &args.input)?;
    match args.format {
        OutputFormatArg::Json => println!("{}", render_json(&result, args.errors_only)?),
        OutputFormatArg::Table => println!("{}", render_tables(&result, args.errors_only)),
    }
    Ok(exit_code(&result))
}

fn run_transforms() {
    let registry = Registry::read_global();
    let table = transforms_table(&transform_names(&registry), &file_type_names(&registry));
    println!("{table}");
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
