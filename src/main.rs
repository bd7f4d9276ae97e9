use clap::ArgMatches;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use config::MmrlConfigBuilder;
use std::path::PathBuf;
use tracing::debug;

use crate::modules::manager::Platform;

mod cli;
mod cmds;
mod config;
mod errors;
mod logs;
mod modules;
mod utils;

fn main() {
    // Initialize color_eyre
    color_eyre::install().unwrap_or_else(|e| panic!("Failed to initialize color_eyre: {:?}", e));

    let cli_matches = cli::build_cli().get_matches();
    let verbosity = cli_matches.get_count("verbosity").min(2);

    let mmrl_config = match init_config(&cli_matches, verbosity) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to initialize config. Exiting");
            eprintln!("{:?}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    let logger = match logs::LoggerBuilder::default()
        .with_verbosity(verbosity)
        .with_log_dir(&mmrl_config.logs_dir)
        .with_max_logs(mmrl_config.logs_max)
        .build()
    {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("Failed to setup logging. Exiting");
            eprintln!("{:?}", e);
            std::process::exit(1);
        }
    };
    let log_guard = match logger.start() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging. Exiting");
            eprintln!("{:?}", e);
            std::process::exit(1);
        }
    };

    debug!("Config initialized:\n{:#?}", &mmrl_config);

    let code = match run(&cli_matches, &mmrl_config) {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => {
            eprintln!("{:?}", e);
            1
        }
    };

    // process::exit skips destructors, flush the log writer first
    drop(log_guard);
    std::process::exit(code);
}

/// Initializes and configures mmrl by:
///
/// 1. Parsing CLI arguments
/// 2. Loading configuration from file (if present)
/// 3. Merging CLI arguments with file configuration
/// 4. Returning the final configuration
///
/// # Errors
///
/// Returns an error if the configuration file exists but cannot be parsed.
fn init_config(cli: &ArgMatches, verbosity: u8) -> Result<config::MmrlConfig> {
    let mmrl_config = MmrlConfigBuilder::default()
        .with_config_file(cli.get_one::<PathBuf>("config_file").cloned())
        .with_platform(cli.get_one::<Platform>("platform").copied())
        .with_show_icon(cli::flag_is_enabled(cli, "show_icon", "no_show_icon"))
        .with_show_cover(cli::flag_is_enabled(cli, "show_cover", "no_show_cover"))
        .with_logs_dir(cli.get_one::<PathBuf>("logs_dir").cloned())
        .with_logs_max(cli.get_one::<usize>("logs_max").copied())
        .build(verbosity)?;

    Ok(mmrl_config)
}

fn run(arg_matches: &ArgMatches, config: &config::MmrlConfig) -> Result<bool> {
    match cli::Commands::parse_command(arg_matches) {
        cli::Commands::List { feeds } => cmds::list::list(feeds, config),
        cli::Commands::Info { feed, id } => cmds::info::info(feed, id, config),
        cli::Commands::Resolve { feed, id } => cmds::resolve::resolve(feed, id, config),
        cli::Commands::Repos { file } => cmds::repos::repos(file),
        cli::Commands::Lookup {
            dir,
            prefix,
            patterns,
        } => cmds::lookup::lookup(dir, prefix, patterns),
        cli::Commands::CheckUrl { url } => cmds::lookup::check_url(url),
        cli::Commands::Completions { shell, out } => {
            let mut cmd = cli::build_cli();
            let name = cmd.get_name().to_string();
            if let Some(out) = out {
                clap_complete::generate_to(shell, &mut cmd, name, &out).wrap_err_with(|| {
                    format!(
                        "Failed to build completions for {} and write them to {}",
                        shell,
                        out.display()
                    )
                })?;
            } else {
                clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            }
            Ok(true)
        }
    }
}
