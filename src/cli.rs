//! This module defines the command-line interface (CLI) structure using clap's builder pattern

use clap::builder::{EnumValueParser, FalseyValueParser, TypedValueParser};
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command, crate_name, crate_version, value_parser};
use clap_complete::Shell;
use std::env;
use std::path::PathBuf;

use crate::modules::manager::Platform;

// -------------------------------------------------------------------------------------------------
// CLI builder
// -------------------------------------------------------------------------------------------------

/// Constructs the CLI application definition using clap's builder pattern
///
/// Defines all commands, arguments, and help documentation.
pub(crate) fn build_cli() -> Command {
    let cmd = Command::new(crate_name!())
        .version(crate_version!())
        .about("mmrl - Inspect root module repositories")
        .subcommand_required(true)
        // --
        // * Main and global options
        .arg(
            Arg::new("config_file")
                .long("config-file")
                .global(true)
                .env("MMRL_CONFIG_FILE")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("platform")
                .long("platform")
                .short('p')
                .global(true)
                .env("MMRL_PLATFORM")
                .value_parser(EnumValueParser::<Platform>::new())
                .ignore_case(true)
                .help("Root solution used to resolve module requirements [default: magisk]"),
        )
        .arg(
            Arg::new("show_icon")
                .long("show-icon")
                .global(true)
                .env("MMRL_SHOW_ICON")
                .value_parser(FalseyValueParser::new().map(|b| -> u8 {
                    if b { 1 } else { 0 }
                }))
                .action(ArgAction::Count)
                .help("Show module icons [default]"),
        )
        .arg(
            Arg::new("no_show_icon")
                .long("no-show-icon")
                .global(true)
                .value_parser(FalseyValueParser::new().map(|b| -> u8 {
                    if b { 1 } else { 0 }
                }))
                .action(ArgAction::Count)
                .help("Hide module icons"),
        )
        .arg(
            Arg::new("show_cover")
                .long("show-cover")
                .global(true)
                .env("MMRL_SHOW_COVER")
                .value_parser(FalseyValueParser::new().map(|b| -> u8 {
                    if b { 1 } else { 0 }
                }))
                .action(ArgAction::Count)
                .help("Show module covers [default]"),
        )
        .arg(
            Arg::new("no_show_cover")
                .long("no-show-cover")
                .global(true)
                .value_parser(FalseyValueParser::new().map(|b| -> u8 {
                    if b { 1 } else { 0 }
                }))
                .action(ArgAction::Count)
                .help("Hide module covers"),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .global(true)
                .env("MMRL_VERBOSE")
                .action(ArgAction::Count)
                .help("Verbosity level (-v = debug, -vv = trace)"),
        )
        .arg(
            Arg::new("logs_dir")
                .long("logs-dir")
                .global(true)
                .env("MMRL_LOGS_DIR")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("logs_max")
                .long("logs-max")
                .global(true)
                .env("MMRL_LOGS_MAX")
                .value_parser(value_parser!(usize)),
        );

    // --
    // * Add subcommands

    cmd.subcommand(
        Command::new("list")
            .about("List the modules of one or more repository feeds")
            .arg(
                Arg::new("feeds")
                    .value_name("FEED")
                    .required(true)
                    .num_args(1..)
                    .value_parser(value_parser!(PathBuf))
                    .help("Repository feed files (modules.json)"),
            ),
    )
    // --
    // * info
       .subcommand(
           Command::new("info")
               .about("Show the metadata of a single module")
               .arg(
                   Arg::new("feed")
                       .value_name("FEED")
                       .required(true)
                       .value_parser(value_parser!(PathBuf)),
               )
               .arg(
                   Arg::new("id")
                       .value_name("ID")
                       .required(true)
                       .value_parser(value_parser!(String)),
               ),
       )
    // --
    // * resolve
       .subcommand(
           Command::new("resolve")
               .about("Print the effective installation requirements of a module as JSON")
               .arg(
                   Arg::new("feed")
                       .value_name("FEED")
                       .required(true)
                       .value_parser(value_parser!(PathBuf)),
               )
               .arg(
                   Arg::new("id")
                       .value_name("ID")
                       .required(true)
                       .value_parser(value_parser!(String)),
               ),
       )
    // --
    // * repos
       .subcommand(
           Command::new("repos")
               .about("List recommended repositories")
               .arg(
                   Arg::new("file")
                       .value_name("FILE")
                       .required(true)
                       .value_parser(value_parser!(PathBuf)),
               ),
       )
    // --
    // * lookup
       .subcommand(
           Command::new("lookup")
               .about("Find a file by name and glob pattern inside a directory")
               .arg(
                   Arg::new("dir")
                       .value_name("DIR")
                       .required(true)
                       .value_parser(value_parser!(PathBuf)),
               )
               .arg(
                   Arg::new("prefix")
                       .value_name("PREFIX")
                       .required(true)
                       .value_parser(value_parser!(String))
                       .help("File name without extension"),
               )
               .arg(
                   Arg::new("patterns")
                       .long("pattern")
                       .value_name("GLOB")
                       .action(ArgAction::Append)
                       .value_parser(value_parser!(String))
                       .help("Glob pattern to match [default: *.apk, *.jar, *.dex]"),
               ),
       )
    // --
    // * check-url
       .subcommand(
           Command::new("check-url")
               .about("Check whether a URL points to the local network")
               .arg(
                   Arg::new("url")
                       .value_name("URL")
                       .required(true)
                       .value_parser(value_parser!(String)),
               ),
       )
    // --
    // * completions
       .subcommand(
           Command::new("completions")
               .about("Generate shell completions")
               .arg(
                   Arg::new("shell")
                       .required(true)
                       .long("shell")
                       .short('s')
                       .value_parser(value_parser!(Shell))
                       .help("Set the shell for generating completions [values: bash, elvish, fish, powerShell, zsh]"),
               )
               .arg(
                   Arg::new("out")
                       .long("out")
                       .value_parser(value_parser!(PathBuf))
                       .help("Set the out directory for writing completions file"),
               ),
       )
}

// -------------------------------------------------------------------------------------------------
// CLI Commands
// -------------------------------------------------------------------------------------------------

/// Represents parsed command-line subcommands and their arguments
#[derive(Debug)]
pub(crate) enum Commands {
    List { feeds: Vec<PathBuf> },
    Info { feed: PathBuf, id: String },
    Resolve { feed: PathBuf, id: String },
    Repos { file: PathBuf },
    Lookup {
        dir: PathBuf,
        prefix: String,
        patterns: Vec<String>,
    },
    CheckUrl { url: String },
    Completions { shell: Shell, out: Option<PathBuf> },
}

impl Commands {
    /// Converts raw CLI matches into structured Commands enum
    pub(crate) fn parse_command(matches: &ArgMatches) -> Self {
        match matches.subcommand() {
            Some(("list", list_matches)) => Commands::List {
                feeds: list_matches
                    .get_many::<PathBuf>("feeds")
                    .map(|v| v.cloned().collect())
                    .unwrap_or_default(),
            },
            Some(("info", info_matches)) => Commands::Info {
                feed: info_matches.get_one::<PathBuf>("feed").unwrap().clone(),
                id: info_matches.get_one::<String>("id").unwrap().clone(),
            },
            Some(("resolve", resolve_matches)) => Commands::Resolve {
                feed: resolve_matches.get_one::<PathBuf>("feed").unwrap().clone(),
                id: resolve_matches.get_one::<String>("id").unwrap().clone(),
            },
            Some(("repos", repos_matches)) => Commands::Repos {
                file: repos_matches.get_one::<PathBuf>("file").unwrap().clone(),
            },
            Some(("lookup", lookup_matches)) => Commands::Lookup {
                dir: lookup_matches.get_one::<PathBuf>("dir").unwrap().clone(),
                prefix: lookup_matches.get_one::<String>("prefix").unwrap().clone(),
                patterns: lookup_matches
                    .get_many::<String>("patterns")
                    .map(|v| v.cloned().collect())
                    .unwrap_or_default(),
            },
            Some(("check-url", url_matches)) => Commands::CheckUrl {
                url: url_matches.get_one::<String>("url").unwrap().clone(),
            },
            Some(("completions", completions_matches)) => Commands::Completions {
                shell: *completions_matches.get_one::<Shell>("shell").unwrap(),
                out: completions_matches.get_one::<PathBuf>("out").cloned(),
            },
            // Default case, should never happen with clap validation
            _ => unreachable!(),
        }
    }
}

// -------------------------------------------------------------------------------------------------
// Flag parser
// -------------------------------------------------------------------------------------------------

/// Determines effective state of conflicting boolean flags with environment fallback
///
/// Resolves precedence between mutually exclusive flags (e.g. --show-icon vs --no-show-icon) by
/// considering:
///
/// * Last specified flag on command line
/// * Environment variable of the on flag, which may also turn it off
/// * Returns None if no relevant options were specified
pub(crate) fn flag_is_enabled(matches: &ArgMatches, on_flag: &str, off_flag: &str) -> Option<bool> {
    flag_is_enabled_in(env::args(), matches, on_flag, off_flag)
}

fn flag_is_enabled_in<I>(
    raw_args: I,
    matches: &ArgMatches,
    on_flag: &str,
    off_flag: &str,
) -> Option<bool>
where
    I: IntoIterator<Item = String>,
{
    // Determine the name the raw flags, following the "FLAG"/"no-FLAG" pattern
    let raw_on_flag = ["--", &on_flag.replace("_", "-")].join("");
    let raw_off_flag = ["--", &off_flag.replace("_", "-")].join("");

    // Find the last occurrence of either --FLAG or --no-FLAG
    let mut last_on_position = None;
    let mut last_off_position = None;

    for (index, arg) in raw_args.into_iter().enumerate() {
        if arg == raw_on_flag {
            last_on_position = Some(index);
        } else if arg == raw_off_flag {
            last_off_position = Some(index);
        }
    }

    if last_on_position > last_off_position {
        Some(true)
    } else if last_off_position > last_on_position {
        Some(false)
    } else {
        // Neither was specified on command line, check environment variable
        match matches.value_source(on_flag) {
            Some(ValueSource::EnvVariable) => Some(matches.get_count(on_flag) > 0),
            _ => None,
        }
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
