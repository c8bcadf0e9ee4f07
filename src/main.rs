//! numsort command-line entry point
//!
//! Reads whitespace separated numbers from files or standard input, sorts
//! them with the radix engine and prints one per line.

use std::process;
use clap::{Arg, ArgAction, Command};

use numsort::{
    config::{NumericKind, SortConfig, SortConfigBuilder},
    error::{SortError, SortResult},
    run,
};

fn main() {
    let result = run_cli();
    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("numsort: {}", e);
            process::exit(e.exit_code());
        }
    }
}

fn run_cli() -> SortResult<i32> {
    let matches = build_cli().get_matches();
    let config = parse_config_from_matches(&matches)?;
    run(&config)
}

fn build_cli() -> Command {
    Command::new("numsort")
        .version(env!("CARGO_PKG_VERSION"))
        .override_usage("numsort [OPTION]... [FILE]...")
        .about("Sort whitespace separated numbers with a radix sort")
        .long_about("Sort whitespace separated numbers with a radix sort.\n\nInput tokens are parsed as the numeric kind given by --kind. Integer kinds also accept 0x-prefixed hexadecimal. Floating point NaN values sort before everything else.")

        // Input files
        .arg(Arg::new("files")
            .help("Input files to sort (use '-' or omit for stdin)")
            .num_args(0..)
            .value_name("FILE"))

        // Key kind
        .arg(Arg::new("kind")
            .short('t')
            .long("kind")
            .help("Numeric kind of the input keys: f32, f64, isize, i32, i64, usize, u32 or u64")
            .value_name("KIND")
            .default_value("u64"))

        // Output modifiers
        .arg(Arg::new("reverse")
            .short('r')
            .long("reverse")
            .help("Print keys in descending order")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("unique")
            .short('u')
            .long("unique")
            .help("Output only the first of an equal run")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("hex")
            .short('x')
            .long("hex")
            .help("Print integer keys as 0x-prefixed hexadecimal")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("output")
            .short('o')
            .long("output")
            .help("Write result to FILE instead of standard output")
            .value_name("FILE"))

        // Operation modes
        .arg(Arg::new("check")
            .short('c')
            .long("check")
            .help("Check for sorted input; do not sort")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("debug")
            .long("debug")
            .help("Print diagnostics about the sort to stderr")
            .action(ArgAction::SetTrue))
}

/// Parse configuration from command line matches
fn parse_config_from_matches(matches: &clap::ArgMatches) -> SortResult<SortConfig> {
    let mut builder = SortConfigBuilder::new();

    if let Some(kind) = matches.get_one::<String>("kind") {
        builder = builder.kind(kind.parse::<NumericKind>()?);
    }

    if matches.get_flag("reverse") {
        builder = builder.reverse();
    }
    if matches.get_flag("unique") {
        builder = builder.unique();
    }
    if matches.get_flag("hex") {
        builder = builder.hex();
    }
    if matches.get_flag("check") {
        builder = builder.check();
    }
    if let Some(output) = matches.get_one::<String>("output") {
        builder = builder.output_file(output.clone());
    }

    let config = builder
        .build()?
        .with_debug(matches.get_flag("debug"))
        .with_input_files(
            matches
                .get_many::<String>("files")
                .unwrap_or_default()
                .cloned()
                .collect(),
        );

    if config.input_files.len() > 1 && config.input_files.iter().any(|f| f == "-") {
        return Err(SortError::conflicting_options(
            "standard input cannot be combined with named files",
        ));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_config() {
        let app = build_cli();
        let matches = app
            .try_get_matches_from(["numsort", "-t", "i32", "-r"])
            .expect("Failed to parse test arguments");

        let config = parse_config_from_matches(&matches).expect("Failed to parse test config");

        assert_eq!(config.kind, NumericKind::I32);
        assert!(config.reverse);
        assert!(config.reading_from_stdin());
    }

    #[test]
    fn test_parse_complex_config() {
        let app = build_cli();
        let matches = app
            .try_get_matches_from([
                "numsort",
                "-u",
                "-x",
                "-o",
                "output.txt",
                "offsets.txt",
            ])
            .expect("Failed to parse test arguments");

        let config = parse_config_from_matches(&matches).expect("Failed to parse test config");

        assert_eq!(config.kind, NumericKind::U64);
        assert!(config.unique);
        assert!(config.hex);
        assert_eq!(config.output_file, Some("output.txt".to_string()));
        assert_eq!(config.input_files, vec!["offsets.txt".to_string()]);
    }

    #[test]
    fn test_conflicting_options() {
        let app = build_cli();
        let matches = app
            .try_get_matches_from(["numsort", "-c", "-u"])
            .expect("Failed to parse test arguments");
        assert!(parse_config_from_matches(&matches).is_err());

        let app = build_cli();
        let matches = app
            .try_get_matches_from(["numsort", "-t", "f64", "--hex"])
            .expect("Failed to parse test arguments");
        assert!(parse_config_from_matches(&matches).is_err());
    }

    #[test]
    fn test_unknown_kind_is_unsupported() {
        let app = build_cli();
        let matches = app
            .try_get_matches_from(["numsort", "-t", "i16"])
            .expect("Failed to parse test arguments");
        match parse_config_from_matches(&matches) {
            Err(SortError::UnsupportedKind { kind }) => assert_eq!(kind, "i16"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_kind_aliases() {
        let app = build_cli();
        let matches = app
            .try_get_matches_from(["numsort", "--kind", "float64", "-c"])
            .expect("Failed to parse test arguments");
        let config = parse_config_from_matches(&matches).expect("Failed to parse test config");
        assert_eq!(config.kind, NumericKind::F64);
        assert!(config.check);
    }
}
