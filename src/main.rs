use clap::value_parser;
use clap::{Arg, ArgAction, ArgMatches, Command};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, Level};

use intent_parser::document::{self, Document};
use intent_parser::engine::{Engine, Outcome, ReferenceTable, Validator};
use intent_parser::units::Catalog;

mod output;
mod problem;

#[derive(Eq, Debug, PartialEq)]
enum Output {
    Json,
    Opil,
    Summary,
    Experiment,
}

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let catalog = || {
        Arg::new("catalog")
            .long("catalog")
            .value_parser(value_parser!(PathBuf))
            .help("A JSON file of units, types and lab ids to use instead of the built-in catalog.")
    };
    let schema = || {
        Arg::new("schema")
            .long("schema")
            .value_parser(value_parser!(PathBuf))
            .help("A JSON schema to validate the structured request against instead of the bundled one.")
    };
    let references = || {
        Arg::new("references")
            .long("references")
            .value_parser(value_parser!(PathBuf))
            .help("A JSON file mapping document URLs to their challenge problem and experiment reference.")
    };
    let filename = || {
        Arg::new("filename")
            .required(true)
            .value_parser(value_parser!(PathBuf))
            .help("The file containing the JSON serialization of the experiment document.")
    };

    let matches = Command::new("intent-parser")
        .version(VERSION)
        .propagate_version(true)
        .author("Andrew Cowie")
        .about("Extract structured experimental intent from lab experiment documents.")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Increase logging on stderr. Repeat for more detail."),
        )
        .subcommand(
            Command::new("check")
                .about("Read the tables of the given document and report any problems found")
                .arg(catalog())
                .arg(schema())
                .arg(references())
                .arg(filename()),
        )
        .subcommand(
            Command::new("request")
                .about("Produce the structured request for the given document")
                .arg(catalog())
                .arg(schema())
                .arg(references())
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_parser(["json", "opil", "summary", "experiment"])
                        .default_value("json")
                        .help("Which form of the request to print."),
                )
                .arg(filename()),
        )
        .subcommand(
            Command::new("status")
                .about("Produce the experiment status request for the given document")
                .arg(catalog())
                .arg(filename()),
        )
        .get_matches();

    let level = match matches.get_count("verbose") {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match matches.subcommand() {
        Some(("check", submatches)) => {
            let filename = required(submatches);
            let outcome = process(submatches, filename);

            for diagnostic in outcome
                .diagnostics
                .iter()
            {
                eprintln!("{}\n", problem::full_diagnostic(diagnostic, filename));
            }

            if outcome
                .diagnostics
                .has_errors()
            {
                std::process::exit(1);
            }
            info!("No errors in {}", filename.display());
        }
        Some(("request", submatches)) => {
            let filename = required(submatches);
            let output = match submatches
                .get_one::<String>("output")
                .map(String::as_str)
            {
                Some("opil") => Output::Opil,
                Some("summary") => Output::Summary,
                Some("experiment") => Output::Experiment,
                _ => Output::Json,
            };
            debug!(?output);

            let outcome = process(submatches, filename);

            for diagnostic in outcome
                .diagnostics
                .iter()
            {
                eprintln!("{}", problem::concise_diagnostic(diagnostic, filename));
            }

            match output {
                Output::Json => output::print_json(&outcome.request),
                Output::Opil => match &outcome.protocol {
                    Ok(protocol) => output::print_json(protocol),
                    Err(error) => {
                        eprintln!("{}", problem::concise_engine_error(error, filename));
                        std::process::exit(1);
                    }
                },
                Output::Summary => match output::summary(&outcome) {
                    Ok(text) => print!("{}", text),
                    Err(error) => {
                        eprintln!("{}: Unable to render summary: {}", "error".bright_red(), error);
                        std::process::exit(1);
                    }
                },
                Output::Experiment => {
                    for diagnostic in outcome
                        .run_diagnostics
                        .iter()
                    {
                        eprintln!("{}", problem::concise_diagnostic(diagnostic, filename));
                    }
                    match &outcome.run_request {
                        Some(request) => output::print_json(request),
                        None => std::process::exit(1),
                    }
                }
            }
        }
        Some(("status", submatches)) => {
            let filename = required(submatches);
            let outcome = process(submatches, filename);

            for diagnostic in outcome
                .diagnostics
                .iter()
                .chain(
                    outcome
                        .status_diagnostics
                        .iter(),
                )
            {
                eprintln!("{}", problem::concise_diagnostic(diagnostic, filename));
            }

            output::print_json(&outcome.status_request);
        }
        Some(_) => {
            println!("No valid subcommand was used")
        }
        None => {
            println!("usage: intent-parser [COMMAND] ...");
            println!("Try '--help' for more information.");
        }
    }
}

fn required(submatches: &ArgMatches) -> &Path {
    match submatches.get_one::<PathBuf>("filename") {
        Some(filename) => filename.as_path(),
        None => {
            eprintln!("{}: No document given", "error".bright_red());
            std::process::exit(1);
        }
    }
}

/// Load everything named on the command line and run the engine over the
/// document. Any file that cannot be loaded ends the program.
fn process(submatches: &ArgMatches, filename: &Path) -> Outcome {
    let catalog = match submatches.get_one::<PathBuf>("catalog") {
        Some(path) => Catalog::load(path).unwrap_or_else(|error| fail(&problem::concise_loading_error(&error))),
        None => Catalog::default(),
    };

    // the status command does not validate
    let validator = if submatches
        .try_contains_id("schema")
        .is_ok()
    {
        let loaded = match submatches.get_one::<PathBuf>("schema") {
            Some(path) => Validator::load(path).map_err(|error| problem::concise_loading_error(&error)),
            None => Validator::bundled().map_err(|error| problem::concise_engine_error(&error, filename)),
        };
        Some(loaded.unwrap_or_else(|message| fail(&message)))
    } else {
        None
    };

    let references = match submatches
        .try_get_one::<PathBuf>("references")
        .ok()
        .flatten()
    {
        Some(path) => {
            Some(ReferenceTable::load(path).unwrap_or_else(|error| fail(&problem::concise_loading_error(&error))))
        }
        None => None,
    };

    let content = document::load(filename).unwrap_or_else(|error| fail(&problem::concise_loading_error(&error)));
    let document: Document =
        document::parse(filename, &content).unwrap_or_else(|error| fail(&problem::concise_loading_error(&error)));

    let mut engine = Engine::new(&catalog);
    if let Some(validator) = &validator {
        engine = engine.with_validator(validator);
    }
    if let Some(references) = &references {
        engine = engine.with_mapper(references);
    }
    engine.process(&document)
}

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    std::process::exit(1);
}
