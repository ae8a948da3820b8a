/*
** This file is a part of SimpleXML (XML document tree with path lookups)
** Copyright (C) 2025 Gurer Ozen
**
** SimpleXML is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::env;
use std::fs::File;
use std::io::Read;
use std::io::stdin;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use simplexml::DEFAULT_DELIMITER;
use simplexml::Document;
use simplexml::DocumentError;
use simplexml::DocumentParser;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_version() {
    println!("sxpath (simplexml) v{}", VERSION);
}

fn print_usage() {
    println!(concat!(
        "Usage: sxpath [OPTIONS] [PATH]\n",
        "This tool prints the value of the element at PATH in an XML document.\n",
        "Without a PATH the whole document is printed.\n",
        "Options:\n",
        "  -f, --file <FILE.xml>    Specify the XML file to process (default: stdin)\n",
        "  -d, --delimiter <CHAR>   Path segment delimiter (default: '.')\n",
        "  -a, --all                Print the values of all matching elements\n",
        "  -x, --xml                Print the matching elements as XML instead of values\n",
        "  -h, --help               Display this help message and exit\n",
        "  -v, --version            Display the version and exit\n",
        "Set RUST_LOG=debug to see parser diagnostics."
    ));
}

enum SxpathError {
    IoError(std::io::Error),
    DocumentError(DocumentError),
    NotFound(String),
}

impl From<std::io::Error> for SxpathError {
    fn from(err: std::io::Error) -> Self {
        SxpathError::IoError(err)
    }
}

impl From<DocumentError> for SxpathError {
    fn from(err: DocumentError) -> Self {
        SxpathError::DocumentError(err)
    }
}

struct Options {
    file: Option<String>,
    path: Option<String>,
    delimiter: char,
    all: bool,
    xml: bool,
}

fn load_file(options: &Options) -> Result<Document, SxpathError> {
    let mut f: Box<dyn Read> = match &options.file {
        None => Box::new(stdin()),
        Some(file) => Box::new(File::open(file)?),
    };
    let mut data = Vec::new();
    f.read_to_end(&mut data)?;

    let mut parser = DocumentParser::new().path_delimiter(options.delimiter);
    parser.parse_bytes(&data)?;
    Ok(parser.into_document()?)
}

fn process_file(options: &Options) -> Result<(), SxpathError> {
    let doc = load_file(options)?;
    let path = options.path.as_deref().unwrap_or("");
    let matches = if options.all {
        doc.root().descendants_with_path(path)
    } else {
        doc.descendant_with_path(path).into_iter().collect()
    };
    if matches.is_empty() {
        return Err(SxpathError::NotFound(path.to_string()));
    }
    for element in matches {
        if options.xml || options.path.is_none() {
            println!("{}", element);
        } else {
            println!("{}", element.value());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args();

    let mut options = Options {
        file: None,
        path: None,
        delimiter: DEFAULT_DELIMITER,
        all: false,
        xml: false,
    };

    // Skip the first argument (program name)
    args.next();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-f" | "--file" => {
                if let Some(value) = args.next() {
                    options.file = Some(value);
                } else {
                    eprintln!("Error: file name expected after -f/--file");
                    return ExitCode::FAILURE;
                }
            }
            "-d" | "--delimiter" => {
                let value = args.next().unwrap_or_default();
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => options.delimiter = c,
                    _ => {
                        eprintln!("Error: single character expected after -d/--delimiter");
                        return ExitCode::FAILURE;
                    }
                }
            }
            "-a" | "--all" => {
                options.all = true;
            }
            "-x" | "--xml" => {
                options.xml = true;
            }
            "-h" | "--help" => {
                print_usage();
                return ExitCode::SUCCESS;
            }
            "-v" | "--version" => {
                print_version();
                return ExitCode::SUCCESS;
            }
            _ => {
                if options.path.is_none() {
                    options.path = Some(arg);
                } else {
                    eprintln!("Error: only one path can be specified");
                    return ExitCode::FAILURE;
                }
            }
        }
    }

    match process_file(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(SxpathError::IoError(err)) => {
            eprintln!("IO Error: {}", err);
            ExitCode::FAILURE
        }
        Err(SxpathError::DocumentError(err)) => {
            let location = err.location();
            eprintln!(
                "Error: Syntax error at line {} column {}: {}",
                location.lines + 1,
                location.column + 1,
                err.description()
            );
            ExitCode::FAILURE
        }
        Err(SxpathError::NotFound(path)) => {
            eprintln!("Error: no element at path '{}'", path);
            ExitCode::FAILURE
        }
    }
}
