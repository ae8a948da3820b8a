/*
** This file is a part of SimpleXML (XML document tree with path lookups)
** Copyright (C) 2025 Gurer Ozen
**
** SimpleXML is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::collections::HashMap;
use std::env;
use std::fs::File;
use std::io::Read;
use std::io::stdin;
use std::process::ExitCode;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use simplexml::SaxElement;
use simplexml::SaxError;
use simplexml::SaxHandler;
use simplexml::SaxHandlerError;
use simplexml::SaxParser;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_version() {
    println!("sxlint (simplexml) v{}", VERSION);
}

fn print_usage() {
    println!(concat!(
        "Usage: sxlint [OPTIONS] [FILE.xml...]\n",
        "This tool checks the well-formedness of XML documents.\n",
        "Standard input is checked when no file is given.\n",
        "Options:\n",
        "  -s, --stat           Overall statistics\n",
        "  -c, --count          Tag counts\n",
        "  -h, --help           Display this help message and exit\n",
        "  -v, --version        Display the version and exit\n",
        "Set RUST_LOG=debug to see parser diagnostics."
    ));
}

struct Handler {
    do_stats: bool,
    do_tag_count: bool,
    level: usize,
    max_depth: usize,
    nr_tags: usize,
    nr_attributes: usize,
    nr_cdata_size: usize,
    tag_map: HashMap<String, usize>,
}

impl Handler {
    fn new(do_stats: bool, do_tag_count: bool) -> Self {
        Handler {
            do_stats,
            do_tag_count,
            level: 0,
            max_depth: 0,
            nr_tags: 0,
            nr_attributes: 0,
            nr_cdata_size: 0,
            tag_map: HashMap::new(),
        }
    }

    fn report(&mut self) {
        if self.do_stats {
            println!(
                "Tags: {}, attributes: {}, max depth: {}",
                self.nr_tags, self.nr_attributes, self.max_depth
            );
            println!(
                "Total size of character data: {} bytes.",
                self.nr_cdata_size
            );
        }
        if self.do_tag_count {
            println!("Tag counts:");
            let mut tags: Vec<_> = self.tag_map.iter().collect();
            tags.sort();
            for (tag, count) in tags {
                println!("  {}: {}", tag, count);
            }
        }
    }

    fn reset(&mut self) {
        self.level = 0;
        self.max_depth = 0;
        self.nr_tags = 0;
        self.nr_attributes = 0;
        self.nr_cdata_size = 0;
        self.tag_map.clear();
    }
}

impl SaxHandler for Handler {
    fn handle_element(&mut self, element: &SaxElement) -> Result<(), SaxHandlerError> {
        match element {
            SaxElement::StartTag(name) => {
                self.nr_tags += 1;
                self.level += 1;
                self.max_depth = self.max_depth.max(self.level);
                if self.do_tag_count {
                    *self.tag_map.entry(name.to_string()).or_insert(0) += 1;
                }
            }
            SaxElement::Attribute(_, _) => {
                self.nr_attributes += 1;
            }
            SaxElement::StartTagContent => {}
            SaxElement::CData(cdata) => {
                self.nr_cdata_size += cdata.len();
            }
            SaxElement::EndTag(_) => {
                self.level -= 1;
            }
        }
        Ok(())
    }
}

struct Linter {
    handler: Handler,
    parser: SaxParser,
}

impl Linter {
    fn new(do_stats: bool, do_tag_count: bool) -> Self {
        Linter {
            handler: Handler::new(do_stats, do_tag_count),
            parser: SaxParser::new(),
        }
    }

    fn read_file(file: &str, is_stream: bool) -> std::io::Result<Vec<u8>> {
        let mut f: Box<dyn Read> = if is_stream {
            Box::new(stdin())
        } else {
            Box::new(File::open(file)?)
        };
        let mut data = Vec::new();
        f.read_to_end(&mut data)?;
        Ok(data)
    }

    fn lint_file(&mut self, file: &str, is_stream: bool) -> bool {
        let data = match Linter::read_file(file, is_stream) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", file, e);
                return false;
            }
        };
        debug!(file, bytes = data.len(), "checking file");
        self.parser.reset();
        self.handler.reset();
        match self.parser.parse_bytes_finish(&mut self.handler, &data) {
            Ok(()) => {
                self.handler.report();
                true
            }
            Err(SaxError::BadXml) => {
                let location = self.parser.location();
                eprintln!(
                    "{}:{}:{}: {}",
                    file,
                    location.lines + 1,
                    location.column + 1,
                    self.parser.error_description().unwrap_or_default()
                );
                false
            }
            Err(SaxError::HandlerError) => {
                eprintln!("Handler aborted while checking '{}'", file);
                false
            }
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args();

    let mut files = Vec::new();
    let mut do_stats = false;
    let mut do_tag_count = false;

    // Skip the first argument (program name)
    args.next();
    for arg in args {
        match arg.as_str() {
            "-s" | "--stat" => {
                do_stats = true;
            }
            "-c" | "--count" => {
                do_tag_count = true;
            }
            "-cs" | "-sc" => {
                do_stats = true;
                do_tag_count = true;
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
                files.push(arg);
            }
        }
    }

    let mut linter = Linter::new(do_stats, do_tag_count);
    if files.is_empty() {
        if !linter.lint_file("stdin", true) {
            return ExitCode::FAILURE;
        }
    } else {
        let mut ok = true;
        for file in files {
            ok &= linter.lint_file(&file, false);
        }
        if !ok {
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
