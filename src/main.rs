// SPDX-FileCopyrightText: 2026 Lozenge contributors
// SPDX-License-Identifier: MIT
//
// This file is part of Lozenge.

//! Lozenge CLI entrypoint.
//!
//! Reads elements from stdin (or a file), runs the interactive picker on the
//! terminal, and prints the committed payload on stdout. Exit status: 0 on
//! commit, 1 on cancel, 2 on bad usage or a setup failure.

use std::fs::File;
use std::io::{self, BufRead, BufReader};

use lozenge::model::Element;
use lozenge::session::Status;
use lozenge::source::{self, SourceError};
use lozenge::tui::TuiOptions;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [options] [<input-file>]\n\nReads one element per line from <input-file> (default: stdin) and shows them\non a diamond grid. Type to filter, C-s/C-x to commit include/exclude filters,\nEnter to pick, Esc to cancel.\n\nOptions:\n  --complex             parse input lines as JSON element records\n  --enumerate           print the picked element's input index instead of its payload\n  --cell-width <cols>   grid cell width in columns (default 20)\n  --cell-height <rows>  grid cell height in rows (default 3)\n  --padding <cols>      label padding inside a cell (default 1)\n  --origin-x <frac>     horizontal grid origin as a fraction in [0, 1] (default 0.5)\n  --origin-y <frac>     vertical grid origin as a fraction in [0, 1] (default 0.5)"
    );
}

#[derive(Debug, Default, Clone, PartialEq)]
struct CliOptions {
    complex: bool,
    enumerate: bool,
    cell_width: Option<u16>,
    cell_height: Option<u16>,
    padding: Option<u16>,
    origin_x: Option<f64>,
    origin_y: Option<f64>,
    input: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--complex" => {
                if options.complex {
                    return Err(());
                }
                options.complex = true;
            }
            "--enumerate" => {
                if options.enumerate {
                    return Err(());
                }
                options.enumerate = true;
            }
            "--cell-width" => {
                if options.cell_width.is_some() {
                    return Err(());
                }
                options.cell_width = Some(parse_cell_size(args.next())?);
            }
            "--cell-height" => {
                if options.cell_height.is_some() {
                    return Err(());
                }
                options.cell_height = Some(parse_cell_size(args.next())?);
            }
            "--padding" => {
                if options.padding.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                options.padding = Some(raw.parse().map_err(|_| ())?);
            }
            "--origin-x" => {
                if options.origin_x.is_some() {
                    return Err(());
                }
                options.origin_x = Some(parse_fraction(args.next())?);
            }
            "--origin-y" => {
                if options.origin_y.is_some() {
                    return Err(());
                }
                options.origin_y = Some(parse_fraction(args.next())?);
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.input.is_some() {
                    return Err(());
                }
                options.input = Some(arg);
            }
        }
    }

    Ok(options)
}

fn parse_cell_size(raw: Option<String>) -> Result<u16, ()> {
    let size: u16 = raw.ok_or(())?.parse().map_err(|_| ())?;
    if size == 0 {
        return Err(());
    }
    Ok(size)
}

fn parse_fraction(raw: Option<String>) -> Result<f64, ()> {
    let fraction: f64 = raw.ok_or(())?.parse().map_err(|_| ())?;
    if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
        return Err(());
    }
    Ok(fraction)
}

fn load_elements(options: &CliOptions) -> Result<Vec<Element>, SourceError> {
    match &options.input {
        Some(path) => {
            let file = File::open(path)?;
            parse_reader(BufReader::new(file), options.complex)
        }
        None => parse_reader(io::stdin().lock(), options.complex),
    }
}

fn parse_reader(reader: impl BufRead, complex: bool) -> Result<Vec<Element>, SourceError> {
    if complex {
        source::parse_complex(reader)
    } else {
        source::parse_simple(reader)
    }
}

fn main() {
    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "lozenge".to_owned());

    let options = match parse_options(args) {
        Ok(options) => options,
        Err(()) => {
            print_usage(&program);
            std::process::exit(2);
        }
    };

    let elements = match load_elements(&options) {
        Ok(elements) => elements,
        Err(err) => {
            eprintln!("{program}: {err}");
            std::process::exit(2);
        }
    };

    let defaults = TuiOptions::default();
    let tui_options = TuiOptions {
        cell_width: options.cell_width.unwrap_or(defaults.cell_width),
        cell_height: options.cell_height.unwrap_or(defaults.cell_height),
        cell_padding: options.padding.unwrap_or(defaults.cell_padding),
        origin_fraction_x: options.origin_x.unwrap_or(defaults.origin_fraction_x),
        origin_fraction_y: options.origin_y.unwrap_or(defaults.origin_fraction_y),
        keymap: defaults.keymap,
    };

    match lozenge::tui::run(elements, tui_options) {
        Ok(Status::Committed(selection)) => {
            if options.enumerate {
                println!("{}", selection.index);
            } else {
                println!("{}", selection.value);
            }
        }
        Ok(_) => std::process::exit(1),
        Err(err) => {
            eprintln!("{program}: {err}");
            std::process::exit(2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_options, CliOptions};

    fn parse(args: &[&str]) -> Result<CliOptions, ()> {
        parse_options(args.iter().map(|arg| (*arg).to_owned()))
    }

    #[test]
    fn parses_empty_args() {
        let options = parse(&[]).expect("parse options");
        assert_eq!(options, CliOptions::default());
    }

    #[test]
    fn parses_mode_flags() {
        let options = parse(&["--complex", "--enumerate"]).expect("parse options");
        assert!(options.complex);
        assert!(options.enumerate);
        assert!(options.input.is_none());
    }

    #[test]
    fn parses_geometry_options() {
        let options = parse(&[
            "--cell-width",
            "12",
            "--cell-height",
            "5",
            "--padding",
            "2",
            "--origin-x",
            "0.25",
            "--origin-y",
            "1",
        ])
        .expect("parse options");
        assert_eq!(options.cell_width, Some(12));
        assert_eq!(options.cell_height, Some(5));
        assert_eq!(options.padding, Some(2));
        assert_eq!(options.origin_x, Some(0.25));
        assert_eq!(options.origin_y, Some(1.0));
    }

    #[test]
    fn parses_positional_input_file() {
        let options = parse(&["--complex", "apps.jsonl"]).expect("parse options");
        assert_eq!(options.input.as_deref(), Some("apps.jsonl"));
    }

    #[test]
    fn rejects_unknown_args() {
        parse(&["--nope"]).unwrap_err();
    }

    #[test]
    fn rejects_duplicate_flags() {
        parse(&["--complex", "--complex"]).unwrap_err();
        parse(&["--cell-width", "10", "--cell-width", "12"]).unwrap_err();
    }

    #[test]
    fn rejects_multiple_positional_inputs() {
        parse(&["one", "two"]).unwrap_err();
    }

    #[test]
    fn rejects_missing_option_values() {
        parse(&["--cell-width"]).unwrap_err();
        parse(&["--origin-x"]).unwrap_err();
    }

    #[test]
    fn rejects_zero_cell_sizes() {
        parse(&["--cell-width", "0"]).unwrap_err();
        parse(&["--cell-height", "0"]).unwrap_err();
    }

    #[test]
    fn rejects_out_of_range_origin_fractions() {
        parse(&["--origin-x", "1.5"]).unwrap_err();
        parse(&["--origin-y", "-0.1"]).unwrap_err();
        parse(&["--origin-x", "NaN"]).unwrap_err();
    }
}
