//! Prints a `check` result for the CLI (spec §4.7's ambient CLI tooling), grounded on
//! the teacher's `result_print.rs`: a cardinality summary, plus an optional full
//! listing of every satisfying valuation with `termcolor`-coloured variable literals.

use crate::symbolic::StateSet;
use std::io::Write;
use std::time::SystemTime;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// How much of a check's result to print, mirroring the teacher's `PrintOptions`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PrintOptions {
    NoPrint,
    ShortPrint,
    FullPrint,
}

/// Prints `text`, but only if `print_options` calls for anything beyond a bare count.
pub fn print_if_allowed(text: String, print_options: PrintOptions) {
    if print_options == PrintOptions::NoPrint {
        return;
    }
    println!("{text}");
}

/// Prints how long the check took and how many states satisfy it.
pub fn summarize_results(results: &StateSet, start_time: SystemTime) {
    println!(
        "Time to eval formula: {}ms",
        start_time.elapsed().unwrap().as_millis()
    );
    println!("{} states in the result", results.enumerate().len());
    println!("-----");
}

/// Prints the summary, then every satisfying valuation: one line per state, each
/// variable literal coloured green when true and red when false.
pub fn print_results_full(results: &StateSet, start_time: SystemTime) {
    summarize_results(results, start_time);

    let names = results.space().variables();
    for valuation in results.enumerate() {
        let mut stdout = StandardStream::stdout(ColorChoice::Auto);
        for (name, value) in names.iter().zip(valuation.iter()) {
            if *value {
                let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)));
                let _ = write!(&mut stdout, "{name} & ");
            } else {
                let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)));
                let _ = write!(&mut stdout, "~{name} & ");
            }
        }
        let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::White)));
        println!();
    }
    println!("-----");
}
