//! Symbolic model checker CLI: checks a list of CTL/ARCTL/Fair (AR)CTL formulae
//! against a plain-text transition system.

use clap::builder::PossibleValuesParser;
use clap::Parser;
use std::path::Path;
use std::time::SystemTime;
use symbolic_farctl_checker::checker::{CheckInput, Checker, CheckerConfig};
use symbolic_farctl_checker::diagnostics::Verbosity;
use symbolic_farctl_checker::load_inputs::{build_action_table, load_formulae, load_transition_system};
use symbolic_farctl_checker::result_print::{print_if_allowed, print_results_full, summarize_results, PrintOptions};

#[derive(Parser)]
#[clap(version, about = "Symbolic model checker for CTL, ARCTL and Fair (AR)CTL.")]
struct Arguments {
    /// Path to a plain-text transition-system file (VARS/TRANS/ACTION lines).
    model_path: String,

    /// Path to a file with formulae to check, one per line.
    formulae_path: String,

    /// Which logic the checker evaluates formulae under.
    #[clap(short, long, default_value = "ctl", value_parser = PossibleValuesParser::new(["ctl", "arctl", "farctl"]))]
    logic: String,

    /// Label treated as the invisible action (ARCTL/Fair only).
    #[clap(long)]
    tau: Option<String>,

    /// Choice of the amount of output regarding computation and results.
    #[clap(short, long, default_value = "short", value_parser = PossibleValuesParser::new(["none", "short", "full"]))]
    print_option: String,

    /// Verbosity of the diagnostics sink (fixpoint progress, empty-fair-universe warnings).
    #[clap(short, long, default_value = "normal", value_parser = PossibleValuesParser::new(["quiet", "normal", "verbose"]))]
    verbosity: String,
}

fn main() {
    let args = Arguments::parse();

    if !Path::new(&args.model_path).is_file() {
        println!("{} is not a valid file", args.model_path);
        return;
    }
    if !Path::new(&args.formulae_path).is_file() {
        println!("{} is not a valid file", args.formulae_path);
        return;
    }

    let print_option = match args.print_option.as_str() {
        "none" => PrintOptions::NoPrint,
        "full" => PrintOptions::FullPrint,
        _ => PrintOptions::ShortPrint,
    };
    let verbosity = match args.verbosity.as_str() {
        "quiet" => Verbosity::Quiet,
        "verbose" => Verbosity::Verbose,
        _ => Verbosity::Normal,
    };
    let config = CheckerConfig {
        verbosity,
        memoize_atoms: true,
    };

    let system = match load_transition_system(&args.model_path) {
        Ok(system) => system,
        Err(e) => {
            println!("failed to load transition system: {e}");
            return;
        }
    };
    let formulae = match load_formulae(&args.formulae_path) {
        Ok(formulae) => formulae,
        Err(e) => {
            println!("failed to load formulae: {e}");
            return;
        }
    };

    let mut checker = match args.logic.as_str() {
        "ctl" => Checker::new_ctl(system.universe.clone(), system.pred.clone(), config),
        _ => {
            let table = match build_action_table(&system, args.tau.as_deref()) {
                Ok(table) => table,
                Err(e) => {
                    println!("failed to build action table: {e}");
                    return;
                }
            };
            match Checker::new_farctl(system.universe.clone(), table, config) {
                Ok(checker) => checker,
                Err(e) => {
                    println!("failed to construct checker: {e}");
                    return;
                }
            }
        }
    };

    for formula in formulae {
        println!("checking: {formula}");
        let start_time = SystemTime::now();
        match checker.check(CheckInput::Formula(&formula)) {
            Ok(result) => match print_option {
                PrintOptions::NoPrint => {}
                PrintOptions::ShortPrint => summarize_results(&result, start_time),
                PrintOptions::FullPrint => print_results_full(&result, start_time),
            },
            Err(e) => print_if_allowed(format!("error: {e}"), print_option),
        }
    }
}
