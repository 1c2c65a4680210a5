//! Non-fatal diagnostics sink, grounded on `result_print.rs`'s `PrintOptions` /
//! `print_if_allowed`: callers inject a [`Diagnostics`] implementation so library code
//! never writes to stdout/stderr directly, only the CLI's default sink does.

use crate::ast::PathDecoration;
use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

/// A condition worth telling the caller about that is not itself a [`crate::error::CheckerError`]
/// (the check still produces a valid `StateSet`).
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Diagnostic {
    /// `EG_fair(U)` evaluated to the empty set: no trajectory through `U` satisfies
    /// every fairness assumption, so every Fair-(AR)CTL valuation over this checker is
    /// vacuously either empty (existential) or the whole universe (universal). Carries
    /// the originating decoration so a programmatic caller can match on which
    /// action predicate and fairness records produced the empty result.
    EmptyFairUniverse { decoration: PathDecoration },
    /// Progress marker emitted between fixpoint iterations when `Verbosity::Verbose`.
    FixpointStep { operator: String, iteration: u32 },
}

pub trait Diagnostics {
    fn verbosity(&self) -> Verbosity;
    fn report(&self, diagnostic: &Diagnostic);
}

/// Discards every diagnostic. Useful for library callers and tests that don't care
/// about progress output.
pub struct SilentDiagnostics;

impl Diagnostics for SilentDiagnostics {
    fn verbosity(&self) -> Verbosity {
        Verbosity::Quiet
    }
    fn report(&self, _diagnostic: &Diagnostic) {}
}

/// The CLI's default sink: colour-coded `termcolor` output to stderr, gated by
/// `verbosity`.
pub struct TermDiagnostics {
    verbosity: Verbosity,
}

impl TermDiagnostics {
    pub fn new(verbosity: Verbosity) -> TermDiagnostics {
        TermDiagnostics { verbosity }
    }
}

impl Diagnostics for TermDiagnostics {
    fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    fn report(&self, diagnostic: &Diagnostic) {
        if self.verbosity == Verbosity::Quiet {
            return;
        }
        if matches!(diagnostic, Diagnostic::FixpointStep { .. }) && self.verbosity < Verbosity::Verbose {
            return;
        }

        let mut stream = StandardStream::stderr(ColorChoice::Auto);
        let _ = stream.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)));
        match diagnostic {
            Diagnostic::EmptyFairUniverse { decoration } => {
                let _ = writeln!(
                    stream,
                    "warning: no states satisfy every fairness assumption {decoration}"
                );
            }
            Diagnostic::FixpointStep { operator, iteration } => {
                let _ = writeln!(stream, "  {operator}: fixpoint iteration {iteration}");
            }
        }
        let _ = stream.reset();
    }
}
