//
//  Copyright (C) 2022-2024  Chase Ruskin
//
//  This program is free software: you can redistribute it and/or modify
//  it under the terms of the GNU General Public License as published by
//  the Free Software Foundation, either version 3 of the License, or
//  (at your option) any later version.
//
//  This program is distributed in the hope that it will be useful,
//  but WITHOUT ANY WARRANTY; without even the implied warranty of
//  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//  GNU General Public License for more details.
//
//  You should have received a copy of the GNU General Public License
//  along with this program.  If not, see <http://www.gnu.org/licenses/>.
//

//! Routing of recoverable diagnostics away from the generation logic.

use colored::Colorize;
use std::fmt::Display;

/// How serious a diagnostic is, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Note,
    Warning,
    Error,
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Note => write!(f, "note"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A destination for diagnostics raised while generating testbenches.
pub trait Report {
    fn report(&mut self, severity: Severity, message: &str);

    fn warn(&mut self, message: &str) {
        self.report(Severity::Warning, message)
    }

    fn note(&mut self, message: &str) {
        self.report(Severity::Note, message)
    }
}

/// Writes diagnostics to stderr.
#[derive(Debug, Default)]
pub struct ConsoleReport {
    quiet: bool,
}

impl ConsoleReport {
    pub fn new() -> Self {
        Self { quiet: false }
    }

    /// Drops notes when `quiet` is set.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

impl Report for ConsoleReport {
    fn report(&mut self, severity: Severity, message: &str) {
        if self.quiet == true && severity == Severity::Note {
            return;
        }
        let prefix = match severity {
            Severity::Note => severity.to_string().blue(),
            Severity::Warning => severity.to_string().yellow(),
            Severity::Error => severity.to_string().red(),
        };
        eprintln!("{}: {}", prefix, message);
    }
}

/// Keeps every diagnostic in memory.
#[derive(Debug, Default, PartialEq)]
pub struct ReportLog {
    entries: Vec<(Severity, String)>,
}

impl ReportLog {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &Vec<(Severity, String)> {
        &self.entries
    }

    /// Counts the diagnostics recorded at `severity`.
    pub fn count(&self, severity: Severity) -> usize {
        self.entries.iter().filter(|(s, _)| s == &severity).count()
    }

    /// Checks if any recorded message contains `text`.
    pub fn mentions(&self, text: &str) -> bool {
        self.entries.iter().any(|(_, m)| m.contains(text))
    }
}

impl Report for ReportLog {
    fn report(&mut self, severity: Severity, message: &str) {
        self.entries.push((severity, message.to_string()));
    }
}

/// Prefixes every message with the item it concerns before passing it along.
pub struct ScopedReport<'a> {
    inner: &'a mut dyn Report,
    scope: String,
}

impl<'a> ScopedReport<'a> {
    pub fn new(inner: &'a mut dyn Report, scope: String) -> Self {
        Self {
            inner: inner,
            scope: scope,
        }
    }
}

impl<'a> Report for ScopedReport<'a> {
    fn report(&mut self, severity: Severity, message: &str) {
        self.inner
            .report(severity, &format!("{}: {}", self.scope, message));
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ordering() {
        assert!(Severity::Note < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn display() {
        assert_eq!(Severity::Note.to_string(), "note");
        assert_eq!(Severity::Warning.to_string(), "warning");
        assert_eq!(Severity::Error.to_string(), "error");
    }

    #[test]
    fn log_collects_in_order() {
        let mut log = ReportLog::new();
        log.warn("unknown type \"real\"");
        log.note("wrote testbench");
        log.report(Severity::Warning, "skipping port");
        assert_eq!(log.count(Severity::Warning), 2);
        assert_eq!(log.count(Severity::Error), 0);
        assert_eq!(log.entries()[1], (Severity::Note, String::from("wrote testbench")));
        assert_eq!(log.mentions("real"), true);
        assert_eq!(log.mentions("clock"), false);
    }

    #[test]
    fn scoped_prefix() {
        let mut log = ReportLog::new();
        let mut scoped = ScopedReport::new(&mut log, String::from("port \"x\""));
        scoped.warn("unknown type \"real\" cannot be enumerated");
        assert_eq!(
            log.entries()[0].1,
            "port \"x\": unknown type \"real\" cannot be enumerated"
        );
    }
}
