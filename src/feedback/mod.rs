//! Generation Report
//!
//! Machine-readable summary of one wrapper generation:
//! - what was scanned, emitted and synthesized
//! - where callback registration was wired
//! - every note left in the generated code, with its header line

use std::fmt::Write;

use serde::Serialize;

use crate::frontend::scanner::ScannedHeader;
use crate::frontend::ApiIdentity;
use crate::middle::lifecycle::WiringOutcome;
use crate::middle::record::WrapperUnit;
use crate::types::NoteKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    /// Callback wiring was skipped or only partly done
    Warning,
    /// Generated code needs a human decision
    Fixme,
    /// Generated code is known to be incomplete
    Todo,
}

impl From<NoteKind> for Severity {
    fn from(kind: NoteKind) -> Self {
        match kind {
            NoteKind::Fixme => Self::Fixme,
            NoteKind::Warning => Self::Warning,
            NoteKind::Todo => Self::Todo,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Wrapper function the note sits in, if any
    pub function: Option<String>,
    pub message: String,
    /// 1-based line of the native declaration
    pub line: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportStats {
    pub declarations_scanned: usize,
    pub skipped_declarations: usize,
    pub functions_emitted: usize,
    pub functions_synthesized: usize,
    pub callbacks: usize,
}

/// Complete summary of one generation run
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub source_api_name: String,
    pub wrapper_api_name: String,
    pub file_prefix: String,
    pub stats: ReportStats,
    pub lifecycle: WiringOutcome,
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerationReport {
    pub fn build(
        identity: &ApiIdentity,
        header_text: &str,
        scanned: &ScannedHeader,
        unit: &WrapperUnit,
        outcome: &WiringOutcome,
    ) -> Self {
        let mut diagnostics: Vec<Diagnostic> = outcome
            .warnings
            .iter()
            .map(|w| Diagnostic {
                severity: Severity::Warning,
                function: None,
                message: w.clone(),
                line: None,
            })
            .collect();

        for func in &unit.functions {
            for note in &func.notes {
                diagnostics.push(Diagnostic {
                    severity: note.kind.into(),
                    function: Some(func.wrapper_name.clone()),
                    message: note.message(),
                    line: func.span.map(|s| s.line_in(header_text)),
                });
            }
        }

        let stats = ReportStats {
            declarations_scanned: scanned.declarations.len(),
            skipped_declarations: scanned.skipped.len(),
            functions_emitted: unit.functions.len(),
            functions_synthesized: unit.functions.iter().filter(|f| f.is_synthesized()).count(),
            callbacks: unit.callbacks.len(),
        };

        Self {
            source_api_name: identity.source_api_name.clone(),
            wrapper_api_name: identity.wrapper_api_name.clone(),
            file_prefix: identity.wrapper_file_prefix.clone(),
            stats,
            lifecycle: outcome.clone(),
            diagnostics,
        }
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics.iter().filter(|d| d.severity == severity).count()
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Human-readable summary, one diagnostic per line
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} -> {} ({})",
            self.source_api_name, self.wrapper_api_name, self.file_prefix
        );
        let _ = writeln!(
            out,
            "  {} declarations scanned, {} functions emitted ({} synthesized), {} callbacks",
            self.stats.declarations_scanned,
            self.stats.functions_emitted,
            self.stats.functions_synthesized,
            self.stats.callbacks
        );
        if let Some(a) = &self.lifecycle.register {
            let _ = writeln!(out, "  register in {}", a);
        }
        if let Some(a) = &self.lifecycle.unregister {
            let _ = writeln!(out, "  unregister in {}", a);
        }
        for d in &self.diagnostics {
            let location = match (&d.function, d.line) {
                (Some(f), Some(line)) => format!("{} (line {})", f, line),
                (Some(f), None) => f.clone(),
                _ => "header".to_string(),
            };
            let _ = writeln!(out, "  [{:?}] {}: {}", d.severity, location, d.message);
        }
        out
    }
}
