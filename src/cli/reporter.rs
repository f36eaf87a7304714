use colored::Colorize;

use mapforge_common::{Diagnostic, DiagnosticCategory};

/// Renders diagnostics as `element - category MFcode: message` lines.
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    pub fn render(&self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for (index, diagnostic) in diagnostics.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&self.format_diagnostic(diagnostic));
        }
        out
    }

    pub fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let category = self.format_category(diagnostic.category);
        let code = self.format_code(diagnostic.code);

        let mut output = String::new();
        if diagnostic.element.is_empty() {
            output.push_str("<unknown>");
        } else if self.color {
            output.push_str(&diagnostic.element.cyan().to_string());
        } else {
            output.push_str(&diagnostic.element);
        }

        output.push_str(" - ");
        output.push_str(&category);
        if !code.is_empty() {
            output.push(' ');
            output.push_str(&code);
        }
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);
        output
    }

    /// `Found 2 errors and 1 warning.`, or an empty string when there is nothing to report.
    pub fn summary(&self, diagnostics: &[Diagnostic]) -> String {
        let errors = diagnostics.iter().filter(|d| d.is_error()).count();
        let warnings = diagnostics
            .iter()
            .filter(|d| d.category == DiagnosticCategory::Warning)
            .count();
        if errors == 0 && warnings == 0 {
            return String::new();
        }
        let plural = |count: usize, word: &str| {
            if count == 1 {
                format!("{count} {word}")
            } else {
                format!("{count} {word}s")
            }
        };
        let text = match (errors, warnings) {
            (0, w) => format!("Found {}.", plural(w, "warning")),
            (e, 0) => format!("Found {}.", plural(e, "error")),
            (e, w) => format!(
                "Found {} and {}.",
                plural(e, "error"),
                plural(w, "warning")
            ),
        };
        if self.color && errors > 0 {
            text.red().bold().to_string()
        } else {
            text
        }
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = match category {
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Message => "message",
        };

        if !self.color {
            return label.to_string();
        }

        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        if code == 0 {
            return String::new();
        }

        let label = format!("MF{}", code);
        if self.color {
            label.bright_blue().to_string()
        } else {
            label
        }
    }
}
