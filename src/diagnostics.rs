use serde::Serialize;

/// One field that fell back to a default, one source item that was dropped,
/// or one collaborator that failed and was worked around.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    Defaulted { field: String, value: String },
    Skipped { item: String, reason: String },
    Degraded { what: String, detail: String },
}

/// Diagnostics collected while decorating one block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub diagnostics: Vec<Diagnostic>,
}

impl Report {
    pub fn defaulted(&mut self, field: &str, value: &str) {
        self.diagnostics.push(Diagnostic::Defaulted {
            field: field.to_string(),
            value: value.to_string(),
        });
    }

    pub fn skipped(&mut self, item: impl Into<String>, reason: impl Into<String>) {
        self.diagnostics.push(Diagnostic::Skipped {
            item: item.into(),
            reason: reason.into(),
        });
    }

    pub fn degraded(&mut self, what: &str, detail: impl Into<String>) {
        self.diagnostics.push(Diagnostic::Degraded {
            what: what.to_string(),
            detail: detail.into(),
        });
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn was_defaulted(&self, field: &str) -> bool {
        self.diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::Defaulted { field: f, .. } if f == field))
    }

    pub fn skipped_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::Skipped { .. }))
            .count()
    }
}
