//! Observation channel for the engines
//!
//! Parsing and rendering never fail, so anything worth knowing about a
//! degraded input is reported here instead. Callers pass a sink into the
//! `*_with` entry points; the plain entry points use [`TracingSink`].

/// Something the engine noticed while degrading gracefully
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A raw condition had no operator, or an empty field or value
    DroppedCondition { raw: String },
    /// A group produced no usable conditions
    DroppedGroup { raw: String },
    /// Nothing usable was parsed, the default model was returned
    DefaultedModel { input: String },
    /// An incomplete condition was left out of the serialized string
    SkippedIncomplete { group_id: String, index: usize },
    /// An `IF(...)` block never reached `ENDIF` and was rendered literally
    UnterminatedConditional { offset: usize },
    /// An `IF(...)` header could not be read as `Identifier=Literal`
    MalformedConditional { header: String },
    /// `ELSE` or `ENDIF` appeared outside a conditional block
    OrphanKeyword { keyword: &'static str, offset: usize },
    /// A `{placeholder}` had no value in the context
    MissingVariable { name: String },
}

/// Receiver for engine diagnostics
pub trait DiagnosticSink {
    fn report(&self, diagnostic: &Diagnostic);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&Diagnostic),
{
    fn report(&self, diagnostic: &Diagnostic) {
        self(diagnostic)
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn report(&self, _diagnostic: &Diagnostic) {}
}

/// Forwards diagnostics to `tracing` at debug level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        match diagnostic {
            Diagnostic::DroppedCondition { raw } => {
                tracing::debug!(raw = %raw, "dropped unparsable condition");
            }
            Diagnostic::DroppedGroup { raw } => {
                tracing::debug!(raw = %raw, "dropped empty condition group");
            }
            Diagnostic::DefaultedModel { input } => {
                tracing::debug!(input = %input, "condition expression defaulted to empty model");
            }
            Diagnostic::SkippedIncomplete { group_id, index } => {
                tracing::trace!(group_id = %group_id, index, "skipped incomplete condition");
            }
            Diagnostic::UnterminatedConditional { offset } => {
                tracing::debug!(offset, "IF block without ENDIF rendered literally");
            }
            Diagnostic::MalformedConditional { header } => {
                tracing::debug!(header = %header, "malformed IF header rendered literally");
            }
            Diagnostic::OrphanKeyword { keyword, offset } => {
                tracing::debug!(keyword, offset, "keyword outside conditional block");
            }
            Diagnostic::MissingVariable { name } => {
                tracing::trace!(name = %name, "placeholder left unresolved");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_closure_sink_receives_reports() {
        let seen = RefCell::new(Vec::new());
        let sink = |d: &Diagnostic| seen.borrow_mut().push(d.clone());

        sink.report(&Diagnostic::MissingVariable {
            name: "planName".to_string(),
        });

        assert_eq!(
            seen.into_inner(),
            vec![Diagnostic::MissingVariable {
                name: "planName".to_string()
            }]
        );
    }
}
