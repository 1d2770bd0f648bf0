//! The normalized diagnostic record shared by every tool runner.
//!
//! Whatever grammar a tool emits, its output is coerced into this six-field
//! schema before filtering and printing. The schema is identical across
//! tools; only `error_type` encodes which tool produced the record.

#[derive(Debug, Default, Clone, PartialEq, Eq)]
/// One normalized diagnostic. All fields default to empty strings; a record
/// is ready for emission once `filename` and `description` are populated.
pub struct Diagnostic {
    pub level: String,
    pub error_type: String,
    pub error_number: String,
    pub description: String,
    pub filename: String,
    pub line_number: String,
}

impl Diagnostic {
    /// Render the shared single-line report template.
    pub fn render(&self) -> String {
        format!(
            "{} {}{}:{} at {} line {}.",
            self.level,
            self.error_type,
            self.error_number,
            self.description,
            self.filename,
            self.line_number
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_template() {
        let rec = Diagnostic {
            level: "WARNING".into(),
            error_type: "SPL".into(),
            error_number: "E01".into(),
            description: "Warning: bar".into(),
            filename: "foo.c".into(),
            line_number: "12".into(),
        };
        assert_eq!(rec.render(), "WARNING SPLE01:Warning: bar at foo.c line 12.");
    }

    #[test]
    fn test_default_fields_empty() {
        let rec = Diagnostic::default();
        assert!(rec.level.is_empty());
        assert!(rec.error_type.is_empty());
        assert!(rec.error_number.is_empty());
        assert!(rec.description.is_empty());
        assert!(rec.filename.is_empty());
        assert!(rec.line_number.is_empty());
    }
}
