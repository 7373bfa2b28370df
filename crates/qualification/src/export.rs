//! Clipboard export of the summary

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::wizard::QualificationSession;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),
}

/// Platform clipboard
pub trait Clipboard {
    fn write_text(&self, text: &str) -> Result<(), ExportError>;
}

/// Copy the session summary to the clipboard
///
/// Writes exactly what the preview shows for the same `generated_at`.
/// Failures are logged and swallowed; the return value only says whether
/// the text was handed over.
pub fn copy_summary(
    clipboard: &dyn Clipboard,
    session: &QualificationSession,
    generated_at: NaiveDateTime,
) -> bool {
    let Some(text) = session.summary(generated_at) else {
        return false;
    };
    match clipboard.write_text(&text) {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!(error = %e, "Summary copy failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use parking_lot::Mutex;
    use visa_crm_config::ServiceCatalog;
    use visa_crm_core::{ContactIdentity, ServiceKey};

    #[derive(Default)]
    struct MemoryClipboard {
        text: Mutex<Option<String>>,
    }

    impl Clipboard for MemoryClipboard {
        fn write_text(&self, text: &str) -> Result<(), ExportError> {
            *self.text.lock() = Some(text.to_string());
            Ok(())
        }
    }

    struct BrokenClipboard;

    impl Clipboard for BrokenClipboard {
        fn write_text(&self, _text: &str) -> Result<(), ExportError> {
            Err(ExportError::Unavailable("no display".into()))
        }
    }

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 14)
            .unwrap()
            .and_hms_opt(16, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_copy_matches_preview() {
        let mut session =
            QualificationSession::new(ServiceCatalog::builtin(), ServiceKey::Schengen);
        session.set_contact(ContactIdentity::new("Oya", "0505"));
        session.select_option("amac", "is");

        let clipboard = MemoryClipboard::default();
        assert!(copy_summary(&clipboard, &session, at()));
        assert_eq!(*clipboard.text.lock(), session.summary(at()));
    }

    #[test]
    fn test_copy_failure_is_swallowed() {
        let session = QualificationSession::new(ServiceCatalog::builtin(), ServiceKey::Us);
        assert!(!copy_summary(&BrokenClipboard, &session, at()));
    }
}
