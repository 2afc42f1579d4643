// ============================================================================
// CSV INTAKE - File selection, validation and preview
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::IntakeError;
use crate::models::{CsvPreview, FileMeta, UploadFile};
use crate::services::parse_preview;
use crate::state::ChangeNotifier;
use crate::utils::CSV_MIME_TYPE;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct IntakeState {
    pub file: Option<UploadFile>,
    pub preview: CsvPreview,
    pub error: Option<String>,
}

/// Holds at most one selected file. A rejected selection never leaves a
/// stale file behind.
#[derive(Clone)]
pub struct CsvIntake {
    state: Rc<RefCell<IntakeState>>,
    max_file_bytes: u64,
    preview_rows: usize,
    notifier: ChangeNotifier,
}

impl CsvIntake {
    pub fn new(max_file_bytes: u64, preview_rows: usize, notifier: ChangeNotifier) -> Self {
        Self {
            state: Rc::new(RefCell::new(IntakeState::default())),
            max_file_bytes,
            preview_rows,
            notifier,
        }
    }

    /// Checks a drop or picker selection from metadata alone, so nothing
    /// is read when it is going to be refused. A refusal clears the
    /// current selection and shows the error inline.
    ///
    /// While an upload is in flight the selection is refused and the
    /// current state is left as is.
    pub fn screen(&self, files: &[FileMeta], upload_in_flight: bool) -> Result<(), IntakeError> {
        if upload_in_flight {
            log::warn!("⚠️ [INTAKE] Selection ignored, upload in progress");
            return Err(IntakeError::UploadInProgress);
        }
        self.validate(files).map_err(|e| {
            self.reject(&e);
            e
        })
    }

    /// Validates a selection whose contents are in memory and builds the
    /// preview.
    pub fn select(&self, mut files: Vec<UploadFile>, upload_in_flight: bool) -> Result<(), IntakeError> {
        let metas: Vec<FileMeta> = files.iter().map(UploadFile::meta).collect();
        self.screen(&metas, upload_in_flight)?;
        let file = files.remove(0);

        let preview = parse_preview(&file.bytes, self.preview_rows).unwrap_or_else(|e| {
            log::warn!("⚠️ [INTAKE] Could not preview {}: {}", file.name, e);
            CsvPreview::default()
        });
        log::info!(
            "📄 [INTAKE] Selected {} ({} bytes, {} preview rows)",
            file.name,
            file.size(),
            preview.len()
        );
        *self.state.borrow_mut() = IntakeState {
            file: Some(file),
            preview,
            error: None,
        };
        self.notifier.notify();
        Ok(())
    }

    fn validate(&self, files: &[FileMeta]) -> Result<(), IntakeError> {
        let file = match files {
            [] => return Err(IntakeError::NoFile),
            [file] => file,
            _ => return Err(IntakeError::MultipleFiles(files.len())),
        };

        let csv_mime = file.mime_type.eq_ignore_ascii_case(CSV_MIME_TYPE);
        if !file.has_csv_extension() && !csv_mime {
            return Err(IntakeError::NotCsv(file.name.clone()));
        }
        if file.size > self.max_file_bytes {
            return Err(IntakeError::TooLarge {
                size: file.size,
                limit: self.max_file_bytes,
            });
        }
        Ok(())
    }

    fn reject(&self, error: &IntakeError) {
        log::warn!("⚠️ [INTAKE] Rejected selection: {:?}", error);
        *self.state.borrow_mut() = IntakeState {
            file: None,
            preview: CsvPreview::default(),
            error: Some(error.to_string()),
        };
        self.notifier.notify();
    }

    /// Drops the selected file and any inline error.
    pub fn clear(&self) {
        *self.state.borrow_mut() = IntakeState::default();
        self.notifier.notify();
    }

    /// The file to upload, if one is selected and nothing is in flight.
    pub fn submit(&self, upload_in_flight: bool) -> Option<UploadFile> {
        if upload_in_flight {
            return None;
        }
        self.state.borrow().file.clone()
    }

    pub fn snapshot(&self) -> IntakeState {
        self.state.borrow().clone()
    }

    pub fn file_name(&self) -> Option<String> {
        self.state.borrow().file.as_ref().map(|file| file.name.clone())
    }

    pub fn preview(&self) -> CsvPreview {
        self.state.borrow().preview.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: u64 = 5 * 1024 * 1024;

    fn intake() -> CsvIntake {
        CsvIntake::new(LIMIT, 5, ChangeNotifier::new())
    }

    fn incidents_csv(rows: usize) -> UploadFile {
        let mut body = String::from("lat,long,date\n");
        for i in 0..rows {
            body.push_str(&format!("-1.{i},34.{i},2024-01-0{}\n", i % 9 + 1));
        }
        UploadFile::new("incidents.csv", "text/csv", body.into_bytes())
    }

    #[test]
    fn valid_file_is_selected_with_preview() {
        let intake = intake();
        intake.select(vec![incidents_csv(10)], false).unwrap();

        let state = intake.snapshot();
        assert_eq!(state.file.map(|f| f.name), Some("incidents.csv".to_string()));
        assert_eq!(state.preview.len(), 5);
        assert_eq!(state.preview.rows[0].get("lat"), Some("-1.0"));
        assert_eq!(state.error, None);
    }

    #[test]
    fn txt_file_clears_previous_selection() {
        let intake = intake();
        intake.select(vec![incidents_csv(3)], false).unwrap();

        let err = intake
            .select(vec![UploadFile::new("notes.txt", "text/plain", b"hello".to_vec())], false)
            .unwrap_err();

        assert_eq!(err, IntakeError::NotCsv("notes.txt".into()));
        assert_eq!(intake.file_name(), None);
        assert!(intake.preview().is_empty());
        assert_eq!(intake.error().as_deref(), Some("Only .csv files are accepted."));
    }

    #[test]
    fn csv_mime_without_extension_is_accepted() {
        let intake = intake();
        let file = UploadFile::new("export", "text/csv", b"a,b\n1,2\n".to_vec());
        assert!(intake.select(vec![file], false).is_ok());
    }

    #[test]
    fn multiple_files_are_rejected() {
        let intake = intake();
        let err = intake
            .select(vec![incidents_csv(1), incidents_csv(2)], false)
            .unwrap_err();
        assert_eq!(err, IntakeError::MultipleFiles(2));
        assert_eq!(intake.file_name(), None);
    }

    #[test]
    fn empty_drop_is_rejected() {
        assert_eq!(intake().select(vec![], false), Err(IntakeError::NoFile));
    }

    #[test]
    fn oversized_file_is_rejected() {
        let intake = CsvIntake::new(16, 5, ChangeNotifier::new());
        let err = intake.select(vec![incidents_csv(3)], false).unwrap_err();
        assert!(matches!(err, IntakeError::TooLarge { limit: 16, .. }));
    }

    #[test]
    fn selection_during_upload_keeps_state() {
        let intake = intake();
        intake.select(vec![incidents_csv(2)], false).unwrap();

        let err = intake
            .select(vec![UploadFile::new("notes.txt", "", vec![])], true)
            .unwrap_err();

        assert_eq!(err, IntakeError::UploadInProgress);
        assert_eq!(intake.file_name().as_deref(), Some("incidents.csv"));
        assert_eq!(intake.error(), None);
    }

    #[test]
    fn malformed_csv_gives_empty_preview_but_keeps_file() {
        let intake = intake();
        let file = UploadFile::new("broken.csv", "text/csv", b"a,b\n1,2,3\n".to_vec());
        intake.select(vec![file], false).unwrap();

        assert_eq!(intake.file_name().as_deref(), Some("broken.csv"));
        assert!(intake.preview().is_empty());
    }

    #[test]
    fn screening_refuses_oversized_metadata_and_clears_selection() {
        let intake = CsvIntake::new(1024, 5, ChangeNotifier::new());
        intake.select(vec![incidents_csv(2)], false).unwrap();

        let err = intake
            .screen(&[FileMeta::new("huge.csv", "text/csv", 10 * 1024)], false)
            .unwrap_err();

        assert_eq!(err, IntakeError::TooLarge { size: 10 * 1024, limit: 1024 });
        assert_eq!(intake.file_name(), None);
        assert!(intake.preview().is_empty());
        assert!(intake.error().is_some());
    }

    #[test]
    fn screening_a_valid_file_leaves_state_for_select() {
        let intake = intake();
        intake.select(vec![incidents_csv(2)], false).unwrap();

        intake
            .screen(&[FileMeta::new("next.csv", "text/csv", 64)], false)
            .unwrap();

        assert_eq!(intake.file_name().as_deref(), Some("incidents.csv"));
    }

    #[test]
    fn clear_removes_file_and_error() {
        let intake = intake();
        intake.select(vec![incidents_csv(2)], false).unwrap();
        intake.clear();
        assert_eq!(intake.snapshot(), IntakeState::default());

        let _ = intake.select(vec![], false);
        intake.clear();
        assert_eq!(intake.error(), None);
    }

    #[test]
    fn submit_hands_over_only_when_idle() {
        let intake = intake();
        assert_eq!(intake.submit(false), None);

        intake.select(vec![incidents_csv(1)], false).unwrap();
        assert!(intake.submit(true).is_none());
        assert_eq!(intake.submit(false).map(|f| f.name), Some("incidents.csv".to_string()));
    }
}
