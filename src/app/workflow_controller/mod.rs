// Workflow controller - Orchestrates the upload → configure → process → result use case

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::ports::*;

/// Notice shown when submission is requested without an accepted file
pub const MISSING_FILE_NOTICE: &str = "please select a video file";

/// Named user intents the controller reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum UserIntent {
    /// A file was picked or dropped; `None` when the event carried no file
    FileIntake(Option<VideoFile>),
    RemoveFile,
    SelectQuality(Quality),
    SelectFormat(AspectFormat),
    ToggleEnhancement(Enhancement),
    Submit,
    Download,
    NewSession,
}

impl UserIntent {
    pub fn name(&self) -> &'static str {
        match self {
            UserIntent::FileIntake(_) => "file-intake",
            UserIntent::RemoveFile => "remove",
            UserIntent::SelectQuality(_) => "select-quality",
            UserIntent::SelectFormat(_) => "select-format",
            UserIntent::ToggleEnhancement(_) => "toggle-enhancement",
            UserIntent::Submit => "submit",
            UserIntent::Download => "download",
            UserIntent::NewSession => "new-session",
        }
    }
}

/// State owned by one session
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub state: WorkflowState,
    pub file: Option<VideoFile>,
    pub settings: Settings,
    pub result: Option<ProcessingResult>,
}

/// Snapshot handed out when a submission starts.
///
/// The outcome of the request must be fed back together with this ticket so
/// the controller can tell whether it still belongs to the current session.
#[derive(Debug, Clone)]
pub struct SubmissionTicket {
    generation: u64,
    file: VideoFile,
    settings: Settings,
}

impl SubmissionTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn file(&self) -> &VideoFile {
        &self.file
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

/// What happened to a submission outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Outcome applied; the workflow is now in this state
    Applied(WorkflowState),
    /// Outcome belonged to a superseded session and was dropped
    Stale,
}

/// State machine driving the editor workflow
pub struct WorkflowController {
    session: Session,
    generation: u64,
    in_flight: Option<u64>,
    transfer: Arc<dyn TransferPort>,
    presenter: Arc<dyn PresentationPort>,
}

impl WorkflowController {
    /// Create a controller in the upload section
    pub fn new(transfer: Arc<dyn TransferPort>, presenter: Arc<dyn PresentationPort>) -> Self {
        let controller = Self {
            session: Session::default(),
            generation: 0,
            in_flight: None,
            transfer,
            presenter,
        };
        controller.presenter.render_section(WorkflowState::Upload);
        controller.render_choices();
        controller
    }

    pub fn state(&self) -> WorkflowState {
        self.session.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn selected_file(&self) -> Option<&VideoFile> {
        self.session.file.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.session.settings
    }

    pub fn result(&self) -> Option<&ProcessingResult> {
        self.session.result.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a submission is waiting for its outcome
    pub fn has_pending_submission(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Route a user intent to its handler
    pub async fn dispatch(&mut self, intent: UserIntent) -> Result<(), DomainError> {
        debug!(intent = intent.name(), state = %self.session.state, "Dispatching intent");
        match intent {
            UserIntent::FileIntake(file) => self.intake_file(file),
            UserIntent::RemoveFile => self.remove_file(),
            UserIntent::SelectQuality(quality) => self.select_quality(quality),
            UserIntent::SelectFormat(format) => self.select_format(format),
            UserIntent::ToggleEnhancement(enhancement) => self.toggle_enhancement(enhancement),
            UserIntent::Submit => self.submit().await.map(|_| ()),
            UserIntent::Download => self.download(),
            UserIntent::NewSession => self.start_new_session(),
        }
    }

    /// Accept or reject a candidate file.
    ///
    /// A rejected file leaves the session untouched and raises a notice.
    pub fn intake_file(&mut self, file: Option<VideoFile>) -> Result<(), DomainError> {
        self.require(&[WorkflowState::Upload, WorkflowState::Configure], "file-intake")?;

        let Some(file) = file else {
            debug!("File intake carried no file");
            return Ok(());
        };

        match FileValidator::validate_file(&file) {
            Validation::Rejected(reason) => {
                info!(
                    file = %file.name,
                    mime = %file.mime_type,
                    size = file.size,
                    %reason,
                    "File rejected"
                );
                self.presenter.show_notice(&reason.to_string());
            }
            Validation::Accepted => {
                info!(file = %file.name, size = file.size, "File accepted");
                self.presenter.render_file_info(
                    &file.name,
                    &format_file_size(file.size),
                    &file.preview_source(),
                );
                self.session.file = Some(file);
                self.enter(WorkflowState::Configure);
            }
        }
        Ok(())
    }

    /// Drop the selected file and go back to the upload section
    pub fn remove_file(&mut self) -> Result<(), DomainError> {
        self.require(&[WorkflowState::Configure], "remove")?;
        self.session.file = None;
        self.enter(WorkflowState::Upload);
        Ok(())
    }

    pub fn select_quality(&mut self, quality: Quality) -> Result<(), DomainError> {
        self.require_editable("select-quality")?;
        self.session.settings.select_quality(quality);
        self.render_choices();
        Ok(())
    }

    pub fn select_format(&mut self, format: AspectFormat) -> Result<(), DomainError> {
        self.require_editable("select-format")?;
        self.session.settings.select_format(format);
        self.render_choices();
        Ok(())
    }

    pub fn toggle_enhancement(&mut self, enhancement: Enhancement) -> Result<(), DomainError> {
        self.require_editable("toggle-enhancement")?;
        let enabled = self.session.settings.toggle_enhancement(enhancement);
        debug!(%enhancement, enabled, "Enhancement toggled");
        self.render_choices();
        Ok(())
    }

    /// Move to the progress section and hand out the request snapshot.
    ///
    /// Returns `Ok(None)` without transitioning when no file is selected.
    pub fn begin_submission(&mut self) -> Result<Option<SubmissionTicket>, DomainError> {
        self.require(&[WorkflowState::Upload, WorkflowState::Configure], "submit")?;

        let Some(file) = self.session.file.clone() else {
            info!("Submission refused: no file selected");
            self.presenter.show_notice(MISSING_FILE_NOTICE);
            return Ok(None);
        };

        let ticket = SubmissionTicket {
            generation: self.generation,
            file,
            settings: self.session.settings.clone(),
        };
        self.in_flight = Some(self.generation);
        self.enter(WorkflowState::InProgress);
        Ok(Some(ticket))
    }

    /// Apply the outcome of a submission started with `ticket`.
    ///
    /// Outcomes from a superseded session are dropped without side effects.
    pub fn resolve_submission(
        &mut self,
        ticket: SubmissionTicket,
        outcome: Result<ProcessingResult, TransferError>,
    ) -> Resolution {
        if !self.is_current(&ticket) {
            warn!(
                ticket_generation = ticket.generation,
                current_generation = self.generation,
                "Discarding stale submission outcome"
            );
            return Resolution::Stale;
        }
        self.in_flight = None;

        match outcome {
            Ok(result) => {
                info!(
                    download_url = %result.download_url,
                    file_size = result.file_size,
                    resolution = %result.resolution(),
                    "Processing completed"
                );
                let summary = ResultSummary::new(&result, self.session.settings.format);
                self.presenter.render_result(&summary);
                self.session.result = Some(result);
                self.enter(WorkflowState::Result);
            }
            Err(err) => {
                warn!(error = %err, transport = err.is_transport(), "Processing failed");
                self.presenter
                    .show_notice(&format!("Processing failed: {}", err));
                self.enter(WorkflowState::Configure);
            }
        }
        Resolution::Applied(self.session.state)
    }

    /// Submit the selected file and wait for the service.
    ///
    /// This is the only suspension point of the workflow.
    pub async fn submit(&mut self) -> Result<Option<Resolution>, DomainError> {
        let Some(ticket) = self.begin_submission()? else {
            return Ok(None);
        };

        let transfer = Arc::clone(&self.transfer);
        let outcome = transfer.submit(ticket.file(), ticket.settings()).await;
        Ok(Some(self.resolve_submission(ticket, outcome)))
    }

    /// Forward progress of the in-flight request to the presenter.
    ///
    /// Returns `false` when the ticket no longer matches the pending request.
    pub fn report_progress(&self, ticket: &SubmissionTicket, update: ProgressUpdate) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.presenter.render_progress(&update);
        true
    }

    /// Offer the processed artifact to the user
    pub fn download(&mut self) -> Result<(), DomainError> {
        self.require(&[WorkflowState::Result], "download")?;
        let (Some(result), Some(file)) = (&self.session.result, &self.session.file) else {
            return Err(DomainError::InvalidTransition {
                state: self.session.state,
                intent: "download",
            });
        };

        let suggested = suggested_output_name(&file.name, self.session.settings.format);
        info!(download_url = %result.download_url, %suggested, "Offering download");
        self.presenter.offer_download(&result.download_url, &suggested);
        Ok(())
    }

    /// Leave the result section and start over with defaults
    pub fn start_new_session(&mut self) -> Result<(), DomainError> {
        self.require(&[WorkflowState::Result], "new-session")?;
        self.reset_session();
        Ok(())
    }

    /// Abandon the session from any state.
    ///
    /// A request still in flight is not cancelled; its outcome will be stale.
    pub fn close_session(&mut self) {
        if self.in_flight.is_some() {
            info!(generation = self.generation, "Abandoning in-flight submission");
        }
        self.reset_session();
    }

    fn reset_session(&mut self) {
        self.generation += 1;
        self.in_flight = None;
        self.session.file = None;
        self.session.result = None;
        self.session.settings.reset();
        debug!(generation = self.generation, "New session");
        self.enter(WorkflowState::Upload);
        self.render_choices();
    }

    fn is_current(&self, ticket: &SubmissionTicket) -> bool {
        ticket.generation == self.generation
            && self.in_flight == Some(ticket.generation)
            && self.session.state == WorkflowState::InProgress
    }

    fn enter(&mut self, state: WorkflowState) {
        let previous = self.session.state;
        self.session.state = state;
        info!(from = %previous, to = %state, "Workflow transition");
        self.presenter.render_section(state);
    }

    fn render_choices(&self) {
        let settings = &self.session.settings;
        self.presenter
            .render_active_choices(settings.quality, settings.format, &settings.enhancements);
    }

    fn require_editable(&self, intent: &'static str) -> Result<(), DomainError> {
        self.require(&[WorkflowState::Upload, WorkflowState::Configure], intent)
    }

    fn require(&self, allowed: &[WorkflowState], intent: &'static str) -> Result<(), DomainError> {
        if allowed.contains(&self.session.state) {
            Ok(())
        } else {
            warn!(intent, state = %self.session.state, "Intent refused");
            Err(DomainError::InvalidTransition {
                state: self.session.state,
                intent,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct SectionLog {
        sections: Mutex<Vec<WorkflowState>>,
        notices: Mutex<Vec<String>>,
        progress: Mutex<Vec<ProgressUpdate>>,
    }

    impl PresentationPort for SectionLog {
        fn render_section(&self, state: WorkflowState) {
            self.sections.lock().unwrap().push(state);
        }
        fn render_file_info(&self, _name: &str, _size: &str, _preview_source: &str) {}
        fn render_active_choices(
            &self,
            _quality: Quality,
            _format: AspectFormat,
            _enhancements: &std::collections::BTreeSet<Enhancement>,
        ) {
        }
        fn render_progress(&self, update: &ProgressUpdate) {
            self.progress.lock().unwrap().push(update.clone());
        }
        fn render_result(&self, _summary: &ResultSummary) {}
        fn offer_download(&self, _download_url: &str, _suggested_name: &str) {}
        fn show_notice(&self, message: &str) {
            self.notices.lock().unwrap().push(message.to_string());
        }
    }

    struct Unreachable;

    #[async_trait::async_trait]
    impl TransferPort for Unreachable {
        async fn submit(
            &self,
            _file: &VideoFile,
            _settings: &Settings,
        ) -> Result<ProcessingResult, TransferError> {
            Err(TransferError::Transport("connection refused".to_string()))
        }
    }

    fn controller() -> (WorkflowController, Arc<SectionLog>) {
        let presenter = Arc::new(SectionLog::default());
        let controller = WorkflowController::new(Arc::new(Unreachable), presenter.clone());
        (controller, presenter)
    }

    fn video() -> VideoFile {
        VideoFile::new("clip.mp4", "video/mp4", 2048, "/videos/clip.mp4")
    }

    fn sample_result() -> ProcessingResult {
        ProcessingResult {
            download_url: "/download/clip.mp4".to_string(),
            file_size: 4096,
            width: 1080,
            height: 1080,
            duration: 3.0,
        }
    }

    #[test]
    fn test_initial_render_shows_upload() {
        let (controller, presenter) = controller();
        assert_eq!(controller.state(), WorkflowState::Upload);
        assert_eq!(*presenter.sections.lock().unwrap(), vec![WorkflowState::Upload]);
    }

    #[test]
    fn test_empty_intake_is_a_no_op() {
        let (mut controller, presenter) = controller();
        controller.intake_file(None).unwrap();
        assert_eq!(controller.state(), WorkflowState::Upload);
        assert!(presenter.notices.lock().unwrap().is_empty());
    }

    #[test]
    fn test_stale_ticket_is_discarded_after_close() {
        let (mut controller, presenter) = controller();
        controller.intake_file(Some(video())).unwrap();
        let ticket = controller.begin_submission().unwrap().unwrap();

        controller.close_session();
        assert_eq!(controller.state(), WorkflowState::Upload);

        let resolution = controller.resolve_submission(ticket, Ok(sample_result()));
        assert_eq!(resolution, Resolution::Stale);
        assert_eq!(controller.state(), WorkflowState::Upload);
        assert!(controller.result().is_none());
        assert!(presenter.notices.lock().unwrap().is_empty());
    }

    #[test]
    fn test_old_ticket_does_not_resolve_new_submission() {
        let (mut controller, _presenter) = controller();
        controller.intake_file(Some(video())).unwrap();
        let old_ticket = controller.begin_submission().unwrap().unwrap();
        controller.close_session();

        controller.intake_file(Some(video())).unwrap();
        let new_ticket = controller.begin_submission().unwrap().unwrap();
        assert_ne!(old_ticket.generation(), new_ticket.generation());

        let stale = controller.resolve_submission(old_ticket, Ok(sample_result()));
        assert_eq!(stale, Resolution::Stale);
        assert_eq!(controller.state(), WorkflowState::InProgress);

        let applied = controller.resolve_submission(new_ticket, Ok(sample_result()));
        assert_eq!(applied, Resolution::Applied(WorkflowState::Result));
    }

    #[test]
    fn test_ticket_resolves_only_once() {
        let (mut controller, _presenter) = controller();
        controller.intake_file(Some(video())).unwrap();
        let ticket = controller.begin_submission().unwrap().unwrap();
        let duplicate = ticket.clone();

        controller.resolve_submission(ticket, Err(TransferError::Status(500)));
        assert_eq!(controller.state(), WorkflowState::Configure);
        assert!(!controller.has_pending_submission());

        let second = controller.resolve_submission(duplicate, Ok(sample_result()));
        assert_eq!(second, Resolution::Stale);
        assert_eq!(controller.state(), WorkflowState::Configure);
    }

    #[test]
    fn test_progress_forwarded_only_for_current_ticket() {
        let (mut controller, presenter) = controller();
        controller.intake_file(Some(video())).unwrap();
        let ticket = controller.begin_submission().unwrap().unwrap();

        let update = ProgressUpdate::new(140.0, "Encoding", "pass 1");
        assert!(controller.report_progress(&ticket, update));
        controller.close_session();
        let update = ProgressUpdate::new(50.0, "Encoding", "pass 2");
        assert!(!controller.report_progress(&ticket, update));

        let progress = presenter.progress.lock().unwrap();
        assert_eq!(progress.len(), 1);
        assert_eq!(progress[0].percent, 100);
    }

    #[test]
    fn test_intents_refused_while_in_progress() {
        let (mut controller, _presenter) = controller();
        controller.intake_file(Some(video())).unwrap();
        controller.begin_submission().unwrap().unwrap();

        assert!(controller.select_quality(Quality::Compact).is_err());
        assert!(controller.toggle_enhancement(Enhancement::Denoise).is_err());
        assert!(controller.intake_file(Some(video())).is_err());
        assert!(controller.remove_file().is_err());
        assert!(controller.begin_submission().is_err());
        assert!(controller.start_new_session().is_err());
        assert_eq!(controller.settings(), &Settings::default());
    }

    #[test]
    fn test_download_requires_result() {
        let (mut controller, _presenter) = controller();
        let err = controller.download().unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidTransition {
                state: WorkflowState::Upload,
                intent: "download",
            }
        );
    }

    #[test]
    fn test_intent_names() {
        assert_eq!(UserIntent::FileIntake(None).name(), "file-intake");
        assert_eq!(
            UserIntent::ToggleEnhancement(Enhancement::Upscale).name(),
            "toggle-enhancement"
        );
        assert_eq!(UserIntent::NewSession.name(), "new-session");
    }
}
