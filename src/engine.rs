// SPDX-License-Identifier: MIT

//! Classification run state machine
//!
//! Drives one pass over an ordered image list in Automatic or Manual mode.
//! The engine is a pure state holder with an explicit method contract; any
//! front-end (CLI prompt, GUI) adapts its own event system onto the four
//! manual decision actions: confirm, skip, cancel, retry.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::client::{unique_works, ModelId, Recognize, RecognitionOutcome};
use crate::history::{SuggestionStore, UNKNOWN};
use crate::{Result, SorterError};

/// Classification mode for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Best API match per image, no user input
    Automatic,
    /// Per-image confirmation with retry/skip/override
    Manual,
}

/// Options fixed at run construction
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub mode: RunMode,
    pub model: ModelId,
    /// Build the by-character tree; when disabled the character dimension
    /// defaults to "unknown" and is not required at confirmation
    pub by_character: bool,
    /// Build the by-work tree; same rules as `by_character`
    pub by_work: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            mode: RunMode::Automatic,
            model: ModelId::default(),
            by_character: true,
            by_work: true,
        }
    }
}

/// One decided image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationEntry {
    pub image: PathBuf,
    pub character: String,
    pub work: String,
}

/// Lifecycle states of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    /// Manual mode is parked on the current image awaiting a decision
    PendingDecision,
    Done,
}

/// The recognition outcome for the current image in Manual mode
#[derive(Debug, Clone)]
pub struct PendingDecision {
    pub image: PathBuf,
    pub outcome: RecognitionOutcome,
    /// Model that produced `outcome` (changes after a successful retry)
    pub model: ModelId,
}

impl PendingDecision {
    /// Character options in API order, deduplicated
    pub fn character_options(&self) -> Vec<String> {
        self.outcome
            .candidates()
            .iter()
            .map(|c| c.character.clone())
            .collect()
    }

    /// Work options in API order, deduplicated
    pub fn work_options(&self) -> Vec<String> {
        unique_works(self.outcome.candidates())
    }
}

/// A manual decision before resolution: free text and/or a list selection
/// per dimension
#[derive(Debug, Default, Clone)]
pub struct Decision {
    pub character_text: Option<String>,
    pub character_selection: Option<String>,
    pub work_text: Option<String>,
    pub work_selection: Option<String>,
}

impl Decision {
    /// Resolve to concrete names. Free text takes precedence over a
    /// selection; a disabled dimension resolves to "unknown".
    pub fn resolve(&self, options: &RunOptions) -> Result<(String, String)> {
        let character = resolve_field(
            self.character_text.as_deref(),
            self.character_selection.as_deref(),
            options.by_character,
            "character",
        )?;
        let work = resolve_field(
            self.work_text.as_deref(),
            self.work_selection.as_deref(),
            options.by_work,
            "work",
        )?;
        Ok((character, work))
    }
}

fn resolve_field(
    free_text: Option<&str>,
    selection: Option<&str>,
    enabled: bool,
    field: &str,
) -> Result<String> {
    if !enabled {
        return Ok(UNKNOWN.to_string());
    }
    if let Some(text) = free_text.map(str::trim).filter(|t| !t.is_empty()) {
        return Ok(text.to_string());
    }
    if let Some(sel) = selection.map(str::trim).filter(|s| !s.is_empty()) {
        return Ok(sel.to_string());
    }
    Err(SorterError::Validation(format!("{} is required", field)))
}

/// One end-to-end classification pass over an ordered image list
pub struct ClassificationRun {
    images: Vec<PathBuf>,
    options: RunOptions,
    recognizer: Arc<dyn Recognize>,
    cursor: usize,
    entries: Vec<ClassificationEntry>,
    state: RunState,
    pending: Option<PendingDecision>,
    cancelled: bool,
}

impl ClassificationRun {
    pub fn new(images: Vec<PathBuf>, options: RunOptions, recognizer: Arc<dyn Recognize>) -> Self {
        Self {
            images,
            options,
            recognizer,
            cursor: 0,
            entries: Vec::new(),
            state: RunState::Idle,
            pending: None,
            cancelled: false,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// `(processed, total)` for progress display
    pub fn progress(&self) -> (usize, usize) {
        (self.cursor.min(self.images.len()), self.images.len())
    }

    /// Accumulated mapping so far (run order)
    pub fn entries(&self) -> &[ClassificationEntry] {
        &self.entries
    }

    /// Consume the run, yielding the final mapping
    pub fn into_entries(self) -> Vec<ClassificationEntry> {
        self.entries
    }

    pub fn is_done(&self) -> bool {
        self.state == RunState::Done
    }

    /// True when the run ended via `cancel` (no export should happen)
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Run the whole list in Automatic mode, reporting progress after every
    /// image. A fatal API code aborts immediately; entries accumulated before
    /// the abort are kept for partial export.
    pub async fn run_auto(&mut self, mut progress: impl FnMut(usize, usize)) -> Result<()> {
        self.ensure_mode(RunMode::Automatic)?;
        self.ensure_idle()?;
        self.state = RunState::Running;

        let total = self.images.len();
        let recognizer = Arc::clone(&self.recognizer);
        for i in 0..total {
            let image = self.images[i].clone();
            self.cursor = i;

            match recognizer.recognize(&image, self.options.model).await {
                // First candidate is the API's best match; a recognizer that
                // hands back an empty Success list counts as no match
                Ok(RecognitionOutcome::Success(candidates))
                    if !candidates.is_empty() =>
                {
                    let best = &candidates[0];
                    debug!("Matched {:?} as {} ({})", image, best.character, best.work);
                    self.entries.push(ClassificationEntry {
                        image,
                        character: best.character.clone(),
                        work: best.work.clone(),
                    });
                }
                Ok(RecognitionOutcome::Success(_)) | Ok(RecognitionOutcome::Empty) => {
                    info!("No match for {:?}, excluded from export", image);
                }
                Ok(RecognitionOutcome::RecoverableError { code, message }) => {
                    warn!("Recognition failed for {:?} (code {}): {}", image, code, message);
                }
                Ok(RecognitionOutcome::FatalError { code, message }) => {
                    warn!("Fatal API error (code {}): {}", code, message);
                    self.cursor = i + 1;
                    self.state = RunState::Done;
                    return Err(SorterError::ApiFatal(code));
                }
                Err(e) => {
                    warn!("Could not process {:?}: {}", image, e);
                }
            }

            self.cursor = i + 1;
            progress(self.cursor, total);
        }

        self.state = RunState::Done;
        Ok(())
    }

    /// Enter Manual mode: eagerly fetch the outcome for the first image and
    /// park in `PendingDecision` (or go straight to `Done` on an empty list)
    pub async fn start_manual(&mut self) -> Result<()> {
        self.ensure_mode(RunMode::Manual)?;
        self.ensure_idle()?;
        self.fetch_current().await
    }

    /// Image awaiting a decision, if any
    pub fn current_image(&self) -> Option<&Path> {
        self.pending.as_ref().map(|p| p.image.as_path())
    }

    /// The pending outcome for the current image
    pub fn pending(&self) -> Option<&PendingDecision> {
        self.pending.as_ref()
    }

    /// Record an entry for the current image and advance. Non-"unknown"
    /// names are forwarded to the suggestion store.
    pub async fn confirm(
        &mut self,
        character: &str,
        work: &str,
        store: &mut SuggestionStore,
    ) -> Result<()> {
        let pending = self.ensure_pending()?;
        let image = pending.image.clone();

        let character = required_name(character, self.options.by_character, "character")?;
        let work = required_name(work, self.options.by_work, "work")?;

        if character != UNKNOWN {
            store.record_character(&character);
        }
        if work != UNKNOWN {
            store.record_work(&work);
        }

        self.entries.push(ClassificationEntry { image, character, work });
        self.advance().await
    }

    /// Advance without recording an entry for the current image
    pub async fn skip(&mut self) -> Result<()> {
        self.ensure_pending()?;
        debug!("Skipped {:?}", self.pending.as_ref().map(|p| &p.image));
        self.advance().await
    }

    /// Abandon the whole batch: accumulated entries are discarded and no
    /// export happens
    pub fn cancel(&mut self) {
        info!("Run cancelled, discarding {} entries", self.entries.len());
        self.entries.clear();
        self.pending = None;
        self.cancelled = true;
        self.state = RunState::Done;
    }

    /// Re-recognize the current image with a different model. The pending
    /// outcome is replaced only when the retry produced candidates; a failed
    /// retry keeps the previous candidate list. Returns whether the outcome
    /// was replaced.
    pub async fn retry_with_model(&mut self, model: ModelId) -> Result<bool> {
        let pending = self.ensure_pending()?;
        let image = pending.image.clone();

        let outcome = self.recognizer.recognize(&image, model).await?;
        match outcome {
            RecognitionOutcome::Success(_) => {
                self.pending = Some(PendingDecision { image, outcome, model });
                Ok(true)
            }
            RecognitionOutcome::FatalError { code, message } => {
                warn!("Fatal API error during retry (code {}): {}", code, message);
                self.pending = None;
                self.state = RunState::Done;
                Err(SorterError::ApiFatal(code))
            }
            RecognitionOutcome::Empty => Ok(false),
            RecognitionOutcome::RecoverableError { code, message } => {
                warn!("Retry failed (code {}): {}", code, message);
                Ok(false)
            }
        }
    }

    async fn advance(&mut self) -> Result<()> {
        self.pending = None;
        self.cursor += 1;
        self.fetch_current().await
    }

    async fn fetch_current(&mut self) -> Result<()> {
        if self.cursor >= self.images.len() {
            self.state = RunState::Done;
            return Ok(());
        }

        self.state = RunState::Running;
        let image = self.images[self.cursor].clone();
        let outcome = self.recognizer.recognize(&image, self.options.model).await?;

        if let RecognitionOutcome::FatalError { code, message } = &outcome {
            warn!("Fatal API error (code {}): {}", code, message);
            let code = *code;
            self.state = RunState::Done;
            return Err(SorterError::ApiFatal(code));
        }

        self.pending = Some(PendingDecision { image, outcome, model: self.options.model });
        self.state = RunState::PendingDecision;
        Ok(())
    }

    fn ensure_mode(&self, mode: RunMode) -> Result<()> {
        if self.options.mode != mode {
            return Err(SorterError::Validation(format!(
                "run is not in {:?} mode",
                mode
            )));
        }
        Ok(())
    }

    fn ensure_idle(&self) -> Result<()> {
        if self.state != RunState::Idle {
            return Err(SorterError::Validation("run was already started".to_string()));
        }
        Ok(())
    }

    fn ensure_pending(&self) -> Result<&PendingDecision> {
        self.pending
            .as_ref()
            .ok_or_else(|| SorterError::Validation("no image awaiting a decision".to_string()))
    }
}

fn required_name(value: &str, enabled: bool, field: &str) -> Result<String> {
    if !enabled {
        return Ok(UNKNOWN.to_string());
    }
    let value = value.trim();
    if value.is_empty() {
        return Err(SorterError::Validation(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::RecognitionCandidate;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tempfile::TempDir;

    struct ScriptedRecognizer {
        outcomes: Mutex<VecDeque<RecognitionOutcome>>,
        calls: AtomicUsize,
    }

    impl ScriptedRecognizer {
        fn new(outcomes: Vec<RecognitionOutcome>) -> Arc<Self> {
            Arc::new(Self {
                outcomes: Mutex::new(outcomes.into()),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Recognize for ScriptedRecognizer {
        async fn recognize(&self, _image: &Path, _model: ModelId) -> Result<RecognitionOutcome> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(RecognitionOutcome::Empty))
        }
    }

    fn success(character: &str, work: &str) -> RecognitionOutcome {
        RecognitionOutcome::Success(vec![RecognitionCandidate {
            character: character.to_string(),
            work: work.to_string(),
        }])
    }

    fn fatal() -> RecognitionOutcome {
        RecognitionOutcome::FatalError {
            code: 17704,
            message: "API is under maintenance".to_string(),
        }
    }

    fn images(n: usize) -> Vec<PathBuf> {
        (0..n).map(|i| PathBuf::from(format!("img{}.jpg", i))).collect()
    }

    fn store(dir: &TempDir) -> SuggestionStore {
        SuggestionStore::load(&dir.path().join("history.json"))
    }

    fn manual_options() -> RunOptions {
        RunOptions { mode: RunMode::Manual, ..RunOptions::default() }
    }

    #[tokio::test]
    async fn test_auto_picks_best_candidate() {
        let recognizer = ScriptedRecognizer::new(vec![RecognitionOutcome::Success(vec![
            RecognitionCandidate { character: "Aoi".into(), work: "Work A".into() },
            RecognitionCandidate { character: "Hina".into(), work: "Work B".into() },
        ])]);
        let mut run = ClassificationRun::new(images(1), RunOptions::default(), recognizer);

        run.run_auto(|_, _| {}).await.unwrap();

        assert_eq!(run.entries().len(), 1);
        assert_eq!(run.entries()[0].character, "Aoi");
        assert_eq!(run.entries()[0].work, "Work A");
        assert!(run.is_done());
    }

    #[tokio::test]
    async fn test_auto_all_empty_yields_no_entries() {
        let recognizer =
            ScriptedRecognizer::new(vec![RecognitionOutcome::Empty; 4]);
        let mut run = ClassificationRun::new(images(4), RunOptions::default(), recognizer);

        run.run_auto(|_, _| {}).await.unwrap();

        assert!(run.entries().is_empty());
        assert!(run.is_done());
    }

    #[tokio::test]
    async fn test_auto_empty_candidate_list_counts_as_no_match() {
        let recognizer = ScriptedRecognizer::new(vec![
            RecognitionOutcome::Success(vec![]),
            success("Aoi", "Work A"),
        ]);
        let mut run = ClassificationRun::new(images(2), RunOptions::default(), recognizer);

        run.run_auto(|_, _| {}).await.unwrap();

        assert_eq!(run.entries().len(), 1);
        assert_eq!(run.entries()[0].character, "Aoi");
        assert!(run.is_done());
    }

    #[tokio::test]
    async fn test_auto_fatal_aborts_and_keeps_partial_results() {
        let recognizer = ScriptedRecognizer::new(vec![
            success("Aoi", "Work A"),
            success("Hina", "Work B"),
            fatal(),
            success("Miko", "Work C"),
            success("Rin", "Work D"),
        ]);
        let mut run =
            ClassificationRun::new(images(5), RunOptions::default(), recognizer.clone());

        let err = run.run_auto(|_, _| {}).await.unwrap_err();
        assert!(matches!(err, SorterError::ApiFatal(17704)));

        // Images 4 and 5 were never processed
        assert_eq!(recognizer.calls(), 3);
        assert_eq!(run.entries().len(), 2);
        assert_eq!(run.entries()[1].character, "Hina");
        assert!(run.is_done());
    }

    #[tokio::test]
    async fn test_auto_recoverable_error_skips_image_only() {
        let recognizer = ScriptedRecognizer::new(vec![
            success("Aoi", "Work A"),
            RecognitionOutcome::RecoverableError {
                code: 17702,
                message: "server busy, please retry".to_string(),
            },
            success("Miko", "Work C"),
        ]);
        let mut run = ClassificationRun::new(images(3), RunOptions::default(), recognizer);

        run.run_auto(|_, _| {}).await.unwrap();

        let names: Vec<&str> = run.entries().iter().map(|e| e.character.as_str()).collect();
        assert_eq!(names, vec!["Aoi", "Miko"]);
    }

    #[tokio::test]
    async fn test_auto_reports_progress_per_image() {
        let recognizer =
            ScriptedRecognizer::new(vec![RecognitionOutcome::Empty; 3]);
        let mut run = ClassificationRun::new(images(3), RunOptions::default(), recognizer);

        let mut seen = Vec::new();
        run.run_auto(|processed, total| seen.push((processed, total)))
            .await
            .unwrap();

        assert_eq!(seen, vec![(1, 3), (2, 3), (3, 3)]);
    }

    #[tokio::test]
    async fn test_manual_confirm_records_entry_and_suggestions() {
        let dir = TempDir::new().unwrap();
        let mut store = store(&dir);
        let recognizer = ScriptedRecognizer::new(vec![
            success("Aoi", "Work A"),
            RecognitionOutcome::Empty,
        ]);
        let mut run = ClassificationRun::new(images(2), manual_options(), recognizer);

        run.start_manual().await.unwrap();
        assert_eq!(run.state(), RunState::PendingDecision);
        assert_eq!(run.current_image().unwrap(), Path::new("img0.jpg"));
        assert_eq!(run.pending().unwrap().character_options(), vec!["Aoi"]);

        run.confirm("Aoi", "Work A", &mut store).await.unwrap();

        assert_eq!(run.entries().len(), 1);
        assert_eq!(run.current_image().unwrap(), Path::new("img1.jpg"));
        assert!(store.character_suggestions().contains(&"Aoi".to_string()));
        assert!(store.work_suggestions().contains(&"Work A".to_string()));
    }

    #[tokio::test]
    async fn test_manual_unknown_names_not_stored() {
        let dir = TempDir::new().unwrap();
        let mut store = store(&dir);
        let recognizer = ScriptedRecognizer::new(vec![RecognitionOutcome::Empty]);
        let mut run = ClassificationRun::new(images(1), manual_options(), recognizer);

        run.start_manual().await.unwrap();
        run.confirm(UNKNOWN, UNKNOWN, &mut store).await.unwrap();

        assert_eq!(store.character_suggestions(), vec![UNKNOWN]);
        assert!(run.is_done());
        assert_eq!(run.entries().len(), 1);
    }

    #[tokio::test]
    async fn test_manual_skip_records_nothing() {
        let dir = TempDir::new().unwrap();
        let mut store = store(&dir);
        let recognizer = ScriptedRecognizer::new(vec![
            success("Aoi", "Work A"),
            success("Hina", "Work B"),
        ]);
        let mut run = ClassificationRun::new(images(2), manual_options(), recognizer);

        run.start_manual().await.unwrap();
        run.skip().await.unwrap();
        run.confirm("Hina", "Work B", &mut store).await.unwrap();

        assert_eq!(run.entries().len(), 1);
        assert_eq!(run.entries()[0].image, PathBuf::from("img1.jpg"));
        assert!(run.is_done());
    }

    #[tokio::test]
    async fn test_manual_cancel_discards_entries() {
        let dir = TempDir::new().unwrap();
        let mut store = store(&dir);
        let recognizer = ScriptedRecognizer::new(vec![
            success("Aoi", "Work A"),
            success("Hina", "Work B"),
            success("Miko", "Work C"),
            success("Rin", "Work D"),
            success("Yui", "Work E"),
        ]);
        let mut run = ClassificationRun::new(images(5), manual_options(), recognizer);

        run.start_manual().await.unwrap();
        run.confirm("Aoi", "Work A", &mut store).await.unwrap();
        run.confirm("Hina", "Work B", &mut store).await.unwrap();
        run.cancel();

        assert!(run.is_done());
        assert!(run.is_cancelled());
        assert!(run.entries().is_empty());
    }

    #[tokio::test]
    async fn test_manual_retry_replaces_outcome_on_success() {
        let recognizer = ScriptedRecognizer::new(vec![
            success("Aoi", "Work A"),
            success("Hina", "Work B"),
        ]);
        let mut run = ClassificationRun::new(images(1), manual_options(), recognizer);

        run.start_manual().await.unwrap();
        let replaced = run.retry_with_model(ModelId::PreStable).await.unwrap();

        assert!(replaced);
        let pending = run.pending().unwrap();
        assert_eq!(pending.character_options(), vec!["Hina"]);
        assert_eq!(pending.model, ModelId::PreStable);
    }

    #[tokio::test]
    async fn test_manual_failed_retry_keeps_previous_candidates() {
        let recognizer = ScriptedRecognizer::new(vec![
            success("Aoi", "Work A"),
            RecognitionOutcome::Empty,
        ]);
        let mut run = ClassificationRun::new(images(1), manual_options(), recognizer);

        run.start_manual().await.unwrap();
        let replaced = run.retry_with_model(ModelId::PreStable).await.unwrap();

        assert!(!replaced);
        let pending = run.pending().unwrap();
        assert_eq!(pending.character_options(), vec!["Aoi"]);
        assert_eq!(pending.model, ModelId::default());
    }

    #[tokio::test]
    async fn test_manual_fatal_during_fetch_aborts_with_partial_entries() {
        let dir = TempDir::new().unwrap();
        let mut store = store(&dir);
        let recognizer = ScriptedRecognizer::new(vec![success("Aoi", "Work A"), fatal()]);
        let mut run = ClassificationRun::new(images(2), manual_options(), recognizer);

        run.start_manual().await.unwrap();
        let err = run.confirm("Aoi", "Work A", &mut store).await.unwrap_err();

        assert!(matches!(err, SorterError::ApiFatal(17704)));
        assert!(run.is_done());
        assert!(!run.is_cancelled());
        // The confirmed entry survives for partial export
        assert_eq!(run.entries().len(), 1);
    }

    #[tokio::test]
    async fn test_confirm_requires_enabled_fields() {
        let dir = TempDir::new().unwrap();
        let mut store = store(&dir);
        let recognizer = ScriptedRecognizer::new(vec![success("Aoi", "Work A")]);
        let mut run = ClassificationRun::new(images(1), manual_options(), recognizer);

        run.start_manual().await.unwrap();
        let err = run.confirm("", "Work A", &mut store).await.unwrap_err();

        assert!(matches!(err, SorterError::Validation(_)));
        // Rejected before it reached the mapping; run continues
        assert_eq!(run.state(), RunState::PendingDecision);
        assert!(run.entries().is_empty());
    }

    #[tokio::test]
    async fn test_disabled_dimension_defaults_to_unknown() {
        let dir = TempDir::new().unwrap();
        let mut store = store(&dir);
        let recognizer = ScriptedRecognizer::new(vec![success("Aoi", "Work A")]);
        let options = RunOptions {
            mode: RunMode::Manual,
            by_work: false,
            ..RunOptions::default()
        };
        let mut run = ClassificationRun::new(images(1), options, recognizer);

        run.start_manual().await.unwrap();
        run.confirm("Aoi", "", &mut store).await.unwrap();

        assert_eq!(run.entries()[0].work, UNKNOWN);
    }

    #[tokio::test]
    async fn test_empty_image_list_finishes_immediately() {
        let recognizer = ScriptedRecognizer::new(vec![]);
        let mut run = ClassificationRun::new(vec![], manual_options(), recognizer.clone());

        run.start_manual().await.unwrap();

        assert!(run.is_done());
        assert_eq!(recognizer.calls(), 0);
    }

    #[test]
    fn test_decision_free_text_beats_selection() {
        let options = RunOptions { mode: RunMode::Manual, ..RunOptions::default() };
        let decision = Decision {
            character_text: Some("Aoi (school uniform)".to_string()),
            character_selection: Some("Aoi".to_string()),
            work_text: None,
            work_selection: Some("Work A".to_string()),
        };

        let (character, work) = decision.resolve(&options).unwrap();
        assert_eq!(character, "Aoi (school uniform)");
        assert_eq!(work, "Work A");
    }

    #[test]
    fn test_decision_missing_required_field_is_rejected() {
        let options = RunOptions { mode: RunMode::Manual, ..RunOptions::default() };
        let decision = Decision {
            character_text: Some("  ".to_string()),
            ..Decision::default()
        };
        assert!(decision.resolve(&options).is_err());
    }

    #[test]
    fn test_decision_disabled_dimensions_resolve_to_unknown() {
        let options = RunOptions {
            mode: RunMode::Manual,
            by_character: false,
            by_work: false,
            ..RunOptions::default()
        };
        let (character, work) = Decision::default().resolve(&options).unwrap();
        assert_eq!(character, UNKNOWN);
        assert_eq!(work, UNKNOWN);
    }
}
