use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::api_client::{ProfileStore, ResumeIngest};
use crate::errors::{Operation, WizardError};
use crate::models::shape::{accepts, conform};
use crate::models::{
    CertificationEntry, EducationEntry, ExperienceEntry, LanguageEntry, ProfileRecord,
    ProjectEntry, PublicationEntry, ResumeFile, Section,
};
use crate::profile::collection::{self, CollectionEntry};
use crate::profile::{hydrate_stored, prepare_for_submission, DateNormalizer, SchemaTranslator};
use crate::wizard::steps::{Step, LAST_STEP, STEPS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardMode {
    Create,
    Edit { profile_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// Server confirmation, or a default when it sent none.
    pub message: String,
    /// Where the uploaded resume ended up, if a file was uploaded.
    pub resume_url: Option<String>,
}

enum EntryOp {
    Add,
    Update {
        index: usize,
        field: String,
        value: Value,
    },
    Remove(usize),
}

impl EntryOp {
    fn apply<T: CollectionEntry>(self, items: &[T]) -> Vec<T> {
        match self {
            EntryOp::Add => collection::add(items, &T::default()),
            EntryOp::Update {
                index,
                field,
                value,
            } => collection::update_field(items, index, &field, value),
            EntryOp::Remove(index) => collection::remove(items, index),
        }
    }
}

/// Drives one profile through the wizard, in create or edit mode.
///
/// All mutation goes through `&mut self`, so a parse or submit in flight
/// cannot interleave with edits to the same controller.
pub struct WizardController {
    mode: WizardMode,
    record: ProfileRecord,
    step: usize,
    parse_file: Option<ResumeFile>,
    attached_file: Option<ResumeFile>,
    translator: SchemaTranslator,
    ingest: Arc<dyn ResumeIngest>,
    store: Arc<dyn ProfileStore>,
}

impl WizardController {
    /// A create-mode wizard over an empty record, at the first step.
    pub fn new(
        ingest: Arc<dyn ResumeIngest>,
        store: Arc<dyn ProfileStore>,
        dates: Arc<dyn DateNormalizer>,
    ) -> Self {
        Self {
            mode: WizardMode::Create,
            record: ProfileRecord::default(),
            step: 0,
            parse_file: None,
            attached_file: None,
            translator: SchemaTranslator::new(dates),
            ingest,
            store,
        }
    }

    /// Fetches a stored profile and returns an edit-mode wizard over it.
    ///
    /// On failure nothing is built; calling again is the retry.
    pub async fn load_for_edit(
        profile_id: &str,
        ingest: Arc<dyn ResumeIngest>,
        store: Arc<dyn ProfileStore>,
        dates: Arc<dyn DateNormalizer>,
    ) -> Result<Self, WizardError> {
        let stored = store
            .fetch_profile(profile_id)
            .await
            .map_err(|source| WizardError::Fetch {
                operation: Operation::LoadProfile,
                source,
            })?;
        let record = hydrate_stored(&stored, dates.as_ref())?;
        info!("Loaded profile {profile_id} for editing");

        let mut wizard = Self::new(ingest, store, dates);
        wizard.mode = WizardMode::Edit {
            profile_id: profile_id.to_string(),
        };
        wizard.record = record;
        Ok(wizard)
    }

    /// Replaces the working record, e.g. with a draft saved earlier.
    pub fn with_record(mut self, record: ProfileRecord) -> Self {
        self.record = record;
        self
    }

    /// Swaps in a draft over the loaded record. A draft without a resume keeps
    /// the one already on file.
    pub fn adopt_draft(&mut self, mut draft: ProfileRecord) {
        if draft.resume_url.is_empty() {
            draft.resume_url = std::mem::take(&mut self.record.resume_url);
        }
        self.record = draft;
    }

    pub fn mode(&self) -> &WizardMode {
        &self.mode
    }

    pub fn record(&self) -> &ProfileRecord {
        &self.record
    }

    // ────────────────────────────────────────────────────────────────────────
    // Navigation
    // ────────────────────────────────────────────────────────────────────────

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn current_step(&self) -> &'static Step {
        &STEPS[self.step]
    }

    pub fn next(&mut self) {
        if self.step < LAST_STEP {
            self.step += 1;
            debug!("Wizard step -> {} ({})", self.step, self.current_step().id);
        }
    }

    pub fn previous(&mut self) {
        if self.step > 0 {
            self.step -= 1;
            debug!("Wizard step -> {} ({})", self.step, self.current_step().id);
        }
    }

    /// Moves straight to `index`. Earlier steps are never validated first.
    pub fn jump_to(&mut self, index: usize) -> Result<(), WizardError> {
        if index >= STEPS.len() {
            return Err(WizardError::StepOutOfRange {
                index,
                len: STEPS.len(),
            });
        }
        self.step = index;
        debug!("Wizard jumped to {} ({})", index, self.current_step().id);
        Ok(())
    }

    // ────────────────────────────────────────────────────────────────────────
    // Field edits
    // ────────────────────────────────────────────────────────────────────────

    /// Sets one scalar field by wire name. Text fields also take numbers;
    /// tri-state yes/no fields take a bool or `null`.
    pub fn set_field(&mut self, name: &str, value: Value) -> Result<(), WizardError> {
        if Section::ALL.iter().any(|s| s.key() == name) {
            return Err(WizardError::Field(format!(
                "'{name}' is a collection; edit it entry by entry"
            )));
        }
        let defaults = serde_json::to_value(ProfileRecord::default())?;
        let slot = defaults
            .get(name)
            .ok_or_else(|| WizardError::Field(format!("unknown field '{name}'")))?;
        if !accepts(slot, &value) {
            return Err(WizardError::Field(format!(
                "'{name}' does not take {value}"
            )));
        }

        let mut current = serde_json::to_value(&self.record)?;
        if let Value::Object(object) = &mut current {
            object.insert(name.to_string(), conform(slot, &value));
        }
        self.record = serde_json::from_value(current)?;
        Ok(())
    }

    /// Records a yes/no radio answer: `"yes"` is `true`, anything else `false`.
    pub fn set_choice(&mut self, name: &str, choice: &str) -> Result<(), WizardError> {
        self.set_field(name, Value::Bool(choice == "yes"))
    }

    pub fn add_entry(&mut self, section: Section) {
        self.edit_section(section, EntryOp::Add);
    }

    pub fn update_entry(&mut self, section: Section, index: usize, field: &str, value: Value) {
        self.edit_section(
            section,
            EntryOp::Update {
                index,
                field: field.to_string(),
                value,
            },
        );
    }

    pub fn remove_entry(&mut self, section: Section, index: usize) {
        self.edit_section(section, EntryOp::Remove(index));
    }

    fn edit_section(&mut self, section: Section, op: EntryOp) {
        let r = &mut self.record;
        match section {
            Section::Experience => r.experience = op.apply::<ExperienceEntry>(&r.experience),
            Section::Education => r.education = op.apply::<EducationEntry>(&r.education),
            Section::Projects => r.projects = op.apply::<ProjectEntry>(&r.projects),
            Section::Certifications => {
                r.certifications = op.apply::<CertificationEntry>(&r.certifications)
            }
            Section::Languages => r.languages = op.apply::<LanguageEntry>(&r.languages),
            Section::Publications => {
                r.publications = op.apply::<PublicationEntry>(&r.publications)
            }
        }
    }

    // ────────────────────────────────────────────────────────────────────────
    // Resume files
    // ────────────────────────────────────────────────────────────────────────

    pub fn parse_file(&self) -> Option<&ResumeFile> {
        self.parse_file.as_ref()
    }

    pub fn attached_file(&self) -> Option<&ResumeFile> {
        self.attached_file.as_ref()
    }

    /// Chooses the file `parse_and_fill` will send. Nothing is parsed yet.
    pub fn select_parse_file(&mut self, file: ResumeFile) {
        self.parse_file = Some(file);
    }

    /// Attaches a file for storage only; it becomes the displayed resume.
    pub fn attach_file(&mut self, file: ResumeFile) {
        self.record.resume_url = file.name().to_string();
        self.attached_file = Some(file);
    }

    pub fn remove_parse_file(&mut self) {
        if let Some(file) = self.parse_file.take() {
            self.forget_resume_name(file.name());
        }
    }

    pub fn remove_attached_file(&mut self) {
        if let Some(file) = self.attached_file.take() {
            self.forget_resume_name(file.name());
        }
    }

    fn forget_resume_name(&mut self, name: &str) {
        if self.record.resume_url == name {
            self.record.resume_url.clear();
        }
    }

    /// Sends the selected parse file to the parser and merges the result.
    ///
    /// The merge is all or nothing: on any failure the record is unchanged.
    pub async fn parse_and_fill(&mut self) -> Result<(), WizardError> {
        let file = self
            .parse_file
            .as_ref()
            .ok_or(WizardError::NoResumeSelected)?;
        let file_name = file.name().to_string();

        let parsed = self
            .ingest
            .parse_resume(file)
            .await
            .map_err(WizardError::Parse)?;

        let mut merged = self.translator.translate(&parsed).apply_to(&self.record)?;
        merged.resume_url = file_name.clone();
        self.record = merged;
        info!("Resume {file_name} parsed and merged into the profile");
        Ok(())
    }

    // ────────────────────────────────────────────────────────────────────────
    // Submission
    // ────────────────────────────────────────────────────────────────────────

    /// Uploads the resume (the parse file wins over an attached one), then
    /// creates or updates the profile.
    ///
    /// An upload failure stops before the profile call. Any failure keeps
    /// the record, files and step as they were.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, WizardError> {
        let mut record = self.record.clone();
        let mut uploaded = None;

        if let Some(file) = self.parse_file.as_ref().or(self.attached_file.as_ref()) {
            let url = self
                .ingest
                .upload_resume(file)
                .await
                .map_err(|e| {
                    warn!("Resume upload failed for {}: {e}", file.name());
                    WizardError::Upload(e)
                })?;
            record.resume_url = url.clone();
            uploaded = Some(url);
        }

        let payload = prepare_for_submission(&record)?;

        let message = match self.mode.clone() {
            WizardMode::Create => {
                let message = self
                    .store
                    .create_profile(&payload)
                    .await
                    .map_err(|source| WizardError::Persist {
                        operation: Operation::CreateProfile,
                        source,
                    })?;
                self.reset();
                message.unwrap_or_else(|| "Profile created successfully!".to_string())
            }
            WizardMode::Edit { profile_id } => {
                let message = self
                    .store
                    .update_profile(&profile_id, &payload)
                    .await
                    .map_err(|source| WizardError::Persist {
                        operation: Operation::UpdateProfile,
                        source,
                    })?;
                self.record.resume_url = record.resume_url;
                self.parse_file = None;
                self.attached_file = None;
                message.unwrap_or_else(|| "Profile updated successfully!".to_string())
            }
        };

        Ok(SubmitOutcome {
            message,
            resume_url: uploaded,
        })
    }

    fn reset(&mut self) {
        self.record = ProfileRecord::default();
        self.parse_file = None;
        self.attached_file = None;
    }
}
