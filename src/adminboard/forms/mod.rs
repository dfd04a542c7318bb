//! # Form Controllers
//!
//! A form collects a candidate entity, validates it, and hands the assembled
//! payload to exactly one store mutation per submit.
//!
//! ```text
//! Pristine ──update──► Editing ──submit──► Validating ──ok──► Submitting ──► Success
//!                         ▲                     │
//!                         └──── errors kept ────┘
//! ```
//!
//! Each entity has an input type implementing [`Form`]. Inputs are plain
//! structs whose fields mirror what a user types, with `Option` where "not yet
//! chosen" is a real state (a size select, a date picker). Nested
//! sub-collections (product variants, blog content blocks) are accumulated on
//! the input and only reach the store with the parent on submit.
//!
//! Edit controllers start from an existing record located by id; a missing id
//! is [`AdminError::NotFound`], the "not found" page state.

use crate::error::{AdminError, Result};
use crate::model::{Entity, Record};
use crate::store::{EntityStore, SnapshotBackend};
use std::fmt;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

pub mod blog;
pub mod donation;
pub mod event;
pub mod image;
pub mod product;
pub mod user;

pub use blog::BlogForm;
pub use donation::DonationForm;
pub use event::EventForm;
pub use image::{check_image_upload, mime_from_path};
pub use product::{ProductForm, VariantForm};
pub use user::UserForm;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Field-level errors; an empty list means the input is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Record an error on `field` unless `ok` holds.
    pub fn check(&mut self, ok: bool, field: &str, message: &str) {
        if !ok {
            self.push(field, message);
        }
    }

    /// Merge a sub-form's errors under `prefix` (e.g. `content[2]`).
    pub fn nest(&mut self, prefix: &str, other: ValidationErrors) {
        for e in other.errors {
            self.push(format!("{}.{}", prefix, e.field), e.message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// First message reported for `field`.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// `Ok(build())` when no errors were recorded.
    pub fn finish<T>(self, build: impl FnOnce() -> T) -> std::result::Result<T, Self> {
        if self.is_empty() {
            Ok(build())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Trimmed length is at least `min` characters.
pub(crate) fn min_chars(s: &str, min: usize) -> bool {
    s.trim().chars().count() >= min
}

pub(crate) fn non_empty(s: &str) -> bool {
    !s.trim().is_empty()
}

/// Snapshots are JSON, which has no representation for NaN or infinity.
pub(crate) fn non_negative(amount: f64) -> bool {
    amount.is_finite() && amount >= 0.0
}

pub(crate) fn optional_text(s: &str) -> Option<String> {
    non_empty(s).then(|| s.trim().to_string())
}

pub(crate) fn looks_like_email(s: &str) -> bool {
    let s = s.trim();
    match s.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !s.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

/// Input state of an add/edit page for one entity type.
pub trait Form {
    type Output: Entity;

    /// Check every rule and assemble the payload.
    fn validate(&self) -> std::result::Result<Self::Output, ValidationErrors>;

    /// Pre-populate an edit form.
    fn from_entity(entity: &Self::Output) -> Self;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(Uuid),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Pristine,
    Editing,
    Validating,
    Submitting,
    Success,
}

pub struct FormController<F: Form> {
    input: F,
    mode: FormMode,
    phase: FormPhase,
    errors: ValidationErrors,
    submit_delay: Duration,
}

impl<F: Form> FormController<F> {
    pub fn create(input: F) -> Self {
        Self {
            input,
            mode: FormMode::Create,
            phase: FormPhase::Pristine,
            errors: ValidationErrors::new(),
            submit_delay: Duration::ZERO,
        }
    }

    /// Edit form for the record `id`, pre-populated from the store.
    pub fn edit<B: SnapshotBackend>(store: &EntityStore<F::Output, B>, id: &Uuid) -> Result<Self> {
        let record = store.require(id)?;
        Ok(Self {
            input: F::from_entity(&record.data),
            mode: FormMode::Edit(record.id),
            phase: FormPhase::Pristine,
            errors: ValidationErrors::new(),
            submit_delay: Duration::ZERO,
        })
    }

    /// Simulated latency between the store mutation and `Success`.
    pub fn with_submit_delay(mut self, delay: Duration) -> Self {
        self.submit_delay = delay;
        self
    }

    pub fn input(&self) -> &F {
        &self.input
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Errors from the last failed submit.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn update(&mut self, change: impl FnOnce(&mut F)) {
        change(&mut self.input);
        self.phase = FormPhase::Editing;
    }

    /// Validate and run the one store mutation for this form.
    pub fn submit<B: SnapshotBackend>(
        &mut self,
        store: &mut EntityStore<F::Output, B>,
    ) -> Result<Record<F::Output>> {
        if self.phase == FormPhase::Submitting {
            return Err(AdminError::Api("Submission already in progress".into()));
        }

        self.phase = FormPhase::Validating;
        let payload = match self.input.validate() {
            Ok(payload) => payload,
            Err(errors) => {
                debug!(kind = F::Output::KIND, errors = errors.len(), "form rejected");
                self.errors = errors.clone();
                self.phase = FormPhase::Editing;
                return Err(AdminError::Validation(errors));
            }
        };
        self.errors = ValidationErrors::new();

        self.phase = FormPhase::Submitting;
        let saved = match self.mode {
            FormMode::Create => store.add(payload),
            FormMode::Edit(id) => store.update(Record::with_id(id, payload)),
        };
        let record = match saved {
            Ok(record) => record,
            Err(e) => {
                self.phase = FormPhase::Editing;
                return Err(e);
            }
        };

        if !self.submit_delay.is_zero() {
            std::thread::sleep(self.submit_delay);
        }
        self.phase = FormPhase::Success;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Color, Size, User};
    use crate::store::mem_backend::MemBackend;
    use crate::test_utils::user;

    fn user_store() -> EntityStore<User, MemBackend> {
        EntityStore::open(MemBackend::new()).unwrap()
    }

    #[test]
    fn email_shape() {
        assert!(looks_like_email("jlee@example.com"));
        assert!(!looks_like_email("jlee@example"));
        assert!(!looks_like_email("@example.com"));
        assert!(!looks_like_email("j lee@example.com"));
    }

    #[test]
    fn controller_walks_the_happy_path() {
        let mut store = user_store();
        let mut form = FormController::create(UserForm::default());
        assert_eq!(form.phase(), FormPhase::Pristine);

        form.update(|f| {
            f.name = "Jennifer Lee".into();
            f.email = "jlee@example.com".into();
            f.joined = Some(crate::test_utils::date("2025-02-20"));
        });
        assert_eq!(form.phase(), FormPhase::Editing);

        let record = form.submit(&mut store).unwrap();
        assert_eq!(form.phase(), FormPhase::Success);
        assert_eq!(store.get(&record.id).unwrap().name, "Jennifer Lee");
    }

    #[test]
    fn invalid_submit_returns_to_editing_with_errors() {
        let mut store = user_store();
        let mut form = FormController::create(UserForm::default());
        form.update(|f| f.name = "J".into());

        let err = form.submit(&mut store).unwrap_err();
        assert!(matches!(err, AdminError::Validation(_)));
        assert_eq!(form.phase(), FormPhase::Editing);
        assert_eq!(
            form.errors().get("name"),
            Some("Name must be at least 2 characters.")
        );
        assert!(store.is_empty());
    }

    #[test]
    fn edit_prepopulates_and_updates_in_place() {
        let mut store = user_store();
        let existing = store.add(user("Ada", "ada@example.com")).unwrap();

        let mut form: FormController<UserForm> =
            FormController::edit(&store, &existing.id).unwrap();
        assert_eq!(form.mode(), FormMode::Edit(existing.id));
        assert_eq!(form.input().email, "ada@example.com");

        form.update(|f| f.name = "Ada Lovelace".into());
        form.submit(&mut store).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&existing.id).unwrap().name, "Ada Lovelace");
    }

    #[test]
    fn edit_of_missing_record_is_not_found() {
        let store = user_store();
        let result: Result<FormController<UserForm>> =
            FormController::edit(&store, &Uuid::new_v4());
        assert!(result.err().is_some_and(|e| e.is_not_found()));
    }

    #[test]
    fn nested_errors_are_prefixed() {
        let mut errors = ValidationErrors::new();
        let variant = VariantForm {
            size: Some(Size::M),
            color: Some(Color::Red),
            price: -1.0,
            mrp: 1.0,
            ..VariantForm::default()
        };
        errors.nest("variants[0]", variant.validate().unwrap_err());
        assert_eq!(errors.get("variants[0].price"), Some("Price must be positive"));
    }
}
