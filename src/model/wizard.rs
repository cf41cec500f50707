//! Step wizard controller for the product form
//!
//! Owns the ordered steps, the shared [`FormRecord`], per-step validation and
//! navigation. Submission writes the record to storage and then, after a
//! simulated latency, jumps straight to the terminal step.

use super::form::FormRecord;
use crate::services::delay::{self, Delay};
use crate::services::storage::{self, KeyValueStore, LAST_PAYLOAD_KEY};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Message recorded for a missing required field
pub const REQUIRED_MESSAGE: &str = "This field is required";

/// Simulated submission latency
pub const SUBMIT_DELAY: Duration = Duration::from_millis(1500);

/// Which view renders a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    ProductInfo,
    Description,
    Audience,
    Review,
    Complete,
}

/// A single wizard step: label, view and the fields it requires
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDefinition {
    pub label: &'static str,
    pub kind: StepKind,
    pub required: &'static [&'static str],
}

/// The product form's steps, in order
pub fn product_form_steps() -> Vec<StepDefinition> {
    vec![
        StepDefinition {
            label: "Product",
            kind: StepKind::ProductInfo,
            required: &["productType", "name"],
        },
        StepDefinition {
            label: "Description",
            kind: StepKind::Description,
            required: &["description", "price"],
        },
        StepDefinition {
            label: "Audience",
            kind: StepKind::Audience,
            required: &["location"],
        },
        StepDefinition {
            label: "Review",
            kind: StepKind::Review,
            required: &[],
        },
        StepDefinition {
            label: "Complete",
            kind: StepKind::Complete,
            required: &[],
        },
    ]
}

/// Direction of the last step transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavDirection {
    #[default]
    Forward,
    Backward,
}

/// Multi-step form state machine
pub struct WizardController {
    steps: Vec<StepDefinition>,
    current: usize,
    direction: NavDirection,
    errors: BTreeMap<String, String>,
    submitting: bool,
    form: FormRecord,
    /// Consent checkbox on the review step. Rendered only; the validator
    /// does not look at it.
    pub consent: bool,
    store: Rc<dyn KeyValueStore>,
    pending_submit: Option<Delay>,
    submit_delay: Duration,
}

impl WizardController {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self::with_steps(product_form_steps(), store)
    }

    pub fn with_steps(steps: Vec<StepDefinition>, store: Rc<dyn KeyValueStore>) -> Self {
        Self {
            steps,
            current: 0,
            direction: NavDirection::Forward,
            errors: BTreeMap::new(),
            submitting: false,
            form: FormRecord::with_defaults(),
            consent: false,
            store,
            pending_submit: None,
            submit_delay: SUBMIT_DELAY,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> &StepDefinition {
        &self.steps[self.current]
    }

    pub fn last_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn direction(&self) -> NavDirection {
        self.direction
    }

    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn form(&self) -> &FormRecord {
        &self.form
    }

    /// True on the step that submits instead of advancing
    pub fn is_submit_step(&self) -> bool {
        self.steps.len() >= 2 && self.current == self.steps.len() - 2
    }

    pub fn is_complete(&self) -> bool {
        self.current == self.last_index()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Check the current step's required fields, replacing the error map
    fn validate_step(&mut self) -> bool {
        let errors: BTreeMap<String, String> = self.steps[self.current]
            .required
            .iter()
            .filter(|field| self.form.is_blank(field))
            .map(|field| (field.to_string(), REQUIRED_MESSAGE.to_string()))
            .collect();
        self.errors = errors;
        self.errors.is_empty()
    }

    /// Move to the next step if the current one validates
    pub fn advance(&mut self) -> bool {
        if self.current >= self.last_index() {
            return false;
        }
        if !self.validate_step() {
            tracing::debug!(step = self.current, errors = ?self.errors, "step validation failed");
            return false;
        }
        self.direction = NavDirection::Forward;
        self.current += 1;
        true
    }

    /// Move to the previous step without validating. The terminal step has
    /// no way back.
    pub fn retreat(&mut self) -> bool {
        if self.current == 0 || self.is_complete() {
            return false;
        }
        self.direction = NavDirection::Backward;
        self.current -= 1;
        true
    }

    /// Upsert a field value, clearing that field's error only
    pub fn update_field(&mut self, name: &str, value: impl Into<String>) {
        self.form.set(name, value);
        self.errors.remove(name);
    }

    /// Submit from the step before the terminal step
    pub fn submit(&mut self) -> bool {
        self.submit_at(Instant::now())
    }

    pub fn submit_at(&mut self, now: Instant) -> bool {
        if !self.is_submit_step() || self.submitting {
            return false;
        }
        if !self.validate_step() {
            return false;
        }
        self.submitting = true;
        storage::save_best_effort(self.store.as_ref(), LAST_PAYLOAD_KEY, &self.form);
        self.pending_submit = Some(Delay::starting_at(now, self.submit_delay));
        tracing::info!(fields = self.form.len(), "product form submitted");
        true
    }

    /// Apply any due delayed update. Returns true when submission completed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if delay::poll_slot(&mut self.pending_submit, now) {
            self.submitting = false;
            self.direction = NavDirection::Forward;
            self.current = self.last_index();
            return true;
        }
        false
    }

    /// Cancel pending work. Called when the wizard view goes away.
    pub fn teardown(&mut self) {
        delay::cancel_slot(&mut self.pending_submit);
    }
}

impl Drop for WizardController {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
impl WizardController {
    pub fn with_submit_delay(mut self, delay: Duration) -> Self {
        self.submit_delay = delay;
        self
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::storage::{MemoryStore, StoreOp};

    fn wizard() -> (WizardController, Rc<MemoryStore>) {
        let store = Rc::new(MemoryStore::new());
        let controller = WizardController::new(store.clone());
        (controller, store)
    }

    fn fill_to_review(w: &mut WizardController) {
        w.update_field("name", "QuickClean");
        assert!(w.advance());
        w.update_field("description", "Laundry pickup");
        w.update_field("price", "₹999");
        assert!(w.advance());
        w.update_field("location", "Mumbai");
        assert!(w.advance());
        assert_eq!(w.current_index(), 3);
    }

    #[test]
    fn test_starts_at_first_step_with_defaults() {
        let (w, _) = wizard();
        assert_eq!(w.current_index(), 0);
        assert_eq!(w.steps().len(), 5);
        assert_eq!(w.form().get("productType"), Some("Product"));
        assert_eq!(w.form().get("category"), Some("Clothing"));
    }

    #[test]
    fn test_advance_blocks_on_missing_field() {
        let (mut w, _) = wizard();
        assert!(!w.advance());
        assert_eq!(w.current_index(), 0);
        assert_eq!(w.error_for("name"), Some(REQUIRED_MESSAGE));
        assert_eq!(w.errors().len(), 1);
    }

    #[test]
    fn test_advance_blocks_on_whitespace_only_field() {
        let (mut w, _) = wizard();
        w.update_field("name", "   \t");
        assert!(!w.advance());
        assert_eq!(w.current_index(), 0);
    }

    #[test]
    fn test_every_required_field_blocks_its_step() {
        let (mut w, _) = wizard();
        fill_to_review(&mut w);
        w.retreat();
        w.retreat();
        // Description step: clear price
        w.update_field("price", " ");
        assert!(!w.advance());
        assert_eq!(w.current_index(), 1);
        assert_eq!(w.error_for("price"), Some(REQUIRED_MESSAGE));
        assert_eq!(w.error_for("description"), None);
    }

    #[test]
    fn test_blank_location_blocks_audience_step() {
        let (mut w, _) = wizard();
        w.update_field("name", "QuickClean");
        assert!(w.advance());
        w.update_field("description", "Laundry pickup");
        w.update_field("price", "₹999");
        assert!(w.advance());
        assert_eq!(w.current_step().kind, StepKind::Audience);

        w.update_field("location", "  ");
        w.update_field("target", "Busy parents");
        assert!(!w.advance());
        assert_eq!(w.current_index(), 2);
        let keys: Vec<&String> = w.errors().keys().collect();
        assert_eq!(keys, vec!["location"]);
    }

    #[test]
    fn test_failed_validation_replaces_error_map() {
        let (mut w, _) = wizard();
        w.update_field("name", "x");
        assert!(w.advance());
        assert!(!w.advance());
        assert_eq!(w.errors().len(), 2);

        w.update_field("description", "d");
        assert!(!w.advance());
        let keys: Vec<&String> = w.errors().keys().collect();
        assert_eq!(keys, vec!["price"]);
    }

    #[test]
    fn test_advance_then_retreat_round_trips() {
        let (mut w, _) = wizard();
        w.update_field("name", "QuickClean");
        let before = w.form().clone();

        assert!(w.advance());
        assert_eq!(w.direction(), NavDirection::Forward);
        assert!(w.retreat());
        assert_eq!(w.direction(), NavDirection::Backward);

        assert_eq!(w.current_index(), 0);
        assert_eq!(w.form(), &before);
    }

    #[test]
    fn test_retreat_at_first_step_is_noop() {
        let (mut w, _) = wizard();
        assert!(!w.retreat());
        assert_eq!(w.current_index(), 0);
        assert_eq!(w.direction(), NavDirection::Forward);
    }

    #[test]
    fn test_update_field_clears_only_its_error() {
        let (mut w, _) = wizard();
        w.update_field("name", "x");
        w.advance();
        assert!(!w.advance());
        assert!(w.error_for("description").is_some());
        assert!(w.error_for("price").is_some());

        w.update_field("description", "now filled");
        assert_eq!(w.error_for("description"), None);
        assert_eq!(w.error_for("price"), Some(REQUIRED_MESSAGE));
    }

    #[test]
    fn test_update_field_is_idempotent() {
        let (mut w, _) = wizard();
        w.update_field("name", "x");
        w.advance();
        w.advance();

        w.update_field("price", "₹10");
        let form_once = w.form().clone();
        let errors_once = w.errors().clone();

        w.update_field("price", "₹10");
        assert_eq!(w.form(), &form_once);
        assert_eq!(w.errors(), &errors_once);
        assert!(w.error_for("description").is_some());
    }

    #[test]
    fn test_age_fields_are_not_validated() {
        let (mut w, _) = wizard();
        w.update_field("ageMin", "abc");
        w.update_field("ageMax", "400");
        assert_eq!(w.form().get("ageMin"), Some("abc"));
        assert_eq!(w.form().get("ageMax"), Some("400"));
    }

    #[test]
    fn test_submit_only_from_penultimate_step() {
        let (mut w, store) = wizard();
        w.update_field("name", "x");
        assert!(!w.submit());
        assert!(!w.is_submitting());
        assert!(store.ops().is_empty());
    }

    #[test]
    fn test_submit_jumps_to_terminal_step_after_delay() {
        let (mut w, store) = wizard();
        fill_to_review(&mut w);

        let start = Instant::now();
        assert!(w.submit_at(start));
        assert!(w.is_submitting());
        assert_eq!(w.current_index(), 3);

        let stored = store.peek(LAST_PAYLOAD_KEY).unwrap();
        let record: FormRecord = serde_json::from_str(&stored).unwrap();
        assert_eq!(&record, w.form());

        assert!(!w.tick(start + Duration::from_millis(1000)));
        assert!(w.is_submitting());

        assert!(w.tick(start + SUBMIT_DELAY));
        assert!(!w.is_submitting());
        assert_eq!(w.current_index(), w.last_index());
        assert_eq!(w.direction(), NavDirection::Forward);
        assert!(w.is_complete());
    }

    #[test]
    fn test_submit_targets_last_index_with_longer_flows() {
        let store: Rc<dyn KeyValueStore> = Rc::new(MemoryStore::new());
        let steps = vec![
            StepDefinition { label: "A", kind: StepKind::ProductInfo, required: &[] },
            StepDefinition { label: "B", kind: StepKind::Review, required: &[] },
            StepDefinition { label: "C", kind: StepKind::Complete, required: &[] },
        ];
        let mut w = WizardController::with_steps(steps, store).with_submit_delay(Duration::ZERO);
        assert!(w.advance());
        let now = Instant::now();
        assert!(w.submit_at(now));
        assert!(w.tick(now));
        assert_eq!(w.current_index(), 2);
    }

    #[test]
    fn test_submit_survives_storage_failure() {
        let (mut w, store) = wizard();
        fill_to_review(&mut w);
        store.set_unavailable(true);

        let start = Instant::now();
        assert!(w.submit_at(start));
        assert!(w.tick(start + SUBMIT_DELAY));
        assert!(w.is_complete());
        assert_eq!(store.peek(LAST_PAYLOAD_KEY), None);
    }

    #[test]
    fn test_consent_is_not_enforced() {
        let (mut w, _) = wizard();
        fill_to_review(&mut w);
        assert!(!w.consent);
        assert!(w.submit());
    }

    #[test]
    fn test_double_submit_ignored() {
        let (mut w, store) = wizard();
        fill_to_review(&mut w);
        assert!(w.submit());
        assert!(!w.submit());
        let sets = store
            .ops()
            .into_iter()
            .filter(|op| matches!(op, StoreOp::Set(..)))
            .count();
        assert_eq!(sets, 1);
    }

    #[test]
    fn test_teardown_cancels_pending_submit() {
        let (mut w, _) = wizard();
        fill_to_review(&mut w);
        let start = Instant::now();
        w.submit_at(start);
        w.teardown();

        assert!(!w.tick(start + Duration::from_secs(10)));
        assert_eq!(w.current_index(), 3);
    }

    #[test]
    fn test_terminal_step_has_no_transitions() {
        let (mut w, _) = wizard();
        fill_to_review(&mut w);
        let now = Instant::now();
        w.submit_at(now);
        w.tick(now + SUBMIT_DELAY);

        assert!(!w.advance());
        assert!(!w.retreat());
        assert!(!w.submit());
        assert_eq!(w.current_index(), 4);
    }
}
