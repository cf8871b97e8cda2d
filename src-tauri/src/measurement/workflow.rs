//! Workflow controller for the measurement settings screen.
//!
//! Every intent from the UI passes through [`WorkflowController::handle`].
//! The controller decides whether the editor is open, whether it targets a
//! new or an existing profile, and holds any pending save or delete until
//! the user confirms it. The [`ProfileStore`] is only touched by a
//! `Confirmed` intent while a confirmation is open.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::model::{EditorDefaults, EditorDraft, HostProfile, MeasurementProfile};
use super::store::ProfileStore;
use crate::error::MeasurementError;

/// Whether the editor creates a new profile or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index")]
pub enum EditMode {
    Create,
    EditAt(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorkflowState {
    #[default]
    Idle,
    /// Editor open. `seed` is the profile the form starts from.
    Editing {
        mode: EditMode,
        seed: MeasurementProfile,
    },
    /// Editor submitted, waiting for the user to confirm the save.
    ConfirmingSave {
        pending: MeasurementProfile,
        mode: EditMode,
    },
    /// Delete requested, waiting for confirmation.
    ConfirmingDelete { index: usize, name: String },
}

impl WorkflowState {
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::Editing { .. } => "editing",
            WorkflowState::ConfirmingSave { .. } => "confirming_save",
            WorkflowState::ConfirmingDelete { .. } => "confirming_delete",
        }
    }
}

/// A user intent coming from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Intent {
    AddNew,
    EditRequested { index: usize },
    DeleteRequested { index: usize },
    FormSubmitted { draft: EditorDraft },
    Cancelled,
    Confirmed,
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::AddNew => "add_new",
            Intent::EditRequested { .. } => "edit_requested",
            Intent::DeleteRequested { .. } => "delete_requested",
            Intent::FormSubmitted { .. } => "form_submitted",
            Intent::Cancelled => "cancelled",
            Intent::Confirmed => "confirmed",
        }
    }
}

/// A store mutation applied by a confirmed intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Appended { index: usize },
    Replaced { index: usize },
    Removed { index: usize, name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Transitioned {
        from: &'static str,
        to: &'static str,
    },
    Committed(Mutation),
    /// The intent does not apply in the current state and was dropped.
    Ignored,
}

/// Everything the presentation layer needs to render the screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub host: Option<HostProfile>,
    pub profiles: Vec<MeasurementProfile>,
    pub state: WorkflowState,
}

enum Step {
    Enter(WorkflowState),
    Commit,
    Ignore,
}

#[derive(Debug, Default)]
pub struct WorkflowController {
    state: WorkflowState,
    store: ProfileStore,
    host: Option<HostProfile>,
    defaults: EditorDefaults,
}

impl WorkflowController {
    pub fn new(defaults: EditorDefaults) -> Self {
        Self {
            defaults,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    pub fn host(&self) -> Option<&HostProfile> {
        self.host.as_ref()
    }

    /// Units used for drafts opened from now on. An open draft keeps its units.
    pub fn set_defaults(&mut self, defaults: EditorDefaults) {
        debug!("Editor defaults set to {:?}", defaults);
        self.defaults = defaults;
    }

    /// Accept the host profile. It can only be captured once.
    pub fn capture_host(&mut self, host: HostProfile) -> Result<(), MeasurementError> {
        if self.host.is_some() {
            warn!("Host profile already captured, rejecting '{}'", host.name);
            return Err(MeasurementError::HostAlreadyCaptured);
        }
        host.validate()?;
        info!("Captured host profile '{}'", host.name);
        self.host = Some(host);
        Ok(())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            host: self.host.clone(),
            profiles: self.store.profiles().to_vec(),
            state: self.state.clone(),
        }
    }

    /// Apply one intent. Errors leave the state unchanged.
    pub fn handle(&mut self, intent: Intent) -> Result<Outcome, MeasurementError> {
        let from = self.state.name();
        let intent_name = intent.name();

        match self.next_step(intent)? {
            Step::Enter(next) => {
                self.state = next;
                let to = self.state.name();
                debug!("Workflow {} --{}--> {}", from, intent_name, to);
                Ok(Outcome::Transitioned { from, to })
            }
            Step::Commit => self.commit(),
            Step::Ignore => {
                warn!("Ignoring {} while {}", intent_name, from);
                Ok(Outcome::Ignored)
            }
        }
    }

    fn next_step(&self, intent: Intent) -> Result<Step, MeasurementError> {
        let step = match (&self.state, intent) {
            (WorkflowState::Idle, Intent::AddNew) => {
                self.require_host()?;
                Step::Enter(WorkflowState::Editing {
                    mode: EditMode::Create,
                    seed: MeasurementProfile::blank(self.defaults),
                })
            }
            (WorkflowState::Idle, Intent::EditRequested { index }) => {
                self.require_host()?;
                let seed = self.profile_at(index)?.clone();
                Step::Enter(WorkflowState::Editing {
                    mode: EditMode::EditAt(index),
                    seed,
                })
            }
            (WorkflowState::Idle, Intent::DeleteRequested { index }) => {
                let name = self.profile_at(index)?.name.clone();
                Step::Enter(WorkflowState::ConfirmingDelete { index, name })
            }
            (WorkflowState::Editing { mode, .. }, Intent::FormSubmitted { draft }) => {
                let pending = draft.validate().map_err(|e| {
                    warn!("Draft rejected: {}", e);
                    MeasurementError::from(e)
                })?;
                Step::Enter(WorkflowState::ConfirmingSave {
                    pending,
                    mode: *mode,
                })
            }
            (
                WorkflowState::Editing { .. }
                | WorkflowState::ConfirmingSave { .. }
                | WorkflowState::ConfirmingDelete { .. },
                Intent::Cancelled,
            ) => Step::Enter(WorkflowState::Idle),
            (
                WorkflowState::ConfirmingSave { .. } | WorkflowState::ConfirmingDelete { .. },
                Intent::Confirmed,
            ) => Step::Commit,
            _ => Step::Ignore,
        };
        Ok(step)
    }

    fn commit(&mut self) -> Result<Outcome, MeasurementError> {
        let mutation = match std::mem::take(&mut self.state) {
            WorkflowState::ConfirmingSave {
                pending,
                mode: EditMode::Create,
            } => {
                let index = self.store.append(pending);
                Mutation::Appended { index }
            }
            WorkflowState::ConfirmingSave {
                pending,
                mode: EditMode::EditAt(index),
            } => {
                self.store.replace_at(index, pending)?;
                Mutation::Replaced { index }
            }
            WorkflowState::ConfirmingDelete { index, .. } => {
                let removed = self.store.remove_at(index)?;
                Mutation::Removed {
                    index,
                    name: removed.name,
                }
            }
            other => {
                self.state = other;
                return Ok(Outcome::Ignored);
            }
        };
        info!("Committed {:?}, {} profiles", mutation, self.store.len());
        Ok(Outcome::Committed(mutation))
    }

    fn require_host(&self) -> Result<(), MeasurementError> {
        if self.host.is_none() {
            warn!("No host profile captured, editor stays closed");
            return Err(MeasurementError::HostProfileMissing);
        }
        Ok(())
    }

    fn profile_at(&self, index: usize) -> Result<&MeasurementProfile, MeasurementError> {
        self.store.get(index).ok_or(MeasurementError::Index {
            index,
            len: self.store.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::measurement::{ClothingSize, Gender, Height};

    fn host() -> HostProfile {
        HostProfile {
            name: "Me".to_string(),
            image: String::new(),
            gender: Gender::Male,
        }
    }

    fn draft(name: &str) -> EditorDraft {
        EditorDraft::new(
            MeasurementProfile::blank(EditorDefaults::default())
                .with_name(name)
                .with_image("data:image/jpeg;base64,AAAA")
                .with_height(Height::centimetres("175"))
                .with_clothing_size(Some(ClothingSize::L)),
        )
    }

    fn ready() -> WorkflowController {
        let mut controller = WorkflowController::default();
        controller.capture_host(host()).unwrap();
        controller
    }

    fn save(controller: &mut WorkflowController, opener: Intent, name: &str) {
        controller.handle(opener).unwrap();
        controller
            .handle(Intent::FormSubmitted { draft: draft(name) })
            .unwrap();
        controller.handle(Intent::Confirmed).unwrap();
    }

    #[test]
    fn test_add_new_requires_host() {
        let mut controller = WorkflowController::default();
        let err = controller.handle(Intent::AddNew).unwrap_err();
        assert!(matches!(err, MeasurementError::HostProfileMissing));
        assert_eq!(controller.state(), &WorkflowState::Idle);
    }

    #[test]
    fn test_host_captured_once() {
        let mut controller = ready();
        let err = controller.capture_host(host()).unwrap_err();
        assert!(matches!(err, MeasurementError::HostAlreadyCaptured));
    }

    #[test]
    fn test_add_new_opens_blank_create_editor() {
        let mut controller = ready();
        let outcome = controller.handle(Intent::AddNew).unwrap();
        assert_eq!(
            outcome,
            Outcome::Transitioned {
                from: "idle",
                to: "editing"
            }
        );
        match controller.state() {
            WorkflowState::Editing { mode, seed } => {
                assert_eq!(*mode, EditMode::Create);
                assert!(seed.name.is_empty());
            }
            other => panic!("unexpected state {:?}", other),
        }
    }

    #[test]
    fn test_submit_stages_save_without_touching_store() {
        let mut controller = ready();
        controller.handle(Intent::AddNew).unwrap();
        controller
            .handle(Intent::FormSubmitted { draft: draft("P1") })
            .unwrap();

        assert!(controller.store().is_empty());
        assert!(matches!(
            controller.state(),
            WorkflowState::ConfirmingSave {
                mode: EditMode::Create,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_submit_keeps_editor_open() {
        let mut controller = ready();
        controller.handle(Intent::AddNew).unwrap();
        let before = controller.state().clone();

        let bad = EditorDraft::new(draft("P1").profile.with_clothing_size(None));
        let err = controller
            .handle(Intent::FormSubmitted { draft: bad })
            .unwrap_err();

        assert!(matches!(
            err,
            MeasurementError::Validation(ValidationError::ClothingSize)
        ));
        assert_eq!(controller.state(), &before);
    }

    #[test]
    fn test_confirmed_edit_replaces_in_place() {
        let mut controller = ready();
        save(&mut controller, Intent::AddNew, "P1");
        save(&mut controller, Intent::AddNew, "P2");
        save(&mut controller, Intent::EditRequested { index: 0 }, "P1b");

        let names: Vec<_> = controller
            .store()
            .profiles()
            .iter()
            .map(|p| p.name.clone())
            .collect();
        assert_eq!(names, vec!["P1b", "P2"]);
        assert_eq!(controller.state(), &WorkflowState::Idle);
    }

    #[test]
    fn test_edit_seeds_editor_with_profile() {
        let mut controller = ready();
        save(&mut controller, Intent::AddNew, "P1");
        controller
            .handle(Intent::EditRequested { index: 0 })
            .unwrap();
        match controller.state() {
            WorkflowState::Editing { mode, seed } => {
                assert_eq!(*mode, EditMode::EditAt(0));
                assert_eq!(seed, &controller.store().profiles()[0]);
            }
            other => panic!("unexpected state {:?}", other),
        }
    }

    #[test]
    fn test_delete_goes_straight_to_confirmation() {
        let mut controller = ready();
        save(&mut controller, Intent::AddNew, "P1");
        controller
            .handle(Intent::DeleteRequested { index: 0 })
            .unwrap();
        assert_eq!(
            controller.state(),
            &WorkflowState::ConfirmingDelete {
                index: 0,
                name: "P1".to_string()
            }
        );

        let outcome = controller.handle(Intent::Confirmed).unwrap();
        assert_eq!(
            outcome,
            Outcome::Committed(Mutation::Removed {
                index: 0,
                name: "P1".to_string()
            })
        );
        assert!(controller.store().is_empty());
    }

    #[test]
    fn test_out_of_range_requests_rejected() {
        let mut controller = ready();
        let err = controller
            .handle(Intent::EditRequested { index: 0 })
            .unwrap_err();
        assert!(matches!(err, MeasurementError::Index { index: 0, len: 0 }));
        let err = controller
            .handle(Intent::DeleteRequested { index: 2 })
            .unwrap_err();
        assert!(matches!(err, MeasurementError::Index { index: 2, len: 0 }));
        assert_eq!(controller.state(), &WorkflowState::Idle);
    }

    #[test]
    fn test_cancel_pending_save_closes_editor() {
        let mut controller = ready();
        controller.handle(Intent::AddNew).unwrap();
        controller
            .handle(Intent::FormSubmitted { draft: draft("P1") })
            .unwrap();
        controller.handle(Intent::Cancelled).unwrap();

        assert_eq!(controller.state(), &WorkflowState::Idle);
        assert!(controller.store().is_empty());
    }

    #[test]
    fn test_intents_outside_their_state_are_ignored() {
        let mut controller = ready();
        assert_eq!(controller.handle(Intent::Confirmed).unwrap(), Outcome::Ignored);
        assert_eq!(controller.handle(Intent::Cancelled).unwrap(), Outcome::Ignored);
        assert_eq!(
            controller
                .handle(Intent::FormSubmitted { draft: draft("x") })
                .unwrap(),
            Outcome::Ignored
        );

        controller.handle(Intent::AddNew).unwrap();
        let editing = controller.state().clone();
        assert_eq!(controller.handle(Intent::AddNew).unwrap(), Outcome::Ignored);
        assert_eq!(controller.handle(Intent::Confirmed).unwrap(), Outcome::Ignored);
        assert_eq!(
            controller
                .handle(Intent::DeleteRequested { index: 0 })
                .unwrap(),
            Outcome::Ignored
        );
        assert_eq!(controller.state(), &editing);
    }

    #[test]
    fn test_defaults_seed_new_drafts() {
        let mut controller = ready();
        controller.set_defaults(EditorDefaults {
            height_unit: crate::measurement::Unit::FtIn,
            body_size_unit: crate::measurement::Unit::In,
        });
        controller.handle(Intent::AddNew).unwrap();
        match controller.state() {
            WorkflowState::Editing { seed, .. } => {
                assert_eq!(seed.height, Height::feet_inches("", ""));
                assert_eq!(seed.body_sizes.unit(), crate::measurement::Unit::In);
            }
            other => panic!("unexpected state {:?}", other),
        }
    }

    #[test]
    fn test_intent_wire_format() {
        let intent: Intent =
            serde_json::from_str(r#"{"kind":"delete_requested","index":1}"#).unwrap();
        assert_eq!(intent, Intent::DeleteRequested { index: 1 });

        let json = serde_json::to_value(WorkflowState::ConfirmingDelete {
            index: 1,
            name: "P2".to_string(),
        })
        .unwrap();
        assert_eq!(json["kind"], "confirming_delete");
        assert_eq!(json["name"], "P2");
    }
}
