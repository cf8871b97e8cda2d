use std::sync::Mutex;

use tracing::warn;

use crate::error::MeasurementError;
use crate::measurement::{EditorDefaults, WorkflowController};

/// Managed state holding the measurement session for the lifetime of the app.
///
/// Every command locks the controller, applies one intent and releases it,
/// so intents are processed strictly one at a time.
pub struct SessionState {
    controller: Mutex<WorkflowController>,
}

impl SessionState {
    pub fn new(defaults: EditorDefaults) -> Self {
        Self {
            controller: Mutex::new(WorkflowController::new(defaults)),
        }
    }

    /// Run `f` with exclusive access to the controller.
    pub fn with_controller<T>(
        &self,
        f: impl FnOnce(&mut WorkflowController) -> Result<T, MeasurementError>,
    ) -> Result<T, MeasurementError> {
        let mut controller = self.controller.lock().map_err(|e| {
            warn!("Measurement session lock poisoned: {}", e);
            MeasurementError::SessionUnavailable
        })?;
        f(&mut controller)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(EditorDefaults::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement::{Gender, HostProfile, Intent, WorkflowState};

    #[test]
    fn test_with_controller_applies_changes() {
        let session = SessionState::default();
        session
            .with_controller(|c| {
                c.capture_host(HostProfile {
                    name: "Me".to_string(),
                    image: String::new(),
                    gender: Gender::Female,
                })
            })
            .unwrap();
        session.with_controller(|c| c.handle(Intent::AddNew)).unwrap();

        let snapshot = session.with_controller(|c| Ok(c.snapshot())).unwrap();
        assert!(snapshot.host.is_some());
        assert!(matches!(snapshot.state, WorkflowState::Editing { .. }));
    }

    #[test]
    fn test_errors_pass_through() {
        let session = SessionState::default();
        let err = session
            .with_controller(|c| c.handle(Intent::AddNew))
            .unwrap_err();
        assert!(matches!(err, MeasurementError::HostProfileMissing));
    }
}
