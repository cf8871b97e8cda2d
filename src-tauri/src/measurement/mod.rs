pub mod model;
pub mod store;
pub mod units;
pub mod workflow;

pub use model::{ClothingSize, EditorDefaults, EditorDraft, Gender, HostProfile, MeasurementProfile};
pub use store::ProfileStore;
pub use units::{BodyPart, BodySizes, Height, MeasuredValue, Unit};
pub use workflow::{
    EditMode, Intent, Mutation, Outcome, SessionSnapshot, WorkflowController, WorkflowState,
};
