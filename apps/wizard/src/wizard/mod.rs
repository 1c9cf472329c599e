// Multi-step profile wizard: step table and the controller that owns the
// working record, the selected resume files and the network calls.

pub mod controller;
pub mod steps;

pub use controller::{SubmitOutcome, WizardController, WizardMode};
pub use steps::{Step, STEPS};
