pub mod launcher;
pub mod preflight;
pub mod prompt;
pub mod runner;
pub mod summary;

pub use crate::domain::model::{ConfigRoot, Invocation, LaunchOutcome, ProgramExit, ProjectConfig};
pub use crate::domain::ports::{Confirmer, PackageProbe, ProgramRunner};
pub use crate::utils::error::Result;
