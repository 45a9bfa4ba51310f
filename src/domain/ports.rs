use crate::domain::model::{Invocation, ProgramExit, RequiredPackage};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Runs the main program to completion.
#[async_trait]
pub trait ProgramRunner: Send + Sync {
    async fn run(&self, invocation: &Invocation) -> Result<ProgramExit>;
}

/// Asks the operator whether to go ahead with the launch.
pub trait Confirmer: Send + Sync {
    fn confirm(&self, question: &str) -> Result<bool>;
}

/// Tells whether a package is importable by the given interpreter.
pub trait PackageProbe: Send + Sync {
    fn is_installed(&self, python: &Path, package: &RequiredPackage) -> bool;
}
