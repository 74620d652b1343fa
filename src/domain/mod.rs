//! Domain values - immutable types shared across the engine

pub mod commit;
pub mod version;

pub use commit::CommitMessage;
pub use version::{SemanticVersion, VersionPart};
