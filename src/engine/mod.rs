//! The semantic version increment engine: a per-run context folded over a
//! commit-message stream, a per-commit decision step, and pure transformer
//! application.

pub mod builder;
pub mod context;
pub mod height;
pub mod transform;

pub use context::VersionIncrementContext;
pub use height::{
    parse_height, position_identifiers, resolve_height, HeightConventionTransformResult,
};
pub use transform::VersionTransformer;

use crate::convention::HeightPosition;
use crate::domain::{CommitMessage, SemanticVersion};
use crate::error::Result;
use crate::preset::VersioningPreset;
use tracing::trace;

/// One calculation run: a borrowed preset, a start version, and the option
/// flags of the engine boundary. Build it up with the `with`-style setters,
/// then fold a message stream through [`calculate`].
///
/// [`calculate`]: VersionCalculator::calculate
pub struct VersionCalculator<'a> {
    preset: &'a VersioningPreset,
    start_version: SemanticVersion,
    is_start_version_core_already_released: bool,
    is_post_version_pre_release: bool,
    post_version_pre_release: Option<Vec<String>>,
}

impl<'a> VersionCalculator<'a> {
    /// Defaults: the start core counts as released when the start version is
    /// not a pre-release, and the post version counts as pre-release when the
    /// start is one or a pre-release height convention is active.
    pub fn new(preset: &'a VersioningPreset, start_version: SemanticVersion) -> Self {
        let is_post_version_pre_release = start_version.is_pre_release()
            || (preset.height_convention.is_active()
                && preset.height_convention.position == HeightPosition::PreRelease);
        VersionCalculator {
            is_start_version_core_already_released: !start_version.is_pre_release(),
            is_post_version_pre_release,
            post_version_pre_release: None,
            preset,
            start_version,
        }
    }

    #[must_use]
    pub fn already_released(mut self, released: bool) -> Self {
        self.is_start_version_core_already_released = released;
        self
    }

    /// Switch the run to the given pre-release channel. An empty identifier
    /// list selects the release channel.
    #[must_use]
    pub fn post_version_pre_release<I, S>(mut self, identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let identifiers: Vec<String> = identifiers.into_iter().map(Into::into).collect();
        self.is_post_version_pre_release = !identifiers.is_empty();
        self.post_version_pre_release = Some(identifiers);
        self
    }

    /// Fold the message stream, oldest first, into the next version.
    pub fn calculate<I>(self, messages: I) -> Result<VersionCalculation>
    where
        I: IntoIterator<Item = CommitMessage>,
    {
        let mut context = VersionIncrementContext::new(
            self.preset,
            self.start_version,
            self.is_start_version_core_already_released,
            self.is_post_version_pre_release,
            self.post_version_pre_release,
        );

        for message in messages {
            let transformers = builder::build_increment(&message, &mut context)?;
            for transformer in transformers {
                let next = transformer.transform(context.current_version());
                trace!(
                    position = message.position,
                    transformer = ?transformer,
                    version = %next,
                    "applying transformer"
                );
                context.set_current_version(next);
            }
        }

        Ok(VersionCalculation {
            contains_major_increment: context.contains_major_increment(),
            contains_minor_increment: context.contains_minor_increment(),
            contains_patch_increment: context.contains_patch_increment(),
            is_version_downstream_flowed: context.is_version_downstream_flowed(),
            version: context.into_version(),
        })
    }
}

/// The computed version plus the run diagnostics callers print or test on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionCalculation {
    pub version: SemanticVersion,
    pub is_version_downstream_flowed: bool,
    pub contains_major_increment: bool,
    pub contains_minor_increment: bool,
    pub contains_patch_increment: bool,
}
