use crate::convention::HeightPosition;
use crate::domain::SemanticVersion;
use crate::engine::height::HeightConventionTransformResult;

/// A decided change applied to a version. Application is pure; every variant
/// produces a new value.
#[derive(Debug, Clone, PartialEq)]
pub enum VersionTransformer {
    /// Leaves the version untouched
    None,
    NextMajor,
    NextMinor,
    NextPatch,
    /// Increments the trailing numeric build identifier, appending one when
    /// none exists
    NextBuildNumber,
    /// Replaces the pre-release identifiers; an empty list selects the
    /// release channel
    PreRelease { identifiers: Vec<String> },
    /// Writes the next height number into a previously resolved slot layout
    NextHeightNumber {
        result: HeightConventionTransformResult,
        prior_height: Option<u32>,
    },
}

impl VersionTransformer {
    pub fn pre_release<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        VersionTransformer::PreRelease {
            identifiers: identifiers.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn transform(&self, version: &SemanticVersion) -> SemanticVersion {
        match self {
            VersionTransformer::None => version.clone(),
            VersionTransformer::NextMajor => version.with_core(version.major + 1, 0, 0),
            VersionTransformer::NextMinor => {
                version.with_core(version.major, version.minor + 1, 0)
            }
            VersionTransformer::NextPatch => {
                version.with_core(version.major, version.minor, version.patch + 1)
            }
            VersionTransformer::NextBuildNumber => next_build_number(version),
            VersionTransformer::PreRelease { identifiers } => {
                version.with_pre_release(identifiers.clone())
            }
            VersionTransformer::NextHeightNumber {
                result,
                prior_height,
            } => next_height_number(version, result, *prior_height),
        }
    }
}

fn next_build_number(version: &SemanticVersion) -> SemanticVersion {
    let mut build = version.build.clone();
    match build.last().and_then(|s| s.parse::<u32>().ok()) {
        Some(number) => {
            let last = build.len() - 1;
            build[last] = (number + 1).to_string();
        }
        None => build.push("1".to_string()),
    }
    version.with_build(build)
}

fn next_height_number(
    version: &SemanticVersion,
    result: &HeightConventionTransformResult,
    prior_height: Option<u32>,
) -> SemanticVersion {
    let next = match prior_height {
        Some(number) => number + 1,
        None => result.convention.initial_height,
    };
    let mut identifiers = result.identifiers.clone();
    identifiers[result.height_index] = next.to_string();
    match result.convention.position {
        HeightPosition::PreRelease => version.with_pre_release(identifiers),
        HeightPosition::Build => version.with_build(identifiers),
        HeightPosition::None => version.clone(),
    }
}
