use crate::convention::HeightPosition;
use crate::domain::{SemanticVersion, VersionPart};
use crate::engine::height::{
    parse_height, position_identifiers, resolve_height, HeightConventionTransformResult,
};
use crate::error::HeightTemplateError;
use crate::preset::{FlowCondition, FlowMode, VersioningPreset};

/// Derived facts about the run, computed lazily on first access and cleared
/// whenever the current version changes.
#[derive(Debug, Default)]
struct IncrementFacts {
    major: Option<bool>,
    minor: Option<bool>,
    patch: Option<bool>,
    height: Option<HeightFacts>,
}

#[derive(Debug, Clone)]
struct HeightFacts {
    contains_increment: bool,
    result: HeightConventionTransformResult,
    number: Option<u32>,
}

/// Mutable per-run state of one calculation: the version as it evolves over
/// the message stream, the run's option flags, the adaptation tri-states, and
/// the memoized derived facts.
///
/// One context serves exactly one run. Presets are shared read-only.
pub struct VersionIncrementContext<'a> {
    preset: &'a VersioningPreset,
    start_version: SemanticVersion,
    current_version: SemanticVersion,
    is_start_version_core_already_released: bool,
    is_post_version_pre_release: bool,
    post_version_pre_release: Option<Vec<String>>,
    is_version_downstream_flowed: bool,
    /// `None` when the run keeps its pre-release channel; `Some(false)` while
    /// the in-place switch that stands in for a core bump is still pending.
    in_place_adaptation: Option<bool>,
    /// Same shape, for the plain channel application that rides along with
    /// ordinary processing.
    channel_application: Option<bool>,
    adapted_part: Option<VersionPart>,
    facts: IncrementFacts,
}

impl<'a> VersionIncrementContext<'a> {
    pub fn new(
        preset: &'a VersioningPreset,
        start_version: SemanticVersion,
        is_start_version_core_already_released: bool,
        is_post_version_pre_release: bool,
        post_version_pre_release: Option<Vec<String>>,
    ) -> Self {
        let switching = match &post_version_pre_release {
            Some(identifiers) => {
                identifiers.first().map(String::as_str) != start_version.pre_release_label()
            }
            None => false,
        };
        let pending = if switching { Some(false) } else { None };

        VersionIncrementContext {
            preset,
            current_version: start_version.clone(),
            start_version,
            is_start_version_core_already_released,
            is_post_version_pre_release,
            post_version_pre_release,
            is_version_downstream_flowed: false,
            in_place_adaptation: pending,
            channel_application: pending,
            adapted_part: None,
            facts: IncrementFacts::default(),
        }
    }

    pub fn preset(&self) -> &'a VersioningPreset {
        self.preset
    }

    pub fn start_version(&self) -> &SemanticVersion {
        &self.start_version
    }

    pub fn current_version(&self) -> &SemanticVersion {
        &self.current_version
    }

    /// Replace the current version, invalidating every memoized fact.
    pub fn set_current_version(&mut self, version: SemanticVersion) {
        self.current_version = version;
        self.facts = IncrementFacts::default();
    }

    /// Read out the final version, consuming the context.
    pub fn into_version(self) -> SemanticVersion {
        self.current_version
    }

    pub fn is_start_version_core_already_released(&self) -> bool {
        self.is_start_version_core_already_released
    }

    pub fn is_post_version_pre_release(&self) -> bool {
        self.is_post_version_pre_release
    }

    pub fn is_version_downstream_flowed(&self) -> bool {
        self.is_version_downstream_flowed
    }

    pub(crate) fn mark_downstream_flowed(&mut self) {
        self.is_version_downstream_flowed = true;
    }

    pub(crate) fn post_version_pre_release(&self) -> Option<&[String]> {
        self.post_version_pre_release.as_deref()
    }

    pub(crate) fn channel_application_pending(&self) -> bool {
        self.channel_application == Some(false)
    }

    pub(crate) fn mark_channel_applied(&mut self) {
        self.channel_application = Some(true);
    }

    pub(crate) fn in_place_adaptation_pending(&self) -> bool {
        self.in_place_adaptation == Some(false)
    }

    /// Record that the channel switch stood in for a core bump of `part`.
    pub(crate) fn mark_adapted(&mut self, part: VersionPart) {
        self.in_place_adaptation = Some(true);
        self.adapted_part = Some(part);
        self.facts = IncrementFacts::default();
    }

    pub fn can_flow_downstream_major(&self) -> bool {
        self.can_flow_downstream(self.preset.increment_flow.major_flow)
    }

    pub fn can_flow_downstream_minor(&self) -> bool {
        self.can_flow_downstream(self.preset.increment_flow.minor_flow)
    }

    fn can_flow_downstream(&self, flow: FlowMode) -> bool {
        self.preset.increment_flow.condition == FlowCondition::ZeroMajor
            && self.start_version.major == 0
            && flow == FlowMode::Downstream
    }

    /// Whether the height convention addresses the post version at all:
    /// a pre-release position needs a pre-release post version, a build
    /// position applies regardless.
    pub fn height_applies(&self) -> bool {
        let convention = &self.preset.height_convention;
        convention.is_active()
            && match convention.position {
                HeightPosition::PreRelease => self.is_post_version_pre_release,
                HeightPosition::Build => true,
                HeightPosition::None => false,
            }
    }

    pub fn contains_major_increment(&mut self) -> bool {
        if let Some(value) = self.facts.major {
            return value;
        }
        let value = self.current_version.major > self.start_version.major
            || self.adapted_part == Some(VersionPart::Major);
        self.facts.major = Some(value);
        value
    }

    pub fn contains_minor_increment(&mut self) -> bool {
        if let Some(value) = self.facts.minor {
            return value;
        }
        let value = self.contains_major_increment()
            || (self.current_version.major == self.start_version.major
                && self.current_version.minor > self.start_version.minor)
            || self.adapted_part == Some(VersionPart::Minor);
        self.facts.minor = Some(value);
        value
    }

    pub fn contains_patch_increment(&mut self) -> bool {
        if let Some(value) = self.facts.patch {
            return value;
        }
        let value = self.contains_minor_increment()
            || (self.current_version.major == self.start_version.major
                && self.current_version.minor == self.start_version.minor
                && self.current_version.patch > self.start_version.patch)
            || self.adapted_part == Some(VersionPart::Patch);
        self.facts.patch = Some(value);
        value
    }

    pub(crate) fn contains_increment(&mut self, part: VersionPart) -> bool {
        match part {
            VersionPart::Major => self.contains_major_increment(),
            VersionPart::Minor => self.contains_minor_increment(),
            VersionPart::Patch => self.contains_patch_increment(),
        }
    }

    /// True iff the current version carries a height number the start version
    /// does not, or a strictly greater one.
    pub fn contains_height_increment(&mut self) -> Result<bool, HeightTemplateError> {
        Ok(self.height_facts()?.contains_increment)
    }

    /// The memoized slot layout and parsed height number of the current
    /// version, cloned for transformer construction.
    pub(crate) fn current_height_facts(
        &mut self,
    ) -> Result<(HeightConventionTransformResult, Option<u32>), HeightTemplateError> {
        let facts = self.height_facts()?;
        Ok((facts.result.clone(), facts.number))
    }

    fn height_facts(&mut self) -> Result<&HeightFacts, HeightTemplateError> {
        if self.facts.height.is_none() {
            let convention = &self.preset.height_convention;
            let current = resolve_height(
                convention,
                position_identifiers(&self.current_version, convention.position),
            )?;
            let number = parse_height(&current);
            let start = resolve_height(
                convention,
                position_identifiers(&self.start_version, convention.position),
            )?;
            let start_number = parse_height(&start);
            let contains_increment = match (start_number, number) {
                (None, Some(_)) => true,
                (Some(before), Some(after)) => after > before,
                _ => false,
            };
            self.facts.height = Some(HeightFacts {
                contains_increment,
                result: current,
                number,
            });
        }
        Ok(self.facts.height.as_ref().expect("height facts computed"))
    }
}
