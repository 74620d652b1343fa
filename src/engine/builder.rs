use crate::convention::HeightPosition;
use crate::domain::{CommitMessage, SemanticVersion, VersionPart};
use crate::engine::context::VersionIncrementContext;
use crate::engine::height::{parse_height, resolve_height};
use crate::engine::transform::VersionTransformer;
use crate::error::Result;
use crate::preset::IncrementMode;
use tracing::debug;

/// Decide what one commit message does to the version.
///
/// Returns the transformers to apply in order: an optional pre-release
/// application, an optional core-part transformer, an optional height
/// transformer. Height-rule failures abort the whole calculation.
pub fn build_increment(
    message: &CommitMessage,
    context: &mut VersionIncrementContext<'_>,
) -> Result<Vec<VersionTransformer>> {
    let mut transformers = Vec::new();
    let mut applied_channel = false;

    if let Some(part) = indicated_part(message, context) {
        debug!(
            position = message.position,
            subject = message.subject(),
            part = %part,
            "commit indicates a version part"
        );

        if context.channel_application_pending() {
            let identifiers = context
                .post_version_pre_release()
                .map_or_else(Vec::new, <[String]>::to_vec);
            transformers.push(VersionTransformer::PreRelease { identifiers });
            context.mark_channel_applied();
            applied_channel = true;
        }

        if context.in_place_adaptation_pending() && can_adapt_in_place(context, part) {
            // The channel switch already expresses this bump; the core part
            // stays untouched and the facts treat it as incremented.
            context.mark_adapted(part);
            debug!(part = %part, "pre-release adaptation stands in for the core bump");
        } else if core_increment_allowed(context, part) {
            transformers.push(core_transformer(part));
        }
    }

    if context.height_applies() {
        let successive = context.preset().increment_mode == IncrementMode::Successive;
        if successive || !context.contains_height_increment()? {
            transformers.push(height_transformer(context, applied_channel)?);
            debug!(position = message.position, "commit ticks the height counter");
        }
    }

    Ok(transformers)
}

/// Severity-ordered indication with downstream-flow substitution: a major
/// signal on a zero-major start routes to minor, a minor signal to patch.
fn indicated_part(
    message: &CommitMessage,
    context: &mut VersionIncrementContext<'_>,
) -> Option<VersionPart> {
    let convention = &context.preset().message_convention;
    if convention.is_message_indicating_major(&message.text) {
        if context.can_flow_downstream_major() {
            context.mark_downstream_flowed();
            debug!(position = message.position, "major signal flows downstream to minor");
            Some(VersionPart::Minor)
        } else {
            Some(VersionPart::Major)
        }
    } else if convention.is_message_indicating_minor(&message.text) {
        if context.can_flow_downstream_minor() {
            context.mark_downstream_flowed();
            debug!(position = message.position, "minor signal flows downstream to patch");
            Some(VersionPart::Patch)
        } else {
            Some(VersionPart::Minor)
        }
    } else if convention.is_message_indicating_patch(&message.text) {
        Some(VersionPart::Patch)
    } else {
        None
    }
}

fn can_adapt_in_place(context: &VersionIncrementContext<'_>, part: VersionPart) -> bool {
    let start = context.start_version();
    start.is_pre_release()
        && context.current_version().core_equals(start)
        && right_side_zeroed(start, part)
}

/// The indicated part already has nothing to carry on its right: a bump of it
/// would only re-zero parts that are zero.
fn right_side_zeroed(version: &SemanticVersion, part: VersionPart) -> bool {
    match part {
        VersionPart::Major => version.minor == 0 && version.patch == 0,
        VersionPart::Minor => version.patch == 0,
        VersionPart::Patch => true,
    }
}

fn core_increment_allowed(context: &mut VersionIncrementContext<'_>, part: VersionPart) -> bool {
    let mode = context.preset().increment_mode;
    if mode == IncrementMode::None {
        return false;
    }
    let already = context.contains_increment(part);
    if context.is_start_version_core_already_released() && !already {
        return true;
    }
    // A pre-release height convention absorbs repeated signals; a
    // build-position counter rides along without gating the core.
    let blocked = context.preset().height_convention.position == HeightPosition::PreRelease
        && context.height_applies();
    // Patch has no room to re-trigger in the core; repeats need a height
    // dimension.
    let may_retrigger = mode == IncrementMode::Successive && part != VersionPart::Patch;
    !blocked && (may_retrigger || !already)
}

fn core_transformer(part: VersionPart) -> VersionTransformer {
    match part {
        VersionPart::Major => VersionTransformer::NextMajor,
        VersionPart::Minor => VersionTransformer::NextMinor,
        VersionPart::Patch => VersionTransformer::NextPatch,
    }
}

fn height_transformer(
    context: &mut VersionIncrementContext<'_>,
    applied_channel: bool,
) -> Result<VersionTransformer> {
    let convention = &context.preset().height_convention;
    // A channel application in the same step invalidates the memoized layout
    // for a pre-release height: resolve against the projected identifiers so
    // the new channel starts its own series.
    if applied_channel && convention.position == HeightPosition::PreRelease {
        let identifiers = context
            .post_version_pre_release()
            .map_or_else(Vec::new, <[String]>::to_vec);
        let result = resolve_height(convention, &identifiers)?;
        let prior_height = parse_height(&result);
        return Ok(VersionTransformer::NextHeightNumber {
            result,
            prior_height,
        });
    }
    let (result, prior_height) = context.current_height_facts()?;
    Ok(VersionTransformer::NextHeightNumber {
        result,
        prior_height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convention::{HeightConvention, MessageConvention};
    use crate::preset::{IncrementFlow, VersioningPreset};

    fn version(raw: &str) -> SemanticVersion {
        SemanticVersion::parse(raw).unwrap()
    }

    fn preset(mode: IncrementMode) -> VersioningPreset {
        VersioningPreset {
            increment_mode: mode,
            increment_flow: IncrementFlow::default(),
            message_convention: MessageConvention::conventional_commits(),
            height_convention: HeightConvention::disabled(),
        }
    }

    fn context<'a>(preset: &'a VersioningPreset, start: &str) -> VersionIncrementContext<'a> {
        let start = version(start);
        let released = !start.is_pre_release();
        VersionIncrementContext::new(preset, start, released, false, None)
    }

    fn decide(
        text: &str,
        context: &mut VersionIncrementContext<'_>,
    ) -> Vec<VersionTransformer> {
        build_increment(&CommitMessage::new(0, text), context).unwrap()
    }

    #[test]
    fn test_major_signal_yields_next_major() {
        let p = preset(IncrementMode::Consecutive);
        let mut ctx = context(&p, "1.2.3");
        assert_eq!(
            decide("feat!: drop API", &mut ctx),
            vec![VersionTransformer::NextMajor]
        );
    }

    #[test]
    fn test_only_one_part_per_commit() {
        let p = preset(IncrementMode::Consecutive);
        let mut ctx = context(&p, "1.2.3");
        let transformers = decide("feat!: drop API", &mut ctx);
        assert_eq!(transformers.len(), 1);
    }

    #[test]
    fn test_unclassified_message_yields_nothing() {
        let p = preset(IncrementMode::Consecutive);
        let mut ctx = context(&p, "1.2.3");
        assert!(decide("docs: update readme", &mut ctx).is_empty());
    }

    #[test]
    fn test_downstream_flow_substitutes_minor() {
        let mut p = preset(IncrementMode::Consecutive);
        p.increment_flow = IncrementFlow::zero_major_downstream();
        let mut ctx = context(&p, "0.5.2");
        assert_eq!(
            decide("feat!: drop API", &mut ctx),
            vec![VersionTransformer::NextMinor]
        );
        assert!(ctx.is_version_downstream_flowed());
    }

    #[test]
    fn test_none_mode_suppresses_core() {
        let p = preset(IncrementMode::None);
        let mut ctx = context(&p, "1.2.3");
        assert!(decide("feat!: drop API", &mut ctx).is_empty());
    }

    #[test]
    fn test_consecutive_blocks_repeat() {
        let p = preset(IncrementMode::Consecutive);
        let mut ctx = context(&p, "1.0.0");
        ctx.set_current_version(version("1.0.1"));
        assert!(decide("fix: again", &mut ctx).is_empty());
    }

    #[test]
    fn test_successive_patch_does_not_retrigger() {
        let p = preset(IncrementMode::Successive);
        let mut ctx = context(&p, "1.0.0");
        ctx.set_current_version(version("1.0.1"));
        assert!(decide("fix: again", &mut ctx).is_empty());
    }

    #[test]
    fn test_successive_minor_retriggers() {
        let p = preset(IncrementMode::Successive);
        let mut ctx = context(&p, "1.0.0");
        ctx.set_current_version(version("1.1.0"));
        assert_eq!(
            decide("feat: more", &mut ctx),
            vec![VersionTransformer::NextMinor]
        );
    }

    #[test]
    fn test_adaptation_replaces_core_bump() {
        let p = preset(IncrementMode::Consecutive);
        let mut ctx = VersionIncrementContext::new(
            &p,
            version("1.1.0-beta.3"),
            false,
            false,
            Some(Vec::new()),
        );
        let transformers = decide("feat: ship it", &mut ctx);
        assert_eq!(
            transformers,
            vec![VersionTransformer::PreRelease {
                identifiers: Vec::new()
            }]
        );
        assert!(ctx.contains_minor_increment());
    }

    #[test]
    fn test_no_adaptation_when_right_side_occupied() {
        let p = preset(IncrementMode::Consecutive);
        let mut ctx = VersionIncrementContext::new(
            &p,
            version("1.1.1-beta.2"),
            false,
            false,
            Some(Vec::new()),
        );
        let transformers = decide("feat: ship it", &mut ctx);
        assert_eq!(
            transformers,
            vec![
                VersionTransformer::PreRelease {
                    identifiers: Vec::new()
                },
                VersionTransformer::NextMinor,
            ]
        );
    }

    #[test]
    fn test_build_height_does_not_block_minor_retrigger() {
        let mut p = preset(IncrementMode::Successive);
        p.height_convention = HeightConvention::bare(HeightPosition::Build, 1);
        let mut ctx = context(&p, "1.0.0");
        ctx.set_current_version(version("1.1.0+1"));
        let transformers = decide("feat: more", &mut ctx);
        assert_eq!(transformers[0], VersionTransformer::NextMinor);
    }

    #[test]
    fn test_height_step_after_channel_switch_restarts_series() {
        let mut p = preset(IncrementMode::Consecutive);
        p.height_convention = HeightConvention::labeled(HeightPosition::PreRelease, 1);
        let mut ctx = VersionIncrementContext::new(
            &p,
            version("1.0.0"),
            true,
            true,
            Some(vec!["beta".to_string()]),
        );
        let transformers = decide("feat: add", &mut ctx);
        assert_eq!(transformers.len(), 3);
        assert!(matches!(
            &transformers[0],
            VersionTransformer::PreRelease { identifiers } if identifiers == &vec!["beta".to_string()]
        ));
        assert_eq!(transformers[1], VersionTransformer::NextMinor);
        assert!(matches!(
            &transformers[2],
            VersionTransformer::NextHeightNumber {
                prior_height: None,
                ..
            }
        ));
    }

    #[test]
    fn test_height_errors_abort() {
        let mut p = preset(IncrementMode::Consecutive);
        // Active convention without any rule
        p.height_convention = HeightConvention::new(HeightPosition::PreRelease, 1);
        let mut ctx = VersionIncrementContext::new(&p, version("1.0.0"), true, true, None);
        let err = build_increment(&CommitMessage::new(0, "fix: x"), &mut ctx).unwrap_err();
        assert!(err.to_string().contains("no height rule"));
    }
}
