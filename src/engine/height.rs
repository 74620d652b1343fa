use crate::convention::{HeightConvention, HeightPosition, PlaceholderToken};
use crate::domain::SemanticVersion;
use crate::error::HeightTemplateError;
use std::collections::HashSet;

/// Substituted for any resolved identifier that would otherwise be empty,
/// keeping the dotted string valid. The height slot is exempt.
const PLACEHOLDER: &str = "-";

/// The resolved slot layout for one evaluated dotted-identifier sequence:
/// which identifiers the convention assumes and where the height counter
/// lives among them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeightConventionTransformResult {
    pub convention: HeightConvention,
    pub identifiers: Vec<String>,
    pub height_index: usize,
}

/// The identifier list of a version that a height position addresses.
pub fn position_identifiers(version: &SemanticVersion, position: HeightPosition) -> &[String] {
    match position {
        HeightPosition::None => &[],
        HeightPosition::PreRelease => &version.pre_release,
        HeightPosition::Build => &version.build,
    }
}

/// Parse the height slot of a resolved layout. Malformed or empty slots are
/// treated as "no height yet" rather than an error.
pub fn parse_height(result: &HeightConventionTransformResult) -> Option<u32> {
    result
        .identifiers
        .get(result.height_index)
        .and_then(|slot| slot.parse().ok())
}

/// Resolve a height convention against an identifier sequence.
///
/// Rules are selected by dot count. A rule containing a height placeholder is
/// terminal; a rule without one is expanding: its output becomes the next
/// input and resolution repeats with the rule for the new dot count. A
/// visited set over dot counts bounds the chain.
pub fn resolve_height(
    convention: &HeightConvention,
    identifiers: &[String],
) -> Result<HeightConventionTransformResult, HeightTemplateError> {
    let mut current: Vec<String> = identifiers.to_vec();
    let mut visited: HashSet<u32> = HashSet::new();

    loop {
        let dots = current.len().saturating_sub(1) as u32;
        if !visited.insert(dots) {
            return Err(HeightTemplateError::CyclicRule(dots));
        }

        let rule = convention
            .rule(dots)
            .ok_or(HeightTemplateError::MissingRule(dots))?;
        let tokens = rule.tokens()?;
        validate_tokens(&rule.template, &tokens)?;

        let mut assumed: Vec<String> = Vec::new();
        let mut height_index: Option<usize> = None;

        for token in &tokens {
            match token {
                PlaceholderToken::Empty => assumed.push(PLACEHOLDER.to_string()),
                PlaceholderToken::AllIdentifiers => {
                    if current.is_empty() {
                        assumed.push(PLACEHOLDER.to_string());
                    } else {
                        assumed.extend(current.iter().cloned());
                    }
                }
                PlaceholderToken::IdentifierAt(index) => {
                    let value = current.get(*index).ok_or_else(|| {
                        HeightTemplateError::invalid_template(
                            &rule.template,
                            format!(
                                "identifier index {} is out of range for {} identifiers",
                                index,
                                current.len()
                            ),
                        )
                    })?;
                    assumed.push(value.clone());
                }
                PlaceholderToken::Height => {
                    // The slot content is whatever the input carries at the
                    // position the height lands at; it is parsed later, not
                    // validated here.
                    height_index = Some(assumed.len());
                    let value = current.get(assumed.len()).cloned().unwrap_or_default();
                    assumed.push(value);
                }
            }
        }

        // One step may grow the identifier list by at most one slot beyond
        // the input's dot count.
        if assumed.len() > dots as usize + 2 {
            return Err(HeightTemplateError::ExpansionOverflow {
                template: rule.template.clone(),
                dots,
            });
        }

        match height_index {
            Some(height_index) => {
                return Ok(HeightConventionTransformResult {
                    convention: convention.clone(),
                    identifiers: assumed,
                    height_index,
                })
            }
            None => current = assumed,
        }
    }
}

fn validate_tokens(
    template: &str,
    tokens: &[PlaceholderToken],
) -> Result<(), HeightTemplateError> {
    let heights = tokens
        .iter()
        .filter(|t| matches!(t, PlaceholderToken::Height))
        .count();
    let empties = tokens
        .iter()
        .filter(|t| matches!(t, PlaceholderToken::Empty))
        .count();

    if heights > 1 {
        return Err(HeightTemplateError::invalid_template(
            template,
            "more than one height placeholder",
        ));
    }
    if empties > 1 {
        return Err(HeightTemplateError::invalid_template(
            template,
            "more than one empty placeholder",
        ));
    }
    // Expanding and templating are different modes; a rule is one or the other.
    if heights > 0 && empties > 0 {
        return Err(HeightTemplateError::invalid_template(
            template,
            "empty and height placeholders are mutually exclusive",
        ));
    }
    Ok(())
}
