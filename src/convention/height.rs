use crate::error::HeightTemplateError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Where the height counter lives inside a version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeightPosition {
    #[default]
    None,
    PreRelease,
    Build,
}

/// One parsed segment of a height rule template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderToken {
    /// `{}` - one new, currently unassigned slot
    Empty,
    /// `{*}` - the entire current dotted string, copied into one slot
    AllIdentifiers,
    /// `{N}` - the current identifier at index N, copied verbatim
    IdentifierAt(usize),
    /// `{y}` - the height counter slot; terminal for resolution
    Height,
}

/// A height encoding template keyed by the dot count it applies to.
/// Templates are dot-separated placeholder tokens, e.g. `"{0}.{y}"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeightRule {
    pub template: String,
}

impl HeightRule {
    pub fn new(template: impl Into<String>) -> Self {
        HeightRule {
            template: template.into(),
        }
    }

    /// Tokenize the template; any segment that is not a known placeholder is
    /// a template error
    pub fn tokens(&self) -> Result<Vec<PlaceholderToken>, HeightTemplateError> {
        self.template
            .split('.')
            .map(|segment| parse_segment(&self.template, segment))
            .collect()
    }
}

fn parse_segment(template: &str, segment: &str) -> Result<PlaceholderToken, HeightTemplateError> {
    match segment {
        "{}" => Ok(PlaceholderToken::Empty),
        "{*}" => Ok(PlaceholderToken::AllIdentifiers),
        "{y}" => Ok(PlaceholderToken::Height),
        _ => segment
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
            .and_then(|s| s.parse::<usize>().ok())
            .map(PlaceholderToken::IdentifierAt)
            .ok_or_else(|| {
                HeightTemplateError::invalid_template(
                    template,
                    format!("unrecognized placeholder segment '{}'", segment),
                )
            }),
    }
}

/// Describes where and how a height counter is encoded inside a version's
/// dotted identifiers. `rules` maps the dot count of the current identifier
/// sequence to the template that lays it out.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeightConvention {
    pub position: HeightPosition,
    pub initial_height: u32,
    pub rules: HashMap<u32, HeightRule>,
}

impl HeightConvention {
    /// Convention with no height encoding
    pub fn disabled() -> Self {
        HeightConvention::default()
    }

    /// Active convention without rules; add them with [`with_rule`]
    ///
    /// [`with_rule`]: HeightConvention::with_rule
    pub fn new(position: HeightPosition, initial_height: u32) -> Self {
        HeightConvention {
            position,
            initial_height,
            rules: HashMap::new(),
        }
    }

    /// Add a template rule for a dot count
    #[must_use]
    pub fn with_rule(mut self, dots: u32, template: impl Into<String>) -> Self {
        self.rules.insert(dots, HeightRule::new(template));
        self
    }

    pub fn is_active(&self) -> bool {
        self.position != HeightPosition::None
    }

    pub fn rule(&self, dots: u32) -> Option<&HeightRule> {
        self.rules.get(&dots)
    }

    /// Bare height series: the whole pre-release/build is the counter
    /// (`1.2.3-4`, `1.2.3-5`, ...)
    pub fn bare(position: HeightPosition, initial_height: u32) -> Self {
        HeightConvention::new(position, initial_height).with_rule(0, "{y}")
    }

    /// Labeled height series: the counter follows a channel label
    /// (`1.2.3-beta.4`, `1.2.3-beta.5`, ...); a label-only input is expanded
    /// by one slot first
    pub fn labeled(position: HeightPosition, initial_height: u32) -> Self {
        HeightConvention::new(position, initial_height)
            .with_rule(0, "{*}.{}")
            .with_rule(1, "{0}.{y}")
    }
}
