use crate::domain::version::VersionPart;
use crate::error::{NextverError, Result};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

/// A `!` marker after the type/scope, or a BREAKING CHANGE / BREAKING-CHANGE
/// footer anywhere in the body.
static CONVENTIONAL_BREAKING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^[a-zA-Z]+(?:\([^)]*\))?!:)|BREAKING[ -]CHANGE:")
        .expect("breaking-change pattern")
});

static CONVENTIONAL_FEAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^feat(?:\([^)]*\))?:").expect("feat pattern"));

static CONVENTIONAL_FIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^fix(?:\([^)]*\))?:").expect("fix pattern"));

/// A regex compiled in single-line mode (`.` also matches newlines) so that
/// multi-line commit bodies are matched as one string. Compares equal by
/// pattern source.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pattern: String,
    regex: Regex,
}

impl CompiledPattern {
    /// Compile a message pattern; invalid syntax is a configuration error
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        let regex = RegexBuilder::new(&pattern)
            .dot_matches_new_line(true)
            .build()
            .map_err(|e| {
                NextverError::configuration(format!(
                    "Invalid message pattern '{}': {}",
                    pattern, e
                ))
            })?;
        Ok(CompiledPattern { pattern, regex })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl PartialEq for CompiledPattern {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl Eq for CompiledPattern {}

/// Leaf predicate deciding whether a commit message indicates a version part.
/// The indicator set is closed and config-driven, so a tagged union replaces
/// open-ended dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageIndicator {
    /// Indicates every part it is asked about
    Truthy,
    /// Never indicates anything
    Falsy,
    /// Per-part patterns; an absent pattern never matches
    Regex {
        major: Option<CompiledPattern>,
        minor: Option<CompiledPattern>,
        patch: Option<CompiledPattern>,
    },
    /// Fixed conventional-commits rules: breaking changes indicate major,
    /// `feat` indicates minor, `fix` indicates patch
    ConventionalCommits,
}

impl MessageIndicator {
    /// Regex indicator matching a single part only
    pub fn regex_for(part: VersionPart, pattern: &str) -> Result<Self> {
        let compiled = Some(CompiledPattern::new(pattern)?);
        Ok(match part {
            VersionPart::Major => MessageIndicator::Regex {
                major: compiled,
                minor: None,
                patch: None,
            },
            VersionPart::Minor => MessageIndicator::Regex {
                major: None,
                minor: compiled,
                patch: None,
            },
            VersionPart::Patch => MessageIndicator::Regex {
                major: None,
                minor: None,
                patch: compiled,
            },
        })
    }

    /// Does this message text indicate the given version part?
    pub fn is_indicating(&self, text: &str, part: VersionPart) -> bool {
        match self {
            MessageIndicator::Truthy => true,
            MessageIndicator::Falsy => false,
            MessageIndicator::Regex {
                major,
                minor,
                patch,
            } => {
                let pattern = match part {
                    VersionPart::Major => major,
                    VersionPart::Minor => minor,
                    VersionPart::Patch => patch,
                };
                pattern.as_ref().map_or(false, |p| p.is_match(text))
            }
            MessageIndicator::ConventionalCommits => match part {
                VersionPart::Major => CONVENTIONAL_BREAKING.is_match(text),
                VersionPart::Minor => CONVENTIONAL_FEAT.is_match(text),
                VersionPart::Patch => CONVENTIONAL_FIX.is_match(text),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthy_indicates_everything() {
        for part in [VersionPart::Major, VersionPart::Minor, VersionPart::Patch] {
            assert!(MessageIndicator::Truthy.is_indicating("anything", part));
        }
    }

    #[test]
    fn test_falsy_indicates_nothing() {
        for part in [VersionPart::Major, VersionPart::Minor, VersionPart::Patch] {
            assert!(!MessageIndicator::Falsy.is_indicating("feat!: breaking", part));
        }
    }

    #[test]
    fn test_regex_indicator_single_part() {
        let indicator = MessageIndicator::regex_for(VersionPart::Minor, "^add").unwrap();
        assert!(indicator.is_indicating("add feature", VersionPart::Minor));
        assert!(!indicator.is_indicating("add feature", VersionPart::Major));
        assert!(!indicator.is_indicating("add feature", VersionPart::Patch));
        assert!(!indicator.is_indicating("remove feature", VersionPart::Minor));
    }

    #[test]
    fn test_regex_indicator_single_line_mode() {
        let indicator =
            MessageIndicator::regex_for(VersionPart::Major, "summary.*incompatible").unwrap();
        let message = "summary line\n\nbody mentioning an incompatible change";
        assert!(indicator.is_indicating(message, VersionPart::Major));
    }

    #[test]
    fn test_regex_indicator_invalid_pattern() {
        assert!(MessageIndicator::regex_for(VersionPart::Major, "(unclosed").is_err());
    }

    #[test]
    fn test_compiled_pattern_equality() {
        let a = MessageIndicator::regex_for(VersionPart::Patch, "^fix").unwrap();
        let b = MessageIndicator::regex_for(VersionPart::Patch, "^fix").unwrap();
        let c = MessageIndicator::regex_for(VersionPart::Patch, "^hotfix").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_conventional_feat_is_minor() {
        let cc = MessageIndicator::ConventionalCommits;
        assert!(cc.is_indicating("feat: add login", VersionPart::Minor));
        assert!(cc.is_indicating("feat(auth): add login", VersionPart::Minor));
        assert!(!cc.is_indicating("feat: add login", VersionPart::Major));
        assert!(!cc.is_indicating("feat: add login", VersionPart::Patch));
    }

    #[test]
    fn test_conventional_fix_is_patch() {
        let cc = MessageIndicator::ConventionalCommits;
        assert!(cc.is_indicating("fix: stop crash", VersionPart::Patch));
        assert!(cc.is_indicating("fix(parser): stop crash", VersionPart::Patch));
        assert!(!cc.is_indicating("fix: stop crash", VersionPart::Minor));
    }

    #[test]
    fn test_conventional_bang_is_major() {
        let cc = MessageIndicator::ConventionalCommits;
        assert!(cc.is_indicating("feat!: drop API", VersionPart::Major));
        assert!(cc.is_indicating("refactor(core)!: rewrite", VersionPart::Major));
        // The bang form is not also a feat/fix match
        assert!(!cc.is_indicating("feat!: drop API", VersionPart::Minor));
    }

    #[test]
    fn test_conventional_scope_with_spaces() {
        let cc = MessageIndicator::ConventionalCommits;
        assert!(cc.is_indicating("feat(my scope)!: break", VersionPart::Major));
        assert!(cc.is_indicating("feat(my scope): add", VersionPart::Minor));
    }

    #[test]
    fn test_conventional_breaking_change_footer() {
        let cc = MessageIndicator::ConventionalCommits;
        let spaced = "fix: adjust\n\nBREAKING CHANGE: config format changed";
        let dashed = "chore: cleanup\n\nBREAKING-CHANGE: env var renamed";
        assert!(cc.is_indicating(spaced, VersionPart::Major));
        assert!(cc.is_indicating(dashed, VersionPart::Major));
    }

    #[test]
    fn test_conventional_ignores_plain_text() {
        let cc = MessageIndicator::ConventionalCommits;
        for part in [VersionPart::Major, VersionPart::Minor, VersionPart::Patch] {
            assert!(!cc.is_indicating("Update the README", part));
        }
    }
}
