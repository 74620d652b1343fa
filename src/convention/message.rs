use crate::convention::indicator::MessageIndicator;
use crate::domain::version::VersionPart;

/// Classification layer mapping free-text commit messages to indicated
/// version parts. A part is indicated when any indicator in its list
/// matches; an empty list never indicates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MessageConvention {
    pub major_indicators: Vec<MessageIndicator>,
    pub minor_indicators: Vec<MessageIndicator>,
    pub patch_indicators: Vec<MessageIndicator>,
}

impl MessageConvention {
    /// Convention without indicators; nothing is ever indicated
    pub fn none() -> Self {
        MessageConvention::default()
    }

    /// Conventional-commits rules wired to all three parts
    pub fn conventional_commits() -> Self {
        MessageConvention {
            major_indicators: vec![MessageIndicator::ConventionalCommits],
            minor_indicators: vec![MessageIndicator::ConventionalCommits],
            patch_indicators: vec![MessageIndicator::ConventionalCommits],
        }
    }

    /// Every commit indicates a patch bump
    pub fn always_patch() -> Self {
        MessageConvention {
            patch_indicators: vec![MessageIndicator::Truthy],
            ..MessageConvention::default()
        }
    }

    /// Explicitly never indicates any part
    pub fn never() -> Self {
        MessageConvention {
            major_indicators: vec![MessageIndicator::Falsy],
            minor_indicators: vec![MessageIndicator::Falsy],
            patch_indicators: vec![MessageIndicator::Falsy],
        }
    }

    /// Does the message indicate the given part?
    pub fn is_message_indicating(&self, text: &str, part: VersionPart) -> bool {
        let indicators = match part {
            VersionPart::Major => &self.major_indicators,
            VersionPart::Minor => &self.minor_indicators,
            VersionPart::Patch => &self.patch_indicators,
        };
        indicators.iter().any(|i| i.is_indicating(text, part))
    }

    pub fn is_message_indicating_major(&self, text: &str) -> bool {
        self.is_message_indicating(text, VersionPart::Major)
    }

    pub fn is_message_indicating_minor(&self, text: &str) -> bool {
        self.is_message_indicating(text, VersionPart::Minor)
    }

    pub fn is_message_indicating_patch(&self, text: &str) -> bool {
        self.is_message_indicating(text, VersionPart::Patch)
    }
}
