//! Identification documents: kinds, display grouping, and input masking.
//!
//! One kind enumeration and one grouping-template table drive both the
//! display formatter and the progressive keystroke mask, so the two can
//! never disagree on punctuation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors for raw identifier input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierValidationError {
    Empty,
    NoDigits,
}

impl fmt::Display for IdentifierValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "identifier must not be empty"),
            Self::NoDigits => write!(f, "identifier must contain at least one digit"),
        }
    }
}

impl std::error::Error for IdentifierValidationError {}

/// Digit grouping applied when rendering an identifier.
///
/// `separators` has one entry per gap between consecutive groups.
struct GroupingTemplate {
    groups: &'static [usize],
    separators: &'static [char],
}

/// CPF-style grouping: `xxx.xxx.xxx-xx`.
const INDIVIDUAL_TEMPLATE: GroupingTemplate = GroupingTemplate {
    groups: &[3, 3, 3, 2],
    separators: &['.', '.', '-'],
};

/// CNPJ-style grouping: `xx.xxx.xxx/xxxx-xx`.
const CORPORATE_TEMPLATE: GroupingTemplate = GroupingTemplate {
    groups: &[2, 3, 3, 4, 2],
    separators: &['.', '.', '/', '-'],
};

impl GroupingTemplate {
    fn digit_count(&self) -> usize {
        self.groups.iter().sum()
    }

    /// Apply the template to a digit buffer of any length up to the
    /// template's capacity; separators appear as soon as their preceding
    /// group completes, so every intermediate length renders correctly.
    fn apply(&self, digits: &str) -> String {
        let mut remaining = digits.chars().filter(char::is_ascii_digit);
        let mut rendered = String::with_capacity(self.digit_count() + self.separators.len());
        for (index, &group) in self.groups.iter().enumerate() {
            let mut took = 0;
            for digit in remaining.by_ref().take(group) {
                rendered.push(digit);
                took += 1;
            }
            if took < group {
                break;
            }
            if let Some(&separator) = self.separators.get(index) {
                // Only punctuate when more digits follow the group.
                let mut lookahead = remaining.clone();
                if lookahead.next().is_some() {
                    rendered.push(separator);
                }
            }
        }
        rendered
    }
}

/// Category of identification document, also used as the mask selector.
///
/// Known type codes are `PF` (individual, 11 digits) and `PJ` (corporate,
/// 14 digits); any other code is carried through as [`IdentifierKind::Other`]
/// and formatted verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IdentifierKind {
    Individual,
    Corporate,
    Other(String),
}

impl IdentifierKind {
    /// Resolve a stored type code into a kind.
    pub fn from_type_code(code: &str) -> Self {
        match code {
            "PF" => Self::Individual,
            "PJ" => Self::Corporate,
            other => Self::Other(other.to_owned()),
        }
    }

    /// The stored two-letter type code (or the original unknown code).
    pub fn type_code(&self) -> &str {
        match self {
            Self::Individual => "PF",
            Self::Corporate => "PJ",
            Self::Other(code) => code.as_str(),
        }
    }

    fn template(&self) -> Option<&'static GroupingTemplate> {
        match self {
            Self::Individual => Some(&INDIVIDUAL_TEMPLATE),
            Self::Corporate => Some(&CORPORATE_TEMPLATE),
            Self::Other(_) => None,
        }
    }

    /// Render a stored identifier for display.
    ///
    /// Punctuation in the input is stripped before grouping, so formatting
    /// an already formatted identifier of the same kind is idempotent. When
    /// the digit count does not match the kind's template (or the kind has
    /// none), the input passes through unchanged.
    ///
    /// # Examples
    /// ```
    /// use lending_desk::domain::IdentifierKind;
    ///
    /// let kind = IdentifierKind::Individual;
    /// assert_eq!(kind.format("12345678901"), "123.456.789-01");
    /// assert_eq!(kind.format("123.456.789-01"), "123.456.789-01");
    /// ```
    pub fn format(&self, identifier: &str) -> String {
        let Some(template) = self.template() else {
            return identifier.to_owned();
        };
        let digits: String = identifier.chars().filter(char::is_ascii_digit).collect();
        if digits.len() == template.digit_count() {
            template.apply(&digits)
        } else {
            identifier.to_owned()
        }
    }

    /// Progressive mask applied while an identifier is being typed.
    ///
    /// Non-digits are discarded, the buffer is truncated to the template
    /// length, and the same grouping table as [`IdentifierKind::format`]
    /// is applied partially. Kinds without a template keep the bare digits.
    pub fn mask_input(&self, raw: &str) -> String {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        match self.template() {
            Some(template) => {
                let truncated: String = digits.chars().take(template.digit_count()).collect();
                template.apply(&truncated)
            }
            None => digits,
        }
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_code())
    }
}

impl From<String> for IdentifierKind {
    fn from(code: String) -> Self {
        Self::from_type_code(&code)
    }
}

impl From<IdentifierKind> for String {
    fn from(kind: IdentifierKind) -> Self {
        kind.type_code().to_owned()
    }
}

/// Normalised identifier digit string as transmitted to the lending core.
///
/// ## Invariants
/// - Contains only ASCII digits and at least one of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    /// Normalise raw form input into a digits-only identifier.
    pub fn normalise(raw: &str) -> Result<Self, IdentifierValidationError> {
        if raw.trim().is_empty() {
            return Err(IdentifierValidationError::Empty);
        }
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return Err(IdentifierValidationError::NoDigits);
        }
        Ok(Self(digits))
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Identifier> for String {
    fn from(value: Identifier) -> Self {
        value.0
    }
}

impl TryFrom<String> for Identifier {
    type Error = IdentifierValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::normalise(&value)
    }
}

#[cfg(test)]
mod tests;
