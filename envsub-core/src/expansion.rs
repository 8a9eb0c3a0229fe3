//! Implements evaluation of parsed templates against a variable provider.

use envsub_parser::word::{ParameterExpr, SubstringMatchKind, Word, WordPiece};

use crate::error;
use crate::patterns::{
    self, remove_largest_matching_prefix, remove_largest_matching_suffix,
    remove_smallest_matching_prefix, remove_smallest_matching_suffix,
};
use crate::trace_categories;
use crate::variables::VariableProvider;

/// Controls how references to unset variables resolve.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolutionMode {
    /// An unset variable without a default expands to the empty string.
    Lenient,
    /// Referencing an unset variable without a default is an error.
    Strict,
}

/// Expands the given template leniently: unset variables without defaults
/// expand to the empty string.
///
/// # Arguments
///
/// * `template` - The template text to expand.
/// * `provider` - Source of variable values.
pub fn expand(
    template: &str,
    provider: &impl VariableProvider,
) -> Result<String, error::Error> {
    WordExpander::new(provider, ResolutionMode::Lenient).expand(template)
}

/// Expands the given template strictly: referencing an unset variable
/// without a default yields [`error::Error::VariableNotSet`].
///
/// # Arguments
///
/// * `template` - The template text to expand.
/// * `provider` - Source of variable values.
pub fn expand_strict(
    template: &str,
    provider: &impl VariableProvider,
) -> Result<String, error::Error> {
    WordExpander::new(provider, ResolutionMode::Strict).expand(template)
}

/// Encapsulates expansion of template words.
pub struct WordExpander<'a, P: VariableProvider> {
    provider: &'a P,
    mode: ResolutionMode,
}

impl<'a, P: VariableProvider> WordExpander<'a, P> {
    /// Creates an expander over the given provider and resolution mode.
    pub const fn new(provider: &'a P, mode: ResolutionMode) -> Self {
        Self { provider, mode }
    }

    /// Parses and expands the given template. Any error aborts the whole
    /// expansion; no partial output is produced.
    ///
    /// # Arguments
    ///
    /// * `template` - The template text to expand.
    pub fn expand(&self, template: &str) -> Result<String, error::Error> {
        tracing::debug!(target: trace_categories::EXPANSION, "expanding '{template}'");

        let word = envsub_parser::word::parse(template)?;
        self.expand_word(&word)
    }

    fn expand_word(&self, word: &Word) -> Result<String, error::Error> {
        let mut result = String::new();
        for piece in word {
            match piece {
                WordPiece::Text(text) => result.push_str(text),
                WordPiece::ParameterExpansion(expr) => {
                    result.push_str(self.expand_parameter_expr(expr)?.as_str());
                }
            }
        }
        Ok(result)
    }

    fn expand_parameter_expr(&self, expr: &ParameterExpr) -> Result<String, error::Error> {
        match expr {
            ParameterExpr::Parameter { name } => self.resolve(name),
            // The assigning spellings behave like plain defaults here: there
            // is no environment behind the provider to update, so the
            // assignment is only observable as the substituted value.
            ParameterExpr::UseDefaultValues {
                name,
                default_value,
            }
            | ParameterExpr::AssignDefaultValues {
                name,
                default_value,
            } => match self.provider.lookup(name) {
                Some(value) => Ok(value),
                None => self.expand_word(default_value),
            },
            ParameterExpr::ParameterLength { name } => {
                Ok(self.resolve(name)?.chars().count().to_string())
            }
            ParameterExpr::UppercaseFirstChar { name } => {
                Ok(uppercase_first_char(self.resolve(name)?))
            }
            ParameterExpr::UppercaseAll { name } => Ok(self.resolve(name)?.to_uppercase()),
            ParameterExpr::LowercaseFirstChar { name } => {
                Ok(lowercase_first_char(self.resolve(name)?))
            }
            ParameterExpr::LowercaseAll { name } => Ok(self.resolve(name)?.to_lowercase()),
            ParameterExpr::Substring {
                name,
                offset,
                length,
            } => Ok(substring(self.resolve(name)?.as_str(), *offset, *length)),
            ParameterExpr::RemoveSmallestPrefixPattern { name, pattern } => {
                let value = self.resolve(name)?;
                let pattern = patterns::Pattern::from(pattern.as_str());
                Ok(remove_smallest_matching_prefix(value.as_str(), &pattern).to_owned())
            }
            ParameterExpr::RemoveLargestPrefixPattern { name, pattern } => {
                let value = self.resolve(name)?;
                let pattern = patterns::Pattern::from(pattern.as_str());
                Ok(remove_largest_matching_prefix(value.as_str(), &pattern).to_owned())
            }
            ParameterExpr::RemoveSmallestSuffixPattern { name, pattern } => {
                let value = self.resolve(name)?;
                let pattern = patterns::Pattern::from(pattern.as_str());
                Ok(remove_smallest_matching_suffix(value.as_str(), &pattern).to_owned())
            }
            ParameterExpr::RemoveLargestSuffixPattern { name, pattern } => {
                let value = self.resolve(name)?;
                let pattern = patterns::Pattern::from(pattern.as_str());
                Ok(remove_largest_matching_suffix(value.as_str(), &pattern).to_owned())
            }
            ParameterExpr::ReplaceSubstring {
                name,
                pattern,
                replacement,
                match_kind,
            } => {
                let value = self.resolve(name)?;
                let replacement = match replacement {
                    Some(word) => self.expand_word(word)?,
                    None => String::new(),
                };
                Ok(replace_substring(
                    value.as_str(),
                    pattern,
                    replacement.as_str(),
                    *match_kind,
                ))
            }
        }
    }

    fn resolve(&self, name: &str) -> Result<String, error::Error> {
        match self.provider.lookup(name) {
            Some(value) => Ok(value),
            None => match self.mode {
                ResolutionMode::Lenient => Ok(String::new()),
                ResolutionMode::Strict => Err(error::Error::VariableNotSet(name.to_owned())),
            },
        }
    }
}

fn uppercase_first_char(s: String) -> String {
    if let Some(first_char) = s.chars().next() {
        let mut result = String::with_capacity(s.len());
        result.extend(first_char.to_uppercase());
        result.push_str(&s[first_char.len_utf8()..]);
        result
    } else {
        s
    }
}

fn lowercase_first_char(s: String) -> String {
    if let Some(first_char) = s.chars().next() {
        let mut result = String::with_capacity(s.len());
        result.extend(first_char.to_lowercase());
        result.push_str(&s[first_char.len_utf8()..]);
        result
    } else {
        s
    }
}

// Offsets and lengths count characters, not bytes. Out-of-range values clamp
// to the available text; a negative length counts back from the end.
fn substring(s: &str, offset: i64, length: Option<i64>) -> String {
    let char_count = s.chars().count();

    let start = clamp_to_char_index(offset, char_count);
    let end = match length {
        Some(length) if length < 0 => {
            let from_end = i64::try_from(char_count).unwrap_or(i64::MAX).saturating_add(length);
            clamp_to_char_index(from_end, char_count)
        }
        Some(length) => clamp_to_char_index(offset.max(0).saturating_add(length), char_count),
        None => char_count,
    };

    if start >= end {
        return String::new();
    }

    s.chars().skip(start).take(end - start).collect()
}

fn clamp_to_char_index(i: i64, char_count: usize) -> usize {
    usize::try_from(i.max(0)).map_or(char_count, |i| i.min(char_count))
}

fn replace_substring(
    s: &str,
    pattern: &str,
    replacement: &str,
    match_kind: SubstringMatchKind,
) -> String {
    // An empty pattern would otherwise match at every position.
    if pattern.is_empty() {
        return s.to_owned();
    }

    match match_kind {
        SubstringMatchKind::FirstOccurrence => s.replacen(pattern, replacement, 1),
        SubstringMatchKind::Anywhere => s.replace(pattern, replacement),
        SubstringMatchKind::Prefix => match s.strip_prefix(pattern) {
            Some(rest) => format!("{replacement}{rest}"),
            None => s.to_owned(),
        },
        SubstringMatchKind::Suffix => match s.strip_suffix(pattern) {
            Some(rest) => format!("{rest}{replacement}"),
            None => s.to_owned(),
        },
    }
}
