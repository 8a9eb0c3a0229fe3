//! Parser for template words, used in expansion.
//!
//! Implements support for:
//!
//! - Literal text and the `$$` escape.
//! - Parameter expansion expressions (`${...}`), including defaults,
//!   length, case conversion, substrings, pattern trimming, and
//!   substring replacement.
//! - Nested expansions inside default values and replacement text.

use crate::error::WordParseError;
use crate::scanner;

/// A parsed word: a sequence of pieces that are evaluated in order and
/// concatenated.
pub type Word = Vec<WordPiece>;

/// Represents a piece of a word.
#[derive(Clone, Debug)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub enum WordPiece {
    /// A run of literal text, copied verbatim to the output.
    Text(String),
    /// A parameter expansion.
    ParameterExpansion(ParameterExpr),
}

/// Kind of substring match used by replacement expressions.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub enum SubstringMatchKind {
    /// Match the prefix of the string.
    Prefix,
    /// Match the suffix of the string.
    Suffix,
    /// Match the first occurrence in the string.
    FirstOccurrence,
    /// Match all instances in the string.
    Anywhere,
}

/// A parameter expression, used in a parameter expansion.
#[derive(Clone, Debug)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub enum ParameterExpr {
    /// A plain parameter reference.
    Parameter {
        /// Name of the variable.
        name: String,
    },
    /// Conditionally use a default value (`-` / `:-`).
    UseDefaultValues {
        /// Name of the variable.
        name: String,
        /// Default value to use when the variable is unset.
        default_value: Word,
    },
    /// Conditionally assign and use a default value (`=` / `:=`). There is
    /// no mutable environment behind the evaluator, so the "assignment" is
    /// only observable as the substituted value of the current expansion.
    AssignDefaultValues {
        /// Name of the variable.
        name: String,
        /// Default value to use when the variable is unset.
        default_value: Word,
    },
    /// Compute the length, in characters, of the variable's value.
    ParameterLength {
        /// Name of the variable.
        name: String,
    },
    /// Uppercase the first character of the value.
    UppercaseFirstChar {
        /// Name of the variable.
        name: String,
    },
    /// Uppercase every character of the value.
    UppercaseAll {
        /// Name of the variable.
        name: String,
    },
    /// Lowercase the first character of the value.
    LowercaseFirstChar {
        /// Name of the variable.
        name: String,
    },
    /// Lowercase every character of the value.
    LowercaseAll {
        /// Name of the variable.
        name: String,
    },
    /// Remove the smallest suffix of the value matching the given pattern.
    RemoveSmallestSuffixPattern {
        /// Name of the variable.
        name: String,
        /// Glob pattern to match.
        pattern: String,
    },
    /// Remove the largest suffix of the value matching the given pattern.
    RemoveLargestSuffixPattern {
        /// Name of the variable.
        name: String,
        /// Glob pattern to match.
        pattern: String,
    },
    /// Remove the smallest prefix of the value matching the given pattern.
    RemoveSmallestPrefixPattern {
        /// Name of the variable.
        name: String,
        /// Glob pattern to match.
        pattern: String,
    },
    /// Remove the largest prefix of the value matching the given pattern.
    RemoveLargestPrefixPattern {
        /// Name of the variable.
        name: String,
        /// Glob pattern to match.
        pattern: String,
    },
    /// Extract a substring from the value.
    Substring {
        /// Name of the variable.
        name: String,
        /// 0-based character offset at which the substring starts.
        offset: i64,
        /// Optional length of the substring; the remainder of the string
        /// when unspecified.
        length: Option<i64>,
    },
    /// Replace occurrences of the given literal pattern in the value.
    ReplaceSubstring {
        /// Name of the variable.
        name: String,
        /// Literal text to search for, after escape processing.
        pattern: String,
        /// Replacement word; empty when omitted.
        replacement: Option<Word>,
        /// Kind of match to perform.
        match_kind: SubstringMatchKind,
    },
}

/// Parse a template into its constituent pieces.
///
/// # Arguments
///
/// * `template` - The template text to parse.
pub fn parse(template: &str) -> Result<Word, WordParseError> {
    tracing::debug!(target: "parser", "parsing template '{}'", template);

    let mut pieces = Word::new();
    for segment in scanner::scan(template)? {
        match segment {
            scanner::Segment::Literal(text) => pieces.push(WordPiece::Text(text)),
            scanner::Segment::Expansion(text) => {
                let expr = expansion_parser::parameter_expansion(text.as_str())
                    .map_err(|err| WordParseError::InvalidExpansion(text.clone(), err))?;
                pieces.push(WordPiece::ParameterExpansion(expr));
            }
        }
    }

    tracing::debug!(target: "parser", "parsed template '{}' => {{{:?}}}", template, pieces);

    Ok(pieces)
}

peg::parser! {
    grammar expansion_parser() for str {
        pub(crate) rule parameter_expansion() -> ParameterExpr =
            "${" e:parameter_expression() "}" ![_] { e }

        // Longest-operator-first: '##' before '#', '//' before '/', ':='
        // before '=' and ':', etc. A plain parameter reference comes last.
        rule parameter_expression() -> ParameterExpr =
            "#" name:variable_name() &"}" {
                ParameterExpr::ParameterLength { name }
            } /
            name:variable_name() ":=" default_value:word() {
                ParameterExpr::AssignDefaultValues { name, default_value }
            } /
            name:variable_name() ":-" default_value:word() {
                ParameterExpr::UseDefaultValues { name, default_value }
            } /
            name:variable_name() "=" default_value:word() {
                ParameterExpr::AssignDefaultValues { name, default_value }
            } /
            name:variable_name() "-" default_value:word() {
                ParameterExpr::UseDefaultValues { name, default_value }
            } /
            name:variable_name() ":" offset:number() length:(":" l:number() { l })? &"}" {
                ParameterExpr::Substring { name, offset, length }
            } /
            name:variable_name() "//" pattern:replacement_pattern() replacement:replacement_value()? &"}" {
                ParameterExpr::ReplaceSubstring { name, pattern, replacement, match_kind: SubstringMatchKind::Anywhere }
            } /
            name:variable_name() "/#" pattern:replacement_pattern() replacement:replacement_value()? &"}" {
                ParameterExpr::ReplaceSubstring { name, pattern, replacement, match_kind: SubstringMatchKind::Prefix }
            } /
            name:variable_name() "/%" pattern:replacement_pattern() replacement:replacement_value()? &"}" {
                ParameterExpr::ReplaceSubstring { name, pattern, replacement, match_kind: SubstringMatchKind::Suffix }
            } /
            name:variable_name() "/" pattern:replacement_pattern() replacement:replacement_value()? &"}" {
                ParameterExpr::ReplaceSubstring { name, pattern, replacement, match_kind: SubstringMatchKind::FirstOccurrence }
            } /
            name:variable_name() "##" pattern:trim_pattern() {
                ParameterExpr::RemoveLargestPrefixPattern { name, pattern }
            } /
            name:variable_name() "#" pattern:trim_pattern() {
                ParameterExpr::RemoveSmallestPrefixPattern { name, pattern }
            } /
            name:variable_name() "%%" pattern:trim_pattern() {
                ParameterExpr::RemoveLargestSuffixPattern { name, pattern }
            } /
            name:variable_name() "%" pattern:trim_pattern() {
                ParameterExpr::RemoveSmallestSuffixPattern { name, pattern }
            } /
            name:variable_name() "^^" &"}" {
                ParameterExpr::UppercaseAll { name }
            } /
            name:variable_name() "^" &"}" {
                ParameterExpr::UppercaseFirstChar { name }
            } /
            name:variable_name() ",," &"}" {
                ParameterExpr::LowercaseAll { name }
            } /
            name:variable_name() "," &"}" {
                ParameterExpr::LowercaseFirstChar { name }
            } /
            name:variable_name() &"}" {
                ParameterExpr::Parameter { name }
            }

        // A nested word: literal text, '$$' escapes, and nested expansions,
        // terminated by the enclosing expression's closing brace.
        rule word() -> Word =
            pieces:word_piece()* { pieces }

        rule word_piece() -> WordPiece =
            "$$" { WordPiece::Text("$".to_owned()) } /
            "${" e:parameter_expression() "}" { WordPiece::ParameterExpansion(e) } /
            s:$(text_char()+) { WordPiece::Text(s.to_owned()) }

        rule text_char() = !"$$" !"${" [^'}'] {}

        // Search pattern of a replacement: a backslash strips the syntactic
        // meaning of the following character, so '\/' is a literal '/'
        // rather than the field separator.
        rule replacement_pattern() -> String =
            chars:replacement_pattern_char()* { chars.into_iter().collect() }

        rule replacement_pattern_char() -> char =
            "\\" c:[_] { c } /
            c:[^'/' | '}'] { c }

        rule replacement_value() -> Word =
            "/" w:word() { w }

        // Trim patterns keep their backslash escapes; the pattern matcher
        // interprets them.
        rule trim_pattern() -> String =
            s:$((escape_sequence() / [^'}'])*) { s.to_owned() }

        rule escape_sequence() = "\\" [_] {}

        rule number() -> i64 =
            s:$(['+' | '-']? ['0'..='9']+) {? s.parse().or(Err("i64")) }

        rule variable_name() -> String =
            s:$(!['0'..='9'] ['_' | '0'..='9' | 'a'..='z' | 'A'..='Z']+) { s.to_owned() }
    }
}
