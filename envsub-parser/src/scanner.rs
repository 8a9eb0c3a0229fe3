//! Splits raw template text into literal runs and `${...}` expansion
//! segments, resolving the `$$` escape and matching braces by depth.

use crate::error::WordParseError;

/// Maximum supported depth of `${...}` nesting within a single expansion.
pub const MAX_NESTING_DEPTH: usize = 64;

/// A segment of a template.
#[derive(Clone, Debug)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub(crate) enum Segment {
    /// A run of literal text, copied verbatim to the output.
    Literal(String),
    /// The full text of one expansion, opening `${` and closing `}` included.
    Expansion(String),
}

/// Scan a template left to right into alternating literal and expansion
/// segments.
///
/// `$$` is an unconditional escape for a literal `$` (even before `{`); any
/// other `$` not followed by `{` is itself a literal character. Backslash is
/// not special in literal text, but inside an expansion window it escapes the
/// following character, so `\}` does not close the expansion.
///
/// # Arguments
///
/// * `input` - The raw template text.
pub(crate) fn scan(input: &str) -> Result<Vec<Segment>, WordParseError> {
    let bytes = input.as_bytes();

    let mut segments = vec![];
    let mut literal = String::new();
    let mut run_start = 0;
    let mut i = 0;

    // The characters of interest ('$', '{', '}') are all ASCII, so scanning
    // byte-wise never lands inside a multi-byte character.
    while i < bytes.len() {
        if bytes[i] == b'$' {
            match bytes.get(i + 1) {
                Some(b'$') => {
                    literal.push_str(&input[run_start..i]);
                    literal.push('$');
                    i += 2;
                    run_start = i;
                }
                Some(b'{') => {
                    literal.push_str(&input[run_start..i]);
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }

                    let end = find_matching_brace(input, i)?;
                    segments.push(Segment::Expansion(input[i..end].to_owned()));
                    i = end;
                    run_start = i;
                }
                _ => i += 1,
            }
        } else {
            i += 1;
        }
    }

    literal.push_str(&input[run_start..]);
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    Ok(segments)
}

/// Find the byte offset just past the `}` matching the `${` at `start`,
/// counting nested `${`/`}` pairs so inner expansions are captured whole.
/// Backslash removes the syntactic meaning of the following character, so
/// `\}` and `\$` in pattern text neither close nor open a level.
fn find_matching_brace(input: &str, start: usize) -> Result<usize, WordParseError> {
    let bytes = input.as_bytes();

    let mut depth = 1usize;
    let mut i = start + 2;

    while i < bytes.len() {
        match bytes[i] {
            // Skipping a single byte after the backslash is enough: if it
            // starts a multi-byte character, the remaining continuation
            // bytes are not ASCII and match nothing below.
            b'\\' if i + 1 < bytes.len() => i += 2,
            // An escaped dollar never opens a nested level, even before '{'.
            b'$' if bytes.get(i + 1) == Some(&b'$') => i += 2,
            b'$' if bytes.get(i + 1) == Some(&b'{') => {
                depth += 1;
                if depth > MAX_NESTING_DEPTH {
                    return Err(WordParseError::NestingTooDeep(MAX_NESTING_DEPTH));
                }
                i += 2;
            }
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i + 1);
                }
                i += 1;
            }
            _ => i += 1,
        }
    }

    Err(WordParseError::UnterminatedExpansion(
        input[start..].to_owned(),
    ))
}
