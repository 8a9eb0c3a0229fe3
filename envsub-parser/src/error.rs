/// Represents an error that occurred while parsing a template word.
#[derive(Debug, thiserror::Error)]
pub enum WordParseError {
    /// An expansion was opened with `${` but its closing brace was never
    /// found before the end of the input.
    #[error("unterminated expansion: '{0}'")]
    UnterminatedExpansion(String),

    /// The text of an expansion did not match any known production.
    #[error("invalid expansion: '{0}'")]
    InvalidExpansion(String, peg::error::ParseError<peg::str::LineCol>),

    /// Expansions were nested more deeply than the supported limit.
    #[error("expansions nested too deeply (limit: {0})")]
    NestingTooDeep(usize),
}
