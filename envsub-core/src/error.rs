/// Represents an error encountered while expanding a template.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A variable referenced without a default value was not set, and the
    /// expansion ran in strict mode.
    #[error("variable not set: '{0}'")]
    VariableNotSet(String),

    /// The template failed to parse.
    #[error(transparent)]
    WordParseError(#[from] envsub_parser::WordParseError),
}
