use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserError {
    #[error("Unexpected end of packet")]
    TruncatedInput,

    #[error("Message has no answer section")]
    MissingAnswer,

    #[error("Compression pointer to offset {0} can not be followed")]
    InvalidPointer(u16),
}
