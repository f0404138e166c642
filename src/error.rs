//! Parse failure kinds.
//!
//! Parsing is fail-fast: the first error terminates the producer and is
//! surfaced exactly once through the stream's completion signal. Errors are
//! never aggregated, and no line is skipped or retried.

use thiserror::Error;

/// A fatal dictionary parse failure.
///
/// Variants carry the current lexeme id and/or the offending text where
/// available; a form line seen before any id line has no lexeme to report.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The underlying byte stream failed.
    #[error("read dictionary: {0}")]
    Read(#[from] std::io::Error),

    /// Missing tab separator, empty form text, or empty tag section.
    #[error("lexeme {lexeme_id}: malformed line (expected form<TAB>tag list): {line:?}")]
    MalformedLine { lexeme_id: u64, line: String },

    /// The first tag token did not decode to a part of speech.
    #[error("lexeme {lexeme_id}: unknown part of speech: {token}")]
    UnknownPartOfSpeech { lexeme_id: u64, token: String },

    /// A tag token after the first did not decode to a grammeme.
    #[error("lexeme {lexeme_id}: unknown grammeme: {token}")]
    UnknownGrammeme { lexeme_id: u64, token: String },

    /// A form line appeared while no lexeme block was open.
    #[error("form line before any lexeme id: {line:?}")]
    OutOfSequence { line: String },

    /// The cancellation token was triggered mid-parse.
    #[error("parse canceled: {reason}")]
    Canceled { reason: String },
}
