//! # opencorpora-dict
//!
//! A parser for flat-file lexical dictionaries in the OpenCorpora text
//! export format, with an in-memory mode and a bounded-memory streaming
//! mode for very large corpora.
//!
//! Dictionary format:
//! ```text
//! 1
//! КОТ	NOUN,anim,masc,sing,nomn
//! КОТА	NOUN,anim,masc,sing,gent
//!
//! 2
//! БЫСТРЫЙ	ADJF,sing,nomn
//! ```
//!
//! - A line of decimal digits opens a new lexeme block with that id
//! - Every other non-blank line is a word form: `form<TAB>tag,tag,...`
//! - The first tag is the part of speech, the rest are grammemes
//! - The first form of a block is the lemma for the whole block
//! - Blank lines and surrounding whitespace are ignored
//!
//! The library has no compiled-in tag vocabulary: callers inject a
//! [`PosDecoder`] and a [`GrammemeDecoder`] that map tag tokens to opaque
//! codes.
//!
//! ## Example
//!
//! ```
//! use opencorpora_dict::{
//!     parse_all, CancellationToken, Grammeme, GrammemeDecoder, PartOfSpeech, PosDecoder,
//! };
//!
//! struct Vocab;
//!
//! impl PosDecoder for Vocab {
//!     fn decode_pos(&self, token: &str) -> Option<PartOfSpeech> {
//!         (token == "NOUN").then_some(PartOfSpeech(0))
//!     }
//! }
//!
//! impl GrammemeDecoder for Vocab {
//!     fn decode_grammeme(&self, token: &str) -> Option<Grammeme> {
//!         (token == "anim").then_some(Grammeme(0))
//!     }
//! }
//!
//! let text = "1\nКОТ\tNOUN,anim\n";
//! let entries = parse_all(text.as_bytes(), Vocab, Vocab, CancellationToken::new())
//!     .expect("well-formed dictionary");
//!
//! assert_eq!(entries.len(), 1);
//! assert_eq!(entries[0].lemma, "КОТ");
//! ```

pub mod cancel;
pub mod entry;
pub mod error;
pub mod parser;
pub mod query;
pub mod stream;

#[cfg(test)]
pub(crate) mod test_support;

pub use cancel::CancellationToken;
pub use entry::{Grammeme, GrammemeDecoder, PartOfSpeech, PosDecoder, WordEntry};
pub use error::ParseError;
pub use parser::LineParser;
pub use query::{
    GrammemeFilter, filter_by_grammemes, filter_by_lemma, filter_by_pos,
    filter_stream_by_grammemes, search_by_lemma_and_pos,
};
pub use stream::{EntryStream, open_stream, parse_all, parse_file, stream_file};
