//! Word-form entries and the decoder capabilities they depend on.
//!
//! The crate never enumerates the tag vocabulary itself. Callers supply a
//! [`PosDecoder`] and a [`GrammemeDecoder`] that map tag tokens to opaque
//! codes; the parser only compares codes for equality.

/// An opaque part-of-speech code, assigned by a [`PosDecoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartOfSpeech(pub u16);

/// An opaque grammeme code, assigned by a [`GrammemeDecoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grammeme(pub u16);

/// One inflected word form read from the dictionary.
///
/// Entries are immutable once produced: the parser stamps `lexeme_id` and
/// `lemma` before emitting an entry, and downstream filters only select or
/// discard, never modify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    /// Id of the owning lexeme block, stable across all forms in the block.
    pub lexeme_id: u64,
    /// Canonical form of the lexeme: the first form listed in its block.
    pub lemma: String,
    /// This form's own text, exact case as read.
    pub form: String,
    /// Part-of-speech code (the first tag token of the line).
    pub pos: PartOfSpeech,
    /// Grammeme codes in first-seen order, without duplicates.
    pub grammemes: Vec<Grammeme>,
}

impl WordEntry {
    /// Whether this form carries every grammeme in `wanted`.
    ///
    /// Set membership, not sequence equality; an empty `wanted` always
    /// matches.
    pub fn has_grammemes(&self, wanted: &[Grammeme]) -> bool {
        wanted.iter().all(|g| self.grammemes.contains(g))
    }
}

/// Maps a part-of-speech token to its code, or `None` if unrecognized.
pub trait PosDecoder {
    fn decode_pos(&self, token: &str) -> Option<PartOfSpeech>;
}

/// Maps a grammeme token to its code, or `None` if unrecognized.
pub trait GrammemeDecoder {
    fn decode_grammeme(&self, token: &str) -> Option<Grammeme>;
}
