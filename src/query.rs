//! Filter and query operators over parsed entries.
//!
//! All operators are pure and order-preserving: the slice variants select
//! references into the input, the stream variant passes entries through
//! unchanged. Nothing here mutates an entry.

use crate::entry::{Grammeme, PartOfSpeech, WordEntry};

/// Keep entries whose grammeme set is a superset of `wanted`.
///
/// Membership is order-independent, and an empty `wanted` set is the
/// identity transform: every entry passes.
pub fn filter_by_grammemes<'a>(
    entries: &'a [WordEntry],
    wanted: &[Grammeme],
) -> Vec<&'a WordEntry> {
    entries.iter().filter(|e| e.has_grammemes(wanted)).collect()
}

/// [`filter_by_grammemes`] as an adapter over a live entry stream.
///
/// For the same input this yields exactly the entries the slice variant
/// selects, in the same relative order.
pub fn filter_stream_by_grammemes<I>(entries: I, wanted: &[Grammeme]) -> GrammemeFilter<I::IntoIter>
where
    I: IntoIterator<Item = WordEntry>,
{
    GrammemeFilter {
        inner: entries.into_iter(),
        wanted: wanted.to_vec(),
    }
}

/// Iterator adapter produced by [`filter_stream_by_grammemes`].
pub struct GrammemeFilter<I> {
    inner: I,
    wanted: Vec<Grammeme>,
}

impl<I> GrammemeFilter<I> {
    /// Recover the underlying stream, e.g. to read its completion signal.
    pub fn into_inner(self) -> I {
        self.inner
    }
}

impl<I: Iterator<Item = WordEntry>> Iterator for GrammemeFilter<I> {
    type Item = WordEntry;

    fn next(&mut self) -> Option<WordEntry> {
        self.inner.find(|e| e.has_grammemes(&self.wanted))
    }
}

/// Entries whose lemma matches `lemma` (case-insensitively, after trimming)
/// and whose POS is exactly `pos`.
///
/// A blank lemma yields an empty result; it is never a wildcard.
pub fn search_by_lemma_and_pos<'a>(
    entries: &'a [WordEntry],
    lemma: &str,
    pos: PartOfSpeech,
) -> Vec<&'a WordEntry> {
    let lemma = lemma.trim();
    if lemma.is_empty() {
        return Vec::new();
    }
    let wanted = lemma.to_lowercase();
    entries
        .iter()
        .filter(|e| e.pos == pos && e.lemma.to_lowercase() == wanted)
        .collect()
}

/// Entries whose lemma matches `lemma` case-insensitively.
pub fn filter_by_lemma<'a>(entries: &'a [WordEntry], lemma: &str) -> Vec<&'a WordEntry> {
    let wanted = lemma.to_lowercase();
    entries
        .iter()
        .filter(|e| e.lemma.to_lowercase() == wanted)
        .collect()
}

/// Entries whose POS is exactly `pos`.
pub fn filter_by_pos<'a>(entries: &'a [WordEntry], pos: PartOfSpeech) -> Vec<&'a WordEntry> {
    entries.iter().filter(|e| e.pos == pos).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancel::CancellationToken;
    use crate::stream::open_stream;
    use crate::test_support::{
        ADJF, FixtureVocab, GENT, NOMN, NOUN, PLUR, SAMPLE_DICT, SING, sample_entries,
    };

    #[test]
    fn empty_wanted_set_is_the_identity() {
        let entries = sample_entries();
        let got = filter_by_grammemes(&entries, &[]);
        assert_eq!(got, entries.iter().collect::<Vec<_>>());
    }

    #[test]
    fn superset_filter_selects_the_matching_subsequence() {
        let entries = sample_entries();

        let got = filter_by_grammemes(&entries, &[PLUR, GENT]);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].form, "БЫСТРЫХ");

        // Order in the result follows file order.
        let got = filter_by_grammemes(&entries, &[NOMN, SING]);
        let forms: Vec<&str> = got.iter().map(|e| e.form.as_str()).collect();
        assert_eq!(forms, vec!["КОТ", "БЫСТРЫЙ"]);
    }

    #[test]
    fn stream_and_slice_filters_agree() {
        let entries = sample_entries();
        let wanted = [SING, GENT];

        let via_slice: Vec<WordEntry> = filter_by_grammemes(&entries, &wanted)
            .into_iter()
            .cloned()
            .collect();

        let stream = open_stream(
            SAMPLE_DICT.as_bytes(),
            FixtureVocab,
            FixtureVocab,
            CancellationToken::new(),
        );
        let mut filtered = filter_stream_by_grammemes(stream, &wanted);
        let via_stream: Vec<WordEntry> = filtered.by_ref().collect();
        filtered.into_inner().finish().unwrap();

        assert!(!via_slice.is_empty());
        assert_eq!(via_stream, via_slice);
    }

    #[test]
    fn search_matches_lemma_case_insensitively() {
        let entries = sample_entries();

        let got = search_by_lemma_and_pos(&entries, "кот", NOUN);
        assert_eq!(got.len(), 3);
        assert!(got.iter().all(|e| e.lemma == "КОТ" && e.pos == NOUN));

        let got = search_by_lemma_and_pos(&entries, "  Быстрый ", ADJF);
        assert_eq!(got.len(), 3);
    }

    #[test]
    fn search_requires_exact_pos() {
        let entries = sample_entries();
        assert!(search_by_lemma_and_pos(&entries, "кот", ADJF).is_empty());
    }

    #[test]
    fn blank_lemma_is_never_a_wildcard() {
        let entries = sample_entries();
        assert!(search_by_lemma_and_pos(&entries, "", NOUN).is_empty());
        assert!(search_by_lemma_and_pos(&entries, "   ", NOUN).is_empty());
    }

    #[test]
    fn plain_lemma_and_pos_filters() {
        let entries = sample_entries();

        let by_lemma = filter_by_lemma(&entries, "быстрый");
        assert_eq!(by_lemma.len(), 3);

        let by_pos = filter_by_pos(&entries, NOUN);
        let forms: Vec<&str> = by_pos.iter().map(|e| e.form.as_str()).collect();
        assert_eq!(forms, vec!["КОТ", "КОТА", "КОТЫ"]);
    }
}
