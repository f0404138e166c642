//! Shared fixtures: a small fixed vocabulary and a sample dictionary.

use crate::cancel::CancellationToken;
use crate::entry::{Grammeme, GrammemeDecoder, PartOfSpeech, PosDecoder, WordEntry};
use crate::stream::parse_all;

pub const NOUN: PartOfSpeech = PartOfSpeech(0);
pub const ADJF: PartOfSpeech = PartOfSpeech(1);

pub const ANIM: Grammeme = Grammeme(0);
pub const MASC: Grammeme = Grammeme(1);
pub const SING: Grammeme = Grammeme(2);
pub const PLUR: Grammeme = Grammeme(3);
pub const NOMN: Grammeme = Grammeme(4);
pub const GENT: Grammeme = Grammeme(5);

/// Fixed-vocabulary decoder for tests.
#[derive(Clone, Copy)]
pub struct FixtureVocab;

impl PosDecoder for FixtureVocab {
    fn decode_pos(&self, token: &str) -> Option<PartOfSpeech> {
        match token {
            "NOUN" => Some(NOUN),
            "ADJF" => Some(ADJF),
            _ => None,
        }
    }
}

impl GrammemeDecoder for FixtureVocab {
    fn decode_grammeme(&self, token: &str) -> Option<Grammeme> {
        match token {
            "anim" => Some(ANIM),
            "masc" => Some(MASC),
            "sing" => Some(SING),
            "plur" => Some(PLUR),
            "nomn" => Some(NOMN),
            "gent" => Some(GENT),
            _ => None,
        }
    }
}

/// Two lexemes, six forms, with a blank separator line.
pub const SAMPLE_DICT: &str = "1\n\
КОТ\tNOUN,anim,masc,sing,nomn\n\
КОТА\tNOUN,anim,masc,sing,gent\n\
КОТЫ\tNOUN,anim,masc,plur,nomn\n\
\n\
2\n\
БЫСТРЫЙ\tADJF,sing,nomn\n\
БЫСТРОГО\tADJF,sing,gent\n\
БЫСТРЫХ\tADJF,plur,gent\n";

pub fn sample_entries() -> Vec<WordEntry> {
    parse_all(
        SAMPLE_DICT.as_bytes(),
        FixtureVocab,
        FixtureVocab,
        CancellationToken::new(),
    )
    .expect("sample dictionary parses")
}
