//! Line-oriented dictionary parser.
//!
//! The parser is a two-state machine driven one physical line at a time:
//! either no lexeme block is open, or a block is open with a current id and
//! (after its first form) a current lemma. A line of decimal digits opens a
//! new block; any other non-blank line must be a `form<TAB>tags` form line
//! belonging to the open block.
//!
//! Parsing is fail-fast: the first malformed line, unknown tag, or
//! out-of-sequence form aborts the whole parse.

use crate::entry::{Grammeme, GrammemeDecoder, PartOfSpeech, PosDecoder, WordEntry};
use crate::error::ParseError;

/// The currently open lexeme block.
struct Block {
    lexeme_id: u64,
    /// Fixed to the first form text of the block; `None` until then.
    lemma: Option<String>,
}

/// Stateful line parser producing [`WordEntry`] values.
///
/// Feed it physical lines in file order; it yields one entry per form line
/// and nothing for id lines and blank lines.
pub struct LineParser<P, G> {
    pos: P,
    gram: G,
    block: Option<Block>,
}

impl<P: PosDecoder, G: GrammemeDecoder> LineParser<P, G> {
    pub fn new(pos: P, gram: G) -> Self {
        Self {
            pos,
            gram,
            block: None,
        }
    }

    /// Consume one physical line.
    ///
    /// Returns `Ok(Some(entry))` for a form line, `Ok(None)` for blank and
    /// id lines, and an error for anything the format forbids. After an
    /// error the parse must be abandoned; no recovery is attempted.
    pub fn feed(&mut self, raw: &str) -> Result<Option<WordEntry>, ParseError> {
        let line = raw.trim();
        if line.is_empty() {
            return Ok(None);
        }

        if let Ok(id) = line.parse::<u64>() {
            // Id 0 is the source format's unset sentinel: it closes the open
            // block without opening a new one. Ids are otherwise accepted
            // as-is; uniqueness and ordering across blocks are not enforced.
            self.block = (id != 0).then_some(Block {
                lexeme_id: id,
                lemma: None,
            });
            return Ok(None);
        }

        let Some(block) = self.block.as_mut() else {
            return Err(ParseError::OutOfSequence {
                line: line.to_string(),
            });
        };

        let (form, pos, grammemes) = parse_form_line(line, block.lexeme_id, &self.pos, &self.gram)?;
        let lemma = block.lemma.get_or_insert_with(|| form.clone()).clone();

        Ok(Some(WordEntry {
            lexeme_id: block.lexeme_id,
            lemma,
            form,
            pos,
            grammemes,
        }))
    }
}

/// Decode one form line into its form text, POS code, and grammeme codes.
///
/// The tag section splits into tokens on commas and/or whitespace; empty
/// tokens are discarded and duplicate grammeme tokens collapse to a single
/// code in first-seen order.
fn parse_form_line<P: PosDecoder, G: GrammemeDecoder>(
    line: &str,
    lexeme_id: u64,
    pos: &P,
    gram: &G,
) -> Result<(String, PartOfSpeech, Vec<Grammeme>), ParseError> {
    let malformed = || ParseError::MalformedLine {
        lexeme_id,
        line: line.to_string(),
    };

    let Some((form, tags)) = line.split_once('\t') else {
        return Err(malformed());
    };
    let form = form.trim();
    let tags = tags.trim();
    if form.is_empty() || tags.is_empty() {
        return Err(malformed());
    }

    let mut tokens = tags
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty());

    let Some(pos_token) = tokens.next() else {
        return Err(malformed());
    };
    let Some(pos_code) = pos.decode_pos(pos_token) else {
        return Err(ParseError::UnknownPartOfSpeech {
            lexeme_id,
            token: pos_token.to_string(),
        });
    };

    let mut grammemes: Vec<Grammeme> = Vec::new();
    for token in tokens {
        let Some(code) = gram.decode_grammeme(token) else {
            return Err(ParseError::UnknownGrammeme {
                lexeme_id,
                token: token.to_string(),
            });
        };
        if !grammemes.contains(&code) {
            grammemes.push(code);
        }
    }

    Ok((form.to_string(), pos_code, grammemes))
}
