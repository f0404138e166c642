//! CLI tool to query an OpenCorpora-format dictionary file.
//!
//! The library has no compiled-in tag vocabulary, so this tool uses an
//! open, interning one: the first occurrence of a tag token allocates its
//! code, and codes resolve back to token text for output. Any dictionary
//! that is syntactically well formed therefore parses, whatever tag set it
//! uses.

use clap::Parser;
use opencorpora_dict::{
    CancellationToken, Grammeme, GrammemeDecoder, ParseError, PartOfSpeech, PosDecoder, WordEntry,
    filter_by_grammemes, filter_by_lemma, filter_by_pos, filter_stream_by_grammemes, parse_file,
    search_by_lemma_and_pos, stream_file,
};
use std::collections::HashMap;
use std::process;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Query word forms in a flat-file lexical dictionary.
///
/// With --stream the dictionary is parsed lazily with bounded memory;
/// otherwise it is loaded into memory first.
#[derive(Parser)]
#[command(name = "ocdict")]
struct Cli {
    /// Dictionary text file (lexeme id lines + form<TAB>tags lines)
    dictionary: String,

    /// Lemma to match, case-insensitive
    #[arg(short, long)]
    lemma: Option<String>,

    /// Part-of-speech token, e.g. NOUN
    #[arg(short, long)]
    pos: Option<String>,

    /// Comma-separated grammeme tokens, e.g. plur,gent
    #[arg(short, long)]
    grammemes: Option<String>,

    /// Stream the dictionary instead of loading it into memory
    #[arg(short, long)]
    stream: bool,

    /// Stop after printing this many entries (0 = unlimited)
    #[arg(long, default_value_t = 0)]
    limit: usize,

    /// Show mode and entry counts on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    let vocab = OpenVocab::default();

    let pos = match cli.pos.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        Some(token) => match vocab.decode_pos(token) {
            Some(code) => Some(code),
            None => {
                eprintln!("Unusable part-of-speech token: {token}");
                process::exit(1);
            }
        },
        None => None,
    };

    let grammemes = match parse_grammeme_list(&vocab, cli.grammemes.as_deref()) {
        Ok(grams) => grams,
        Err(token) => {
            eprintln!("Unusable grammeme token: {token}");
            process::exit(1);
        }
    };

    if cli.verbose {
        eprintln!("Dictionary: {}", cli.dictionary);
        eprintln!(
            "Mode:       {}",
            if cli.stream { "streaming" } else { "in-memory" }
        );
    }

    if cli.stream {
        run_stream(&cli, &vocab, pos, &grammemes);
    } else {
        run_in_memory(&cli, &vocab, pos, &grammemes);
    }
}

fn run_in_memory(cli: &Cli, vocab: &OpenVocab, pos: Option<PartOfSpeech>, grammemes: &[Grammeme]) {
    let entries = match parse_file(
        &cli.dictionary,
        vocab.clone(),
        vocab.clone(),
        CancellationToken::new(),
    ) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error parsing dictionary '{}': {e}", cli.dictionary);
            process::exit(1);
        }
    };

    if cli.verbose {
        eprintln!("Entries:    {}", entries.len());
    }

    let lemma = cli.lemma.as_deref().map(str::trim).filter(|l| !l.is_empty());
    let matched: Vec<&WordEntry> = match (lemma, pos) {
        (Some(lemma), Some(pos)) => search_by_lemma_and_pos(&entries, lemma, pos),
        (Some(lemma), None) => filter_by_lemma(&entries, lemma),
        (None, Some(pos)) => filter_by_pos(&entries, pos),
        (None, None) => filter_by_grammemes(&entries, grammemes),
    };

    let mut printed = 0;
    for entry in matched.into_iter().filter(|e| e.has_grammemes(grammemes)) {
        println!("{}", format_entry(vocab, entry));
        printed += 1;
        if cli.limit > 0 && printed >= cli.limit {
            break;
        }
    }

    if cli.verbose {
        eprintln!("Printed:    {printed}");
    }
}

fn run_stream(cli: &Cli, vocab: &OpenVocab, pos: Option<PartOfSpeech>, grammemes: &[Grammeme]) {
    let cancel = CancellationToken::new();
    let stream = stream_file(
        cli.dictionary.as_str(),
        vocab.clone(),
        vocab.clone(),
        cancel.clone(),
    );

    let wanted_lemma = cli
        .lemma
        .as_deref()
        .map(|l| l.trim().to_lowercase())
        .filter(|l| !l.is_empty());

    let mut filtered = filter_stream_by_grammemes(stream, grammemes);
    let mut printed = 0;
    let mut limited = false;

    for entry in filtered.by_ref() {
        if let Some(wanted) = &wanted_lemma
            && entry.lemma.to_lowercase() != *wanted
        {
            continue;
        }
        if let Some(pos) = pos
            && entry.pos != pos
        {
            continue;
        }

        println!("{}", format_entry(vocab, &entry));
        printed += 1;
        if cli.limit > 0 && printed >= cli.limit {
            // Stopping early: cancel before abandoning the stream so the
            // producer shuts down promptly instead of parsing ahead.
            cancel.cancel("result limit reached");
            limited = true;
            break;
        }
    }

    match filtered.into_inner().finish() {
        Ok(()) => {}
        Err(ParseError::Canceled { .. }) if limited => {}
        Err(e) => {
            eprintln!("Error streaming dictionary '{}': {e}", cli.dictionary);
            process::exit(1);
        }
    }

    if cli.verbose {
        eprintln!("Printed:    {printed}");
    }
}

fn parse_grammeme_list(vocab: &OpenVocab, spec: Option<&str>) -> Result<Vec<Grammeme>, String> {
    let mut grams = Vec::new();
    for token in spec.unwrap_or("").split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        match vocab.decode_grammeme(token) {
            Some(code) => grams.push(code),
            None => return Err(token.to_string()),
        }
    }
    Ok(grams)
}

/// `id<TAB>lemma<TAB>form<TAB>pos<TAB>gram,gram,...`
fn format_entry(vocab: &OpenVocab, entry: &WordEntry) -> String {
    let grams: Vec<String> = entry
        .grammemes
        .iter()
        .map(|&g| vocab.grammeme_name(g))
        .collect();
    format!(
        "{}\t{}\t{}\t{}\t{}",
        entry.lexeme_id,
        entry.lemma,
        entry.form,
        vocab.pos_name(entry.pos),
        grams.join(",")
    )
}

/// Interning tag vocabulary: the first occurrence of a token allocates its
/// code. Decoding only fails once a code space is exhausted.
#[derive(Clone, Default)]
struct OpenVocab {
    inner: Arc<Mutex<VocabInner>>,
}

#[derive(Default)]
struct VocabInner {
    pos_codes: HashMap<String, u16>,
    pos_names: Vec<String>,
    gram_codes: HashMap<String, u16>,
    gram_names: Vec<String>,
}

impl OpenVocab {
    fn lock(&self) -> MutexGuard<'_, VocabInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn pos_name(&self, pos: PartOfSpeech) -> String {
        let inner = self.lock();
        inner
            .pos_names
            .get(usize::from(pos.0))
            .cloned()
            .unwrap_or_else(|| format!("#{}", pos.0))
    }

    fn grammeme_name(&self, gram: Grammeme) -> String {
        let inner = self.lock();
        inner
            .gram_names
            .get(usize::from(gram.0))
            .cloned()
            .unwrap_or_else(|| format!("#{}", gram.0))
    }
}

impl PosDecoder for OpenVocab {
    fn decode_pos(&self, token: &str) -> Option<PartOfSpeech> {
        let mut inner = self.lock();
        if let Some(&code) = inner.pos_codes.get(token) {
            return Some(PartOfSpeech(code));
        }
        let code = u16::try_from(inner.pos_names.len()).ok()?;
        inner.pos_codes.insert(token.to_string(), code);
        inner.pos_names.push(token.to_string());
        Some(PartOfSpeech(code))
    }
}

impl GrammemeDecoder for OpenVocab {
    fn decode_grammeme(&self, token: &str) -> Option<Grammeme> {
        let mut inner = self.lock();
        if let Some(&code) = inner.gram_codes.get(token) {
            return Some(Grammeme(code));
        }
        let code = u16::try_from(inner.gram_names.len()).ok()?;
        inner.gram_codes.insert(token.to_string(), code);
        inner.gram_names.push(token.to_string());
        Some(Grammeme(code))
    }
}
