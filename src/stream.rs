//! Streaming delivery pipeline.
//!
//! One producer thread runs the [`LineParser`] over the byte stream and
//! hands entries to a single consumer through a bounded channel of capacity
//! one. The single-slot handoff means the producer is never more than one
//! entry ahead of the consumer, so a slow consumer throttles parsing
//! directly. A second, one-shot channel carries the completion signal after
//! the entry sequence is exhausted.
//!
//! The producer owns the reader and drops it on every exit path: normal
//! completion, decode failure, cancellation, or consumer abandonment.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, bounded};

use crate::cancel::CancellationToken;
use crate::entry::{GrammemeDecoder, PosDecoder, WordEntry};
use crate::error::ParseError;
use crate::parser::LineParser;

/// A lazy, single-pass sequence of word entries.
///
/// Iterate to receive entries in file order, then call [`finish`] to read
/// the completion signal. Dropping the stream without finishing lets the
/// producer wind down on its own.
///
/// [`finish`]: EntryStream::finish
pub struct EntryStream {
    entries: Receiver<WordEntry>,
    done: Receiver<Result<(), ParseError>>,
    worker: JoinHandle<()>,
}

impl Iterator for EntryStream {
    type Item = WordEntry;

    fn next(&mut self) -> Option<WordEntry> {
        self.entries.recv().ok()
    }
}

impl EntryStream {
    /// Consume the stream and read the completion signal.
    ///
    /// May be called before the stream is exhausted: the entry channel is
    /// disconnected first, so a producer blocked on the handoff observes
    /// the consumer is gone and terminates instead of blocking forever.
    /// Stopping early without canceling is not an error; cancel the token
    /// first to have the producer report [`ParseError::Canceled`].
    pub fn finish(self) -> Result<(), ParseError> {
        let EntryStream {
            entries,
            done,
            worker,
        } = self;
        drop(entries);

        // The producer sends exactly once on every exit path, so a missing
        // signal only happens if the worker was torn down mid-send.
        let result = done.recv().unwrap_or(Ok(()));
        let _ = worker.join();
        result
    }
}

/// Open a streaming parse over `reader`.
///
/// Entries arrive through the returned [`EntryStream`] as they are decoded;
/// memory stays bounded regardless of dictionary size.
pub fn open_stream<R, P, G>(reader: R, pos: P, gram: G, cancel: CancellationToken) -> EntryStream
where
    R: Read + Send + 'static,
    P: PosDecoder + Send + 'static,
    G: GrammemeDecoder + Send + 'static,
{
    let (entry_tx, entry_rx) = bounded(1);
    let (done_tx, done_rx) = bounded(1);

    let worker = thread::spawn(move || {
        let result = run_producer(reader, pos, gram, &cancel, &entry_tx);
        let _ = done_tx.send(result);
    });

    EntryStream {
        entries: entry_rx,
        done: done_rx,
        worker,
    }
}

/// Open a streaming parse over the dictionary file at `path`.
///
/// The file is opened inside the producer, so an open failure surfaces
/// through the completion signal rather than up front.
pub fn stream_file<P, G>(
    path: impl Into<PathBuf>,
    pos: P,
    gram: G,
    cancel: CancellationToken,
) -> EntryStream
where
    P: PosDecoder + Send + 'static,
    G: GrammemeDecoder + Send + 'static,
{
    let path = path.into();
    let (entry_tx, entry_rx) = bounded(1);
    let (done_tx, done_rx) = bounded(1);

    let worker = thread::spawn(move || {
        let result = match File::open(&path) {
            Ok(file) => run_producer(file, pos, gram, &cancel, &entry_tx),
            Err(e) => Err(ParseError::Read(e)),
        };
        let _ = done_tx.send(result);
    });

    EntryStream {
        entries: entry_rx,
        done: done_rx,
        worker,
    }
}

/// Parse the whole dictionary into memory.
///
/// Drains a streaming parse and checks its completion signal; on failure
/// the accumulated entries are discarded, so the caller never sees a
/// partial parse.
pub fn parse_all<R, P, G>(
    reader: R,
    pos: P,
    gram: G,
    cancel: CancellationToken,
) -> Result<Vec<WordEntry>, ParseError>
where
    R: Read + Send + 'static,
    P: PosDecoder + Send + 'static,
    G: GrammemeDecoder + Send + 'static,
{
    let mut stream = open_stream(reader, pos, gram, cancel);
    let entries: Vec<WordEntry> = stream.by_ref().collect();
    stream.finish()?;
    Ok(entries)
}

/// Parse the dictionary file at `path` into memory.
pub fn parse_file<P, G>(
    path: impl AsRef<Path>,
    pos: P,
    gram: G,
    cancel: CancellationToken,
) -> Result<Vec<WordEntry>, ParseError>
where
    P: PosDecoder + Send + 'static,
    G: GrammemeDecoder + Send + 'static,
{
    let file = File::open(path)?;
    parse_all(file, pos, gram, cancel)
}

/// Producer loop: parse lines, hand entries over, stop at the first error.
///
/// The cancellation token is checked once per physical line, before that
/// line's work begins. `reader` is dropped when this returns, on every
/// path.
fn run_producer<R, P, G>(
    reader: R,
    pos: P,
    gram: G,
    cancel: &CancellationToken,
    entries: &Sender<WordEntry>,
) -> Result<(), ParseError>
where
    R: Read,
    P: PosDecoder,
    G: GrammemeDecoder,
{
    let mut parser = LineParser::new(pos, gram);

    for line in BufReader::new(reader).lines() {
        if cancel.is_canceled() {
            return Err(ParseError::Canceled {
                reason: cancel.reason(),
            });
        }

        let line = line?;
        if let Some(entry) = parser.feed(&line)?
            && entries.send(entry).is_err()
        {
            // The consumer dropped the receiving side. If it canceled
            // first, report that; otherwise stopping early is its
            // prerogative, not a parse failure.
            if cancel.is_canceled() {
                return Err(ParseError::Canceled {
                    reason: cancel.reason(),
                });
            }
            return Ok(());
        }
    }

    Ok(())
}
