//! Streaming FASTA decoder
//!
//! [`decode`] moves the input into a dedicated producer thread which parses it
//! line by line and publishes one [`Event::Record`] per record, in file order,
//! followed by exactly one [`Event::Done`]. Both kinds of event travel on the
//! same bounded channel, so the completion signal can never overtake a record.
//! The channel bound is the back-pressure window: the producer blocks once
//! `channel_capacity` records are waiting for the consumer.

use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::mem;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::error::{Error, Result};
use crate::record::{Record, HEADER_MARKER};
use crate::sequence::Sequence;

const DEFAULT_CHANNEL_CAPACITY: usize = 64;
const DEFAULT_READ_BUFFER: usize = 64 * 1024;

/// Largest accepted `channel_capacity`. The channel allocates every slot up
/// front, so the bound keeps a bad setting from exhausting memory.
pub const MAX_CHANNEL_CAPACITY: usize = 1 << 20;

/// Tuning knobs for [`decode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Records that may wait in the channel before the producer blocks.
    /// Zero makes every handoff a rendezvous.
    pub channel_capacity: usize,
    /// Size of the read buffer wrapped around the source
    pub read_buffer_size: usize,
}

impl DecoderOptions {
    /// Reject settings [`decode`] cannot honour.
    ///
    /// A zero-sized read buffer would report end of input on the first read.
    pub fn validate(&self) -> Result<()> {
        if self.read_buffer_size == 0 {
            return Err(Error::InvalidOptions(
                "read_buffer_size must be at least 1".to_string(),
            ));
        }
        if self.channel_capacity > MAX_CHANNEL_CAPACITY {
            return Err(Error::InvalidOptions(format!(
                "channel_capacity {} exceeds the maximum of {}",
                self.channel_capacity, MAX_CHANNEL_CAPACITY
            )));
        }
        Ok(())
    }
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            read_buffer_size: DEFAULT_READ_BUFFER,
        }
    }
}

/// Shared flag the consumer raises to stop the producer early.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// One message on the decoder channel
#[derive(Debug)]
pub enum Event {
    Record(Record),
    /// Terminal event: `Ok` on clean end of input, the failure otherwise.
    Done(Result<()>),
}

/// Start decoding `source` on its own thread.
///
/// Fails with [`Error::InvalidOptions`] before spawning anything when the
/// options are out of range.
///
/// The returned stream is the only reader of the channel. Records already
/// delivered before a failure stay valid; the failure itself arrives as the
/// terminal [`Event::Done`].
pub fn decode<R>(source: R, options: &DecoderOptions) -> Result<RecordStream>
where
    R: Read + Send + 'static,
{
    options.validate()?;

    let (tx, rx) = mpsc::sync_channel(options.channel_capacity);
    let cancel = CancelToken::new();
    let parser = RecordParser::new(BufReader::with_capacity(options.read_buffer_size, source))
        .with_cancel(cancel.clone());

    let handle = thread::Builder::new()
        .name("fastago-decoder".to_string())
        .spawn(move || produce(parser, tx))
        .map_err(Error::Spawn)?;

    log::debug!(
        "Started decoder thread (channel capacity {})",
        options.channel_capacity
    );

    Ok(RecordStream {
        events: rx,
        cancel,
        handle: Some(handle),
        finished: false,
    })
}

fn produce<R: BufRead>(parser: RecordParser<R>, tx: SyncSender<Event>) {
    let mut sent = 0usize;

    for item in parser {
        match item {
            Ok(record) => {
                log::trace!("Decoded record {} ({} residues)", record.id, record.len());
                if tx.send(Event::Record(record)).is_err() {
                    log::debug!("Consumer hung up after {} records", sent);
                    return;
                }
                sent += 1;
            }
            Err(err) => {
                match err {
                    Error::Cancelled => log::debug!("Decoder cancelled after {} records", sent),
                    _ => log::warn!("Decoder stopped after {} records: {}", sent, err),
                }
                let _ = tx.send(Event::Done(Err(err)));
                return;
            }
        }
    }

    log::debug!("Decoder finished: {} records", sent);
    let _ = tx.send(Event::Done(Ok(())));
}

/// Consumer end of a running decoder.
///
/// Dropping the stream before the terminal event cancels the producer.
#[derive(Debug)]
pub struct RecordStream {
    events: Receiver<Event>,
    cancel: CancelToken,
    handle: Option<JoinHandle<()>>,
    finished: bool,
}

impl RecordStream {
    /// Block until the next event.
    ///
    /// Yields the terminal [`Event::Done`] exactly once and `None` afterwards.
    /// A producer that vanished without completing is reported as
    /// [`Error::Disconnected`].
    pub fn recv(&mut self) -> Option<Event> {
        if self.finished {
            return None;
        }

        let event = self
            .events
            .recv()
            .unwrap_or(Event::Done(Err(Error::Disconnected)));

        if let Event::Done(_) = event {
            self.finished = true;
            self.join();
        }

        Some(event)
    }

    /// Ask the producer to stop. Records already queued are still delivered,
    /// followed by a terminal [`Error::Cancelled`].
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// True once the terminal event has been handed out.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Decoder thread panicked");
            }
        }
    }
}

impl Iterator for RecordStream {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.recv()? {
            Event::Record(record) => Some(Ok(record)),
            Event::Done(Ok(())) => None,
            Event::Done(Err(err)) => Some(Err(err)),
        }
    }
}

impl Drop for RecordStream {
    fn drop(&mut self) {
        if !self.finished {
            self.cancel.cancel();
        }
    }
}

/// Synchronous single-pass parser driven by the producer thread.
///
/// Yields records in file order and stops for good after the first error.
pub(crate) struct RecordParser<R> {
    reader: R,
    line: Vec<u8>,
    line_no: usize,
    header: Option<String>,
    residues: Vec<u8>,
    deferred: Option<Error>,
    cancel: Option<CancelToken>,
    finished: bool,
}

impl<R: BufRead> RecordParser<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new(),
            line_no: 0,
            header: None,
            residues: Vec::new(),
            deferred: None,
            cancel: None,
            finished: false,
        }
    }

    pub(crate) fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    fn fail(&mut self, err: Error) -> Option<Result<Record>> {
        self.finished = true;
        Some(Err(err))
    }

    fn take_pending(&mut self) -> Option<Record> {
        let header = self.header.take()?;
        let sequence = Sequence::new(mem::take(&mut self.residues));
        Record::from_header(&header, sequence)
    }
}

impl<R: BufRead> Iterator for RecordParser<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if let Some(err) = self.deferred.take() {
            return self.fail(err);
        }

        loop {
            if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
                return self.fail(Error::Cancelled);
            }

            self.line.clear();
            match self.reader.read_until(b'\n', &mut self.line) {
                Ok(0) => {
                    self.finished = true;
                    return self.take_pending().map(Ok);
                }
                Ok(_) => self.line_no += 1,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return self.fail(Error::Read(e)),
            }

            if self.line.first() == Some(&HEADER_MARKER) {
                let header = String::from_utf8_lossy(&self.line[1..]).into_owned();
                if header.split_whitespace().next().is_none() {
                    let err = Error::malformed(self.line_no, "header has no identifier");
                    // the record before the bad header is complete
                    if let Some(record) = self.take_pending() {
                        self.deferred = Some(err);
                        return Some(Ok(record));
                    }
                    return self.fail(err);
                }

                let completed = self.take_pending();
                self.header = Some(header);
                if let Some(record) = completed {
                    return Some(Ok(record));
                }
                continue;
            }

            let Some(residues) = trim_ascii_whitespace(&self.line) else {
                continue;
            };

            if self.header.is_none() {
                let line = self.line_no;
                return self.fail(Error::malformed(
                    line,
                    "sequence data found before the first header",
                ));
            }
            self.residues.extend_from_slice(residues);
        }
    }
}

fn trim_ascii_whitespace(b: &[u8]) -> Option<&[u8]> {
    let start = b.iter().position(|&c| !c.is_ascii_whitespace())?;
    let end = b.iter().rposition(|&c| !c.is_ascii_whitespace())?;
    Some(&b[start..=end])
}
