//! Consumers that drain a [`RecordStream`]
//!
//! Every reducer goes through the same loop in [`drain`]: fold each record as
//! it arrives, then on the terminal event either finalize (clean end of input)
//! or hand back the failure without finalizing. Aggregates therefore never
//! produce a partial value.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::case::Case;
use crate::decoder::{Event, RecordStream};
use crate::error::{Error, Result};
use crate::record::Record;

/// Folds records into a single result
pub trait Reducer {
    type Output;

    fn fold(&mut self, record: &Record) -> Result<()>;

    /// Called once, after the decoder reported a clean end of input.
    fn finish(self) -> Result<Self::Output>;
}

/// Run `reducer` over `stream` until the decoder's terminal event.
///
/// A failing fold cancels the producer and is returned as-is.
pub fn drain<R: Reducer>(mut stream: RecordStream, mut reducer: R) -> Result<R::Output> {
    let mut seen = 0usize;

    while let Some(event) = stream.recv() {
        match event {
            Event::Record(record) => {
                if let Err(err) = reducer.fold(&record) {
                    stream.cancel();
                    return Err(err);
                }
                seen += 1;
            }
            Event::Done(Ok(())) => {
                log::debug!("Drained {} records", seen);
                return reducer.finish();
            }
            Event::Done(Err(err)) => return Err(err),
        }
    }

    Err(Error::Disconnected)
}

/// Writes `{id}\t{length}` for every record.
pub struct Each<W: Write> {
    writer: W,
}

impl<W: Write> Each<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> Reducer for Each<W> {
    type Output = ();

    fn fold(&mut self, record: &Record) -> Result<()> {
        writeln!(self.writer, "{}", record).map_err(Error::Write)
    }

    fn finish(mut self) -> Result<()> {
        self.writer.flush().map_err(Error::Write)
    }
}

/// Shortest sequence length
#[derive(Debug, Default)]
pub struct Min {
    min: Option<usize>,
}

impl Reducer for Min {
    type Output = usize;

    fn fold(&mut self, record: &Record) -> Result<()> {
        let len = record.len();
        self.min = Some(self.min.map_or(len, |m| m.min(len)));
        Ok(())
    }

    fn finish(self) -> Result<usize> {
        self.min.ok_or(Error::NoRecords)
    }
}

/// Longest sequence length
#[derive(Debug, Default)]
pub struct Max {
    max: Option<usize>,
}

impl Reducer for Max {
    type Output = usize;

    fn fold(&mut self, record: &Record) -> Result<()> {
        let len = record.len();
        self.max = Some(self.max.map_or(len, |m| m.max(len)));
        Ok(())
    }

    fn finish(self) -> Result<usize> {
        self.max.ok_or(Error::NoRecords)
    }
}

/// Mean sequence length
#[derive(Debug, Default)]
pub struct Average {
    total: u64,
    count: u64,
}

impl Reducer for Average {
    type Output = f64;

    fn fold(&mut self, record: &Record) -> Result<()> {
        self.total += record.len() as u64;
        self.count += 1;
        Ok(())
    }

    fn finish(self) -> Result<f64> {
        if self.count == 0 {
            return Err(Error::NoRecords);
        }
        Ok(self.total as f64 / self.count as f64)
    }
}

/// Re-emits every record as FASTA, optionally case-folded.
pub struct Rewrite<W: Write> {
    writer: W,
    line_width: isize,
    case: Option<Case>,
}

impl<W: Write> Rewrite<W> {
    pub fn new(writer: W, line_width: isize, case: Option<Case>) -> Self {
        Self {
            writer,
            line_width,
            case,
        }
    }
}

impl<W: Write> Reducer for Rewrite<W> {
    type Output = ();

    fn fold(&mut self, record: &Record) -> Result<()> {
        record
            .write_fasta(&mut self.writer, self.line_width, self.case)
            .map_err(Error::Write)
    }

    fn finish(mut self) -> Result<()> {
        self.writer.flush().map_err(Error::Write)
    }
}

/// How `stats length` reports sequence lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthMode {
    Each,
    Average,
    Min,
    Max,
}

const LENGTH_MODES: &[(&str, LengthMode)] = &[
    ("each", LengthMode::Each),
    ("average", LengthMode::Average),
    ("mean", LengthMode::Average),
    ("min", LengthMode::Min),
    ("minimum", LengthMode::Min),
    ("max", LengthMode::Max),
    ("maximum", LengthMode::Max),
];

impl LengthMode {
    /// Every accepted mode name, aliases included
    pub fn names() -> impl Iterator<Item = &'static str> {
        LENGTH_MODES.iter().map(|(name, _)| *name)
    }

    /// Drain `stream` with the matching reducer and write the result.
    ///
    /// `Each` streams one line per record; the aggregate modes write a
    /// single line, and only when the whole input decoded cleanly.
    pub fn run<W: Write>(self, stream: RecordStream, writer: &mut W) -> Result<()> {
        match self {
            LengthMode::Each => drain(stream, Each::new(writer)),
            LengthMode::Average => {
                let avg = drain(stream, Average::default())?;
                write_value(writer, avg)
            }
            LengthMode::Min => {
                let min = drain(stream, Min::default())?;
                write_value(writer, min)
            }
            LengthMode::Max => {
                let max = drain(stream, Max::default())?;
                write_value(writer, max)
            }
        }
    }
}

fn write_value<W: Write, T: fmt::Display>(writer: &mut W, value: T) -> Result<()> {
    writeln!(writer, "{}", value)
        .and_then(|_| writer.flush())
        .map_err(Error::Write)
}

impl FromStr for LengthMode {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        LENGTH_MODES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, mode)| *mode)
            .ok_or_else(|| Error::UnknownMode {
                kind: "length",
                name: name.to_owned(),
                expected: Self::names().collect::<Vec<_>>().join(", "),
            })
    }
}

impl fmt::Display for LengthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LengthMode::Each => "each",
            LengthMode::Average => "average",
            LengthMode::Min => "min",
            LengthMode::Max => "max",
        };
        f.write_str(name)
    }
}
