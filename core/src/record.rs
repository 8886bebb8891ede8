//! FASTA records and their text rendering

use std::fmt;
use std::io::Write;

use crate::case::Case;
use crate::sequence::Sequence;

/// Marker byte that starts every record header line
pub const HEADER_MARKER: u8 = b'>';

/// One decoded FASTA entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// First whitespace-delimited token of the header
    pub id: String,
    /// Full header text after the marker
    pub description: String,
    pub sequence: Sequence,
}

impl Record {
    pub fn new<I, D>(id: I, description: D, sequence: Sequence) -> Self
    where
        I: Into<String>,
        D: Into<String>,
    {
        Self {
            id: id.into(),
            description: description.into(),
            sequence,
        }
    }

    /// Build a record from header text (marker already removed).
    ///
    /// Returns `None` when the header carries no identifier.
    pub fn from_header(header: &str, sequence: Sequence) -> Option<Self> {
        let description = header.trim();
        let id = description.split_whitespace().next()?;

        Some(Self::new(id, description, sequence))
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Write the record as `>{id}` followed by its wrapped residues.
    ///
    /// The case transform, if any, is applied to the rendered residue text
    /// so the stored sequence is never modified.
    pub fn write_fasta<W: Write + ?Sized>(
        &self,
        writer: &mut W,
        line_width: isize,
        case: Option<Case>,
    ) -> std::io::Result<()> {
        let rendered = self.sequence.format(line_width).collect::<Vec<_>>().join(&b'\n');
        let rendered = match case {
            Some(case) => case.apply(&rendered),
            None => rendered,
        };

        writer.write_all(&[HEADER_MARKER])?;
        writer.write_all(self.id.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.write_all(&rendered)?;
        writer.write_all(b"\n")
    }
}

/// The per-record length line, `{id}\t{length}`.
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.id, self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(record: &Record, width: isize, case: Option<Case>) -> String {
        let mut out = Vec::new();
        record.write_fasta(&mut out, width, case).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_from_header_splits_identifier() {
        let record = Record::from_header(" a desc1  more ", Sequence::from("ACGT")).unwrap();
        assert_eq!(record.id, "a");
        assert_eq!(record.description, "a desc1  more");
        assert_eq!(record.len(), 4);
    }

    #[test]
    fn test_from_header_without_identifier() {
        assert!(Record::from_header("", Sequence::default()).is_none());
        assert!(Record::from_header("   \t", Sequence::default()).is_none());
    }

    #[test]
    fn test_equality_covers_all_fields() {
        let a = Record::new("a", "a x", Sequence::from("AC"));
        assert_eq!(a, Record::new("a", "a x", Sequence::from("AC")));
        assert_ne!(a, Record::new("a", "a y", Sequence::from("AC")));
        assert_ne!(a, Record::new("a", "a x", Sequence::from("AG")));
    }

    #[test]
    fn test_new_accepts_mixed_string_types() {
        let id = String::from("a");
        let record = Record::new(id, "a desc1", Sequence::from("AC"));
        assert_eq!(record, Record::new("a", String::from("a desc1"), Sequence::from("AC")));
    }

    #[test]
    fn test_write_fasta_wrapped_lowercase() {
        let record = Record::new("a", "a desc1", Sequence::from("ACGTAC"));
        assert_eq!(render(&record, 3, Some(Case::Lower)), ">a\nacg\ntac\n");
        assert_eq!(render(&record, 0, None), ">a\nACGTAC\n");
        assert_eq!(record.sequence.as_bytes(), b"ACGTAC");
    }

    #[test]
    fn test_write_fasta_empty_sequence() {
        let record = Record::new("e", "e", Sequence::default());
        assert_eq!(render(&record, 60, Some(Case::Upper)), ">e\n\n");
    }

    #[test]
    fn test_display_is_length_line() {
        let record = Record::new("b", "b", Sequence::from("G"));
        assert_eq!(record.to_string(), "b\t1");
    }
}
