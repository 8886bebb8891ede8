//! Residue storage independent of line wrapping

/// Immutable residue content of one FASTA record.
///
/// The alphabet is not validated: any bytes the decoder collected are kept
/// as-is, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Sequence {
    residues: Vec<u8>,
}

impl Sequence {
    pub fn new(residues: Vec<u8>) -> Self {
        Self { residues }
    }

    /// Number of residues
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.residues
    }

    /// Split the residues into lines of `line_width` residues.
    ///
    /// The final line may be shorter. A width of zero or less yields the
    /// whole sequence as a single line, and an empty sequence yields no
    /// lines at all. Each call returns a fresh iterator.
    pub fn format(&self, line_width: isize) -> Lines<'_> {
        let width = if line_width <= 0 {
            self.residues.len().max(1)
        } else {
            line_width as usize
        };

        Lines {
            rest: &self.residues,
            width,
        }
    }
}

impl From<Vec<u8>> for Sequence {
    fn from(residues: Vec<u8>) -> Self {
        Self::new(residues)
    }
}

impl From<&[u8]> for Sequence {
    fn from(residues: &[u8]) -> Self {
        Self::new(residues.to_vec())
    }
}

impl From<&str> for Sequence {
    fn from(residues: &str) -> Self {
        Self::new(residues.as_bytes().to_vec())
    }
}

impl From<String> for Sequence {
    fn from(residues: String) -> Self {
        Self::new(residues.into_bytes())
    }
}

/// Fixed-width line iterator returned by [`Sequence::format`]
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    rest: &'a [u8],
    width: usize,
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        let split = self.width.min(self.rest.len());
        let (line, rest) = self.rest.split_at(split);
        self.rest = rest;
        Some(line)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.rest.len().div_ceil(self.width);
        (n, Some(n))
    }
}

impl ExactSizeIterator for Lines<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn lines(seq: &Sequence, width: isize) -> Vec<&[u8]> {
        seq.format(width).collect()
    }

    #[test]
    fn test_length() {
        let seq = Sequence::from("ACGTAC");
        assert_eq!(seq.len(), 6);
        assert!(!seq.is_empty());
        assert!(Sequence::default().is_empty());
    }

    #[test]
    fn test_format_wraps_with_short_tail() {
        let seq = Sequence::from("ACGTAC");
        assert_eq!(lines(&seq, 4), vec![&b"ACGT"[..], &b"AC"[..]]);
        assert_eq!(lines(&seq, 3), vec![&b"ACG"[..], &b"TAC"[..]]);
        assert_eq!(seq.format(4).len(), 2);
    }

    #[test]
    fn test_format_non_positive_width_is_unwrapped() {
        let seq = Sequence::from("ACGTAC");
        assert_eq!(lines(&seq, 0), vec![&b"ACGTAC"[..]]);
        assert_eq!(lines(&seq, -5), vec![&b"ACGTAC"[..]]);
    }

    #[test]
    fn test_format_empty_sequence() {
        let seq = Sequence::default();
        assert_eq!(seq.format(10).count(), 0);
        assert_eq!(seq.format(0).count(), 0);
    }

    #[test]
    fn test_format_is_restartable() {
        let seq = Sequence::from("ACGTACGTA");
        let first: Vec<_> = seq.format(2).collect();
        let second: Vec<_> = seq.format(2).collect();
        assert_eq!(first, second);
        assert_eq!(seq.as_bytes(), b"ACGTACGTA");
    }

    proptest! {
        #[test]
        fn prop_format_concat_roundtrip(s in "[ACGTNacgtn*-]{0,300}", width in -4isize..80) {
            let seq = Sequence::from(s.as_str());
            let joined: Vec<u8> = seq.format(width).flatten().copied().collect();
            prop_assert_eq!(joined, s.as_bytes().to_vec());
        }

        #[test]
        fn prop_format_lines_are_full_width(s in "[ACGT]{1,300}", width in 1isize..80) {
            let seq = Sequence::from(s.as_str());
            let lines: Vec<_> = seq.format(width).collect();
            let (last, full) = lines.split_last().unwrap();
            prop_assert!(full.iter().all(|l| l.len() == width as usize));
            prop_assert!(!last.is_empty() && last.len() <= width as usize);
        }
    }
}
