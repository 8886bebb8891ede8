//! Case folding over rendered sequence text

use std::str::FromStr;

use crate::error::{Error, Result};

/// Case applied to rendered residues before they are written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Lower,
    Upper,
}

impl Case {
    const NAMES: &'static [(&'static str, Case)] = &[
        ("lower", Case::Lower),
        ("lowercase", Case::Lower),
        ("upper", Case::Upper),
        ("uppercase", Case::Upper),
    ];

    /// Returns a case-folded copy of `text`; the input is left untouched.
    pub fn apply(self, text: &[u8]) -> Vec<u8> {
        match self {
            Case::Lower => text.to_ascii_lowercase(),
            Case::Upper => text.to_ascii_uppercase(),
        }
    }
}

impl FromStr for Case {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        Self::NAMES
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, case)| *case)
            .ok_or_else(|| Error::UnknownMode {
                kind: "transform",
                name: name.to_owned(),
                expected: Self::NAMES
                    .iter()
                    .map(|(n, _)| *n)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}
