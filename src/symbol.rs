// src/symbol.rs
// CORE LOGIC: the quaternary <-> nucleotide alphabet.
// Narrow newtypes over u8 constrained to 0..=3, constructed only through
// fallible conversions, so malformed symbols cannot silently flow between
// pipeline stages.

use crate::error::HelixError;

/// One base-4 digit of the codec's internal wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Quaternary(u8);

impl Quaternary {
    pub const ZERO: Quaternary = Quaternary(0);

    pub fn new(value: u8) -> Self {
        debug_assert!(value <= 3, "quaternary symbol out of range: {value}");
        Quaternary(value & 0b11)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// The involution f(0)=2, f(2)=0, f(1)=3, f(3)=1.
    /// Swaps non-GC symbols with GC symbols; f(f(x)) = x.
    pub fn flip(self) -> Quaternary {
        Quaternary(self.0 ^ 0b10)
    }

    pub fn is_gc(self) -> bool {
        self.0 == 2 || self.0 == 3
    }
}

impl TryFrom<u8> for Quaternary {
    type Error = HelixError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value <= 3 {
            Ok(Quaternary(value))
        } else {
            Err(HelixError::MalformedInput {
                reason: format!("quaternary symbol out of range: {value}"),
            })
        }
    }
}

/// A single DNA base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nucleotide {
    A,
    T,
    C,
    G,
}

impl Nucleotide {
    pub fn to_char(self) -> char {
        match self {
            Nucleotide::A => 'A',
            Nucleotide::T => 'T',
            Nucleotide::C => 'C',
            Nucleotide::G => 'G',
        }
    }

    pub fn from_char(c: char, position: usize) -> Result<Self, HelixError> {
        match c.to_ascii_uppercase() {
            'A' => Ok(Nucleotide::A),
            'T' => Ok(Nucleotide::T),
            'C' => Ok(Nucleotide::C),
            'G' => Ok(Nucleotide::G),
            other => Err(HelixError::InvalidCharacter {
                found: other,
                position,
            }),
        }
    }

    pub fn to_quaternary(self) -> Quaternary {
        match self {
            Nucleotide::A => Quaternary(0),
            Nucleotide::T => Quaternary(1),
            Nucleotide::C => Quaternary(2),
            Nucleotide::G => Quaternary(3),
        }
    }

    pub fn from_quaternary(q: Quaternary) -> Self {
        match q.value() {
            0 => Nucleotide::A,
            1 => Nucleotide::T,
            2 => Nucleotide::C,
            _ => Nucleotide::G,
        }
    }
}
