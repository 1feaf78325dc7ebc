// src/mapping.rs
// Binary <-> quaternary <-> DNA conversions.
// Ported from mapping.py's binary_to_quaternary/quaternary_to_dna family,
// generalized to typed Quaternary/Nucleotide buffers.

use crate::error::HelixError;
use crate::symbol::{Nucleotide, Quaternary};

/// Converts a bit string to quaternary symbols, high bit first per pair.
/// Pads a leading '0' internally if the bit count is odd; callers that need
/// the original length back must track it separately (see `codec::Pipeline`).
pub fn bits_to_quaternary(bits: &str) -> Result<Vec<Quaternary>, HelixError> {
    let mut chars: Vec<u8> = Vec::with_capacity(bits.len() + 1);
    for (i, c) in bits.chars().enumerate() {
        match c {
            '0' => chars.push(0),
            '1' => chars.push(1),
            other => {
                return Err(HelixError::InvalidCharacter {
                    found: other,
                    position: i,
                })
            }
        }
    }

    if !chars.len().is_multiple_of(2) {
        chars.insert(0, 0);
    }

    Ok(chars
        .chunks_exact(2)
        .map(|pair| Quaternary::new((pair[0] << 1) | pair[1]))
        .collect())
}

/// Reverses `bits_to_quaternary` without length information: the caller must
/// left-pad or trim the result to the originally framed bit length.
pub fn quaternary_to_bits(quaternary: &[Quaternary]) -> String {
    let mut bits = String::with_capacity(quaternary.len() * 2);
    for q in quaternary {
        let v = q.value();
        bits.push(if v & 0b10 != 0 { '1' } else { '0' });
        bits.push(if v & 0b01 != 0 { '1' } else { '0' });
    }
    bits
}

pub fn quaternary_to_nucleotides(quaternary: &[Quaternary]) -> Vec<Nucleotide> {
    quaternary
        .iter()
        .map(|&q| Nucleotide::from_quaternary(q))
        .collect()
}

pub fn nucleotides_to_quaternary(nucleotides: &[Nucleotide]) -> Vec<Quaternary> {
    nucleotides.iter().map(|&n| n.to_quaternary()).collect()
}

pub fn nucleotides_to_dna(nucleotides: &[Nucleotide]) -> String {
    nucleotides.iter().map(|n| n.to_char()).collect()
}

pub fn dna_to_nucleotides(dna: &str) -> Result<Vec<Nucleotide>, HelixError> {
    dna.chars()
        .enumerate()
        .map(|(i, c)| Nucleotide::from_char(c, i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_odd_length_bit_strings() {
        let q = bits_to_quaternary("1").unwrap();
        assert_eq!(q, vec![Quaternary::new(1)]);
    }

    #[test]
    fn known_vector_1101() {
        // "1101" -> [3, 1] (binary 11=3, 01=1)
        let q = bits_to_quaternary("1101").unwrap();
        assert_eq!(q, vec![Quaternary::new(3), Quaternary::new(1)]);
        assert_eq!(quaternary_to_bits(&q), "1101");
    }

    #[test]
    fn dna_roundtrip() {
        let q = vec![
            Quaternary::new(0),
            Quaternary::new(1),
            Quaternary::new(2),
            Quaternary::new(3),
        ];
        let n = quaternary_to_nucleotides(&q);
        let dna = nucleotides_to_dna(&n);
        assert_eq!(dna, "ATCG");
        let back = dna_to_nucleotides(&dna).unwrap();
        assert_eq!(nucleotides_to_quaternary(&back), q);
    }

    #[test]
    fn rejects_invalid_bit_character() {
        assert!(bits_to_quaternary("102").is_err());
    }

    #[test]
    fn rejects_invalid_nucleotide() {
        assert!(dna_to_nucleotides("ATXG").is_err());
    }

    #[test]
    fn case_insensitive_dna_input() {
        let back = dna_to_nucleotides("atcg").unwrap();
        assert_eq!(nucleotides_to_dna(&back), "ATCG");
    }
}
