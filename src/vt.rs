// src/vt.rs
// Varshamov-Tenengolts syndrome + checksum footer for single-edit detection.
// Ported from error_correction.py's VTErrorCorrection (single-strand only;
// ExtendedVT's dual-strand variant is out of scope).

use crate::error::{EditKind, HelixError};
use crate::symbol::Quaternary;

/// Smallest base-4 digit count that can hold any syndrome value for a body
/// of this length (syndrome ranges over `0..2*body_len`). The footer's
/// digit count is a deterministic function of body length rather than a
/// fixed constant, since the syndrome modulus `2n` grows with the sequence
/// the footer protects.
pub fn syndrome_digit_count(body_len: usize) -> usize {
    let bound = 2 * body_len;
    let mut digits = 2usize;
    while 4usize.pow(digits as u32) < bound {
        digits += 1;
    }
    digits
}

/// Footer length (in quaternary symbols) for a body of this length.
pub fn footer_len_for(body_len: usize) -> usize {
    2 * (syndrome_digit_count(body_len) + 1)
}

pub fn compute_syndrome(sequence: &[Quaternary]) -> usize {
    let n = sequence.len();
    if n == 0 {
        return 0;
    }
    let syndrome: usize = sequence
        .iter()
        .enumerate()
        .map(|(i, s)| (i + 1) * s.value() as usize)
        .sum();
    syndrome % (2 * n)
}

pub fn compute_checksum(sequence: &[Quaternary]) -> u8 {
    (sequence.iter().map(|s| s.value() as usize).sum::<usize>() % 4) as u8
}

fn int_to_quaternary(value: usize, min_length: usize) -> Vec<u8> {
    let mut result = if value == 0 {
        vec![0u8]
    } else {
        let mut digits = Vec::new();
        let mut temp = value;
        while temp > 0 {
            digits.push((temp % 4) as u8);
            temp /= 4;
        }
        digits.reverse();
        digits
    };
    while result.len() < min_length {
        result.insert(0, 0);
    }
    result
}

/// Interleaves (syndrome digits, checksum digit) each with its flip.
pub fn create_footer(sequence: &[Quaternary]) -> Vec<Quaternary> {
    let syndrome = compute_syndrome(sequence);
    let checksum = compute_checksum(sequence);

    let mut digits = int_to_quaternary(syndrome, syndrome_digit_count(sequence.len()));
    digits.push(checksum);

    let mut footer = Vec::with_capacity(digits.len() * 2);
    for d in digits {
        let q = Quaternary::new(d);
        footer.push(q);
        footer.push(q.flip());
    }
    footer
}

pub fn extract_footer_info(footer: &[Quaternary]) -> Result<(usize, u8), HelixError> {
    if !footer.len().is_multiple_of(2) || footer.is_empty() {
        return Err(HelixError::MalformedFooter {
            reason: "VT footer must have even, nonzero length".to_string(),
        });
    }
    for pair in footer.chunks_exact(2) {
        if pair[1] != pair[0].flip() {
            return Err(HelixError::MalformedFooter {
                reason: "VT footer is not properly interleaved".to_string(),
            });
        }
    }

    let original: Vec<u8> = footer.chunks_exact(2).map(|pair| pair[0].value()).collect();
    let (syndrome_digits, checksum_digit) = original.split_at(original.len() - 1);

    let mut syndrome = 0usize;
    for &d in syndrome_digits {
        syndrome = syndrome * 4 + d as usize;
    }

    Ok((syndrome, checksum_digit[0]))
}

pub fn verify(sequence: &[Quaternary], expected_syndrome: usize, expected_checksum: u8) -> bool {
    compute_syndrome(sequence) == expected_syndrome
        && compute_checksum(sequence) == expected_checksum
}

/// Heuristic classification of a detected single-edit error. Not part of any
/// correctness invariant — see SPEC_FULL.md's Open Question #2.
pub fn detect_error(
    sequence: &[Quaternary],
    expected_syndrome: usize,
    expected_checksum: u8,
) -> Option<EditKind> {
    if verify(sequence, expected_syndrome, expected_checksum) {
        return None;
    }

    let n = sequence.len().max(1);
    let actual_syndrome = compute_syndrome(sequence);
    let actual_checksum = compute_checksum(sequence);

    let syndrome_diff =
        (actual_syndrome as isize - expected_syndrome as isize).rem_euclid(2 * n as isize);
    let checksum_diff = (actual_checksum as isize - expected_checksum as isize).rem_euclid(4);

    if checksum_diff == 0 {
        Some(EditKind::Substitution)
    } else if syndrome_diff != 0 {
        Some(EditKind::InsertionOrDeletion)
    } else {
        Some(EditKind::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(vals: &[u8]) -> Vec<Quaternary> {
        vals.iter().map(|&v| Quaternary::new(v)).collect()
    }

    #[test]
    fn footer_roundtrip() {
        for seed in [
            vec![1u8, 2, 3, 0, 1, 2],
            vec![0, 0, 1, 1, 2, 2, 3, 3],
            vec![3, 2, 1, 0],
        ] {
            let seq = q(&seed);
            let footer = create_footer(&seq);
            assert_eq!(footer.len() % 2, 0);
            let (syn, check) = extract_footer_info(&footer).unwrap();
            assert_eq!(syn, compute_syndrome(&seq));
            assert_eq!(check, compute_checksum(&seq));
            assert!(verify(&seq, syn, check));
        }
    }

    #[test]
    fn detects_single_substitution() {
        let seq = q(&[1, 2, 3, 0, 1, 2]);
        let syn = compute_syndrome(&seq);
        let check = compute_checksum(&seq);

        let mut corrupted = seq.clone();
        corrupted[0] = Quaternary::new((corrupted[0].value() + 1) % 4);

        assert!(!verify(&corrupted, syn, check));
        assert!(detect_error(&corrupted, syn, check).is_some());
    }

    #[test]
    fn footer_self_authenticates() {
        let seq = q(&[1, 2, 3, 0]);
        let footer = create_footer(&seq);
        for pair in footer.chunks_exact(2) {
            assert_eq!(pair[1], pair[0].flip());
        }
    }
}
