// src/codec.rs
// Framing & pipeline: composes mapping -> differential -> RLL -> GC-balance
// -> VT -> length-footer into the two public operations, encode and decode.
// Ported from helix.py's HelixCodec, with the length-footer supplement from
// SPEC_FULL.md Section 4.6 (original_source relies on lstrip('0') instead).

use crate::differential;
use crate::error::{EditKind, HelixError};
use crate::gc_balance::GcBalancer;
use crate::mapping;
use crate::rll::RllCodec;
use crate::symbol::Quaternary;
use crate::vt;

/// Six base-4 digits cap the length footer at 4^6 - 1 bits per strand; larger
/// payloads are out of scope (spec.md Non-goals: no multi-strand chunking).
pub const MAX_BIT_LENGTH: usize = 4095;

const LENGTH_MARKER: u8 = 3;
const LENGTH_DIGITS: usize = 6;

/// (original bit length, body, alternate body) recovered from the tail of a
/// decoded quaternary stream.
type LengthFooterSplit = (usize, Vec<Quaternary>, Option<Vec<Quaternary>>);

#[derive(Debug, Clone, Copy)]
pub struct Params {
    pub ell: usize,
    pub epsilon: f64,
    pub vt_enabled: bool,
    /// When true, encode fails with `InfeasibleConstraints` instead of
    /// silently returning the closest-attainable GC balance.
    pub strict: bool,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            ell: 3,
            epsilon: 0.05,
            vt_enabled: true,
            strict: false,
        }
    }
}

fn validate_ell(ell: usize) -> Result<(), HelixError> {
    if ell < 2 {
        return Err(HelixError::MalformedInput {
            reason: format!("ell must be at least 2, got {ell}"),
        });
    }
    Ok(())
}

pub fn encode(bits: &str, params: &Params) -> Result<String, HelixError> {
    validate_ell(params.ell)?;
    if bits.is_empty() {
        return Err(HelixError::EmptyInput);
    }
    let original_len = bits.len();
    if original_len > MAX_BIT_LENGTH {
        return Err(HelixError::MalformedInput {
            reason: format!(
                "payload of {original_len} bits exceeds the single-strand budget of {MAX_BIT_LENGTH} bits"
            ),
        });
    }

    let quaternary = mapping::bits_to_quaternary(bits)?;
    let differential = differential::encode(&quaternary);

    let rll = RllCodec::new(params.ell);
    let rll_encoded = rll.encode(&differential)?;

    let gc = GcBalancer::new(params.epsilon);
    let balanced = gc.balance(&rll_encoded, params.ell);
    if params.strict && !gc.is_balanced(&balanced.sequence) {
        let achieved_delta = (GcBalancer::gc_content(&balanced.sequence) - 0.5).abs();
        return Err(HelixError::InfeasibleConstraints {
            sequence: balanced.sequence,
            achieved_delta,
            epsilon: params.epsilon,
        });
    }

    let mut framed = balanced.sequence;
    framed.extend(GcBalancer::create_index_suffix(balanced.t));

    if params.vt_enabled {
        let footer = vt::create_footer(&framed);
        framed.extend(footer);
    }

    let with_length_footer = append_length_footer(&framed, original_len)?;
    let nucleotides = mapping::quaternary_to_nucleotides(&with_length_footer);
    Ok(mapping::nucleotides_to_dna(&nucleotides))
}

pub fn decode(dna: &str, params: &Params) -> Result<String, HelixError> {
    validate_ell(params.ell)?;
    let nucleotides = mapping::dna_to_nucleotides(dna)?;
    let quaternary = mapping::nucleotides_to_quaternary(&nucleotides);

    let (length, body, alternate_body) = strip_length_footer(&quaternary)?;

    let mut last_err = None;
    for candidate in std::iter::once(body).chain(alternate_body) {
        match decode_body(&candidate, params, length) {
            Ok(bits) => return Ok(bits),
            Err(e) => last_err = Some(e),
        }
    }

    Err(last_err.unwrap_or(HelixError::MalformedInput {
        reason: "decode exhausted all length-footer hypotheses".to_string(),
    }))
}

fn decode_body(body: &[Quaternary], params: &Params, length: usize) -> Result<String, HelixError> {
    let after_vt = if params.vt_enabled {
        strip_vt_footer(body)?
    } else {
        body.to_vec()
    };

    let rll = RllCodec::new(params.ell);

    // The index suffix's digit count grows with the flip index t, which can
    // range over the whole balanced body, so (unlike the original source's
    // fixed `range(2, 20, 2)` scan) the search must cover every possible
    // suffix length, not just short ones. The known original bit length
    // (carried in the length footer) is what makes an exhaustive scan safe:
    // without it, the original's "first split that doesn't raise" heuristic
    // can settle on the wrong split when a longer split is the true one
    // (confirmed directly against `original_source/helix.py`, which fails to
    // round-trip some inputs for exactly this reason).
    //
    // Tried in decreasing order: a shorter split can land on a sub-suffix of
    // the true interleaved index (the trailing d,f(d) pairs of a longer
    // valid index are themselves a valid, shorter index), and that false
    // split's downstream decode can coincidentally land within the expected
    // length window too. The true suffix is the longest one that parses, so
    // it must be tried first.
    let upper = after_vt.len().saturating_sub(1);
    let mut suffix_lengths: Vec<usize> = (2..=upper).step_by(2).collect();
    suffix_lengths.reverse();

    let mut last_err = None;
    for suffix_len in suffix_lengths {
        let split = after_vt.len() - suffix_len;
        let (balanced_body, suffix) = after_vt.split_at(split);

        let t = match GcBalancer::decode_index_suffix(suffix) {
            Ok(t) => t,
            Err(e) => {
                last_err = Some(e);
                continue;
            }
        };

        let unbalanced = GcBalancer::unbalance(balanced_body, t);
        let (rll_primary, rll_alternate) = match rll.decode_with_alternate(&unbalanced) {
            Ok(v) => v,
            Err(e) => {
                last_err = Some(e);
                continue;
            }
        };

        // The RLL footer's junction glue can be ambiguous with genuine
        // trailing data (see DESIGN.md); the known original bit length is
        // the only thing that can tell the two readings apart.
        for rll_decoded in std::iter::once(rll_primary).chain(rll_alternate) {
            let quaternary = differential::decode(&rll_decoded);
            let bits = mapping::quaternary_to_bits(&quaternary);
            if bits.len() >= length && bits.len() - length <= 1 {
                return Ok(pad_or_trim(bits, length));
            }
        }
    }

    Err(last_err.unwrap_or(HelixError::MalformedInput {
        reason: "no index-suffix boundary produced a decode matching the framed length".to_string(),
    }))
}

/// The footer's digit count scales with body length, so the split point is
/// found by a fixed-point search: guess a body length, derive the footer
/// length that encoding such a body would have produced, and check the
/// guess is self-consistent. Converges in one or two steps since
/// `footer_len_for` grows by at most a couple of symbols per extra decade of
/// body length.
fn locate_vt_split(total_len: usize) -> Option<usize> {
    let mut body_len = total_len.saturating_sub(vt::footer_len_for(0));
    for _ in 0..8 {
        let footer_len = vt::footer_len_for(body_len);
        if footer_len >= total_len {
            return None;
        }
        let candidate_body_len = total_len - footer_len;
        if candidate_body_len == body_len {
            return Some(body_len);
        }
        body_len = candidate_body_len;
    }
    None
}

fn strip_vt_footer(m: &[Quaternary]) -> Result<Vec<Quaternary>, HelixError> {
    if let Some(split) = locate_vt_split(m.len()) {
        let (body, footer) = m.split_at(split);
        if let Ok((syndrome, checksum)) = vt::extract_footer_info(footer) {
            if vt::verify(body, syndrome, checksum) {
                return Ok(body.to_vec());
            }
        }

        // Split point is self-consistent but verification failed: a single
        // edit likely occurred. Diagnose using this split.
        let (syndrome, checksum) = vt::extract_footer_info(footer)?;
        let kind = vt::detect_error(body, syndrome, checksum).unwrap_or(EditKind::Unknown);
        return Err(HelixError::ErrorDetected { kind });
    }

    Err(HelixError::MalformedFooter {
        reason: "sequence too short to contain a VT footer".to_string(),
    })
}

fn base4_digits(value: usize, digit_count: usize) -> Vec<u8> {
    let mut v = value;
    let mut digits = Vec::with_capacity(digit_count);
    for _ in 0..digit_count {
        digits.push((v % 4) as u8);
        v /= 4;
    }
    digits
}

/// Appends marker [3,3,3] + six LSB-first base-4 digits of `length`, with
/// junction-rule glue inserted per SPEC_FULL.md Section 4.6.
fn append_length_footer(body: &[Quaternary], length: usize) -> Result<Vec<Quaternary>, HelixError> {
    if length > MAX_BIT_LENGTH {
        return Err(HelixError::MalformedInput {
            reason: format!("length {length} exceeds the {LENGTH_DIGITS}-digit base-4 budget"),
        });
    }

    let mut out = body.to_vec();

    let last_symbol = out.last().map(|q| q.value()).unwrap_or(0);
    if last_symbol == LENGTH_MARKER {
        out.push(Quaternary::ZERO);
    }

    out.extend(std::iter::repeat_n(Quaternary::new(LENGTH_MARKER), 3));

    let digits = base4_digits(length, LENGTH_DIGITS);
    if digits[0] == LENGTH_MARKER {
        out.push(Quaternary::ZERO);
    }
    out.extend(digits.iter().map(|&d| Quaternary::new(d)));

    Ok(out)
}

/// Recovers (original bit length, body, alternate body) from the tail of a
/// decoded quaternary stream. The alternate body is `Some` only when the
/// single-symbol junction glue before the marker is ambiguous with genuine
/// trailing data (see DESIGN.md for why this is inherent to the footer's
/// design and resolved by trying both hypotheses downstream).
fn strip_length_footer(q: &[Quaternary]) -> Result<LengthFooterSplit, HelixError> {
    let n = q.len();
    if n < 3 + LENGTH_DIGITS {
        return Err(HelixError::MalformedFooter {
            reason: "sequence too short to contain the length footer".to_string(),
        });
    }

    let digits: Vec<u8> = q[n - LENGTH_DIGITS..].iter().map(|s| s.value()).collect();
    let glue2_present = digits[0] == LENGTH_MARKER;

    let marker_start = if glue2_present {
        if n < 4 + LENGTH_DIGITS {
            return Err(HelixError::MalformedFooter {
                reason: "sequence too short to contain the length footer".to_string(),
            });
        }
        n - LENGTH_DIGITS - 4
    } else {
        n - LENGTH_DIGITS - 3
    };

    if q[marker_start].value() != LENGTH_MARKER
        || q[marker_start + 1].value() != LENGTH_MARKER
        || q[marker_start + 2].value() != LENGTH_MARKER
    {
        return Err(HelixError::MalformedFooter {
            reason: "length marker [3, 3, 3] not found at expected position".to_string(),
        });
    }

    let mut length = 0usize;
    for (i, &d) in digits.iter().enumerate() {
        length += d as usize * 4usize.pow(i as u32);
    }

    let body = &q[..marker_start];
    if body.is_empty() {
        return Ok((length, Vec::new(), None));
    }

    let last = body[body.len() - 1].value();
    if last == LENGTH_MARKER {
        // The encoder never leaves a marker-valued symbol directly adjacent
        // to the marker without glue, so this position can't itself be 3.
        return Ok((length, body.to_vec(), None));
    }
    if last == 0 {
        // Ambiguous: 0 is both the fixed glue sentinel and a legitimate
        // trailing symbol. Offer both readings; the caller tries each.
        let glue_stripped = body[..body.len() - 1].to_vec();
        let glue_absent = body.to_vec();
        Ok((length, glue_absent, Some(glue_stripped)))
    } else {
        Ok((length, body.to_vec(), None))
    }
}

fn pad_or_trim(bits: String, length: usize) -> String {
    use std::cmp::Ordering;
    match bits.len().cmp(&length) {
        Ordering::Less => {
            let mut padded = "0".repeat(length - bits.len());
            padded.push_str(&bits);
            padded
        }
        Ordering::Greater => bits[bits.len() - length..].to_string(),
        Ordering::Equal => bits,
    }
}
