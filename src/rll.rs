// src/rll.rs
// Runlength-limited codec (Method B): eliminates runs of `ell` zeros by
// pointer substitution and appends a self-describing footer so the decoder
// can recover the pointer count without an external length field.
//
// Ported symbol-for-symbol from rll_constraint.py's RLLCodec, generalized to
// typed Quaternary buffers.

use crate::error::HelixError;
use crate::symbol::Quaternary;

const POINTER: [u8; 2] = [3, 2];
const ESCAPE: [u8; 3] = [3, 1, 2];
const MARKER: [u8; 2] = [2, 2];

pub struct RllCodec {
    ell: usize,
}

impl RllCodec {
    pub fn new(ell: usize) -> Self {
        RllCodec { ell }
    }

    pub fn ell(&self) -> usize {
        self.ell
    }

    /// Length of the longest run of identical symbols.
    pub fn max_runlength(sequence: &[Quaternary]) -> usize {
        if sequence.is_empty() {
            return 0;
        }
        let mut max_run = 1;
        let mut current = 1;
        for w in sequence.windows(2) {
            if w[0] == w[1] {
                current += 1;
                max_run = max_run.max(current);
            } else {
                current = 1;
            }
        }
        max_run
    }

    fn find_forbidden_substring(&self, sequence: &[Quaternary]) -> Option<usize> {
        if sequence.len() < self.ell {
            return None;
        }
        (0..=sequence.len() - self.ell)
            .find(|&i| sequence[i..i + self.ell].iter().all(|s| s.value() == 0))
    }

    pub fn has_forbidden_substring(&self, sequence: &[Quaternary]) -> bool {
        self.find_forbidden_substring(sequence).is_some()
    }

    fn escape_pointer_pattern(sequence: &[Quaternary]) -> Vec<Quaternary> {
        let mut result = Vec::with_capacity(sequence.len());
        let mut i = 0;
        while i < sequence.len() {
            if i + 1 < sequence.len()
                && sequence[i].value() == POINTER[0]
                && sequence[i + 1].value() == POINTER[1]
            {
                result.extend(ESCAPE.iter().map(|&v| Quaternary::new(v)));
                i += 2;
            } else {
                result.push(sequence[i]);
                i += 1;
            }
        }
        result
    }

    fn unescape_pointer_pattern(sequence: &[Quaternary]) -> Vec<Quaternary> {
        let mut result = Vec::with_capacity(sequence.len());
        let mut i = 0;
        while i < sequence.len() {
            if i + 2 < sequence.len()
                && sequence[i].value() == ESCAPE[0]
                && sequence[i + 1].value() == ESCAPE[1]
                && sequence[i + 2].value() == ESCAPE[2]
            {
                result.push(Quaternary::new(POINTER[0]));
                result.push(Quaternary::new(POINTER[1]));
                i += 3;
            } else {
                result.push(sequence[i]);
                i += 1;
            }
        }
        result
    }

    pub fn encode(&self, data: &[Quaternary]) -> Result<Vec<Quaternary>, HelixError> {
        let mut x = Self::escape_pointer_pattern(data);
        x.push(Quaternary::ZERO);

        let max_iterations = x.len() * 2;
        let mut pointer_count: u32 = 0;
        let mut iteration = 0;

        while iteration < max_iterations {
            let Some(pos) = self.find_forbidden_substring(&x) else {
                break;
            };
            let mut next = x[..pos].to_vec();
            next.push(Quaternary::new(POINTER[0]));
            next.push(Quaternary::new(POINTER[1]));
            next.extend_from_slice(&x[pos + self.ell..]);
            x = next;
            pointer_count += 1;
            iteration += 1;
        }

        if pointer_count > 255 {
            return Err(HelixError::MalformedInput {
                reason: format!(
                    "RLL pointer count {pointer_count} exceeds the 4-digit base-4 budget (max 255)"
                ),
            });
        }

        let count_quat = [
            (pointer_count % 4) as u8,
            ((pointer_count / 4) % 4) as u8,
            ((pointer_count / 16) % 4) as u8,
            ((pointer_count / 64) % 4) as u8,
        ];

        // Junction rule: glue before the marker if the body ends in 2.
        let last_symbol = x.last().map(|q| q.value()).unwrap_or(0);
        if last_symbol == MARKER[0] {
            let glue1 = [0u8, 1, 3]
                .into_iter()
                .find(|&s| s != last_symbol)
                .unwrap_or(0);
            x.push(Quaternary::new(glue1));
        }

        x.extend(MARKER.iter().map(|&v| Quaternary::new(v)));

        // Junction rule: glue between marker and count if the first digit is 2.
        if count_quat[0] == 2 {
            x.push(Quaternary::ZERO);
        }

        x.extend(count_quat.iter().map(|&v| Quaternary::new(v)));
        Ok(x)
    }

    pub fn decode(&self, encoded: &[Quaternary]) -> Result<Vec<Quaternary>, HelixError> {
        self.decode_with_alternate(encoded)
            .map(|(primary, _)| primary)
    }

    /// Like `decode`, but also returns a second reading when the junction
    /// glue before the marker is ambiguous with genuine trailing data: a
    /// pointer landing exactly at the tail of the substituted body (forcing
    /// glue) produces the same trailing bytes as a pointer directly followed
    /// by one real data symbol (no glue). Both hypotheses pass pointer-count
    /// bookkeeping on their own, so only a downstream check (the caller's
    /// expected decoded length) can tell them apart.
    pub fn decode_with_alternate(
        &self,
        encoded: &[Quaternary],
    ) -> Result<(Vec<Quaternary>, Option<Vec<Quaternary>>), HelixError> {
        let mut x = encoded.to_vec();

        if x.len() < 6 {
            return Err(HelixError::MalformedFooter {
                reason: "sequence too short to contain RLL marker".to_string(),
            });
        }

        let count_d0 = x[x.len() - 4].value();
        let count_d1 = x[x.len() - 3].value();
        let count_d2 = x[x.len() - 2].value();
        let count_d3 = x[x.len() - 1].value();
        let pointer_count =
            count_d0 as u32 + count_d1 as u32 * 4 + count_d2 as u32 * 16 + count_d3 as u32 * 64;

        let marker_end = if count_d0 == 2 {
            if x.len() < 7 || x[x.len() - 7].value() != 2 || x[x.len() - 6].value() != 2 {
                return Err(HelixError::MalformedFooter {
                    reason: "RLL marker [2, 2] not found at expected position".to_string(),
                });
            }
            x.len() - 7
        } else {
            if x[x.len() - 6].value() != 2 || x[x.len() - 5].value() != 2 {
                return Err(HelixError::MalformedFooter {
                    reason: "RLL marker [2, 2] not found at expected position".to_string(),
                });
            }
            x.len() - 6
        };

        x.truncate(marker_end);

        // Glue-1 ambiguity: offer both readings and let the caller pick.
        let mut alternate_pre_footer = None;
        if x.len() >= 3
            && x[x.len() - 3].value() == POINTER[0]
            && x[x.len() - 2].value() == POINTER[1]
            && matches!(x[x.len() - 1].value(), 0 | 1 | 3)
        {
            let patterns: Vec<usize> = (0..x.len().saturating_sub(1))
                .filter(|&i| x[i].value() == POINTER[0] && x[i + 1].value() == POINTER[1])
                .collect();
            let end_pattern_pos = x.len() - 3;

            if pointer_count > 0 {
                if let Some(pattern_index) = patterns.iter().position(|&p| p == end_pattern_pos) {
                    if pattern_index as u32 == pointer_count - 1 {
                        let mut stripped = x.clone();
                        stripped.pop();
                        alternate_pre_footer = Some(stripped);
                    }
                }
            }
        }

        let primary = self.expand_and_unescape(x, pointer_count)?;
        let alternate = alternate_pre_footer
            .and_then(|body| self.expand_and_unescape(body, pointer_count).ok());

        Ok((primary, alternate))
    }

    fn expand_and_unescape(
        &self,
        mut x: Vec<Quaternary>,
        pointer_count: u32,
    ) -> Result<Vec<Quaternary>, HelixError> {
        let mut replacements_made = 0u32;
        let mut i = 0;
        while i + 1 < x.len() && replacements_made < pointer_count {
            if x[i].value() == POINTER[0] && x[i + 1].value() == POINTER[1] {
                let mut next = x[..i].to_vec();
                next.extend(std::iter::repeat_n(Quaternary::ZERO, self.ell));
                next.extend_from_slice(&x[i + 2..]);
                x = next;
                replacements_made += 1;
                i += self.ell;
            } else {
                i += 1;
            }
        }

        if replacements_made != pointer_count {
            return Err(HelixError::MalformedInput {
                reason: format!(
                    "expected {pointer_count} RLL pointers, expanded only {replacements_made}"
                ),
            });
        }

        if x.last().map(|q| q.value()) == Some(0) {
            x.pop();
        }

        Ok(Self::unescape_pointer_pattern(&x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(vals: &[u8]) -> Vec<Quaternary> {
        vals.iter().map(|&v| Quaternary::new(v)).collect()
    }

    #[test]
    fn roundtrip_on_sample_sequences() {
        let codec = RllCodec::new(3);
        for seed in [
            vec![0u8, 0, 0, 1, 2],
            vec![1, 0, 0, 0, 0, 2],
            vec![0, 1, 0, 1, 0],
            vec![0, 0, 0, 0, 0, 0],
            vec![3, 2, 3, 2, 3, 2],
            vec![],
        ] {
            let input = q(&seed);
            let encoded = codec.encode(&input).unwrap();
            let (primary, alternate) = codec.decode_with_alternate(&encoded).unwrap();
            let matches = primary == input || alternate.as_ref() == Some(&input);
            assert!(
                matches,
                "roundtrip mismatch for {seed:?}: got {primary:?} / {alternate:?}"
            );
        }
    }

    #[test]
    fn escapes_literal_pointer_pattern() {
        let codec = RllCodec::new(3);
        let input = q(&[1, 3, 2, 1]); // contains a literal [3, 2]
        let encoded = codec.encode(&input).unwrap();
        let decoded = codec.decode(&encoded).unwrap();
        assert_eq!(decoded, input);
    }

    #[test]
    fn any_ell_round_trips() {
        for ell in [2, 3, 4] {
            let codec = RllCodec::new(ell);
            let input = q(&[0, 0, 0, 0, 0, 1, 2, 3, 0, 0]);
            let encoded = codec.encode(&input).unwrap();
            let (primary, alternate) = codec.decode_with_alternate(&encoded).unwrap();
            let matches = primary == input || alternate.as_ref() == Some(&input);
            assert!(matches, "ell={ell}: got {primary:?} / {alternate:?}");
        }
    }

    #[test]
    fn max_runlength_reports_longest_run() {
        assert_eq!(RllCodec::max_runlength(&q(&[0, 0, 0, 1])), 3);
        assert_eq!(RllCodec::max_runlength(&q(&[1, 2, 3])), 1);
        assert_eq!(RllCodec::max_runlength(&[]), 0);
    }
}
