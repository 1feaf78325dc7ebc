// src/gc_balance.rs
// GC-content balancing via prefix inversion (Method D). Ported from
// gc_balance.py's GCBalancer.

use crate::error::HelixError;
use crate::rll::RllCodec;
use crate::symbol::Quaternary;

pub struct GcBalancer {
    epsilon: f64,
}

pub struct Balanced {
    pub sequence: Vec<Quaternary>,
    pub t: usize,
}

impl GcBalancer {
    pub fn new(epsilon: f64) -> Self {
        GcBalancer { epsilon }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn flip_sequence(sequence: &[Quaternary], length: usize) -> Vec<Quaternary> {
        let mut result = sequence.to_vec();
        for s in result.iter_mut().take(length.min(sequence.len())) {
            *s = s.flip();
        }
        result
    }

    pub fn gc_weight(sequence: &[Quaternary]) -> usize {
        sequence.iter().filter(|s| s.is_gc()).count()
    }

    pub fn gc_content(sequence: &[Quaternary]) -> f64 {
        if sequence.is_empty() {
            return 0.0;
        }
        Self::gc_weight(sequence) as f64 / sequence.len() as f64
    }

    pub fn is_balanced(&self, sequence: &[Quaternary]) -> bool {
        if sequence.is_empty() {
            return true;
        }
        (Self::gc_content(sequence) - 0.5).abs() <= self.epsilon
    }

    /// S = {0, n} ∪ {step, 2*step, ...} ∪ {n/4, n/2, 3n/4}, or {0..=n} for
    /// short sequences / when step collapses to 0.
    fn generate_search_set(&self, n: usize) -> Vec<usize> {
        let mut set = std::collections::BTreeSet::new();
        set.insert(0);
        set.insert(n);

        let step = 2 * ((self.epsilon * n as f64) as usize);
        if step > 0 {
            let mut i = step;
            while i < n {
                set.insert(i);
                i += step;
            }
        }

        if n <= 20 || step == 0 {
            for i in 0..=n {
                set.insert(i);
            }
        } else {
            set.insert(n / 4);
            set.insert(n / 2);
            set.insert(3 * n / 4);
        }

        set.into_iter().collect()
    }

    /// Finds a candidate t that balances the sequence without reintroducing
    /// a homopolymer run the RLL stage already eliminated (the prefix flip
    /// can merge a run straddling the flip boundary); falls back to
    /// balance-only, then to the candidate with the smallest |GC - 0.5|.
    pub fn balance(&self, sequence: &[Quaternary], ell: usize) -> Balanced {
        let n = sequence.len();
        if n == 0 {
            return Balanced {
                sequence: sequence.to_vec(),
                t: 0,
            };
        }

        let search_set = self.generate_search_set(n);

        for &t in &search_set {
            let candidate = Self::flip_sequence(sequence, t);
            if self.is_balanced(&candidate) && RllCodec::max_runlength(&candidate) <= ell {
                return Balanced {
                    sequence: candidate,
                    t,
                };
            }
        }

        for &t in &search_set {
            let candidate = Self::flip_sequence(sequence, t);
            if self.is_balanced(&candidate) {
                return Balanced {
                    sequence: candidate,
                    t,
                };
            }
        }

        let mut best_t = 0;
        let mut best_diff = f64::INFINITY;
        let mut best_seq = sequence.to_vec();

        for &t in &search_set {
            let candidate = Self::flip_sequence(sequence, t);
            let diff = (Self::gc_content(&candidate) - 0.5).abs();
            if diff < best_diff {
                best_diff = diff;
                best_t = t;
                best_seq = candidate;
            }
        }

        Balanced {
            sequence: best_seq,
            t: best_t,
        }
    }

    /// τ₀,f(τ₀),τ₁,f(τ₁),… — base-4 digits of t (MSB first), each paired
    /// with its flip so the decoder can self-authenticate the suffix.
    pub fn create_index_suffix(t: usize) -> Vec<Quaternary> {
        let mut tau = Vec::new();
        if t == 0 {
            tau.push(0u8);
        } else {
            let mut temp = t;
            while temp > 0 {
                tau.push((temp % 4) as u8);
                temp /= 4;
            }
            tau.reverse();
        }

        let mut p = Vec::with_capacity(tau.len() * 2);
        for digit in tau {
            let q = Quaternary::new(digit);
            p.push(q);
            p.push(q.flip());
        }
        p
    }

    pub fn decode_index_suffix(suffix: &[Quaternary]) -> Result<usize, HelixError> {
        if !suffix.len().is_multiple_of(2) {
            return Err(HelixError::MalformedFooter {
                reason: "index suffix must have even length".to_string(),
            });
        }

        for pair in suffix.chunks_exact(2) {
            if pair[1] != pair[0].flip() {
                return Err(HelixError::MalformedFooter {
                    reason: "index suffix is not properly interleaved".to_string(),
                });
            }
        }

        let mut t = 0usize;
        for pair in suffix.chunks_exact(2) {
            t = t * 4 + pair[0].value() as usize;
        }
        Ok(t)
    }

    pub fn unbalance(sequence: &[Quaternary], t: usize) -> Vec<Quaternary> {
        Self::flip_sequence(sequence, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(vals: &[u8]) -> Vec<Quaternary> {
        vals.iter().map(|&v| Quaternary::new(v)).collect()
    }

    #[test]
    fn balances_all_non_gc_sequence() {
        let balancer = GcBalancer::new(0.05);
        let input = q(&[0, 0, 0, 0, 1, 1, 1, 1]);
        let balanced = balancer.balance(&input, 3);
        assert!(balancer.is_balanced(&balanced.sequence));
        let unbalanced = GcBalancer::unbalance(&balanced.sequence, balanced.t);
        assert_eq!(unbalanced, input);
    }

    #[test]
    fn index_suffix_roundtrip() {
        for t in [0usize, 1, 4, 17, 255] {
            let suffix = GcBalancer::create_index_suffix(t);
            assert_eq!(suffix.len() % 2, 0);
            assert!(suffix.len() >= 2);
            let decoded = GcBalancer::decode_index_suffix(&suffix).unwrap();
            assert_eq!(decoded, t);
        }
    }

    #[test]
    fn index_suffix_self_authenticates() {
        let suffix = GcBalancer::create_index_suffix(42);
        for pair in suffix.chunks_exact(2) {
            assert_eq!(pair[1], pair[0].flip());
        }
        let mut corrupted = suffix.clone();
        corrupted[1] = corrupted[1].flip(); // break the interleaving
        assert!(GcBalancer::decode_index_suffix(&corrupted).is_err());
    }

    #[test]
    fn already_balanced_sequence_keeps_t_zero_when_first_in_search_order() {
        let balancer = GcBalancer::new(0.05);
        let input = q(&[0, 1, 2, 3, 0, 1, 2, 3]);
        let balanced = balancer.balance(&input, 3);
        assert!(balancer.is_balanced(&balanced.sequence));
    }
}
