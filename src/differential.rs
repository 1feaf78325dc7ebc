// src/differential.rs
// Modular difference transform: turns repeated symbols into zero runs so the
// RLL stage can eliminate them. Ported from differential.py.

use crate::symbol::Quaternary;

/// y[0] = x[0]; y[i] = (x[i] - x[i-1]) mod 4.
pub fn encode(sequence: &[Quaternary]) -> Vec<Quaternary> {
    let mut encoded = Vec::with_capacity(sequence.len());
    let mut prev = 0i16;
    for (i, &x) in sequence.iter().enumerate() {
        let v = x.value() as i16;
        let y = if i == 0 { v } else { (v - prev).rem_euclid(4) };
        encoded.push(Quaternary::new(y as u8));
        prev = v;
    }
    encoded
}

/// x[0] = y[0]; x[i] = (x[i-1] + y[i]) mod 4.
pub fn decode(encoded: &[Quaternary]) -> Vec<Quaternary> {
    let mut decoded = Vec::with_capacity(encoded.len());
    let mut prev = 0i16;
    for (i, &y) in encoded.iter().enumerate() {
        let v = if i == 0 {
            y.value() as i16
        } else {
            (prev + y.value() as i16).rem_euclid(4)
        };
        decoded.push(Quaternary::new(v as u8));
        prev = v;
    }
    decoded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(vals: &[u8]) -> Vec<Quaternary> {
        vals.iter().map(|&v| Quaternary::new(v)).collect()
    }

    #[test]
    fn known_vector() {
        // [2, 2, 2, 3] -> [2, 0, 0, 1]
        let input = q(&[2, 2, 2, 3]);
        let encoded = encode(&input);
        assert_eq!(encoded, q(&[2, 0, 0, 1]));
        assert_eq!(decode(&encoded), input);
    }

    #[test]
    fn roundtrip_on_random_looking_sequences() {
        for seed in [
            vec![0u8, 1, 2, 3],
            vec![3, 3, 3, 3],
            vec![1, 0, 3, 2, 1],
            vec![],
        ] {
            let input = q(&seed);
            let encoded = encode(&input);
            assert_eq!(decode(&encoded), input);
        }
    }
}
