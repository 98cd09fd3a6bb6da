// midisynth -- renders MIDI performances through additive synthesis
// Copyright (C) 2026  The midisynth authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Getting rendered samples out of the process.
//!
//! The synthesis core hands over a raw superposition of notes; everything
//! here (normalization, gain, encoding) is presentation, not synthesis.

pub mod sox;

/// Scale the buffer so that its peak lands at `master_gain`.
///
/// A silent buffer is left untouched.
///
/// # Examples
///
/// ```
/// use midisynth::output::normalize;
///
/// let mut samples = vec![0.0, 2.0, -4.0];
/// normalize(&mut samples, 0.5);
/// assert_eq!(samples, vec![0.0, 0.25, -0.5]);
/// ```
pub fn normalize(samples: &mut [f64], master_gain: f64) {
    let peak = samples.iter().fold(0.0f64, |acc, s| acc.max(s.abs()));
    if peak > 0.0 {
        let scale = master_gain / peak;
        for sample in samples.iter_mut() {
            *sample *= scale;
        }
    }
}

/// Copy the mono `f64` samples to little-endian bytes.
///
/// Could probably be implemented with some sort of unsafe transmute,
/// but copying is safe and likely not the bottleneck.
///
/// Returns the number of samples that were actually copied.
/// Might be less than the number of input samples if the output buffer was not large enough.
pub fn copy_f64_bytes(samples: &[f64], bytes: &mut [u8]) -> usize {
    let mut processed = 0;
    for (sample, target) in samples.iter().zip(bytes.chunks_exact_mut(8)) {
        target.copy_from_slice(&sample.to_le_bytes());
        processed += 1;
    }
    processed
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn normalize_leaves_silence_alone() {
        let mut samples = vec![0.0; 4];
        normalize(&mut samples, 0.5);
        assert_eq!(samples, vec![0.0; 4]);
    }

    #[test]
    fn copy_stops_at_the_shorter_buffer() {
        let samples = [1.0, 2.0, 3.0];
        let mut bytes = [0u8; 16];
        assert_eq!(copy_f64_bytes(&samples, &mut bytes), 2);
        assert_eq!(bytes[0..8], 1.0f64.to_le_bytes());
        assert_eq!(bytes[8..16], 2.0f64.to_le_bytes());
    }
}
