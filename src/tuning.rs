// midisynth -- renders MIDI performances through additive synthesis
// Copyright (C) 2026  The midisynth authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

use crate::note::Pitch;

/// Defines the tuning of an instrument by assigning a frequency to a certain pitch.
/// This defines the frequencies of all other pitches at a standard tuning of 12 half-tones per octave.
///
/// # Examples
///
/// ```
/// use midisynth::note::Pitch;
/// use midisynth::tuning::Tuning;
/// assert_eq!(Tuning::default().frequency(Pitch::from_midi(69)), 440.0);
/// assert_eq!(Tuning::default().frequency(Pitch::from_midi(57)), 220.0);
/// assert_eq!(Tuning::default().frequency(Pitch::from_midi(81)), 880.0);
/// ```
pub struct Tuning {
    pub reference_pitch: Pitch,
    pub reference_frequency: f64,
}

impl Tuning {
    /// Return the frequency of a pitch relative to this tuning.
    pub fn frequency(&self, other: Pitch) -> f64 {
        let semitones = other.index() - self.reference_pitch.index();
        let octaves = semitones as f64 / 12.0;
        self.reference_frequency * 2.0f64.powf(octaves)
    }

    /// Return the (fractional) pitch index that a frequency corresponds to
    /// in this tuning, the inverse of [`Tuning::frequency`].
    ///
    /// The result is unrounded so that callers can distinguish frequencies
    /// falling between two keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use midisynth::tuning::Tuning;
    /// assert_eq!(Tuning::default().pitch_index(440.0), 69.0);
    /// assert_eq!(Tuning::default().pitch_index(880.0), 81.0);
    /// ```
    pub fn pitch_index(&self, frequency: f64) -> f64 {
        12.0 * (frequency / self.reference_frequency).log2() + self.reference_pitch.index() as f64
    }
}

/// Default concert tuning, where A4 corresponds to 440 Hz.
impl Default for Tuning {
    fn default() -> Self {
        Tuning {
            reference_pitch: Pitch::from_midi(69),
            reference_frequency: 440.0,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Converting a pitch to a frequency and back must recover the pitch
    /// across the whole playable range.
    #[test]
    fn frequency_round_trip() {
        let tuning = Tuning::default();
        for midi in 0..=127u8 {
            let pitch = Pitch::from_midi(midi);
            let index = tuning.pitch_index(tuning.frequency(pitch));
            assert!(
                (index - midi as f64).abs() < 1e-9,
                "round trip of pitch {} drifted to {}",
                midi,
                index
            );
        }
    }
}
