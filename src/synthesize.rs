// midisynth -- renders MIDI performances through additive synthesis
// Copyright (C) 2026  The midisynth authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Turning a piece into samples.
//!
//! Every note is rendered on its own as a windowed sum of decaying
//! sinusoidal harmonics and then overlap-added into the shared output
//! buffer. Rendering is a deterministic offline batch: notes only ever add
//! into the buffer, so their order does not matter.

use std::f64::consts::PI;

use log::{debug, info};

use crate::piece::{Note, Piece};
use crate::profile::HarmonicProfile;
use crate::tuning::Tuning;

/// Renders the notes of a piece with a fixed harmonic profile.
pub struct Synthesizer {
    /// Seconds the envelope takes to ramp up at the onset (and down at the
    /// end) of each note. Strictly positive.
    attack_time: f64,
    /// Reference pitch and frequency for all rendered notes.
    tuning: Tuning,
    /// Starting amplitudes and decay rates of the harmonics.
    profile: HarmonicProfile,
}

impl Synthesizer {
    pub fn new(attack_time: f64, profile: HarmonicProfile) -> Self {
        assert!(attack_time > 0.0, "the attack must take a positive amount of time");
        Synthesizer {
            attack_time,
            tuning: Tuning::default(),
            profile,
        }
    }

    /// Render the whole piece into a fresh mono buffer at `sample_rate` Hz.
    ///
    /// The buffer is sized from [`Piece::duration`], so every note fits by
    /// construction. No normalization happens here; the raw superposition is
    /// returned and scaling is left to the output stage.
    pub fn synthesize(&self, piece: &Piece, sample_rate: u32) -> Vec<f64> {
        let n_signal = (sample_rate as f64 * piece.duration()) as usize + 1;
        let mut signal = vec![0.0; n_signal];

        for note in &piece.notes {
            self.render_note(note, sample_rate, &mut signal);
        }

        info!(
            "rendered {} notes into {} samples ({:.2} seconds at {} Hz)",
            piece.notes.len(),
            n_signal,
            piece.duration(),
            sample_rate
        );
        signal
    }

    /// Render one note and overlap-add it into `signal`.
    fn render_note(&self, note: &Note, sample_rate: u32, signal: &mut [f64]) {
        let fs = sample_rate as f64;
        let n_start = (note.start_seconds * fs) as usize;
        let n_length = (note.duration() * fs) as usize;
        if n_length == 0 {
            return;
        }

        let fundamental = self.tuning.frequency(note.pitch);
        let frequencies: Vec<f64> = (1..=self.profile.number_harmonics())
            .map(|h| fundamental * h as f64)
            .collect();
        let decay_rates = self.profile.decay_rates(&frequencies);
        let amplitudes = self.profile.amplitudes();
        let starting_amplitude = note.velocity.amplitude();

        debug!(
            "note {} at sample {} for {} samples ({} harmonics from {:.2} Hz)",
            note.pitch.to_midi(),
            n_start,
            n_length,
            frequencies.len(),
            fundamental
        );

        let window = tukey(n_length, 2.0 * self.attack_time * fs / n_length as f64);

        for i in 0..n_length {
            // Guard against the floor rounding of start and length
            // conspiring to point one sample past the buffer.
            let index = n_start + i;
            if index >= signal.len() {
                break;
            }

            let t = i as f64 / fs;
            let mut sample = 0.0;
            for ((frequency, decay_rate), amplitude) in
                frequencies.iter().zip(&decay_rates).zip(amplitudes)
            {
                sample += amplitude
                    * starting_amplitude
                    * (-2.0 * PI * decay_rate * t).exp()
                    * (2.0 * PI * frequency * t).sin();
            }
            signal[index] += window[i] * sample;
        }
    }
}

/// A Tukey (tapered cosine) window of the given length.
///
/// `alpha` is the fraction of the window spent inside the two cosine
/// tapers; `alpha <= 0` degenerates to a rectangular window, `alpha >= 1`
/// to a Hann window. Matches `scipy.signal.windows.tukey`.
pub fn tukey(length: usize, alpha: f64) -> Vec<f64> {
    if length <= 1 {
        return vec![1.0; length];
    }
    if alpha <= 0.0 {
        return vec![1.0; length];
    }
    let alpha = alpha.min(1.0);

    let span = (length - 1) as f64;
    let width = (alpha * span / 2.0).floor() as usize;
    (0..length)
        .map(|n| {
            let x = n as f64;
            if n <= width {
                // Rising taper.
                0.5 * (1.0 + (PI * (-1.0 + 2.0 * x / (alpha * span))).cos())
            } else if n < length - width - 1 {
                1.0
            } else {
                // Falling taper, mirror of the rising one.
                0.5 * (1.0 + (PI * (-2.0 / alpha + 1.0 + 2.0 * x / (alpha * span))).cos())
            }
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::note::{Pitch, Velocity};
    use crate::profile::{Amplitudes, Decay};

    fn plain_profile(number_harmonics: usize) -> HarmonicProfile {
        HarmonicProfile::new(
            number_harmonics,
            Amplitudes::InverseSquare,
            Decay::Constant { value: 2.0 },
        )
        .unwrap()
    }

    #[test]
    fn tukey_tapers_to_zero_at_the_edges() {
        let window = tukey(101, 0.5);
        assert_eq!(window.len(), 101);
        assert_eq!(window[0], 0.0);
        assert!(window[100].abs() < 1e-12);
        // The plateau in the middle stays at one.
        assert_eq!(window[50], 1.0);
        // Symmetry between rise and fall.
        for i in 0..50 {
            assert!(
                (window[i] - window[100 - i]).abs() < 1e-9,
                "window asymmetric at {}",
                i
            );
        }
    }

    #[test]
    fn tukey_degenerate_alphas() {
        assert_eq!(tukey(8, 0.0), vec![1.0; 8]);
        assert_eq!(tukey(8, -1.0), vec![1.0; 8]);
        // alpha >= 1 is a Hann window: no plateau, zero at both ends.
        let hann = tukey(9, 1.5);
        assert_eq!(hann[0], 0.0);
        assert!((hann[4] - 1.0).abs() < 1e-12);
        assert!(hann[8].abs() < 1e-12);
    }

    #[test]
    fn rendered_note_is_contained_in_its_sample_range() {
        let mut piece = Piece::new(None, 0.5);
        piece.notes.push(Note::new(
            Pitch::from_midi(69),
            Velocity::from_midi(100),
            0.25,
            0.75,
        ));

        let sample_rate = 8000;
        let synth = Synthesizer::new(0.01, plain_profile(4));
        let signal = synth.synthesize(&piece, sample_rate);

        let n_start = (0.25 * sample_rate as f64) as usize;
        let n_length = (0.5 * sample_rate as f64) as usize;
        assert_eq!(signal.len(), (1.25 * sample_rate as f64) as usize + 1);

        for (i, sample) in signal.iter().enumerate() {
            if i < n_start || i >= n_start + n_length {
                assert_eq!(*sample, 0.0, "sample {} outside the note is not silent", i);
            }
        }
        let peak = signal.iter().fold(0.0f64, |acc, s| acc.max(s.abs()));
        assert!(peak > 0.0, "the note must be audible");
    }

    #[test]
    fn louder_velocity_renders_louder() {
        let sample_rate = 8000;
        let synth = Synthesizer::new(0.01, plain_profile(4));

        let peak_of = |velocity: u8| {
            let mut piece = Piece::new(None, 0.0);
            piece.notes.push(Note::new(
                Pitch::from_midi(60),
                Velocity::from_midi(velocity),
                0.0,
                0.5,
            ));
            synth
                .synthesize(&piece, sample_rate)
                .iter()
                .fold(0.0f64, |acc, s| acc.max(s.abs()))
        };

        assert!(peak_of(127) > peak_of(64));
        assert!(peak_of(64) > peak_of(16));
    }

    #[test]
    fn superposition_is_additive() {
        // Two copies of the same note must render exactly twice the signal.
        let note = Note::new(Pitch::from_midi(60), Velocity::from_midi(64), 0.0, 0.25);
        let sample_rate = 8000;
        let synth = Synthesizer::new(0.01, plain_profile(2));

        let mut single = Piece::new(None, 0.0);
        single.notes.push(note.clone());
        let mut double = Piece::new(None, 0.0);
        double.notes.push(note.clone());
        double.notes.push(note);

        let signal_single = synth.synthesize(&single, sample_rate);
        let signal_double = synth.synthesize(&double, sample_rate);
        for (one, two) in signal_single.iter().zip(&signal_double) {
            assert!((2.0 * one - two).abs() < 1e-12);
        }
    }
}
