// midisynth -- renders MIDI performances through additive synthesis
// Copyright (C) 2026  The midisynth authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Harmonic profiles: how loud each harmonic starts and how fast it dies.
//!
//! Both halves come as a closed set of variants that carry their parameters
//! statically, so a profile that constructs at all is a profile that can be
//! evaluated. The only thing left to validate at run time is the length of
//! explicitly supplied vectors.

use snafu::Snafu;

/// Errors raised while constructing a [`HarmonicProfile`].
#[derive(Debug, PartialEq, Snafu)]
pub enum ProfileError {
    /// An explicitly supplied vector does not have one entry per harmonic.
    #[snafu(display("expected a vector of length {}, got {}", expected, actual))]
    ShapeMismatch { expected: usize, actual: usize },
}

/// How the starting amplitude is distributed over the harmonics.
#[derive(Clone, Debug, PartialEq)]
pub enum Amplitudes {
    /// Every harmonic starts at full amplitude.
    Constant,
    /// Harmonic `h` starts at `1 / h²`, a natural spectral rolloff.
    InverseSquare,
    /// Explicit per-harmonic amplitudes, one entry per harmonic.
    Explicit(Vec<f64>),
}

impl Amplitudes {
    /// Produce the amplitude vector for `number_harmonics` harmonics.
    fn materialize(&self, number_harmonics: usize) -> Result<Vec<f64>, ProfileError> {
        match self {
            Amplitudes::Constant => Ok(vec![1.0; number_harmonics]),
            Amplitudes::InverseSquare => Ok((1..=number_harmonics)
                .map(|h| 1.0 / (h * h) as f64)
                .collect()),
            Amplitudes::Explicit(values) => {
                if values.len() != number_harmonics {
                    Err(ProfileError::ShapeMismatch {
                        expected: number_harmonics,
                        actual: values.len(),
                    })
                } else {
                    Ok(values.clone())
                }
            }
        }
    }
}

/// How fast a harmonic of a given frequency decays, in Hz
/// (the rate feeds `exp(-2π · rate · t)` during synthesis).
#[derive(Clone, Debug, PartialEq)]
pub enum Decay {
    /// Externally supplied per-harmonic rates, assumed to already be keyed
    /// to each harmonic's frequency. Returned unchanged.
    Array(Vec<f64>),
    /// The same rate for every harmonic, regardless of frequency.
    Constant { value: f64 },
    /// `coefficient · (f - reference_freq) + value_for_reference_freq`.
    Linear {
        reference_freq: f64,
        value_for_reference_freq: f64,
        coefficient: f64,
    },
    /// `value_for_reference_freq · 2^(coefficient · (f - reference_freq))`.
    Logarithmic {
        reference_freq: f64,
        value_for_reference_freq: f64,
        coefficient: f64,
    },
}

impl Decay {
    /// Evaluate the decay rate for every frequency in `frequencies`.
    pub fn rates(&self, frequencies: &[f64]) -> Vec<f64> {
        match self {
            Decay::Array(values) => values.clone(),
            Decay::Constant { value } => vec![*value; frequencies.len()],
            Decay::Linear {
                reference_freq,
                value_for_reference_freq,
                coefficient,
            } => frequencies
                .iter()
                .map(|f| coefficient * (f - reference_freq) + value_for_reference_freq)
                .collect(),
            Decay::Logarithmic {
                reference_freq,
                value_for_reference_freq,
                coefficient,
            } => frequencies
                .iter()
                .map(|f| value_for_reference_freq * 2.0f64.powf(coefficient * (f - reference_freq)))
                .collect(),
        }
    }
}

/// The timbre of the instrument: number of harmonics, their starting
/// amplitudes and their decay behavior. Immutable once constructed.
#[derive(Clone, Debug, PartialEq)]
pub struct HarmonicProfile {
    number_harmonics: usize,
    amplitudes: Vec<f64>,
    decay: Decay,
}

impl HarmonicProfile {
    /// Build a profile for `number_harmonics` harmonics.
    ///
    /// Fails with [`ProfileError::ShapeMismatch`] if an explicit amplitude
    /// vector or a [`Decay::Array`] does not have exactly one entry per
    /// harmonic.
    ///
    /// # Examples
    ///
    /// ```
    /// use midisynth::profile::{Amplitudes, Decay, HarmonicProfile};
    ///
    /// let profile = HarmonicProfile::new(
    ///     4,
    ///     Amplitudes::InverseSquare,
    ///     Decay::Constant { value: 3.0 },
    /// ).unwrap();
    /// assert_eq!(profile.amplitudes(), &[1.0, 0.25, 1.0 / 9.0, 0.0625]);
    /// ```
    pub fn new(
        number_harmonics: usize,
        amplitudes: Amplitudes,
        decay: Decay,
    ) -> Result<Self, ProfileError> {
        assert!(number_harmonics > 0, "an instrument needs at least one harmonic");
        if let Decay::Array(values) = &decay {
            if values.len() != number_harmonics {
                return Err(ProfileError::ShapeMismatch {
                    expected: number_harmonics,
                    actual: values.len(),
                });
            }
        }
        Ok(HarmonicProfile {
            number_harmonics,
            amplitudes: amplitudes.materialize(number_harmonics)?,
            decay,
        })
    }

    pub fn number_harmonics(&self) -> usize {
        self.number_harmonics
    }

    /// The starting amplitude of each harmonic, one entry per harmonic.
    pub fn amplitudes(&self) -> &[f64] {
        &self.amplitudes
    }

    /// The decay rate of each harmonic, given the harmonic frequencies.
    pub fn decay_rates(&self, frequencies: &[f64]) -> Vec<f64> {
        debug_assert_eq!(frequencies.len(), self.number_harmonics);
        self.decay.rates(frequencies)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn inverse_square_starts_at_one_and_strictly_decreases() {
        let profile = HarmonicProfile::new(
            16,
            Amplitudes::InverseSquare,
            Decay::Constant { value: 1.0 },
        )
        .unwrap();
        let amplitudes = profile.amplitudes();
        assert_eq!(amplitudes[0], 1.0);
        for pair in amplitudes.windows(2) {
            assert!(pair[1] < pair[0], "amplitudes must strictly decrease");
        }
    }

    #[test]
    fn constant_amplitudes_are_all_one() {
        let profile =
            HarmonicProfile::new(5, Amplitudes::Constant, Decay::Constant { value: 1.0 }).unwrap();
        assert_eq!(profile.amplitudes(), &[1.0; 5]);
    }

    #[test]
    fn logarithmic_decay_is_exact_at_the_reference() {
        let decay = Decay::Logarithmic {
            reference_freq: 440.0,
            value_for_reference_freq: 0.5,
            coefficient: 0.001,
        };
        let rates = decay.rates(&[440.0, 880.0]);
        assert_eq!(rates[0], 0.5);
        assert!(rates[1] > rates[0], "higher frequencies decay faster");
    }

    #[test]
    fn linear_decay_passes_through_the_reference() {
        let decay = Decay::Linear {
            reference_freq: 440.0,
            value_for_reference_freq: 2.0,
            coefficient: 0.01,
        };
        let rates = decay.rates(&[440.0, 540.0]);
        assert_eq!(rates[0], 2.0);
        assert!((rates[1] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn array_decay_is_returned_unchanged() {
        let decay = Decay::Array(vec![1.0, 2.0, 3.0]);
        assert_eq!(decay.rates(&[100.0, 200.0, 300.0]), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn wrong_length_vectors_are_rejected() {
        let amplitude_error = HarmonicProfile::new(
            4,
            Amplitudes::Explicit(vec![1.0, 0.5]),
            Decay::Constant { value: 1.0 },
        );
        assert_eq!(
            amplitude_error,
            Err(ProfileError::ShapeMismatch {
                expected: 4,
                actual: 2
            })
        );

        let decay_error =
            HarmonicProfile::new(4, Amplitudes::Constant, Decay::Array(vec![1.0; 3]));
        assert_eq!(
            decay_error,
            Err(ProfileError::ShapeMismatch {
                expected: 4,
                actual: 3
            })
        );
    }
}
