// midisynth -- renders MIDI performances through additive synthesis
// Copyright (C) 2026  The midisynth authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Turn a symbolic performance (timed note events plus tempo changes) into a
//! sampled waveform through additive harmonic synthesis.
//!
//! The pipeline: a typed [`event::Recording`] is paired up into the notes of
//! a [`piece::Piece`] by [`convert::piece_from_recording`], and a
//! [`synthesize::Synthesizer`] renders those notes into one mono buffer,
//! each as a windowed sum of decaying sinusoidal harmonics described by a
//! [`profile::HarmonicProfile`].

pub mod convert;
pub mod event;
pub mod note;
pub mod output;
pub mod piece;
pub mod profile;
pub mod synthesize;
pub mod tempo;
pub mod tuning;
