// midisynth -- renders MIDI performances through additive synthesis
// Copyright (C) 2026  The midisynth authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Definitions of pitches and velocities.

/// A "pitch" is just an index on the synthesizers keyboard.
/// This definition follows the MIDI standard where C4 corresponds to index 60.
///
/// Pitch indices range from 0 to 127. At 12 semitones per octave,
/// this corresponds to a dynamic range of more than 10 octaves,
/// or a frequency ratio of about 1625 between the lowest and the
/// highest frequency.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Pitch(u8);

impl Pitch {
    /// Wrap a MIDI note number.
    ///
    /// # Panics
    ///
    /// - If the number does not fit the MIDI note range.
    ///
    /// # Examples
    ///
    /// ```
    /// use midisynth::note::Pitch;
    ///
    /// assert_eq!(Pitch::from_midi(69).to_midi(), 69);
    /// ```
    pub fn from_midi(midi_note: u8) -> Pitch {
        assert!(midi_note < 128, "MIDI only has notes 0 - 127");
        Pitch(midi_note)
    }

    pub fn try_from_midi(midi_note: i64) -> Option<Pitch> {
        if midi_note >= 0 && midi_note < 128 {
            Some(Pitch(midi_note as u8))
        } else {
            None
        }
    }

    pub fn to_midi(self) -> u8 {
        self.0
    }

    /// Return the pitch index in a signed type, convenient for further calculations.
    pub fn index(self) -> i32 {
        self.0 as i32
    }
}

/// The velocity of a note indicates how hard/fast the key was pressed down.
/// Follows the MIDI standard, ranging from 0 to 127.
///
/// A velocity of zero carries note-off semantics in running event streams,
/// see [`crate::event::EventKind`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct Velocity(u8);

impl Velocity {
    pub const MAX: Velocity = Velocity(127);
    pub const MIN: Velocity = Velocity(0);

    /// Wrap a MIDI velocity value.
    ///
    /// # Panics
    ///
    /// - If the value does not fit the MIDI velocity range.
    pub fn from_midi(velocity: u8) -> Velocity {
        assert!(velocity < 128, "MIDI only has velocities 0 - 127");
        Velocity(velocity)
    }

    pub fn try_from_midi(velocity: i64) -> Option<Velocity> {
        if velocity >= 0 && velocity < 128 {
            Some(Velocity(velocity as u8))
        } else {
            None
        }
    }

    pub fn to_midi(self) -> u8 {
        self.0
    }

    /// A velocity of zero releases the key instead of pressing it.
    pub fn is_silent(self) -> bool {
        self.0 == 0
    }

    /// The amplitude a note of this velocity starts out with,
    /// a linear mapping of the 128 velocity steps onto `[0, 1)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use midisynth::note::Velocity;
    ///
    /// assert_eq!(Velocity::from_midi(80).amplitude(), 0.625);
    /// assert_eq!(Velocity::from_midi(64).amplitude(), 0.5);
    /// ```
    pub fn amplitude(self) -> f64 {
        self.0 as f64 / 128.0
    }
}
