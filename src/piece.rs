// midisynth -- renders MIDI performances through additive synthesis
// Copyright (C) 2026  The midisynth authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Notes with absolute timing, and the piece that collects them.

use std::fmt;

use crate::note::{Pitch, Velocity};

/// A key press placed on the wall clock: the converter has already resolved
/// ticks and tempo changes into seconds at this point.
#[derive(Clone, Debug, PartialEq)]
pub struct Note {
    /// Which key was pressed.
    pub pitch: Pitch,
    /// How hard the key was pressed, fixed at the onset.
    pub velocity: Velocity,
    /// Time the key was pressed, in seconds since the start of the piece.
    pub start_seconds: f64,
    /// Time the key was released, always after `start_seconds`.
    pub end_seconds: f64,
}

impl Note {
    pub fn new(pitch: Pitch, velocity: Velocity, start_seconds: f64, end_seconds: f64) -> Self {
        debug_assert!(
            end_seconds > start_seconds,
            "a note must end after it started"
        );
        Note {
            pitch,
            velocity,
            start_seconds,
            end_seconds,
        }
    }

    /// How long the key was held, derived from start and end.
    pub fn duration(&self) -> f64 {
        self.end_seconds - self.start_seconds
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "pitch {}, start: {:.3}, end: {:.3}, duration: {:.3}",
            self.pitch.to_midi(),
            self.start_seconds,
            self.end_seconds,
            self.duration()
        )
    }
}

/// An ordered collection of notes plus a bit of metadata.
///
/// The notes appear in the order their onsets were discovered in the event
/// stream, which is not necessarily sorted by start time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Piece {
    /// Label used for diagnostics only, never by the synthesis itself.
    pub name: Option<String>,
    /// Silence appended after the last note, in seconds.
    pub final_rest: f64,
    /// The notes of the piece.
    pub notes: Vec<Note>,
}

impl Piece {
    pub fn new(name: Option<String>, final_rest: f64) -> Self {
        debug_assert!(final_rest >= 0.0, "the final rest cannot rewind time");
        Piece {
            name,
            final_rest,
            notes: Vec::new(),
        }
    }

    /// Total duration of the piece in seconds: the latest note end
    /// (zero if there are no notes) plus the final rest.
    ///
    /// # Examples
    ///
    /// ```
    /// use midisynth::note::{Pitch, Velocity};
    /// use midisynth::piece::{Note, Piece};
    ///
    /// let mut piece = Piece::new(Some("example".into()), 1.0);
    /// assert_eq!(piece.duration(), 1.0);
    ///
    /// piece.notes.push(Note::new(Pitch::from_midi(69), Velocity::from_midi(80), 0.0, 1.0));
    /// piece.notes.push(Note::new(Pitch::from_midi(71), Velocity::from_midi(100), 0.5, 1.4));
    /// assert_eq!(piece.duration(), 2.4);
    /// ```
    pub fn duration(&self) -> f64 {
        let last_end = self
            .notes
            .iter()
            .map(|note| note.end_seconds)
            .fold(0.0, f64::max);
        last_end + self.final_rest
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Piece: {}", self.name.as_deref().unwrap_or("[no name]"))?;
        writeln!(f, "Notes:")?;
        for note in &self.notes {
            writeln!(f, "{}", note)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn duration_of_empty_piece_is_the_final_rest() {
        assert_eq!(Piece::new(None, 0.0).duration(), 0.0);
        assert_eq!(Piece::new(None, 2.5).duration(), 2.5);
    }

    #[test]
    fn duration_ignores_note_order() {
        let mut piece = Piece::new(None, 0.25);
        // Onset order differs from start-time order on purpose.
        piece
            .notes
            .push(Note::new(Pitch::from_midi(72), Velocity::MAX, 1.0, 2.0));
        piece
            .notes
            .push(Note::new(Pitch::from_midi(60), Velocity::MAX, 0.0, 3.0));
        assert_eq!(piece.duration(), 3.25);
    }
}
