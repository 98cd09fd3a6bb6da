// midisynth -- renders MIDI performances through additive synthesis
// Copyright (C) 2026  The midisynth authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! The typed event stream a recording consists of.
//!
//! Parsing the binary MIDI file format into these types is the job of an
//! external reader; this crate starts from the typed stream.

use crate::note::{Pitch, Velocity};
use crate::tempo::Tempo;

/// One event of a track, timed relative to its predecessor.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TrackEvent {
    /// Ticks elapsed since the previous event of the track.
    pub delta_ticks: u32,
    /// What happened after that delay.
    pub kind: EventKind,
}

impl TrackEvent {
    pub fn new(delta_ticks: u32, kind: EventKind) -> Self {
        TrackEvent { delta_ticks, kind }
    }
}

/// The kinds of events this crate understands.
///
/// A `NoteOn` with velocity zero is semantically a `NoteOff` for the same
/// pitch; running-status MIDI encoders emit note ends that way.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EventKind {
    /// The key for `pitch` was pressed down.
    NoteOn { pitch: Pitch, velocity: Velocity },
    /// The key for `pitch` was released.
    NoteOff { pitch: Pitch },
    /// A controller (pedal, modulation wheel, ...) changed its value.
    ControlChange { controller: u8, value: u8 },
    /// All subsequent ticks are measured against this tempo.
    SetTempo { tempo: Tempo },
}

/// A complete recording as handed over by a file reader: a tick resolution
/// and the event streams of all tracks it contained.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Recording {
    /// How many ticks make up one beat. Strictly positive.
    pub ticks_per_beat: u32,
    /// The tracks of the recording, each an ordered event stream.
    pub tracks: Vec<Vec<TrackEvent>>,
}

impl Recording {
    /// Convenience constructor for the only supported shape, a single track.
    pub fn single_track(ticks_per_beat: u32, events: Vec<TrackEvent>) -> Self {
        assert!(ticks_per_beat > 0, "a beat must consist of at least one tick");
        Recording {
            ticks_per_beat,
            tracks: vec![events],
        }
    }
}
