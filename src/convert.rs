// midisynth -- renders MIDI performances through additive synthesis
// Copyright (C) 2026  The midisynth authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Reconstructing notes from a raw event stream.
//!
//! The converter makes a single forward pass over the track, accumulating
//! tick deltas into an absolute position and pairing each onset with the
//! next offset of the same pitch through a pitch-keyed map of pending
//! onsets. Tempo events mutate the [`TempoMap`] the moment they are seen,
//! so every tick-to-seconds conversion after them uses the new tempo.

use std::collections::HashMap;

use log::warn;
use snafu::Snafu;

use crate::event::{EventKind, Recording, TrackEvent};
use crate::note::{Pitch, Velocity};
use crate::piece::{Note, Piece};
use crate::tempo::TempoMap;

/// MIDI controller number of the sustain pedal.
pub const SUSTAIN_PEDAL: u8 = 64;

/// Ways a recording can resist being turned into a piece.
///
/// All of these abort the conversion as a whole; no partial piece is ever
/// returned.
#[derive(Debug, PartialEq, Snafu)]
pub enum ConvertError {
    /// Only single-track recordings are supported.
    #[snafu(display("expected a recording with exactly one track, got {}", tracks))]
    UnsupportedFormat { tracks: usize },

    /// The track uses the sustain pedal, whose semantics (holding notes past
    /// their release) are not modeled.
    #[snafu(display("the recording uses the sustain pedal, which is not implemented"))]
    NotImplemented,

    /// An onset never found its offset before the stream ended.
    #[snafu(display(
        "pitch {} pressed at {:.3}s is never released",
        pitch.to_midi(),
        start_seconds
    ))]
    MalformedEvent { pitch: Pitch, start_seconds: f64 },
}

/// An onset whose offset has not been seen yet.
struct PendingOnset {
    velocity: Velocity,
    start_seconds: f64,
    /// Position in onset-discovery order, so finished notes can be emitted
    /// in the order the keys were pressed.
    order: usize,
}

/// Turn a single-track recording into a [`Piece`].
///
/// Fails with [`ConvertError::NotImplemented`] if the track touches the
/// sustain pedal anywhere, even before the first note. Control changes for
/// other controllers are ignored with a warning.
///
/// Overlapping onsets of the same pitch (a second press before the first
/// release) are not supported; the later onset silently takes over and
/// callers must not rely on what happens to the earlier one.
///
/// # Examples
///
/// ```
/// use midisynth::convert::piece_from_recording;
/// use midisynth::event::{EventKind, Recording, TrackEvent};
/// use midisynth::note::{Pitch, Velocity};
/// use midisynth::tempo::Tempo;
///
/// let recording = Recording::single_track(480, vec![
///     TrackEvent::new(0, EventKind::SetTempo { tempo: Tempo::from_micros_per_beat(500_000) }),
///     TrackEvent::new(0, EventKind::NoteOn {
///         pitch: Pitch::from_midi(60),
///         velocity: Velocity::from_midi(100),
///     }),
///     TrackEvent::new(960, EventKind::NoteOff { pitch: Pitch::from_midi(60) }),
/// ]);
/// let piece = piece_from_recording(&recording, Some("example"), 0.0).unwrap();
/// assert_eq!(piece.notes.len(), 1);
/// assert_eq!(piece.notes[0].start_seconds, 0.0);
/// assert_eq!(piece.notes[0].end_seconds, 1.0);
/// ```
pub fn piece_from_recording(
    recording: &Recording,
    name: Option<&str>,
    final_rest: f64,
) -> Result<Piece, ConvertError> {
    if recording.tracks.len() != 1 {
        return Err(ConvertError::UnsupportedFormat {
            tracks: recording.tracks.len(),
        });
    }
    let track = &recording.tracks[0];

    check_pedal(track)?;

    let mut tempo_map = TempoMap::new();
    let mut absolute_ticks: u64 = 0;
    let mut pending: HashMap<Pitch, PendingOnset> = HashMap::new();
    let mut finished: Vec<(usize, Note)> = Vec::new();
    let mut onset_count = 0;

    for event in track {
        absolute_ticks += event.delta_ticks as u64;
        match event.kind {
            EventKind::SetTempo { tempo } => tempo_map.set_tempo(tempo),
            EventKind::ControlChange { controller, value } => {
                // Pedal use was rejected up front, everything else has no
                // effect on note timing.
                warn!(
                    "ignoring control change (controller {}, value {})",
                    controller, value
                );
            }
            EventKind::NoteOn { pitch, velocity } if !velocity.is_silent() => {
                let onset = PendingOnset {
                    velocity,
                    start_seconds: tempo_map.seconds_at(absolute_ticks, recording.ticks_per_beat),
                    order: onset_count,
                };
                onset_count += 1;
                if pending.insert(pitch, onset).is_some() {
                    warn!(
                        "pitch {} pressed again before its release, dropping the earlier press",
                        pitch.to_midi()
                    );
                }
            }
            // Explicit release, or the velocity-zero encoding of one.
            EventKind::NoteOn { pitch, .. } | EventKind::NoteOff { pitch } => {
                if let Some(onset) = pending.remove(&pitch) {
                    let end_seconds =
                        tempo_map.seconds_at(absolute_ticks, recording.ticks_per_beat);
                    finished.push((
                        onset.order,
                        Note::new(pitch, onset.velocity, onset.start_seconds, end_seconds),
                    ));
                }
                // A release without a matching press carries no information.
            }
        }
    }

    if let Some((pitch, onset)) = pending
        .into_iter()
        .min_by_key(|(_, onset)| onset.order)
    {
        return Err(ConvertError::MalformedEvent {
            pitch,
            start_seconds: onset.start_seconds,
        });
    }

    finished.sort_by_key(|(order, _)| *order);
    let mut piece = Piece::new(name.map(String::from), final_rest);
    piece.notes = finished.into_iter().map(|(_, note)| note).collect();
    Ok(piece)
}

/// Reject tracks that use the sustain pedal, no matter where.
fn check_pedal(track: &[TrackEvent]) -> Result<(), ConvertError> {
    let uses_pedal = track.iter().any(|event| {
        matches!(
            event.kind,
            EventKind::ControlChange {
                controller: SUSTAIN_PEDAL,
                ..
            }
        )
    });
    if uses_pedal {
        Err(ConvertError::NotImplemented)
    } else {
        Ok(())
    }
}
