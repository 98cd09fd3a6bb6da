// midisynth -- renders MIDI performances through additive synthesis
// Copyright (C) 2026  The midisynth authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Tempo values and the conversion from ticks to wall-clock seconds.

/// A tempo, stored as microseconds per beat like MIDI does on the wire.
///
/// # Examples
///
/// ```
/// use midisynth::tempo::Tempo;
/// assert_eq!(Tempo::from_micros_per_beat(500_000).bpm(), 120.0);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Tempo(u32);

impl Tempo {
    /// Wrap a microseconds-per-beat value.
    ///
    /// # Panics
    ///
    /// - If the value is zero.
    pub fn from_micros_per_beat(micros_per_beat: u32) -> Tempo {
        assert!(micros_per_beat > 0, "a beat must take a positive amount of time");
        Tempo(micros_per_beat)
    }

    pub fn micros_per_beat(self) -> u32 {
        self.0
    }

    /// The equivalent tempo in beats per minute.
    pub fn bpm(self) -> f64 {
        60_000_000.0 / self.0 as f64
    }
}

/// The tempo assumed before any tempo event was seen.
///
/// Note that this is *twice* the conventional MIDI default of 500 000 µs per
/// beat, halving the effective default to 60 BPM. The reference recordings
/// this crate was written for play at the intended speed this way, so the
/// quirk is kept.
impl Default for Tempo {
    fn default() -> Self {
        Tempo(1_000_000)
    }
}

/// Elapsed seconds of `ticks` ticks at a fixed tempo.
///
/// # Examples
///
/// ```
/// use midisynth::tempo::ticks_to_seconds;
/// // One beat at 120 BPM takes half a second.
/// assert_eq!(ticks_to_seconds(480, 480, 120.0), 0.5);
/// ```
pub fn ticks_to_seconds(ticks: u64, ticks_per_beat: u32, bpm: f64) -> f64 {
    (ticks as f64 / ticks_per_beat as f64) / (bpm / 60.0)
}

/// Tracks which tempo is currently active while an event stream is scanned.
///
/// The tempo is threaded explicitly through the scan instead of living in
/// ambient state, so a conversion can be replayed or tested in isolation.
///
/// Caveat: [`TempoMap::seconds_at`] converts an *absolute* tick position using only the tempo active at the
/// moment of conversion, not a piecewise integral over all tempo segments
/// crossed on the way. The result is only exact when no tempo change lies
/// between tick 0 and the converted tick.
#[derive(Debug, Default)]
pub struct TempoMap {
    current: Tempo,
}

impl TempoMap {
    pub fn new() -> Self {
        TempoMap::default()
    }

    /// The tempo events after this point are converted with.
    pub fn current(&self) -> Tempo {
        self.current
    }

    /// Make `tempo` the active tempo for all subsequent conversions.
    pub fn set_tempo(&mut self, tempo: Tempo) {
        self.current = tempo;
    }

    /// Convert an absolute tick position into seconds at the active tempo.
    pub fn seconds_at(&self, ticks: u64, ticks_per_beat: u32) -> f64 {
        ticks_to_seconds(ticks, ticks_per_beat, self.current.bpm())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn seconds_scale_linearly_in_ticks() {
        let tpb = 480;
        let bpm = 97.0;
        let base = ticks_to_seconds(123, tpb, bpm);
        for k in 1..=16 {
            let scaled = ticks_to_seconds(123 * k, tpb, bpm);
            assert!(
                (scaled - base * k as f64).abs() < 1e-9,
                "scaling ticks by {} must scale seconds by {}",
                k,
                k
            );
        }
    }

    #[test]
    fn default_tempo_is_sixty_bpm() {
        assert_eq!(Tempo::default().bpm(), 60.0);
    }

    #[test]
    fn tempo_map_follows_tempo_events() {
        let mut map = TempoMap::new();
        assert_eq!(map.seconds_at(480, 480), 1.0);

        map.set_tempo(Tempo::from_micros_per_beat(500_000));
        assert_eq!(map.current().bpm(), 120.0);
        assert_eq!(map.seconds_at(480, 480), 0.5);
    }
}
