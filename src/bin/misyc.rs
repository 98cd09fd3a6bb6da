// midisynth -- renders MIDI performances through additive synthesis
// Copyright (C) 2026  The midisynth authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! `misyc` renders a built-in demo performance through the full
//! event-to-note-to-waveform pipeline. Reading recordings from disk is the
//! job of an external reader; this binary exists to hear the synthesizer.

use std::io;
use std::path::PathBuf;

use log::info;
use structopt::StructOpt;

use midisynth::convert::piece_from_recording;
use midisynth::event::{EventKind, Recording, TrackEvent};
use midisynth::note::{Pitch, Velocity};
use midisynth::output;
use midisynth::output::sox::SoxTarget;
use midisynth::profile::{Amplitudes, Decay, HarmonicProfile};
use midisynth::synthesize::Synthesizer;
use midisynth::tempo::Tempo;

#[derive(Debug, StructOpt)]
#[structopt(name = "misyc", about = "Rendering note events into sound")]
struct Opt {
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: usize,

    /// Output file (any sox-supported format). Music is played directly if not given.
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Sample rate of the rendered audio in Hz.
    #[structopt(long, default_value = "48000")]
    sample_rate: u32,

    /// Attack time of the note envelope in seconds.
    #[structopt(long, default_value = "0.01")]
    attack: f64,

    /// Number of harmonics per note.
    #[structopt(long, default_value = "16")]
    harmonics: usize,

    /// Amplitude distribution over the harmonics: constant | inverse-square.
    #[structopt(long, default_value = "inverse-square", parse(try_from_str = parse_amplitudes))]
    amplitudes: Amplitudes,

    /// Decay shape over frequency: constant | linear | logarithmic.
    #[structopt(long, default_value = "logarithmic")]
    decay: String,

    /// Frequency the decay parameters refer to, in Hz.
    #[structopt(long, default_value = "440")]
    reference_freq: f64,

    /// Decay rate at the reference frequency (also the rate of a constant decay).
    #[structopt(long, default_value = "0.5")]
    reference_value: f64,

    /// Slope of the linear/logarithmic decay over frequency.
    #[structopt(long, default_value = "0.001")]
    coefficient: f64,

    /// Peak amplitude after normalization.
    #[structopt(long, default_value = "0.5")]
    gain: f64,
}

fn parse_amplitudes(input: &str) -> Result<Amplitudes, String> {
    match input {
        "constant" => Ok(Amplitudes::Constant),
        "inverse-square" => Ok(Amplitudes::InverseSquare),
        other => Err(format!(
            "unknown amplitude distribution {:?}, expected constant or inverse-square",
            other
        )),
    }
}

fn parse_decay(opt: &Opt) -> Result<Decay, String> {
    match opt.decay.as_str() {
        "constant" => Ok(Decay::Constant {
            value: opt.reference_value,
        }),
        "linear" => Ok(Decay::Linear {
            reference_freq: opt.reference_freq,
            value_for_reference_freq: opt.reference_value,
            coefficient: opt.coefficient,
        }),
        "logarithmic" => Ok(Decay::Logarithmic {
            reference_freq: opt.reference_freq,
            value_for_reference_freq: opt.reference_value,
            coefficient: opt.coefficient,
        }),
        other => Err(format!(
            "unknown decay shape {:?}, expected constant, linear or logarithmic",
            other
        )),
    }
}

/// A little C major tune with a closing chord, written the way a file
/// reader would hand it over: deltas in ticks, tempo change up front.
fn demo_recording() -> Recording {
    let on = |delta_ticks, pitch, velocity| {
        TrackEvent::new(
            delta_ticks,
            EventKind::NoteOn {
                pitch: Pitch::from_midi(pitch),
                velocity: Velocity::from_midi(velocity),
            },
        )
    };
    let off = |delta_ticks, pitch| {
        TrackEvent::new(
            delta_ticks,
            EventKind::NoteOff {
                pitch: Pitch::from_midi(pitch),
            },
        )
    };

    let mut events = vec![TrackEvent::new(
        0,
        EventKind::SetTempo {
            tempo: Tempo::from_micros_per_beat(500_000),
        },
    )];
    // Ascending arpeggio, one quarter note each.
    for &(pitch, velocity) in &[(60, 96), (64, 88), (67, 88), (72, 100)] {
        events.push(on(0, pitch, velocity));
        events.push(off(480, pitch));
    }
    // Closing chord held for two beats.
    events.push(on(0, 60, 80));
    events.push(on(0, 64, 80));
    events.push(on(0, 67, 80));
    events.push(off(960, 60));
    events.push(off(0, 64));
    events.push(off(0, 67));

    Recording::single_track(480, events)
}

fn invalid(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, message)
}

fn main() -> io::Result<()> {
    let opt = Opt::from_args();

    let level = match opt.verbose {
        0 => log::Level::Info,
        1 => log::Level::Debug,
        _ => log::Level::Trace,
    };
    simple_logger::init_with_level(level).unwrap();

    let decay = parse_decay(&opt).map_err(invalid)?;
    let profile = HarmonicProfile::new(opt.harmonics, opt.amplitudes.clone(), decay)
        .map_err(|err| invalid(err.to_string()))?;

    let recording = demo_recording();
    let piece = piece_from_recording(&recording, Some("demo"), 1.0)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err.to_string()))?;
    info!(
        "converted {} events into {} notes ({:.2} seconds)",
        recording.tracks[0].len(),
        piece.notes.len(),
        piece.duration()
    );

    let synthesizer = Synthesizer::new(opt.attack, profile);
    let mut samples = synthesizer.synthesize(&piece, opt.sample_rate);
    output::normalize(&mut samples, opt.gain);

    let target = match &opt.output {
        None => SoxTarget::Play,
        Some(path) => SoxTarget::File(path),
    };
    output::sox::write_samples(opt.sample_rate, target, &samples)
}
