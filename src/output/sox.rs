// midisynth -- renders MIDI performances through additive synthesis
// Copyright (C) 2026  The midisynth authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Easy interface for getting sound out of the process using a sox subprocess.

use std::io;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Where the samples should end up.
pub enum SoxTarget<'a> {
    /// Play directly on the default speakers via `play`.
    Play,
    /// Encode into any sox-supported format based on the file extension.
    File(&'a Path),
}

/// Spawn a sox subprocess reading raw mono `f64` samples on stdin and hand
/// its stdin to the callback.
pub fn with_sox<R, F: FnOnce(&mut dyn io::Write) -> io::Result<R>>(
    sample_rate: u32,
    target: SoxTarget,
    callback: F,
) -> io::Result<R> {
    let sample_rate_str = format!("{}", sample_rate);
    let input_args = &[
        "-R", // make the output reproducible
        "--channels",
        "1",
        "--rate",
        &sample_rate_str,
        "--type",
        "f64",
        "/dev/stdin",
    ];

    let mut player = match target {
        SoxTarget::Play => Command::new("play")
            .args(input_args)
            .stdin(Stdio::piped())
            .spawn()?,
        SoxTarget::File(path) => Command::new("sox")
            .args(input_args)
            .arg(path)
            .stdin(Stdio::piped())
            .spawn()?,
    };

    let mut audio_stream = player.stdin.take().expect("Used stdin(Stdio::piped())");

    let result = callback(&mut audio_stream);

    drop(audio_stream);
    player.wait()?;

    result
}

/// Write a whole sample buffer to the target in one go.
pub fn write_samples(sample_rate: u32, target: SoxTarget, samples: &[f64]) -> io::Result<()> {
    with_sox(sample_rate, target, |audio_stream| {
        let mut byte_buffer = vec![0u8; samples.len() * 8];
        let n = super::copy_f64_bytes(samples, &mut byte_buffer);
        debug_assert_eq!(n, samples.len());
        audio_stream.write_all(&byte_buffer)
    })
}
