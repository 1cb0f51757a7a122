//! Tiny PCM synthesizer for the game's two sound cues.

use std::f32::consts::PI;

pub const SAMPLE_RATE: u32 = 44_100;

/// Short high blip played when food is eaten.
pub fn eat_tone() -> Vec<u8> {
    sine_wav(900.0, 0.12, 0.5)
}

/// Low tone played once when the run ends.
pub fn game_over_tone() -> Vec<u8> {
    sine_wav(200.0, 0.4, 0.5)
}

/// A mono 16-bit little-endian WAV file containing a sine wave.
pub fn sine_wav(frequency: f32, seconds: f32, volume: f32) -> Vec<u8> {
    let samples = (SAMPLE_RATE as f32 * seconds.max(0.0)).round() as u32;
    let volume = volume.clamp(0.0, 1.0);
    let data_len = samples * 2;

    let mut wav = Vec::with_capacity(44 + data_len as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&1u16.to_le_bytes()); // mono
    wav.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    wav.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes());
    wav.extend_from_slice(&2u16.to_le_bytes());
    wav.extend_from_slice(&16u16.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());

    for i in 0..samples {
        let t = i as f32 / SAMPLE_RATE as f32;
        let value = (volume * i16::MAX as f32 * (2.0 * PI * frequency * t).sin()) as i16;
        wav.extend_from_slice(&value.to_le_bytes());
    }
    wav
}
