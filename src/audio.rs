//! 音频工具：将原始 PCM 封装为 WAV。
//!
//! Helpers for the caller's output step. The service returns PCM as headerless
//! little-endian samples; [`pcm_to_wav`] wraps them in a RIFF/WAVE container.

use crate::{Error, Result};
use std::io::Cursor;

/// Wrap raw little-endian PCM in a WAV container.
///
/// `bits_per_sample` may be 8, 16, 24 or 32. 8-bit input is unsigned, as in
/// the WAV format itself; wider samples are signed.
pub fn pcm_to_wav(
    pcm: &[u8],
    channels: u16,
    sample_rate: u32,
    bits_per_sample: u16,
) -> Result<Vec<u8>> {
    if !matches!(bits_per_sample, 8 | 16 | 24 | 32) {
        return Err(Error::validation(
            "bits_per_sample",
            format!("unsupported sample width {}", bits_per_sample),
            "8, 16, 24, 32",
        ));
    }
    if channels == 0 {
        return Err(Error::validation("channels", "channel count must be positive", ">= 1"));
    }
    if sample_rate == 0 {
        return Err(Error::validation("sample_rate", "sample rate must be positive", "> 0"));
    }
    let width = usize::from(bits_per_sample / 8);
    let frame = width * usize::from(channels);
    if pcm.len() % frame != 0 {
        return Err(Error::validation(
            "pcm",
            format!("{} bytes is not a whole number of {}-byte frames", pcm.len(), frame),
            "complete sample frames",
        ));
    }

    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::with_capacity(pcm.len() + 44));
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).map_err(wav_error)?;
        for sample in pcm.chunks_exact(width) {
            match width {
                1 => writer.write_sample((i16::from(sample[0]) - 128) as i8),
                2 => writer.write_sample(i16::from_le_bytes([sample[0], sample[1]])),
                // sign-extend 24-bit samples through the top byte
                3 => {
                    let widened = i32::from_le_bytes([0, sample[0], sample[1], sample[2]]);
                    writer.write_sample(widened >> 8)
                }
                _ => writer.write_sample(i32::from_le_bytes([
                    sample[0], sample[1], sample[2], sample[3],
                ])),
            }
            .map_err(wav_error)?;
        }
        writer.finalize().map_err(wav_error)?;
    }
    Ok(cursor.into_inner())
}

fn wav_error(err: hound::Error) -> Error {
    match err {
        hound::Error::IoError(e) => Error::Io(e),
        other => Error::runtime(format!("WAV encoding failed: {}", other)),
    }
}
