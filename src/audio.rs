//! Audio loading for transcription.
//!
//! Whisper consumes raw 16kHz mono f32 samples. Inputs that are already in
//! that layout are read directly with hound; anything else is resampled
//! through ffmpeg into a temporary WAV file first.

use std::path::Path;
use std::process::Command;

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error(transparent)]
    Wav(#[from] hound::Error),
    #[error("expected {expected}, found {found}")]
    Format { expected: String, found: String },
    #[error("failed to run {command}: {source}")]
    DecoderSpawn {
        command: String,
        source: std::io::Error,
    },
    #[error("{command} could not decode {path}: {detail}")]
    Decode {
        command: String,
        path: String,
        detail: String,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Read WAV file samples and convert them to the required format.
///
/// The input must already match what the engine expects: 16,000 Hz sample
/// rate, 16 bits per sample, one channel, integer PCM. Samples are
/// normalized to f32 in the range [-1.0, 1.0].
///
/// # Errors
///
/// Returns an error if the file cannot be opened, is not a WAV file, or its
/// layout differs from the expected one. Each format error names the
/// expected and the found value.
pub fn read_wav_samples(wav_path: &Path) -> Result<Vec<f32>, AudioError> {
    let mut reader = hound::WavReader::open(wav_path)?;
    let spec = reader.spec();

    let expected_spec = hound::WavSpec {
        channels: 1,
        sample_rate: 16000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    if spec.channels != expected_spec.channels {
        return Err(AudioError::Format {
            expected: format!("{} channels", expected_spec.channels),
            found: format!("{} channels", spec.channels),
        });
    }

    if spec.sample_rate != expected_spec.sample_rate {
        return Err(AudioError::Format {
            expected: format!("{} Hz sample rate", expected_spec.sample_rate),
            found: format!("{} Hz sample rate", spec.sample_rate),
        });
    }

    if spec.bits_per_sample != expected_spec.bits_per_sample {
        return Err(AudioError::Format {
            expected: format!("{} bits per sample", expected_spec.bits_per_sample),
            found: format!("{} bits per sample", spec.bits_per_sample),
        });
    }

    if spec.sample_format != expected_spec.sample_format {
        return Err(AudioError::Format {
            expected: "Int sample format".to_string(),
            found: format!("{:?} sample format", spec.sample_format),
        });
    }

    let samples: Result<Vec<f32>, _> = reader
        .samples::<i16>()
        // i16::MIN / i16::MAX lands just below -1.0; clamp to keep the
        // documented range.
        .map(|sample| sample.map(|s| (s as f32 / i16::MAX as f32).clamp(-1.0, 1.0)))
        .collect();

    Ok(samples?)
}

/// Load samples from any audio file ffmpeg can decode.
///
/// Tries the direct WAV read first and falls back to resampling through
/// `ffmpeg` when the file is not a 16kHz/16-bit/mono WAV.
pub fn load_samples(path: &Path, ffmpeg: &str) -> Result<Vec<f32>, AudioError> {
    match read_wav_samples(path) {
        Ok(samples) => Ok(samples),
        Err(err) => {
            log::debug!(
                "direct wav read of {} failed ({err}), resampling with {ffmpeg}",
                path.display()
            );
            decode_with_ffmpeg(path, ffmpeg)
        }
    }
}

fn decode_with_ffmpeg(path: &Path, ffmpeg: &str) -> Result<Vec<f32>, AudioError> {
    let scratch = tempfile::Builder::new().suffix(".wav").tempfile()?;

    let output = Command::new(ffmpeg)
        .arg("-i")
        .arg(path)
        .args(["-f", "wav", "-ar", "16000", "-ac", "1", "-acodec", "pcm_s16le", "-y"])
        .arg(scratch.path())
        .output()
        .map_err(|source| AudioError::DecoderSpawn {
            command: ffmpeg.to_string(),
            source,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = stderr
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .unwrap_or("no diagnostic output")
            .to_string();
        return Err(AudioError::Decode {
            command: ffmpeg.to_string(),
            path: path.display().to_string(),
            detail,
        });
    }

    read_wav_samples(scratch.path())
}
