use std::error::Error;

use audiototext_rs::audio::{load_samples, read_wav_samples, AudioError};

fn write_wav(
    path: &std::path::Path,
    spec: hound::WavSpec,
    samples: &[i16],
) -> Result<(), Box<dyn Error>> {
    let mut writer = hound::WavWriter::create(path, spec)?;
    for sample in samples {
        writer.write_sample(*sample)?;
    }
    writer.finalize()?;
    Ok(())
}

fn expected_spec() -> hound::WavSpec {
    hound::WavSpec {
        channels: 1,
        sample_rate: 16_000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    }
}

#[test]
fn read_wav_samples_normalizes_full_range() -> Result<(), Box<dyn Error>> {
    let temp_dir = tempfile::tempdir()?;
    let wav_path = temp_dir.path().join("extreme.wav");

    write_wav(&wav_path, expected_spec(), &[i16::MAX, i16::MIN])?;

    let samples = read_wav_samples(&wav_path)?;
    assert_eq!(samples.len(), 2);

    assert_eq!(samples[0], 1.0);
    assert_eq!(samples[1], -1.0);

    Ok(())
}

#[test]
fn read_wav_samples_rejects_wrong_sample_rate() -> Result<(), Box<dyn Error>> {
    let temp_dir = tempfile::tempdir()?;
    let wav_path = temp_dir.path().join("cd_quality.wav");

    let spec = hound::WavSpec {
        sample_rate: 44_100,
        ..expected_spec()
    };
    write_wav(&wav_path, spec, &[0, 0])?;

    let err = read_wav_samples(&wav_path).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("16000"), "unexpected message: {message}");
    assert!(message.contains("44100"), "unexpected message: {message}");

    Ok(())
}

#[test]
fn read_wav_samples_rejects_stereo() -> Result<(), Box<dyn Error>> {
    let temp_dir = tempfile::tempdir()?;
    let wav_path = temp_dir.path().join("stereo.wav");

    let spec = hound::WavSpec {
        channels: 2,
        ..expected_spec()
    };
    write_wav(&wav_path, spec, &[0, 0])?;

    let err = read_wav_samples(&wav_path).unwrap_err();
    assert!(matches!(err, AudioError::Format { .. }));
    assert!(err.to_string().contains("1 channels"));

    Ok(())
}

#[test]
fn load_samples_skips_the_decoder_for_matching_wav() -> Result<(), Box<dyn Error>> {
    let temp_dir = tempfile::tempdir()?;
    let wav_path = temp_dir.path().join("ready.wav");

    write_wav(&wav_path, expected_spec(), &[0, 1, 2])?;

    // The command is bogus on purpose: a file already in the expected layout
    // must be read directly, without spawning the decoder at all.
    let samples = load_samples(&wav_path, "definitely-not-ffmpeg")?;
    assert_eq!(samples.len(), 3);

    Ok(())
}

#[test]
fn load_samples_reports_missing_decoder() -> Result<(), Box<dyn Error>> {
    let temp_dir = tempfile::tempdir()?;
    let not_wav = temp_dir.path().join("clip.mp3");
    std::fs::write(&not_wav, b"not really audio")?;

    // Direct read fails, so the fallback decoder is spawned and must surface
    // its own error when the command does not exist.
    let err = load_samples(&not_wav, "definitely-not-ffmpeg").unwrap_err();
    assert!(matches!(err, AudioError::DecoderSpawn { .. }));
    assert!(err.to_string().contains("definitely-not-ffmpeg"));

    Ok(())
}
