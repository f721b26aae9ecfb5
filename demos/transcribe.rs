use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use audiototext_rs::{
    audio,
    engine::{Device, WhisperEngine},
    models::{resolve_model_path, ModelSize},
    preflight,
};

fn get_audio_duration(path: &PathBuf) -> Result<f64, Box<dyn Error>> {
    let reader = hound::WavReader::open(path)?;
    let spec = reader.spec();
    let duration = reader.duration() as f64 / spec.sample_rate as f64;
    Ok(duration)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let ffmpeg = preflight::ffmpeg_command();
    preflight::check_ffmpeg(&ffmpeg)?;

    let wav_path = PathBuf::from("samples/dots.wav");

    let audio_duration = get_audio_duration(&wav_path)?;
    println!("Audio duration: {:.2}s", audio_duration);

    let device = Device::detect();
    let model_path = resolve_model_path(ModelSize::Tiny, "models".as_ref())?;
    println!("Loading model: {:?} on {:?}", model_path, device);

    let mut engine = WhisperEngine::new();
    let load_start = Instant::now();
    engine.load_model(&model_path, device)?;
    println!("Model loaded in {:.2?}", load_start.elapsed());

    println!("Transcribing file: {:?}", wav_path);
    let transcribe_start = Instant::now();
    let samples = audio::load_samples(&wav_path, &ffmpeg)?;
    let result = engine.transcribe_samples(samples, None)?;
    let transcribe_duration = transcribe_start.elapsed();
    println!("Transcription completed in {:.2?}", transcribe_duration);

    let speedup_factor = audio_duration / transcribe_duration.as_secs_f64();
    println!(
        "Real-time speedup: {:.2}x faster than real-time",
        speedup_factor
    );

    println!("Transcription result:");
    println!("{}", result.plain_text());

    println!("\nSegments:");
    for segment in result.segments {
        println!(
            "[{:.2}s - {:.2}s]: {}",
            segment.start, segment.end, segment.text
        );
    }

    engine.unload_model();

    Ok(())
}
