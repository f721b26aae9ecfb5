use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use audiototext_rs::{
    audio,
    engine::{language_from_hint, Device, WhisperEngine, WhisperInferenceParams},
    models::{self, ModelSize},
    preflight,
};

#[derive(Parser, Debug)]
#[command(
    about = "Local Whisper transcription and translation (no API key needed)",
    version
)]
struct Args {
    /// Audio file(s) to process
    #[arg(required = true)]
    audio_files: Vec<PathBuf>,

    /// Transcribe in the source language or translate to English
    #[arg(long, value_enum, default_value_t = Task::Transcribe)]
    task: Task,

    /// Whisper model size, loaded from the model directory
    #[arg(long, value_enum, default_value_t = ModelSize::Tiny)]
    model: ModelSize,

    /// Spoken language hint; "Auto-Detect" lets the model decide
    #[arg(long, default_value = "Auto-Detect")]
    language: String,

    /// Condition each chunk's decoding on previously decoded text
    #[arg(long = "coherence_preference")]
    coherence_preference: bool,

    /// Optional text to bias decoding of the first chunk
    #[arg(long)]
    prompt: Option<String>,

    /// Directory containing GGML model files (WHISPER_MODEL_DIR also works)
    #[arg(long)]
    model_dir: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Task {
    Transcribe,
    Translate,
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let ffmpeg = preflight::ffmpeg_command();
    preflight::check_ffmpeg(&ffmpeg)?;

    let model_dir = args
        .model_dir
        .clone()
        .or_else(|| std::env::var_os(models::MODEL_DIR_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(models::DEFAULT_MODEL_DIR));
    let model_path = models::resolve_model_path(args.model, &model_dir)?;

    let device = Device::detect();
    log::info!(
        "loading {} model from {} on {:?}",
        args.model,
        model_path.display(),
        device
    );

    let mut engine = WhisperEngine::new();
    engine.load_model(&model_path, device)?;

    let params = WhisperInferenceParams {
        translate: args.task == Task::Translate,
        language: language_from_hint(&args.language),
        condition_on_previous_text: args.coherence_preference,
        initial_prompt: args.prompt.clone(),
        ..Default::default()
    };

    for path in &args.audio_files {
        if !path.is_file() {
            eprintln!("warning: file not found: {}", path.display());
            continue;
        }

        let samples = audio::load_samples(path, &ffmpeg)?;
        let result = engine.transcribe_samples(samples, Some(params.clone()))?;
        println!("{}", result.plain_text());
    }

    Ok(())
}
