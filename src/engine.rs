//! Whisper inference engine.
//!
//! Thin wrapper around whisper-rs: load a GGML model file once, then run
//! inference over raw samples as many times as needed. The context and its
//! state live for the whole process and are reused read-only across files.

use std::path::{Path, PathBuf};

use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::{TranscriptionResult, TranscriptionSegment};

/// Compute device the model is loaded onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Device {
    Cpu,
    Gpu,
}

impl Device {
    /// Prefer the accelerator whenever a GPU backend is compiled in
    /// (Metal on macOS, Vulkan on Windows, CUDA behind the `cuda` feature).
    pub fn detect() -> Self {
        if cfg!(any(target_os = "macos", target_os = "windows", feature = "cuda")) {
            Device::Gpu
        } else {
            Device::Cpu
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("model not loaded, call load_model() first")]
    ModelNotLoaded,
    #[error("model path is not valid UTF-8: {}", .0.display())]
    InvalidModelPath(PathBuf),
    #[error(transparent)]
    Whisper(#[from] whisper_rs::WhisperError),
}

/// Map a user-facing language hint to the engine's language option.
///
/// "Auto-Detect" (any case), "auto" and empty strings all mean let the model
/// detect the language; anything else is passed through verbatim.
pub fn language_from_hint(hint: &str) -> Option<String> {
    let trimmed = hint.trim();
    if trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("auto")
        || trimmed.eq_ignore_ascii_case("auto-detect")
    {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct WhisperInferenceParams {
    /// Translate to English instead of transcribing in the source language.
    pub translate: bool,
    /// Language code, or None to let the model detect it.
    pub language: Option<String>,
    /// Condition each chunk's decoding on previously decoded text.
    pub condition_on_previous_text: bool,
    /// Optional text to bias decoding of the first chunk.
    pub initial_prompt: Option<String>,
    pub print_special: bool,
    pub print_progress: bool,
    pub print_realtime: bool,
    pub print_timestamps: bool,
    pub suppress_blank: bool,
    pub suppress_non_speech_tokens: bool,
    pub no_speech_thold: f32,
}

impl Default for WhisperInferenceParams {
    fn default() -> Self {
        Self {
            translate: false,
            language: None,
            condition_on_previous_text: false,
            initial_prompt: None,
            print_special: false,
            print_progress: false,
            print_realtime: false,
            print_timestamps: false,
            suppress_blank: true,
            suppress_non_speech_tokens: true,
            no_speech_thold: 0.2,
        }
    }
}

pub struct WhisperEngine {
    loaded_model_path: Option<PathBuf>,
    state: Option<whisper_rs::WhisperState>,
    context: Option<WhisperContext>,
    device: Device,
}

impl WhisperEngine {
    pub fn new() -> Self {
        Self {
            loaded_model_path: None,
            state: None,
            context: None,
            device: Device::Cpu,
        }
    }

    pub fn device(&self) -> Device {
        self.device
    }

    pub fn model_path(&self) -> Option<&Path> {
        self.loaded_model_path.as_deref()
    }

    pub fn load_model(&mut self, model_path: &Path, device: Device) -> Result<(), EngineError> {
        let path_str = model_path
            .to_str()
            .ok_or_else(|| EngineError::InvalidModelPath(model_path.to_path_buf()))?;

        let use_gpu = device == Device::Gpu;
        let mut context_params = WhisperContextParameters::default();
        context_params.use_gpu(use_gpu);
        // Flash attention is the runtime's reduced-precision path; it only
        // applies on the accelerator.
        context_params.flash_attn(use_gpu);

        let context = WhisperContext::new_with_params(path_str, context_params)?;
        let state = context.create_state()?;

        self.context = Some(context);
        self.state = Some(state);
        self.loaded_model_path = Some(model_path.to_path_buf());
        self.device = device;
        Ok(())
    }

    pub fn unload_model(&mut self) {
        self.loaded_model_path = None;
        self.state = None;
        self.context = None;
    }

    pub fn transcribe_samples(
        &mut self,
        samples: Vec<f32>,
        params: Option<WhisperInferenceParams>,
    ) -> Result<TranscriptionResult, EngineError> {
        let state = self.state.as_mut().ok_or(EngineError::ModelNotLoaded)?;

        let inference_params = params.unwrap_or_default();

        let mut full_params = FullParams::new(SamplingStrategy::BeamSearch {
            beam_size: 3,
            patience: -1.0,
        });
        full_params.set_translate(inference_params.translate);
        full_params.set_language(Some(
            inference_params.language.as_deref().unwrap_or("auto"),
        ));
        full_params.set_no_context(!inference_params.condition_on_previous_text);
        if let Some(prompt) = inference_params.initial_prompt.as_deref() {
            full_params.set_initial_prompt(prompt);
        }
        full_params.set_print_special(inference_params.print_special);
        full_params.set_print_progress(inference_params.print_progress);
        full_params.set_print_realtime(inference_params.print_realtime);
        full_params.set_print_timestamps(inference_params.print_timestamps);
        full_params.set_suppress_blank(inference_params.suppress_blank);
        full_params.set_suppress_non_speech_tokens(inference_params.suppress_non_speech_tokens);
        full_params.set_no_speech_thold(inference_params.no_speech_thold);

        state.full(full_params, &samples)?;

        let num_segments = state.full_n_segments()?;

        let mut segments = Vec::new();
        let mut full_text = String::new();

        for i in 0..num_segments {
            let text = state.full_get_segment_text(i)?;
            let start = state.full_get_segment_t0(i)? as f32 / 100.0;
            let end = state.full_get_segment_t1(i)? as f32 / 100.0;

            segments.push(TranscriptionSegment {
                start,
                end,
                text: text.clone(),
            });
            full_text.push_str(&text);
        }

        Ok(TranscriptionResult {
            text: full_text.trim().to_string(),
            segments,
        })
    }
}

impl Default for WhisperEngine {
    fn default() -> Self {
        Self::new()
    }
}
