//! Model catalog and on-disk resolution.
//!
//! Models are the standard whisper.cpp GGML files, looked up by size name in
//! a local directory. Nothing is downloaded.

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;

/// Environment variable overriding the model directory.
pub const MODEL_DIR_ENV: &str = "WHISPER_MODEL_DIR";

/// Directory searched for GGML model files when no override is given.
pub const DEFAULT_MODEL_DIR: &str = "models";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModelSize {
    Tiny,
    Base,
    Small,
    Medium,
    LargeV1,
    LargeV2,
}

impl ModelSize {
    /// Standard whisper.cpp file name for this model size.
    pub fn file_name(self) -> &'static str {
        match self {
            ModelSize::Tiny => "ggml-tiny.bin",
            ModelSize::Base => "ggml-base.bin",
            ModelSize::Small => "ggml-small.bin",
            ModelSize::Medium => "ggml-medium.bin",
            ModelSize::LargeV1 => "ggml-large-v1.bin",
            ModelSize::LargeV2 => "ggml-large-v2.bin",
        }
    }
}

impl fmt::Display for ModelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModelSize::Tiny => "tiny",
            ModelSize::Base => "base",
            ModelSize::Small => "small",
            ModelSize::Medium => "medium",
            ModelSize::LargeV1 => "large-v1",
            ModelSize::LargeV2 => "large-v2",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error(
        "model file not found: {}; place the GGML model there or pass --model-dir",
        .0.display()
    )]
    NotFound(PathBuf),
}

/// Resolve a model size to its GGML file under `model_dir`.
pub fn resolve_model_path(size: ModelSize, model_dir: &Path) -> Result<PathBuf, ModelError> {
    let path = model_dir.join(size.file_name());
    if path.is_file() {
        Ok(path)
    } else {
        Err(ModelError::NotFound(path))
    }
}
