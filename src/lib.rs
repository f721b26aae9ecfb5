pub mod audio;
pub mod engine;
pub mod models;
pub mod preflight;

#[derive(Debug)]
pub struct TranscriptionResult {
    pub text: String,
    pub segments: Vec<TranscriptionSegment>,
}

#[derive(Debug)]
pub struct TranscriptionSegment {
    pub start: f32,
    pub end: f32,
    pub text: String,
}

impl TranscriptionResult {
    /// Segment texts trimmed of surrounding whitespace and joined with
    /// newlines. This is the exact form printed to stdout per input file.
    pub fn plain_text(&self) -> String {
        self.segments
            .iter()
            .map(|segment| segment.text.trim())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
