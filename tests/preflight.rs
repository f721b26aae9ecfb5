use audiototext_rs::preflight::{check_ffmpeg, PreflightError};

#[test]
fn missing_decoder_is_reported_by_name() {
    let err = check_ffmpeg("definitely-not-ffmpeg").unwrap_err();
    assert!(matches!(err, PreflightError::Spawn { .. }));

    let message = err.to_string();
    assert!(message.contains("definitely-not-ffmpeg"));
    assert!(message.contains("FFMPEG_PATH"));
}

#[cfg(unix)]
#[test]
fn clean_exit_passes_the_check() {
    // `true` ignores its arguments and exits 0, which is all the probe
    // requires of the decoder.
    assert!(check_ffmpeg("true").is_ok());
}
