//! Writing exported transcripts to disk.

use std::path::{Component, Path, PathBuf};

use kipi_ai::Transcript;
use kipi_common::KipiError;
use tracing::info;

/// Write `transcript` into `dir`, creating the directory if needed.
///
/// The transcript name must be a single plain file name.
pub fn write_transcript(dir: &Path, transcript: &Transcript) -> Result<PathBuf, KipiError> {
    if transcript.is_empty() {
        return Err(KipiError::Export("nothing to save yet".into()));
    }
    let mut components = Path::new(&transcript.name).components();
    if !matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) {
        return Err(KipiError::Export(format!(
            "invalid file name {:?}",
            transcript.name
        )));
    }

    std::fs::create_dir_all(dir)?;
    let path = dir.join(&transcript.name);
    std::fs::write(&path, &transcript.body)?;

    info!("transcript saved to {}", path.display());
    Ok(path)
}
