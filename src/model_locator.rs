use crate::error::DiagnosisError;
use std::path::{Path, PathBuf};

/// Returns the first candidate that is a non-empty regular file. Only
/// metadata is read; the artifact itself is never opened here.
pub fn resolve<P: AsRef<Path>>(candidates: &[P]) -> Result<PathBuf, DiagnosisError> {
    resolve_index(candidates).map(|i| candidates[i].as_ref().to_path_buf())
}

/// Like [`resolve`] but returns the position of the match in `candidates`.
pub fn resolve_index<P: AsRef<Path>>(candidates: &[P]) -> Result<usize, DiagnosisError> {
    candidates
        .iter()
        .position(|c| is_usable(c.as_ref()))
        .ok_or_else(|| DiagnosisError::ModelNotFound {
            candidates: candidates.iter().map(|c| c.as_ref().to_path_buf()).collect(),
        })
}

fn is_usable(path: &Path) -> bool {
    match std::fs::metadata(path) {
        Ok(metadata) => metadata.is_file() && metadata.len() > 0,
        Err(_) => false,
    }
}
