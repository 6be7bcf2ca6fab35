//! Shader source loading
//!
//! Sources are plain shading-language text read as-is. No includes, no
//! defines: whatever preprocessing happens is done by the driver compiler.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Read a shader source file fully into a string
///
/// The bytes are kept as-is but must be valid UTF-8, which GLSL source
/// always is. Anything else is rejected with `io::ErrorKind::InvalidData`.
///
/// # Errors
///
/// Returns `Error::IoError` (and logs it) if the file cannot be read or is not UTF-8.
pub fn load_shader_source(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(source) => {
            crate::prism_debug!("prism::source", "Loaded '{}' ({} bytes)", path.display(), source.len());
            Ok(source)
        }
        Err(e) => {
            crate::prism_error!("prism::source", "Failed to read '{}': {}", path.display(), e);
            Err(Error::io(path, &e))
        }
    }
}
