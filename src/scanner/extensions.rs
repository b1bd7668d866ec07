//! Model file extension table shared by the scanner and URL validation

/// Extensions (without dot) that mark a string as a model weights file
pub const MODEL_EXTENSIONS: &[&str] = &["safetensors", "ckpt", "pt", "pth", "bin"];

/// Check whether `name` ends in one of [`MODEL_EXTENSIONS`] (case-insensitive)
pub fn has_model_extension(name: &str) -> bool {
    let Some((stem, ext)) = name.trim().rsplit_once('.') else {
        return false;
    };
    !stem.is_empty()
        && MODEL_EXTENSIONS
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(known))
}
