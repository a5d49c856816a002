use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ImageLoadError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("The selected file is not a valid image ({}): {source}", .path.display())]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("The selected file decodes to an empty image: {}", .path.display())]
    Empty { path: PathBuf },
}
