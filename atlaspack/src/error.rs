use std::path::PathBuf;

use atlas::error::AtlasError;

#[derive(Debug, thiserror::Error)]
pub enum AtlasPackError {
    #[error("`{}` does not exist", path.display())]
    NotFound { path: PathBuf },
    #[error(
        "Sprite `{name}` at ({x}, {y}) size {width}x{height} exceeds the {image_width}x{image_height} image"
    )]
    OutOfBounds {
        name: String,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },
    #[error("Sprite `{name}` ({width}x{height}) does not fit in a {side}x{side} atlas")]
    CapacityExceeded {
        name: String,
        width: u32,
        height: u32,
        side: u32,
    },
    #[error("Sprite name `{name}` is used by both `{}` and `{}`", first.display(), second.display())]
    NameCollision {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },
    #[error("Sprite `{name}` would overwrite `{}` already written for `{other}`", path.display())]
    OutputCollision {
        name: String,
        other: String,
        path: PathBuf,
    },
    #[error("`{}` cannot be packed, `{name}` is not a valid sprite name", path.display())]
    InvalidName { name: String, path: PathBuf },
    #[error("No sprite could be loaded from `{}`", path.display())]
    NoSprites { path: PathBuf },
    #[error("Descriptor error: {source}")]
    Descriptor {
        #[from]
        source: AtlasError,
    },
    #[error("Image error: {source}")]
    Image {
        #[from]
        source: image::ImageError,
    },
    #[error("IOError: {source}")]
    IOError {
        #[from]
        source: std::io::Error,
    },
}
