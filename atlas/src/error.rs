use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AtlasError {
    #[error("Descriptor `{}` does not exist", path.display())]
    NotFound { path: PathBuf },
    #[error("Line {line}: cannot parse `{key}` value `{value}`")]
    FormatError {
        line: usize,
        key: String,
        value: String,
    },
    #[error("Line {line}: malformed line `{content}`")]
    MalformedLine { line: usize, content: String },
    #[error("IOError: {source}")]
    IOError {
        #[from]
        source: std::io::Error,
    },
}
