use thiserror::Error;

/// An error associated with loading external resources (images, pixmaps).
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("{0} is not a file")]
    InvalidPath(String),
    #[error("{0}")]
    IoError(#[from] std::io::Error),
    #[error("resource data in {0} is invalid and cannot be decoded")]
    InvalidData(String),
}
