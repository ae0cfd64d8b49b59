use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("spark task main jar is missing")]
    MissingMainResource,
    #[error("main jar without a resource id must carry a literal path")]
    EmptyResourcePath,
    #[error("local parameter #{0} has no name")]
    UnnamedLocalParam(usize),
}

/// Terminal failures of a single command build. None of them are retried here.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("task params could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("spark task params is not valid: {0}")]
    Validation(#[from] ValidationError),
    #[error("resource id: {id} not exist")]
    ResourceNotFound { id: i32 },
    #[error("resource catalog lookup failed for id {id}: {cause:#}")]
    Catalog { id: i32, cause: anyhow::Error },
    #[error("unsupported task type: {0}")]
    UnsupportedTaskType(String),
}

pub type Result<T> = std::result::Result<T, BuildError>;
