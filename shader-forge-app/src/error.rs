use shader_forge_core::BuildError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Build Error: {0}")]
    Build(#[from] BuildError),

    #[error("Report Error: {0}")]
    Report(#[from] csv::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
