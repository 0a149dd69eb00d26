use ps_core::PsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("scene configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] PsError),
}

pub type SceneResult<T> = Result<T, SceneError>;
