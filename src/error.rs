use crate::global_variables::Float;
use thiserror::Error;

pub type DarcyResult<T> = Result<T, DarcyError>;

#[derive(Error, Debug)]
pub enum DarcyError {
    /// Raised before any field is allocated.
    #[error("the dynamic viscosity should be larger than 0.0, but is {viscosity}")]
    Configuration { viscosity: Float },

    #[error("invalid fluid grid: {message}")]
    InvalidGrid { message: String },

    #[error("missing parameter `{key}` in {file}")]
    MissingParameter { key: String, file: String },

    #[error("invalid value `{value}` for parameter `{key}`")]
    InvalidParameter { key: String, value: String },

    #[error(
        "the pressure solver did not converge after {iterations} iterations \
         (residual {residual:.8e} > tolerance {tolerance:.8e})"
    )]
    NonConvergence {
        iterations: usize,
        residual: Float,
        tolerance: Float,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DarcyError {
    pub fn invalid_parameter(key: &str, value: &str) -> Self {
        Self::InvalidParameter {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}
