pub mod darcy;
pub mod error;
pub mod global_variables;
pub mod io;
pub mod particles;
pub mod post;

pub use error::{DarcyError, DarcyResult};
pub use global_variables::*;

#[derive(Clone, Debug)]
pub struct Residuals {
    pub pressure: Float,
    pub velocity: Vec<Float>,
}
