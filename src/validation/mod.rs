pub mod error;
pub mod validator;

pub use error::{Category, ValidationError, ValidationReport};
pub use validator::validate;
