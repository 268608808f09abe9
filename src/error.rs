use thiserror::Error;

pub type Result<T> = std::result::Result<T, PapiError>;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum PapiError {
    /// An input outside the domain the model can evaluate, such as a
    /// horizontal distance which isn't strictly positive.
    #[error("Invalid input '{name}' with value '{value}'")]
    InvalidInput { name: &'static str, value: f64 },
}
