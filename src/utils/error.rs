use thiserror::Error;

#[derive(Error, Debug)]
pub enum MomentError {
    #[error("Invalid timezone: {message}")]
    InvalidTimezone { message: String },

    #[error("Datetime parse error: {message}")]
    Parse { message: String },
}

pub type Result<T> = std::result::Result<T, MomentError>;
