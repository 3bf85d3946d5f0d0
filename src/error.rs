use thiserror::Error;

pub type Result<T> = std::result::Result<T, OacspError>;

#[derive(Debug, Error)]
pub enum OacspError {
    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no usable serial port found")]
    PortNotFound,
}
