use thiserror::Error;

/// Failure of the interface-port transport. Any of these ends the
/// configuration pass for the device that raised it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Device disconnected")]
    Disconnected,
    #[error("Device rejected write: {0}")]
    Nack(String),
    #[error("Device timeout: {0}")]
    Timeout(String),
    #[error("Malformed value: {0}")]
    Malformed(String),
}

pub type DeviceResult<T> = Result<T, TransportError>;
