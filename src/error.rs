use std::fmt;

#[derive(Debug)]
pub enum Error {
    InvalidConfiguration(String),
    InvalidSecret(String),
    InvalidHashInput(String),
    MalformedSalt(String),
    Entropy,
    Derivation(String),
    CalibrationInfeasible(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfiguration(msg) => write!(f, "invalid configuration: {msg}"),
            Error::InvalidSecret(msg) => write!(f, "invalid secret: {msg}"),
            Error::InvalidHashInput(msg) => write!(f, "invalid hash input: {msg}"),
            Error::MalformedSalt(msg) => write!(f, "malformed salt: {msg}"),
            Error::Entropy => write!(f, "OS random generator unavailable"),
            Error::Derivation(msg) => write!(f, "key derivation failed: {msg}"),
            Error::CalibrationInfeasible(msg) => write!(f, "calibration infeasible: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
