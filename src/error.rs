use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Error {
    Unspecified(String),
    SerializationError(String),
    NetworkError(String),
    ApiError(u16, String),
    NotFound(String),
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Unspecified(g) => write!(f, "{}", g),
            Error::SerializationError(g) => write!(f, "{}", g),
            Error::NetworkError(g) => write!(f, "{}", g),
            Error::ApiError(status, g) => write!(f, "HTTP {} ({}).", status, g),
            Error::NotFound(city) => write!(f, "No bike network found for {}.", city),
        }
    }
}

impl std::error::Error for Error {}
