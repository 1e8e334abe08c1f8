use std::io;

/// Portal related errors
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// The request never produced an http response (dns, tls, connection reset...)
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered, but with a non-2xx status or an unsuccessful envelope.
    #[error("http {status}: {message}")]
    Http { status: u16, message: String },

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("generic error: {0}")]
    Generic(String),
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Generic(s)
    }
}

impl Error {
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Error::Http {
            status,
            message: message.into(),
        }
    }

    /// The http status of the failed request, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            Error::Unauthorized(_) => Some(401),
            _ => None,
        }
    }

    /// Whether the server reported the addressed resource as missing.
    ///
    /// The backend reports unknown ids either as a plain 404 or as a 400
    /// carrying a "... not found" message, so both count.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Http { status: 404, .. } => true,
            Error::Http {
                status: 400,
                message,
            } => message.to_lowercase().contains("not found"),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_detected_from_status_and_message() {
        assert!(Error::http(404, "").is_not_found());
        assert!(Error::http(400, "Event not found").is_not_found());
        assert!(!Error::http(400, "Title is required").is_not_found());
        assert!(!Error::http(500, "not found in cache").is_not_found());
        assert!(!Error::Transport("connection refused".to_owned()).is_not_found());
    }

    #[test]
    fn status_is_exposed_for_server_errors() {
        assert_eq!(Error::http(503, "down").status(), Some(503));
        assert_eq!(Error::Unauthorized("expired".to_owned()).status(), Some(401));
        assert_eq!(Error::Generic("x".to_owned()).status(), None);
    }
}
