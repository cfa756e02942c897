/// An error type for failures of the remote resource API.
#[derive(Debug)]
pub enum Error {
    /// The request could not be sent or its response could not be decoded.
    Http(reqwest::Error),
    /// The API responded with an error object.
    Api { kind: String, msg: String },
    /// The API responded with a non-success status and no error object.
    Status(u16),
    /// A local path could not be resolved.
    Io(std::io::Error),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use Error::*;

        match *self {
            Http(ref error) => Some(error),
            Io(ref error) => Some(error),
            Api { .. } | Status(_) => None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Error::*;

        match *self {
            Http(ref error) => write!(fmt, "request failed: {}", error),
            Api { ref kind, ref msg } => write!(fmt, "{} ({})", msg, kind),
            Status(code) => write!(fmt, "unexpected response status {}", code),
            Io(ref error) => write!(fmt, "{}", error),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Error {
        Error::Http(error)
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Error {
        Error::Io(error)
    }
}
