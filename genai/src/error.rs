use derive_more::Display;

#[derive(Debug, Display)]
pub enum Error {
    #[display(fmt = "Reqwest error: {}", _0)]
    Reqwest(reqwest::Error),
    #[display(fmt = "Server error: {}", _0)]
    Server(String),
    #[display(fmt = "Client error: {}", _0)]
    Client(String),
    #[display(fmt = "Serde error: {}", _0)]
    Serde(String),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Reqwest(ref err) => Some(err),
            Error::Server(..) => None,
            Error::Client(..) => None,
            Error::Serde(..) => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Error {
        Error::Reqwest(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::Serde(format!("{}", err))
    }
}
