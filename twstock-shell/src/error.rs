use derive_more::Display;

#[derive(Debug, Display)]
pub enum Error {
    #[display(fmt = "{}", _0)]
    Desk(twstock::Error),
    #[display(fmt = "Missing api key: pass --api-key or set API_KEY")]
    MissingApiKey,
    #[display(fmt = "Serde error: {}", _0)]
    Serde(serde_json::Error),
}

impl std::error::Error for Error {}

impl From<twstock::Error> for Error {
    fn from(err: twstock::Error) -> Error {
        Error::Desk(err)
    }
}

impl From<twstock::genai::Error> for Error {
    fn from(err: twstock::genai::Error) -> Error {
        Error::Desk(err.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::Serde(err)
    }
}
