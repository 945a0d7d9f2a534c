use derive_more::Display;

#[derive(Debug, Display)]
pub enum Error {
    #[display(fmt = "Genai error: {}", _0)]
    Genai(genai::Error),
    #[display(fmt = "Source error: {}", _0)]
    Source(String),
    #[display(fmt = "Csv error: {}", _0)]
    Csv(csv::Error),
    #[display(fmt = "Io error: {}", _0)]
    Io(std::io::Error),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Genai(ref err) => Some(err),
            Error::Source(..) => None,
            Error::Csv(ref err) => Some(err),
            Error::Io(ref err) => Some(err),
        }
    }
}

impl From<genai::Error> for Error {
    fn from(err: genai::Error) -> Error {
        Error::Genai(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Error {
        Error::Csv(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}
