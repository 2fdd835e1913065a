use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A migration file name that does not follow `<version>_<slug>.<ext>`.
    #[error("unsupported migration name format: {0:?}")]
    Format(String),

    #[error("walk error: {0}")]
    Walk(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn error_display_includes_context() {
        let e = Error::Format("1_bad name!.up.sql".into());
        assert_eq!(
            e.to_string(),
            "unsupported migration name format: \"1_bad name!.up.sql\""
        );

        let e = Error::Config("bad yaml".into());
        assert_eq!(e.to_string(), "configuration error: bad yaml");

        let e = Error::Walk("permission denied".into());
        assert_eq!(e.to_string(), "walk error: permission denied");

        let e = Error::Other("misc".into());
        assert_eq!(e.to_string(), "misc");
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let e: Error = io.into();
        assert!(matches!(e, Error::Io(_)));
        assert_eq!(e.to_string(), "io error: gone");
    }
}
