use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML error in {part}: {source}")]
    Xml {
        part: &'static str,
        #[source]
        source: quick_xml::Error,
    },

    #[error("document part {0} is missing")]
    MissingPart(&'static str),

    /// Heading styles must end in the level digit ("Heading 2").
    #[error("heading style {style:?} does not end in a level digit")]
    HeadingLevel { style: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
