use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("failed to read {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed XML at byte {position}")]
    Xml {
        position: usize,
        #[source]
        source: quick_xml::Error,
    },

    /// The document has fewer `<target>` than `<source>` elements.
    #[error("no <target> for <source> #{index} ({sources} sources, {targets} targets)")]
    MissingTarget {
        index: usize,
        sources: usize,
        targets: usize,
    },

    #[error("failed to serialize translations")]
    Json(#[from] serde_json::Error),
}
