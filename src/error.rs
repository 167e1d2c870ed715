use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Malformed install target syntax
#[derive(Debug, Error, PartialEq, Eq)]
#[error("install target is invalid: {0}")]
pub struct ParseError(pub String);

/// The install target cannot be mapped to a download URL
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("unsupported: tag required")]
    TagRequired,
    #[error("unsupported: owner/repo required")]
    OwnerRepoRequired,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to request {url}")]
    Request {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },
    #[error("http response not OK. code: {status}, url: {url}")]
    Status { status: u16, url: String },
    #[error("failed to create tempdir")]
    TempDir(#[source] io::Error),
    #[error("failed to open file: {}", path.display())]
    CreateFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read response into {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to open archive: {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read zip archive: {}", path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
    #[error("archive entry escapes the extraction directory: {0}")]
    UnsafeEntry(String),
    #[error("failed to write {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
#[error("failed to walk {}", path.display())]
pub struct LocateError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

#[derive(Debug, Error)]
#[error("failed to {action} {}", path.display())]
pub struct PlaceError {
    pub action: &'static str,
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

#[derive(Debug, Error)]
#[error("failed to create {}", path.display())]
pub struct DirSetupError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Failure of one install invocation, tagged with the stage that failed
#[derive(Debug, Error)]
pub enum InstallError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("failed to make download url")]
    Resolve(#[from] ResolveError),
    #[error("failed to setup plugin directory")]
    DirSetup(#[from] DirSetupError),
    #[error("failed to download")]
    Fetch(#[from] FetchError),
    #[error("failed to extract")]
    Extract(#[from] ExtractError),
    #[error("failed to locate plugin executables")]
    Locate(#[from] LocateError),
    #[error("failed to place plugin executable")]
    Place(#[from] PlaceError),
}
