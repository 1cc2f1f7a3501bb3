use thiserror::Error;

#[derive(Error, Debug)]
pub enum DockletError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Docker error: {0}")]
    Docker(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("System error: {0}")]
    System(String),

    #[error("port lookup failed for PID {pid}: {detail}")]
    PortScan { pid: String, detail: String },

    #[error("unsupported operating system: {0}")]
    UnsupportedOs(String),
}

pub type Result<T> = std::result::Result<T, DockletError>;
