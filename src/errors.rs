use thiserror::Error;

#[derive(Error, Debug)]
pub enum QnError {
    #[error("docker is not running! must run docker")]
    DockerUnavailable,

    #[error("Docker error: {0}")]
    DockerError(String),

    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("won't package because repo has uncommitted changes:\n{0}")]
    DirtyRepository(String),

    #[error("Release error: {0}")]
    ReleaseError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl QnError {
    /// Exit code reported to the shell for this error.
    /// 10 is reserved for "docker daemon not reachable" so callers of the
    /// dev helper can tell it apart from ordinary command failures.
    pub fn exit_code(&self) -> i32 {
        match self {
            QnError::DockerUnavailable => 10,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, QnError>;
