use thiserror::Error;

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
    #[error("http client error: {message}")]
    HttpClient { message: String },
    #[error("export failed: {message}")]
    Export { message: String },
    #[error("resume could not be loaded: {message}")]
    Resume { message: String },
}

impl InfraError {
    pub fn telemetry(message: impl Into<String>) -> Self {
        Self::Telemetry(message.into())
    }

    pub fn http_client(message: impl Into<String>) -> Self {
        Self::HttpClient {
            message: message.into(),
        }
    }

    pub fn export(message: impl Into<String>) -> Self {
        Self::Export {
            message: message.into(),
        }
    }

    pub fn resume(message: impl Into<String>) -> Self {
        Self::Resume {
            message: message.into(),
        }
    }
}
