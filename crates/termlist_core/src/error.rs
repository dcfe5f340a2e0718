use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    EmptyTask,
    InvalidIndex,
    ImportFormat(String),
    Clipboard(String),
    Storage(String),
    Io(String),
}

impl AppError {
    pub fn import_format<M: Into<String>>(message: M) -> Self {
        Self::ImportFormat(message.into())
    }

    pub fn clipboard<M: Into<String>>(message: M) -> Self {
        Self::Clipboard(message.into())
    }

    pub fn storage<M: Into<String>>(message: M) -> Self {
        Self::Storage(message.into())
    }

    pub fn io<M: Into<String>>(message: M) -> Self {
        Self::Io(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyTask => "empty_task",
            Self::InvalidIndex => "invalid_index",
            Self::ImportFormat(_) => "import_format",
            Self::Clipboard(_) => "clipboard_unavailable",
            Self::Storage(_) => "storage",
            Self::Io(_) => "io_error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::EmptyTask => "task text is empty",
            Self::InvalidIndex => "index is out of range",
            Self::ImportFormat(message) => message,
            Self::Clipboard(message) => message,
            Self::Storage(message) => message,
            Self::Io(message) => message,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code(), self.message())
    }
}

impl std::error::Error for AppError {}
