use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Library-wide error type for servgen operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Template file missing or unreadable.
    #[error("Failed to read template '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Target path could not be created or written.
    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Template text did not compile or render.
    #[error("Template '{name}' is malformed: {reason}")]
    TemplateSyntax { name: String, reason: String },

    /// Template references a transform that is not in the helper registry.
    #[error("Template '{name}' references an unregistered helper: {reason}")]
    MissingHelper { name: String, reason: String },

    /// Expected placeholder token is absent from a template file name.
    ///
    /// Passing the name through unchanged would collide across generated
    /// entities, so this is always a hard error.
    #[error("Template file name '{file_name}' does not contain placeholder token '{token}'")]
    MalformedTemplateName {
        file_name: String,
        token: &'static str,
    },

    /// Project-structure description could not be parsed.
    #[error("Invalid project structure: {0}")]
    Structure(String),

    /// A dispatched generation task panicked or was aborted.
    #[error("Generation task aborted: {0}")]
    Join(String),
}

impl Error {
    pub(crate) fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Read { path: path.into(), source }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Write { path: path.into(), source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_template_name_names_the_token() {
        let err = Error::MalformedTemplateName {
            file_name: "user.controller.ts".to_string(),
            token: "___",
        };
        let message = err.to_string();
        assert!(message.contains("user.controller.ts"));
        assert!(message.contains("___"));
    }

    #[test]
    fn read_errors_carry_the_source() {
        use std::error::Error as _;

        let err = Error::read("tpl/a.ts", io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("tpl/a.ts"));
    }
}
