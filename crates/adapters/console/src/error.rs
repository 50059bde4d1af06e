//! Console adapter error types.

/// Errors specific to the console adapter.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// Writing to the underlying stream failed.
    #[error("failed to write to console")]
    Write(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_write_error() {
        let err = ConsoleError::Write(std::io::Error::from(std::io::ErrorKind::BrokenPipe));
        assert_eq!(err.to_string(), "failed to write to console");
    }

    #[test]
    fn should_expose_io_source() {
        let err = ConsoleError::Write(std::io::Error::from(std::io::ErrorKind::BrokenPipe));
        let source = std::error::Error::source(&err).unwrap();
        assert!(source.to_string().contains("pipe"));
    }
}
