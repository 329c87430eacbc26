/// The scheduler's own error taxonomy (SPEC_FULL section 7), distinct from
/// `SolveError`: these are failures the core never sees because the core
/// doesn't touch files. Attached to the outer `anyhow::Error` the same way
/// `SolveError` is, so batch-mode code can `downcast_ref` to decide whether a
/// failure should abort the whole batch or just skip one puzzle.
#[derive(Debug)]
pub enum BatchError {
    /// A file open/read/write failed. Fatal to the batch run.
    Io { path: String, source: std::io::Error },
    /// The input stream didn't parse into any puzzles at all.
    EmptyInput,
}

impl std::fmt::Display for BatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchError::Io { path, source } => write!(f, "i/o failure on {path}: {source}"),
            BatchError::EmptyInput => write!(f, "input stream contained no puzzles"),
        }
    }
}

impl std::error::Error for BatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BatchError::Io { source, .. } => Some(source),
            BatchError::EmptyInput => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_display_names_the_path() {
        let err = BatchError::Io {
            path: "input.txt".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert!(err.to_string().contains("input.txt"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn empty_input_has_no_source() {
        let err = BatchError::EmptyInput;
        assert!(std::error::Error::source(&err).is_none());
        assert!(err.to_string().contains("no puzzles"));
    }
}
