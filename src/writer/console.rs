//! Standard stream destinations

use super::destination::Destination;
use std::io;

/// Destination writing to the process's standard output
pub fn new_stdout_writer() -> Destination {
    Destination::named("stdout", io::stdout())
}

/// Destination writing to the process's standard error
pub fn new_stderr_writer() -> Destination {
    Destination::named("stderr", io::stderr())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_writers() {
        let out = new_stdout_writer();
        let err = new_stderr_writer();
        assert_eq!(out.name(), "stdout");
        assert_eq!(err.name(), "stderr");
        assert!(!out.same_as(&err));

        out.write_record(b"").unwrap();
        err.flush().unwrap();
    }
}
