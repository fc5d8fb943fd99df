use super::{Error, ErrorKind, Result};
use crate::util::DynError;
use easy_ext::ext;

#[ext(ResultExt)]
pub(crate) impl<T, E> Result<T, E> {
    #[track_caller]
    fn fatal_ctx<S>(self, message: impl FnOnce() -> S) -> Result<T>
    where
        S: Into<String>,
        E: Into<Box<DynError>>,
    {
        // Not using closures (e.g. `map_err`), because `#[track_caller]`
        // doesn't propagate to them.
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(Error::from(ErrorKind::Fatal {
                message: message().into(),
                source: Some(err.into()),
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn fatal_ctx_keeps_the_source() {
        let result: io::Result<()> = Err(io::Error::new(io::ErrorKind::Other, "disk is full"));

        let err = result.fatal_ctx(|| "Failed to write the file").unwrap_err();

        assert_eq!(err.to_string(), "FATAL: Failed to write the file");

        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("disk is full"));
    }

    #[test]
    fn fatal_ctx_passes_values_through() {
        let result: io::Result<u32> = Ok(0o755);
        assert_eq!(result.fatal_ctx(|| "unreachable").unwrap(), 0o755);
    }
}
