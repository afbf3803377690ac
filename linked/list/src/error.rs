use std::collections::TryReserveError;

use snafu::prelude::*;

#[derive(Clone, Debug, Eq, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("list is empty"))]
    Empty,
    #[snafu(display("value not found: {value}"))]
    NotFound { value: i32 },

    // Unlike `Empty` and `NotFound`, this is not a no-op the caller may ignore.  The list is left
    // unchanged, but the value was not inserted.
    #[snafu(display("node allocation failed: {source}"))]
    Allocation { source: TryReserveError },
}

impl Error {
    /// True for the errors that merely report a no-op.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Empty | Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(Error::Empty.to_string(), "list is empty");
        assert_eq!(
            Error::NotFound { value: -3 }.to_string(),
            "value not found: -3",
        );
    }

    #[test]
    fn is_recoverable() {
        assert_eq!(Error::Empty.is_recoverable(), true);
        assert_eq!(Error::NotFound { value: 0 }.is_recoverable(), true);

        let source = Vec::<u64>::new().try_reserve(usize::MAX).unwrap_err();
        assert_eq!(Error::Allocation { source }.is_recoverable(), false);
    }
}
