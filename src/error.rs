use thiserror::Error;

/// Errors reported by the collections in this crate.
///
/// A missing key is never an error: lookups and removals by key report
/// absence through `Option` or `bool`. These variants cover misuse that the
/// caller can act on, and each one is raised before the collection is
/// modified.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum Error {
    /// A load factor outside of `[1/1024, 1]` was supplied.
    #[error("load factor must be in [1/1024, 1], got {0}")]
    InvalidLoadFactor(f32),

    /// An index-based operation was given an index past the end of the
    /// collection.
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds {
        /// The rejected index.
        index: usize,
        /// The length of the collection at the time of the call.
        len: usize,
    },

    /// A cursor was asked to remove an element without a preceding call to
    /// `next`, or the element it returned was already removed.
    #[error("no current element: remove() must follow a call to next()")]
    NoCurrentElement,
}

impl Error {
    /// Checks `index < len`, returning an [`Error::IndexOutOfBounds`]
    /// otherwise.
    #[inline]
    pub(crate) fn check_index(index: usize, len: usize) -> Result<(), Error> {
        if index < len {
            Ok(())
        } else {
            Err(Error::IndexOutOfBounds { index, len })
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            Error::InvalidLoadFactor(1.5).to_string(),
            "load factor must be in [1/1024, 1], got 1.5"
        );
        assert_eq!(
            Error::IndexOutOfBounds { index: 4, len: 2 }.to_string(),
            "index 4 out of bounds for length 2"
        );
        assert!(Error::NoCurrentElement.to_string().contains("next()"));
    }

    #[test]
    fn check_index_bounds() {
        assert_eq!(Error::check_index(0, 1), Ok(()));
        assert_eq!(
            Error::check_index(1, 1),
            Err(Error::IndexOutOfBounds { index: 1, len: 1 })
        );
        assert_eq!(
            Error::check_index(0, 0),
            Err(Error::IndexOutOfBounds { index: 0, len: 0 })
        );
    }
}
