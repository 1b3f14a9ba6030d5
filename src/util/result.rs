use std::error::Error;

pub(crate) trait ResultExtension<T, E: Error> {
    /// Unwraps the value or panics with the error's [`Display`](std::fmt::Display) text. Used
    /// where misusing an allocator is a bug in the caller: the panic reads e.g. "Requested 17
    /// bytes from a pool with 16 byte blocks!" rather than a `Debug` dump.
    ///
    /// # Panics
    /// Panics if `self` is an [`Err`].
    fn throw(self) -> T;
}

impl<T, E: Error> ResultExtension<T, E> for Result<T, E> {
    fn throw(self) -> T {
        self.unwrap_or_else(|error| panic!("{error}"))
    }
}
