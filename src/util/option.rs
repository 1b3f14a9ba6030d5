use std::hint;

pub(crate) trait OptionExtension<T> {
    /// Unwraps a link which the shape of a structure guarantees to be present, such as the
    /// successor of a tree node with a right child. Checked with [`unreachable!`] in debug builds
    /// and assumed with [`unreachable_unchecked`](hint::unreachable_unchecked) in release builds.
    ///
    /// # Safety
    /// The caller must guarantee that `self` is [`Some`].
    unsafe fn unreachable(self) -> T;
}

impl<T> OptionExtension<T> for Option<T> {
    unsafe fn unreachable(self) -> T {
        if let Some(value) = self {
            return value;
        }
        debug_assert!(false, "Structure is missing a required link!");
        // SAFETY: The caller guarantees that self is Some.
        unsafe { hint::unreachable_unchecked() }
    }
}
