/// Runs a block and fails the test unless it panics. The block may borrow test state mutably,
/// so a container can be inspected after a panic inside one of its operations.
#[allow(unused_macros)]
macro_rules! assert_panics {
    ($run:block) => {
        assert_panics!($run, "Block was expected to panic.")
    };
    ($run:block, $msg:literal) => {{
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $run));
        assert!(outcome.is_err(), $msg);
    }};
}

#[allow(unused_imports)]
pub(crate) use assert_panics;
