use std::fmt::{self, Debug, Formatter};

/// Pre-rendered text which debug formats without quotes, for summaries like a bucket's contents.
pub struct DebugRaw(pub String);

impl Debug for DebugRaw {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
