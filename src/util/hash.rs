use std::hash::{BuildHasher, Hash, Hasher};

/// A value with a hash chosen by hand, so that tests can force entries into particular buckets or
/// give different values identical hashes. Equality only considers the value.
#[derive(Debug, Clone)]
pub struct ManualHash<T: Eq> {
    hash: u64,
    value: T,
}

impl<T: Eq> ManualHash<T> {
    pub const fn new(hash: u64, value: T) -> ManualHash<T> {
        ManualHash {
            hash,
            value,
        }
    }

    pub const fn value(&self) -> &T {
        &self.value
    }
}

impl<T: Eq> Hash for ManualHash<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl<T: Eq> PartialEq for ManualHash<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Eq> Eq for ManualHash<T> {}

/// A hasher which finishes with the last integer written to it, unchanged. Paired with
/// [`ManualHash`] (or plain integers) this makes bucket placement fully predictable.
#[derive(Debug, Default)]
pub struct PassThroughHasher {
    state: u64,
}

impl Hasher for PassThroughHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.state = (self.state << 8) | *byte as u64;
        }
    }

    fn write_u64(&mut self, i: u64) {
        self.state = i;
    }

    fn write_u32(&mut self, i: u32) {
        self.state = i as u64;
    }

    fn write_i32(&mut self, i: i32) {
        self.state = i as u32 as u64;
    }

    fn write_usize(&mut self, i: usize) {
        self.state = i as u64;
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PassThroughBuilder;

impl BuildHasher for PassThroughBuilder {
    type Hasher = PassThroughHasher;

    fn build_hasher(&self) -> Self::Hasher {
        PassThroughHasher::default()
    }
}
