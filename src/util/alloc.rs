use std::cell::RefCell;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZeroSizedType;

/// A keyed value which counts how many times it (or any clone of it) has been dropped. Ordering,
/// equality and hashing only consider the key, so instances can be stored in any container.
#[derive(Debug, Clone)]
pub struct CountedDrop {
    pub key: u32,
    pub drops: Rc<RefCell<usize>>,
}

impl CountedDrop {
    pub fn new(key: u32, drops: &Rc<RefCell<usize>>) -> CountedDrop {
        CountedDrop {
            key,
            drops: Rc::clone(drops),
        }
    }

    pub fn counter() -> Rc<RefCell<usize>> {
        Rc::new(RefCell::new(0))
    }
}

impl Drop for CountedDrop {
    fn drop(&mut self) {
        self.drops.replace_with(|v| *v + 1);
    }
}

impl PartialEq for CountedDrop {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for CountedDrop {}

impl PartialOrd for CountedDrop {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CountedDrop {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl Hash for CountedDrop {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

/// A keyed value whose drop panics if its key is `fuse`. Compared and hashed by key.
#[derive(Debug)]
pub struct PanicOnDrop {
    pub key: u32,
    pub fuse: u32,
}

impl Drop for PanicOnDrop {
    fn drop(&mut self) {
        if self.key == self.fuse && !std::thread::panicking() {
            panic!("PanicOnDrop {} went off", self.key);
        }
    }
}

impl PartialEq for PanicOnDrop {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for PanicOnDrop {}

impl PartialOrd for PanicOnDrop {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PanicOnDrop {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl Hash for PanicOnDrop {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}
