use derive_more::IsVariant;

/// The result of an operation which constructs a value first and only then decides whether to
/// keep it, such as [`RBTree::find_or_insert`](super::binary_tree::RBTree::find_or_insert).
///
/// `P` is the position of the entry which is in the container after the call. When an equal
/// entry was already present the candidate is handed back, untouched, as `rejected`.
#[derive(Debug, IsVariant)]
pub enum Emplaced<P, T> {
    /// The candidate was inserted at the contained position.
    Inserted(P),
    /// An equal entry was found at `found`, so the candidate was not inserted.
    Existing {
        found: P,
        rejected: T,
    },
}

impl<P, T> Emplaced<P, T> {
    /// Returns the position of the entry in the container, whether or not it was just inserted.
    pub fn into_position(self) -> P {
        match self {
            Emplaced::Inserted(pos) => pos,
            Emplaced::Existing { found, .. } => found,
        }
    }

    pub const fn position(&self) -> &P {
        match self {
            Emplaced::Inserted(pos) => pos,
            Emplaced::Existing { found, .. } => found,
        }
    }

    /// Returns the rejected candidate, if there was an existing entry.
    pub fn into_rejected(self) -> Option<T> {
        match self {
            Emplaced::Inserted(_) => None,
            Emplaced::Existing { rejected, .. } => Some(rejected),
        }
    }

    /// Maps the position with the provided function, leaving the variant unchanged.
    pub fn map_position<Q>(self, f: impl FnOnce(P) -> Q) -> Emplaced<Q, T> {
        match self {
            Emplaced::Inserted(pos) => Emplaced::Inserted(f(pos)),
            Emplaced::Existing { found, rejected } => Emplaced::Existing {
                found: f(found),
                rejected,
            },
        }
    }
}
