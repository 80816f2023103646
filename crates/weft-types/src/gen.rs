use std::cell::Cell;
use std::marker::PhantomData;

use uuid::Uuid;

use crate::id::{ContractId, ObjectId, ValueId};

/// Source of fresh identifiers.
///
/// A generator instance never returns the same id twice. Implementations
/// are not required to coordinate across instances: two generators may
/// produce overlapping ids unless the id space is random.
pub trait IdGenerator<I> {
    /// Produce an id not previously returned by this generator.
    fn generate(&self) -> I;
}

/// Id types that can be minted from 16 raw random bytes.
pub trait FromRaw {
    fn from_raw(bytes: [u8; 16]) -> Self;
}

/// Id types with an orderable ordinal form.
pub trait FromOrdinal {
    fn from_ordinal(n: u64) -> Self;
}

macro_rules! impl_id_sources {
    ($($id:ty),*) => {
        $(
            impl FromRaw for $id {
                fn from_raw(bytes: [u8; 16]) -> Self {
                    // Stamp the v4 version/variant bits so the id prints as
                    // a well-formed uuid.
                    Self::new(uuid::Builder::from_random_bytes(bytes).into_uuid())
                }
            }

            impl FromOrdinal for $id {
                fn from_ordinal(n: u64) -> Self {
                    Self::new(Uuid::from_u128(n as u128))
                }
            }
        )*
    };
}

impl_id_sources!(ObjectId, ContractId, ValueId);

impl FromOrdinal for crate::id::SlotId {
    fn from_ordinal(n: u64) -> Self {
        Self::new(n as u32)
    }
}

/// Random id generator: globally unique ids from random bytes.
pub struct RandomIdGenerator<I> {
    _marker: PhantomData<I>,
}

impl<I> RandomIdGenerator<I> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<I> Default for RandomIdGenerator<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: FromRaw> IdGenerator<I> for RandomIdGenerator<I> {
    fn generate(&self) -> I {
        let mut bytes = [0u8; 16];
        rand::Rng::fill(&mut rand::thread_rng(), &mut bytes[..]);
        I::from_raw(bytes)
    }
}

/// Sequential id generator: a plain incrementing counter.
///
/// The counter lives in a `Cell`, so the generator is `!Sync`; concurrent
/// use from multiple threads is a compile error rather than a silent
/// duplicate-allocation hazard. Ids start at 1 so the nil id is never
/// produced.
pub struct SequentialIdGenerator<I> {
    next: Cell<u64>,
    _marker: PhantomData<I>,
}

impl<I> SequentialIdGenerator<I> {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Start the counter at an explicit ordinal.
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: Cell::new(first),
            _marker: PhantomData,
        }
    }

    /// The ordinal the next `generate` call will use.
    pub fn peek(&self) -> u64 {
        self.next.get()
    }
}

impl<I> Default for SequentialIdGenerator<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: FromOrdinal> IdGenerator<I> for SequentialIdGenerator<I> {
    fn generate(&self) -> I {
        let n = self.next.get();
        self.next.set(n + 1);
        I::from_ordinal(n)
    }
}
