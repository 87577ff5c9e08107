//! Deterministic, reproducible catalog orderings.
//!
//! Two algorithms over a time-window seed: a seeded full shuffle for
//! sections that should visibly rotate together on a schedule, and a hashed
//! stable sort for lists that must not jump around as titles are added.

mod seed;
mod shuffle;
mod stable;

pub use seed::{identity_hash, window_seed, window_seed_at};
pub use shuffle::seeded_shuffle;
pub use stable::hashed_stable_sort;
