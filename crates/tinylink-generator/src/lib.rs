pub mod random;
pub mod seq;

pub use random::{GeneratorSettings, RandomGenerator, ALPHABET, DEFAULT_CODE_LENGTH};
pub use seq::SeqGenerator;

use tinylink_core::ShortCode;

/// Trait for generating candidate short codes.
///
/// Implementations are pure generators that don't interact with storage, so
/// a candidate may already be taken. The caller is responsible for detecting
/// collisions and asking for another candidate.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<ShortCode>;

    /// Produces the next candidate. Never fails.
    fn generate(&self) -> Self::Output;
}
