use crate::Generator;
use std::sync::atomic::{AtomicU64, Ordering};
use tinylink_core::ShortCode;

/// A deterministic short code generator using a sequential counter.
///
/// This generator produces codes like "tl000000", "tl000001", etc. Each
/// instance never repeats itself, which makes it handy for tests and for
/// reproducible runs.
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
    prefix: String,
}

impl Clone for SeqGenerator {
    fn clone(&self) -> Self {
        Self {
            counter: AtomicU64::new(self.counter.load(Ordering::SeqCst)),
            prefix: self.prefix.clone(),
        }
    }
}

impl SeqGenerator {
    /// Creates a new sequential generator with a custom prefix.
    ///
    /// The prefix should be alphanumeric so the codes stay valid.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self::with_offset(prefix, 0)
    }

    /// Creates a new sequential generator starting from a specific counter value.
    pub fn with_offset(prefix: impl Into<String>, offset: u64) -> Self {
        Self {
            counter: AtomicU64::new(offset),
            prefix: prefix.into(),
        }
    }
}

impl Generator for SeqGenerator {
    type Output = ShortCode;

    fn generate(&self) -> ShortCode {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        ShortCode::new_unchecked(format!("{}{:06}", self.prefix, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_sequential_codes() {
        let generator = SeqGenerator::with_prefix("tl");

        assert_eq!(generator.generate().as_str(), "tl000000");
        assert_eq!(generator.generate().as_str(), "tl000001");
        assert_eq!(generator.generate().as_str(), "tl000002");
    }

    #[test]
    fn with_offset() {
        let generator = SeqGenerator::with_offset("tl", 1000);

        assert_eq!(generator.generate().as_str(), "tl001000");
        assert_eq!(generator.generate().as_str(), "tl001001");
    }

    #[test]
    fn clone_preserves_counter_state() {
        let generator = SeqGenerator::with_prefix("tl");
        generator.generate();
        generator.generate();

        let cloned = generator.clone();

        assert_eq!(generator.generate().as_str(), "tl000002");
        assert_eq!(cloned.generate().as_str(), "tl000002");
    }

    #[test]
    fn codes_are_valid() {
        let generator = SeqGenerator::with_prefix("node1");
        let code = generator.generate();
        assert!(ShortCode::new(code.as_str()).is_ok());
    }
}
