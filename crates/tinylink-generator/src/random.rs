use crate::Generator;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tinylink_core::shortcode::{MAX_LENGTH, MIN_LENGTH};
use tinylink_core::{CoreError, ShortCode};
use typed_builder::TypedBuilder;

/// The 62 symbols short codes are drawn from.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Configures a [`RandomGenerator`].
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct GeneratorSettings {
    /// Number of symbols in every generated code, within `3..=32`.
    #[builder(default = DEFAULT_CODE_LENGTH)]
    pub length: usize,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Generates fixed-length codes uniformly at random over [`ALPHABET`].
///
/// Symbols are drawn independently with replacement, so a length of 6 gives
/// 62^6 (about 56.8 billion) possible codes.
pub struct RandomGenerator {
    length: usize,
    rng: Mutex<StdRng>,
}

impl RandomGenerator {
    /// Creates a generator seeded from the operating system.
    pub fn new(settings: GeneratorSettings) -> Result<Self, CoreError> {
        Self::with_rng(settings, StdRng::from_os_rng())
    }

    /// Creates a generator with a fixed seed; the same seed yields the same codes.
    pub fn seeded(settings: GeneratorSettings, seed: u64) -> Result<Self, CoreError> {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: GeneratorSettings, rng: StdRng) -> Result<Self, CoreError> {
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&settings.length) {
            return Err(CoreError::InvalidCodeLength {
                length: settings.length,
                min: MIN_LENGTH,
                max: MAX_LENGTH,
            });
        }

        Ok(Self {
            length: settings.length,
            rng: Mutex::new(rng),
        })
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self {
            length: DEFAULT_CODE_LENGTH,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }
}

impl std::fmt::Debug for RandomGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomGenerator")
            .field("length", &self.length)
            .finish_non_exhaustive()
    }
}

impl Generator for RandomGenerator {
    type Output = ShortCode;

    fn generate(&self) -> Self::Output {
        let mut rng = self.rng.lock();
        let code: String = (0..self.length)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect();
        ShortCode::new_unchecked(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn alphabet_has_62_unique_alphanumeric_symbols() {
        let unique: HashSet<_> = ALPHABET.iter().collect();
        assert_eq!(unique.len(), 62);
        assert!(ALPHABET.iter().all(u8::is_ascii_alphanumeric));
    }

    #[test]
    fn default_length_is_six() {
        let generator = RandomGenerator::default();
        let code = generator.generate();
        assert_eq!(code.as_str().len(), 6);
        assert!(ShortCode::new(code.as_str()).is_ok());
    }

    #[test]
    fn custom_length() {
        let settings = GeneratorSettings::builder().length(10).build();
        let generator = RandomGenerator::new(settings).unwrap();
        for _ in 0..100 {
            assert_eq!(generator.generate().as_str().len(), 10);
        }
    }

    #[test]
    fn length_out_of_range_is_rejected() {
        for length in [0, 2, 33, 40] {
            let settings = GeneratorSettings::builder().length(length).build();
            assert_eq!(
                RandomGenerator::new(settings).unwrap_err(),
                CoreError::InvalidCodeLength {
                    length,
                    min: 3,
                    max: 32,
                }
            );
        }
    }

    #[test]
    fn boundary_lengths_produce_valid_codes() {
        for length in [3, 32] {
            let settings = GeneratorSettings::builder().length(length).build();
            let generator = RandomGenerator::seeded(settings, 3).unwrap();
            let code = generator.generate();
            assert_eq!(code.as_str().len(), length);
            assert!(ShortCode::new(code.as_str()).is_ok());
        }
    }

    #[test]
    fn same_seed_same_codes() {
        let settings = GeneratorSettings::default();
        let a = RandomGenerator::seeded(settings, 7).unwrap();
        let b = RandomGenerator::seeded(settings, 7).unwrap();
        for _ in 0..10 {
            assert_eq!(a.generate(), b.generate());
        }
    }

    #[test]
    fn codes_only_use_the_alphabet() {
        let settings = GeneratorSettings::default();
        let generator = RandomGenerator::seeded(settings, 1).unwrap();
        for _ in 0..1_000 {
            let code = generator.generate();
            assert!(code.as_str().bytes().all(|b| ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn codes_are_spread_out() {
        let settings = GeneratorSettings::default();
        let generator = RandomGenerator::seeded(settings, 2).unwrap();
        let codes: HashSet<_> = (0..1_000).map(|_| generator.generate()).collect();
        // collisions among 1000 draws from 62^6 are vanishingly unlikely
        assert_eq!(codes.len(), 1_000);
    }

    #[test]
    fn generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RandomGenerator>();
    }
}
