//! Swappable randomness behind the mock "model" outputs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

use crate::models::Classification;

/// Source of uniform samples in `[0, 1)`.
///
/// Stands in for whatever model eventually produces the numbers; the
/// aggregation code only ever asks for samples through this trait.
pub trait JitterSource: Send + Sync {
    fn unit(&self) -> f64;

    /// Uniform sample in `[low, low + span)`
    fn range(&self, low: f64, span: f64) -> f64 {
        low + self.unit() * span
    }
}

/// Fresh thread-local randomness on every call
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngJitter;

impl JitterSource for ThreadRngJitter {
    fn unit(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Reproducible sequence from a fixed seed
pub struct SeededJitter {
    rng: Mutex<StdRng>,
}

impl SeededJitter {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl JitterSource for SeededJitter {
    fn unit(&self) -> f64 {
        match self.rng.lock() {
            Ok(mut rng) => rng.gen::<f64>(),
            // A poisoned lock still holds a usable generator
            Err(poisoned) => poisoned.into_inner().gen::<f64>(),
        }
    }
}

/// Always returns the same sample (clamped into `[0, 1)`)
#[derive(Debug, Clone, Copy)]
pub struct FixedJitter(pub f64);

impl JitterSource for FixedJitter {
    fn unit(&self) -> f64 {
        self.0.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

/// Labels a freshly generated listing as fair or overpriced.
pub trait ListingClassifier: Send + Sync {
    fn classify(&self, locality: &str, bedrooms: u32, sqft: u32, rent: f64) -> Classification;
}

/// Marks roughly `overpriced_share` of listings as overpriced, ignoring features.
pub struct RandomClassifier<'a> {
    jitter: &'a dyn JitterSource,
    overpriced_share: f64,
}

impl<'a> RandomClassifier<'a> {
    pub const DEFAULT_OVERPRICED_SHARE: f64 = 0.3;

    pub fn new(jitter: &'a dyn JitterSource) -> Self {
        Self {
            jitter,
            overpriced_share: Self::DEFAULT_OVERPRICED_SHARE,
        }
    }
}

impl ListingClassifier for RandomClassifier<'_> {
    fn classify(&self, _locality: &str, _bedrooms: u32, _sqft: u32, _rent: f64) -> Classification {
        if self.jitter.unit() > 1.0 - self.overpriced_share {
            Classification::Overpriced
        } else {
            Classification::Fair
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_rng_jitter_stays_in_unit_interval() {
        let jitter = ThreadRngJitter;
        for _ in 0..1000 {
            let u = jitter.unit();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn test_seeded_jitter_is_reproducible() {
        let a = SeededJitter::new(42);
        let b = SeededJitter::new(42);
        let xs: Vec<f64> = (0..5).map(|_| a.unit()).collect();
        let ys: Vec<f64> = (0..5).map(|_| b.unit()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_range_scales_sample() {
        assert_eq!(FixedJitter(0.5).range(3000.0, 500.0), 3250.0);
        assert_eq!(FixedJitter(0.0).range(1500.0, 500.0), 1500.0);
        assert!(FixedJitter(1.0).range(0.0, 500.0) < 500.0);
    }

    #[test]
    fn test_random_classifier_threshold() {
        let high = FixedJitter(0.95);
        let low = FixedJitter(0.2);
        assert_eq!(
            RandomClassifier::new(&high).classify("Market Ward", 2, 700, 6000.0),
            Classification::Overpriced
        );
        assert_eq!(
            RandomClassifier::new(&low).classify("Market Ward", 2, 700, 6000.0),
            Classification::Fair
        );
    }
}
