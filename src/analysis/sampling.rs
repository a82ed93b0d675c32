// src/analysis/sampling.rs

use rand::prelude::*;
use rand_distr::{Distribution as _, Exp, Gamma, Normal, Uniform};
use tracing::debug;

use super::distribution::Distribution;
use crate::error::{Result, StatsError};

/// Draw `count` samples from `distribution`.
///
/// A fixed `seed` makes the draw reproducible; without one the generator is
/// seeded from the operating system.
pub fn sample(distribution: &Distribution, count: usize, seed: Option<u64>) -> Result<Vec<f64>> {
    distribution.validate()?;

    let mut rng = if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_entropy()
    };
    debug!(%distribution, count, ?seed, "drawing samples");

    let samples = match *distribution {
        Distribution::Normal { mean, std_dev } => {
            let normal = Normal::new(mean, std_dev).map_err(|_| rejected("std_dev", std_dev))?;
            draw(&normal, count, &mut rng)
        }
        Distribution::Exponential { rate } => {
            let exp = Exp::new(rate).map_err(|_| rejected("rate", rate))?;
            draw(&exp, count, &mut rng)
        }
        Distribution::Uniform { lower, upper } => {
            // Closed interval, matching the density's support. `validate` has
            // already ruled out a width that overflows, which would panic here.
            draw(&Uniform::new_inclusive(lower, upper), count, &mut rng)
        }
        Distribution::Gamma { shape, scale } => {
            let gamma = Gamma::new(shape, scale).map_err(|_| rejected("shape", shape))?;
            draw(&gamma, count, &mut rng)
        }
    };

    Ok(samples)
}

fn draw<D: rand_distr::Distribution<f64>>(dist: &D, count: usize, rng: &mut StdRng) -> Vec<f64> {
    dist.sample_iter(rng).take(count).collect()
}

fn rejected(name: &'static str, value: f64) -> StatsError {
    StatsError::InvalidParameter {
        name,
        value,
        expected: "a parameter accepted by the sampler",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::summary::describe;

    #[test]
    fn test_seed_is_reproducible() {
        let d = Distribution::normal(10.0, 2.0).unwrap();
        let a = sample(&d, 50, Some(7)).unwrap();
        let b = sample(&d, 50, Some(7)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 50);
    }

    #[test]
    fn test_sample_moments_are_close() {
        let d = Distribution::gamma(2.0, 3.0).unwrap();
        let stats = describe(&sample(&d, 20_000, Some(42)).unwrap()).unwrap();
        assert!((stats.mean - d.mean()).abs() < 0.3, "mean {}", stats.mean);
        assert!((stats.variance - d.variance()).abs() < 2.0, "variance {}", stats.variance);
    }

    #[test]
    fn test_supports_are_respected() {
        let exp = sample(&Distribution::exponential(3.0).unwrap(), 500, Some(1)).unwrap();
        assert!(exp.iter().all(|x| *x >= 0.0));
        let uni = sample(&Distribution::uniform(-1.0, 1.0).unwrap(), 500, Some(1)).unwrap();
        assert!(uni.iter().all(|x| (-1.0..=1.0).contains(x)));
    }

    #[test]
    fn test_overflowing_uniform_width_is_rejected() {
        let wide = Distribution::Uniform { lower: -1e308, upper: 1e308 };
        let err = sample(&wide, 10, Some(1)).unwrap_err();
        assert!(matches!(err, StatsError::InvalidParameter { name: "upper", .. }));

        let samples = sample(&Distribution::uniform(-1e307, 1e307).unwrap(), 10, Some(1)).unwrap();
        assert!(samples.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn test_zero_count_and_invalid() {
        assert!(sample(&Distribution::standard_normal(), 0, None).unwrap().is_empty());
        assert!(sample(&Distribution::Normal { mean: 0.0, std_dev: -1.0 }, 10, Some(1)).is_err());
    }
}
