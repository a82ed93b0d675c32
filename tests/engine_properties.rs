// tests/engine_properties.rs
use proptest::prelude::*;
use statrs::distribution::{Continuous, ContinuousCDF};

use statlab::analysis::{bin, erf, gamma, BinningPolicy, Distribution, CURVE_STEPS};

fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {} within {} of {}",
        actual,
        tol,
        expected
    );
}

#[test]
fn erf_matches_statrs() {
    for i in -40..=40 {
        let x = i as f64 / 10.0;
        assert_close(erf(x), statrs::function::erf::erf(x), 2e-7);
    }
}

#[test]
fn gamma_matches_statrs() {
    for x in [0.1, 0.5, 1.0, 1.5, 2.0, 3.7, 5.0, 10.0, -0.5, -2.5] {
        let expected = statrs::function::gamma::gamma(x);
        assert_close(gamma(x) / expected, 1.0, 1e-10);
    }
}

#[test]
fn normal_matches_statrs() {
    let ours = Distribution::normal(1.5, 2.0).unwrap();
    let reference = statrs::distribution::Normal::new(1.5, 2.0).unwrap();
    for i in -20..=20 {
        let x = i as f64 / 2.0;
        assert_close(ours.pdf(x).unwrap(), reference.pdf(x), 1e-12);
        assert_close(ours.cdf(x).unwrap().unwrap(), reference.cdf(x), 1e-7);
    }
}

#[test]
fn gamma_pdf_matches_statrs() {
    // statrs parametrises by rate = 1 / scale
    let ours = Distribution::gamma(2.5, 1.5).unwrap();
    let reference = statrs::distribution::Gamma::new(2.5, 1.0 / 1.5).unwrap();
    for i in 1..=40 {
        let x = i as f64 / 4.0;
        let expected = reference.pdf(x);
        assert_close(ours.pdf(x).unwrap(), expected, 1e-10 * expected.max(1.0));
    }
}

#[test]
fn exponential_matches_statrs() {
    let ours = Distribution::exponential(0.75).unwrap();
    let reference = statrs::distribution::Exp::new(0.75).unwrap();
    for i in 0..=20 {
        let x = i as f64 / 2.0;
        assert_close(ours.pdf(x).unwrap(), reference.pdf(x), 1e-12);
        assert_close(ours.cdf(x).unwrap().unwrap(), reference.cdf(x), 1e-12);
    }
}

proptest! {
    #[test]
    fn erf_is_odd_and_bounded(x in -10.0f64..10.0) {
        // erf(0) itself is only zero to within the approximation error
        prop_assume!(x != 0.0);
        prop_assert_eq!(erf(-x), -erf(x));
        prop_assert!(erf(x).abs() <= 1.0);
    }

    #[test]
    fn histogram_counts_every_sample(samples in prop::collection::vec(-1e6f64..1e6, 1..300)) {
        let histogram = bin(&samples, 5, 30).unwrap();
        prop_assert_eq!(histogram.counts().iter().sum::<usize>(), samples.len());
        prop_assert_eq!(histogram.total(), samples.len());
        prop_assert!(histogram.len() == 1 || (5..=30).contains(&histogram.len()));
    }

    #[test]
    fn identical_samples_give_one_bin(value in -1e6f64..1e6, n in 1usize..100) {
        let samples = vec![value; n];
        let histogram = bin(&samples, 5, 30).unwrap();
        prop_assert_eq!(histogram.len(), 1);
        prop_assert_eq!(histogram.counts(), vec![n]);
    }

    #[test]
    fn grouped_policy_stays_in_range(samples in prop::collection::vec(0.0f64..50.0, 2..500)) {
        let policy = BinningPolicy::grouped();
        let histogram = statlab::analysis::bin_with(&samples, &policy).unwrap();
        prop_assert!(histogram.len() == 1 || (5..=20).contains(&histogram.len()));
    }

    #[test]
    fn curves_have_fixed_resolution(mean in -100.0f64..100.0, std_dev in 0.01f64..50.0) {
        let curve = Distribution::normal(mean, std_dev).unwrap().curve().unwrap();
        prop_assert_eq!(curve.len(), CURVE_STEPS + 1);
        let xs = curve.xs();
        prop_assert!((xs[0] - (mean - 4.0 * std_dev)).abs() < 1e-9);
    }

    #[test]
    fn gamma_pdf_is_finite_for_large_shapes(shape in 1.0f64..1000.0, scale in 0.1f64..10.0, t in 0.0f64..1.0) {
        let d = Distribution::gamma(shape, scale).unwrap();
        let (start, end) = d.domain();
        let pdf = d.pdf(start + t * (end - start)).unwrap();
        prop_assert!(pdf.is_finite() && pdf >= 0.0);
    }

    #[test]
    fn uniform_cdf_is_clamped(lower in -10.0f64..10.0, width in 0.1f64..10.0, x in -50.0f64..50.0) {
        let d = Distribution::uniform(lower, lower + width).unwrap();
        let cdf = d.cdf(x).unwrap().unwrap();
        prop_assert!((0.0..=1.0).contains(&cdf));
    }
}
