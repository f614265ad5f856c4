use rand::rngs::SmallRng;
use rand::SeedableRng;
use xn2v_graph::AliasTable;

#[test]
fn test_singleton_distribution() {
    let table = AliasTable::new(&[1.0]).unwrap();
    assert_eq!(1, table.len());
    let mut rng = SmallRng::seed_from_u64(42);
    for _ in 0..10 {
        assert_eq!(0, table.draw(&mut rng));
    }
    assert!((table.expected_probabilities()[0] - 1.0).abs() < 1e-12);
}

#[test]
fn test_empty_distribution_is_rejected() {
    assert!(AliasTable::new(&[]).is_err());
}

#[test]
fn test_invalid_probabilities_are_rejected() {
    assert!(AliasTable::new(&[0.5, -0.5]).is_err());
    assert!(AliasTable::new(&[0.5, f64::NAN]).is_err());
    assert!(AliasTable::new(&[0.5, f64::INFINITY]).is_err());
}

#[test]
/// The alias table must reconstruct algebraically the distribution it
/// was built from: summing the kept mass of every bucket with the
/// rejected mass of the buckets aliased to it gives back the input.
fn test_expected_probabilities_match_input() {
    for probabilities in &[
        vec![0.4, 0.28, 0.32],
        vec![0.5, 0.3, 0.2],
        vec![0.25; 4],
        vec![0.7, 0.1, 0.1, 0.05, 0.05],
        (1..=10).map(|i| i as f64 / 55.0).collect::<Vec<f64>>(),
    ] {
        let table = AliasTable::new(probabilities).unwrap();
        assert_eq!(probabilities.len(), table.len());
        for (expected, reconstructed) in probabilities
            .iter()
            .zip(table.expected_probabilities().iter())
        {
            assert!(
                (expected - reconstructed).abs() < 1e-9,
                "expected probability {} but the table reconstructs {}",
                expected,
                reconstructed
            );
        }
    }
}

#[test]
/// Drawing many samples must produce empirical frequencies close to
/// the input distribution.
fn test_sampling_frequencies_converge() {
    let probabilities = vec![0.4, 0.28, 0.32];
    let table = AliasTable::new(&probabilities).unwrap();
    let mut rng = SmallRng::seed_from_u64(0xDEAD);
    let samples = 100_000;
    let mut counts = vec![0usize; probabilities.len()];
    for _ in 0..samples {
        counts[table.draw(&mut rng)] += 1;
    }
    for (probability, count) in probabilities.iter().zip(counts.iter()) {
        let frequency = *count as f64 / samples as f64;
        assert!(
            (probability - frequency).abs() < 0.01,
            "expected frequency {} but sampled {}",
            probability,
            frequency
        );
    }
}
