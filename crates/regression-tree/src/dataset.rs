//! Train/Test Splitting

use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Split `(x, y)` into shuffled train and test partitions.
///
/// `test_fraction` of the rows (at least one, when there are at least
/// two) go to the test set. The shuffle is seeded, so the same inputs
/// always produce the same partition.
#[allow(clippy::type_complexity)]
pub fn train_test_split(
    x: &[Vec<f64>],
    y: &[f64],
    test_fraction: f64,
    seed: u64,
) -> ((Vec<Vec<f64>>, Vec<f64>), (Vec<Vec<f64>>, Vec<f64>)) {
    let mut indices: Vec<usize> = (0..x.len()).collect();
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let mut n_test = (x.len() as f64 * test_fraction).round() as usize;
    if x.len() >= 2 {
        n_test = n_test.clamp(1, x.len() - 1);
    } else {
        n_test = 0;
    }

    let (test_idx, train_idx) = indices.split_at(n_test);
    let collect = |idx: &[usize]| -> (Vec<Vec<f64>>, Vec<f64>) {
        (
            idx.iter().map(|&i| x[i].clone()).collect(),
            idx.iter().map(|&i| y[i]).collect(),
        )
    };

    let train = collect(train_idx);
    let test = collect(test_idx);
    (train, test)
}
