use super::*;
use rand::rngs::SmallRng;
use rand::Rng;

/// Walker's alias table over a fixed discrete distribution.
///
/// The table is the usual pair of parallel arrays: `probabilities[i]`
/// is the probability of keeping event `i` once the i-th bucket has
/// been selected, `aliases[i]` is the event returned otherwise.
/// Construction is O(k), sampling is O(1) and consumes exactly two
/// uniform draws.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AliasTable {
    pub(crate) aliases: Vec<NodeT>,
    pub(crate) probabilities: Vec<ParamsT>,
}

impl AliasTable {
    /// Build the alias table from the given normalized probabilities.
    ///
    /// # Arguments
    ///
    /// * `probabilities`: &[ParamsT] - Normalized probability vector, must not be empty.
    pub fn new(probabilities: &[ParamsT]) -> Result<AliasTable> {
        if probabilities.is_empty() {
            return Err(concat!(
                "Cannot build an alias table over an empty distribution. ",
                "Nodes without neighbours must be handled as traps by the caller."
            )
            .to_string());
        }
        let k = probabilities.len();
        let mut scaled: Vec<ParamsT> = Vec::with_capacity(k);
        for probability in probabilities {
            if !probability.is_finite() || *probability < 0.0 {
                return Err(format!(
                    "Found the probability {} while building an alias table. Probabilities must be finite and non-negative.",
                    probability
                ));
            }
            scaled.push(probability * k as ParamsT);
        }

        let mut aliases = vec![0 as NodeT; k];
        let mut smaller: Vec<usize> = Vec::with_capacity(k);
        let mut larger: Vec<usize> = Vec::with_capacity(k);
        for (i, scaled_probability) in scaled.iter().enumerate() {
            if *scaled_probability < 1.0 {
                smaller.push(i);
            } else {
                larger.push(i);
            }
        }

        while let (Some(small), Some(large)) = (smaller.pop(), larger.pop()) {
            aliases[small] = large as NodeT;
            scaled[large] = scaled[large] + scaled[small] - 1.0;
            if scaled[large] < 1.0 {
                smaller.push(large);
            } else {
                larger.push(large);
            }
        }

        // The residual entries are numerically one; the subtraction above can
        // also leave tiny negatives, so the kept probabilities are clamped.
        for scaled_probability in scaled.iter_mut() {
            *scaled_probability = scaled_probability.max(0.0).min(1.0);
        }

        Ok(AliasTable {
            aliases,
            probabilities: scaled,
        })
    }

    /// Return the empty table used as sentinel for trap nodes.
    pub(crate) fn sentinel() -> AliasTable {
        AliasTable {
            aliases: Vec::new(),
            probabilities: Vec::new(),
        }
    }

    /// Sample an event index with the given random source.
    ///
    /// Consumes exactly two uniform draws: one to pick the bucket and
    /// one to choose between the bucket and its alias.
    ///
    /// # Arguments
    ///
    /// * `rng`: &mut SmallRng - The random source to use, panics on an empty table.
    pub fn draw(&self, rng: &mut SmallRng) -> usize {
        let k = self.probabilities.len();
        let i = (rng.gen::<ParamsT>() * k as ParamsT) as usize;
        if rng.gen::<ParamsT>() < self.probabilities[i] {
            i
        } else {
            self.aliases[i] as usize
        }
    }

    /// Number of events of the underlying distribution.
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Reconstruct algebraically the distribution the table samples from.
    ///
    /// Event `i` is returned when its own bucket keeps it or when any
    /// bucket aliased to `i` rejects, so its total mass is
    /// `probabilities[i] / k` plus the rejected mass of its aliasing
    /// buckets. Up to floating point error this is the distribution
    /// the table was built from.
    pub fn expected_probabilities(&self) -> Vec<ParamsT> {
        let k = self.probabilities.len();
        let mut expected = vec![0.0; k];
        for (i, (alias, probability)) in self
            .aliases
            .iter()
            .zip(self.probabilities.iter())
            .enumerate()
        {
            expected[i] += probability / k as ParamsT;
            expected[*alias as usize] += (1.0 - probability) / k as ParamsT;
        }
        expected
    }
}
