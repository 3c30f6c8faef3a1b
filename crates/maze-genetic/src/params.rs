use std::fmt;

/// Tunable parameters of the genetic solver.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeneticParams {
    /// Genomes per generation. At least [`GeneticParams::MIN_POPULATION`].
    pub population_size: usize,
    /// Per-gene probability of being replaced by a random move, in `[0, 1]`.
    pub mutation_rate: f64,
    /// Per-move probability of steering toward the exit during evaluation,
    /// in `[0, 1]`.
    pub goal_bias: f64,
    /// Top-ranked genomes copied into the next generation. At least 1.
    pub elitism_count: usize,
    /// Seed of the pseudo-random generator; equal seeds replay equal runs.
    pub seed: u64,
}

impl GeneticParams {
    pub const MIN_POPULATION: usize = 10;

    /// Check every parameter against its allowed range.
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.population_size < Self::MIN_POPULATION {
            return Err(ParamError::PopulationTooSmall(self.population_size));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ParamError::MutationRate(self.mutation_rate));
        }
        if !(0.0..=1.0).contains(&self.goal_bias) {
            return Err(ParamError::GoalBias(self.goal_bias));
        }
        if self.elitism_count == 0 {
            return Err(ParamError::NoElites);
        }
        Ok(())
    }

    /// Elites actually kept: at least one, and always leaving room for one
    /// bred child.
    pub fn effective_elites(&self) -> usize {
        self.elitism_count
            .min(self.population_size.saturating_sub(1))
            .max(1)
    }
}

impl Default for GeneticParams {
    fn default() -> Self {
        Self {
            population_size: 140,
            mutation_rate: 0.05,
            goal_bias: 0.80,
            elitism_count: 14,
            seed: 42,
        }
    }
}

/// A [`GeneticParams`] value outside its allowed range.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    PopulationTooSmall(usize),
    MutationRate(f64),
    GoalBias(f64),
    NoElites,
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PopulationTooSmall(n) => write!(
                f,
                "population size {n} is below the minimum of {}",
                GeneticParams::MIN_POPULATION
            ),
            Self::MutationRate(r) => write!(f, "mutation rate {r} is outside [0, 1]"),
            Self::GoalBias(b) => write!(f, "goal bias {b} is outside [0, 1]"),
            Self::NoElites => f.write_str("elitism count must be at least 1"),
        }
    }
}

impl std::error::Error for ParamError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let p = GeneticParams::default();
        assert_eq!(p.validate(), Ok(()));
        assert_eq!(p.population_size, 140);
        assert_eq!(p.elitism_count, 14);
    }

    #[test]
    fn rejects_out_of_range() {
        let base = GeneticParams::default();
        let cases = [
            (
                GeneticParams {
                    population_size: 9,
                    ..base.clone()
                },
                ParamError::PopulationTooSmall(9),
            ),
            (
                GeneticParams {
                    mutation_rate: 1.5,
                    ..base.clone()
                },
                ParamError::MutationRate(1.5),
            ),
            (
                GeneticParams {
                    goal_bias: -0.1,
                    ..base.clone()
                },
                ParamError::GoalBias(-0.1),
            ),
            (
                GeneticParams {
                    elitism_count: 0,
                    ..base.clone()
                },
                ParamError::NoElites,
            ),
        ];
        for (p, err) in cases {
            assert_eq!(p.validate(), Err(err));
        }
        let nan = GeneticParams {
            goal_bias: f64::NAN,
            ..base
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn elites_leave_room_for_children() {
        let p = GeneticParams {
            population_size: 10,
            elitism_count: 50,
            ..GeneticParams::default()
        };
        assert_eq!(p.effective_elites(), 9);
    }
}
