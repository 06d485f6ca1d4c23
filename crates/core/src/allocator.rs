//! Capped intensity boost allocation.
//!
//! A unit that changes its color gets a short intensity boost, so fresh changes flicker on
//! the tree. Lighting a point light is expensive for the renderer, so only a limited number
//! of units can be boosted in a single frame. When the demand exceeds the budget, units with
//! the higher index win.

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::Color;

/// The maximum number of units boosted in a single frame.
pub const BOOST_CAP: usize = 100;

/// Decides whether a boost outlives the frame in which it was granted.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BoostPolicy {
    /// Only units which changed their color in this frame ask for a boost.
    #[default]
    Transient,
    /// A boosted unit keeps asking for a boost on the following frames.
    Sticky,
}

/// Result of a single allocation step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Allocation {
    /// Colors to apply, one per unit.
    pub colors: Vec<Option<Color>>,
    /// Boost flags to apply, one per unit.
    pub boosted: Vec<bool>,
}

impl Allocation {
    /// Returns the number of boosted units.
    #[must_use]
    pub fn boosted_count(&self) -> usize {
        self.boosted.iter().filter(|boosted| **boosted).count()
    }
}

/// Pure function from the previous frame state and the next colors to the next frame state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameAllocator {
    cap: usize,
    policy: BoostPolicy,
}

impl Default for FrameAllocator {
    fn default() -> Self {
        Self::new(BoostPolicy::default())
    }
}

impl FrameAllocator {
    /// Creates an allocator with the default boost budget.
    #[must_use]
    pub const fn new(policy: BoostPolicy) -> Self {
        Self {
            cap: BOOST_CAP,
            policy,
        }
    }

    /// Overrides the number of units boosted in a single frame.
    #[must_use]
    pub const fn with_cap(mut self, cap: usize) -> Self {
        self.cap = cap;
        self
    }

    #[must_use]
    pub const fn cap(&self) -> usize {
        self.cap
    }

    #[must_use]
    pub const fn policy(&self) -> BoostPolicy {
        self.policy
    }

    /// Computes the colors and boost flags of the next frame.
    ///
    /// All slices are expected to have the same length, the caller is responsible for
    /// rejecting frames that do not fit the collection. Missing previous entries are treated
    /// as changed units without a boost.
    #[must_use]
    pub fn allocate(
        &self,
        prev_colors: &[Option<Color>],
        next_colors: &[Option<Color>],
        prev_boosted: &[bool],
    ) -> Allocation {
        debug_assert_eq!(prev_colors.len(), next_colors.len());
        debug_assert_eq!(prev_boosted.len(), next_colors.len());

        let mut boosted = alloc::vec![false; next_colors.len()];
        let mut granted = 0;
        for (i, next) in next_colors.iter().enumerate().rev() {
            if granted == self.cap {
                break;
            }

            let changed = prev_colors.get(i) != Some(next);
            let was_boosted = self.policy == BoostPolicy::Sticky
                && prev_boosted.get(i).copied().unwrap_or_default();
            if changed || was_boosted {
                boosted[i] = true;
                granted += 1;
            }
        }

        if granted == self.cap {
            log::trace!("Boost budget of {} units is exhausted", self.cap);
        }

        Allocation {
            colors: next_colors.to_vec(),
            boosted,
        }
    }
}
