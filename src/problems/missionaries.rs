use crate::error::{Result, SearchError};
use crate::search::{SearchProblem, Successor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bank {
    Left,
    Right,
}

/// Who is still on the left bank, and where the boat is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiverState {
    pub missionaries_left: usize,
    pub cannibals_left: usize,
    pub boat: Bank,
}

/// Passengers of one boat trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Crossing {
    pub missionaries: usize,
    pub cannibals: usize,
}

/// Missionaries and cannibals.
///
/// Everyone starts on the left bank with the boat. The boat carries one to
/// `boat_capacity` people per trip. Cannibals may never outnumber the
/// missionaries on a bank where at least one missionary stands. Each
/// crossing costs 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionariesCannibals {
    missionaries: usize,
    cannibals: usize,
    boat_capacity: usize,
}

impl MissionariesCannibals {
    /// # Errors
    ///
    /// Returns [`SearchError::MalformedInput`] for an empty boat or a start
    /// where the missionaries are already outnumbered.
    pub fn new(missionaries: usize, cannibals: usize, boat_capacity: usize) -> Result<Self> {
        if boat_capacity == 0 {
            return Err(SearchError::MalformedInput(
                "The boat must carry at least one person".to_string(),
            ));
        }
        let problem = Self {
            missionaries,
            cannibals,
            boat_capacity,
        };
        if !problem.is_safe(&problem.start()) {
            return Err(SearchError::MalformedInput(format!(
                "{} cannibals outnumber {} missionaries at the start",
                cannibals, missionaries
            )));
        }
        Ok(problem)
    }

    /// Three of each and a boat for two.
    pub fn classic() -> Self {
        Self {
            missionaries: 3,
            cannibals: 3,
            boat_capacity: 2,
        }
    }

    pub fn start(&self) -> RiverState {
        RiverState {
            missionaries_left: self.missionaries,
            cannibals_left: self.cannibals,
            boat: Bank::Left,
        }
    }

    /// Whether no bank of `state` has missionaries outnumbered.
    pub fn is_safe(&self, state: &RiverState) -> bool {
        let bank_ok = |m: usize, c: usize| m == 0 || m >= c;
        bank_ok(state.missionaries_left, state.cannibals_left)
            && bank_ok(
                self.missionaries - state.missionaries_left,
                self.cannibals - state.cannibals_left,
            )
    }
}

impl SearchProblem for MissionariesCannibals {
    type State = RiverState;
    type Action = Crossing;

    fn initial_state(&self) -> RiverState {
        self.start()
    }

    fn is_goal(&self, state: &RiverState) -> bool {
        state.missionaries_left == 0 && state.cannibals_left == 0 && state.boat == Bank::Right
    }

    fn successors(&self, state: &RiverState) -> Vec<Successor<RiverState, Crossing>> {
        let (available_m, available_c) = match state.boat {
            Bank::Left => (state.missionaries_left, state.cannibals_left),
            Bank::Right => (
                self.missionaries - state.missionaries_left,
                self.cannibals - state.cannibals_left,
            ),
        };

        let mut successors = Vec::new();
        for m in 0..=available_m.min(self.boat_capacity) {
            for c in 0..=available_c.min(self.boat_capacity - m) {
                if m + c == 0 {
                    continue;
                }
                let next = match state.boat {
                    Bank::Left => RiverState {
                        missionaries_left: state.missionaries_left - m,
                        cannibals_left: state.cannibals_left - c,
                        boat: Bank::Right,
                    },
                    Bank::Right => RiverState {
                        missionaries_left: state.missionaries_left + m,
                        cannibals_left: state.cannibals_left + c,
                        boat: Bank::Left,
                    },
                };
                if self.is_safe(&next) {
                    successors.push(Successor::unit(
                        next,
                        Crossing {
                            missionaries: m,
                            cannibals: c,
                        },
                    ));
                }
            }
        }
        successors
    }

    /// Lower bound on the crossings left: a round trip moves at most
    /// `boat_capacity - 1` people over for good, and the final trip up to
    /// one more.
    fn heuristic(&self, state: &RiverState) -> f64 {
        let left = state.missionaries_left + state.cannibals_left;
        if left == 0 {
            return 0.0;
        }
        let net = self.boat_capacity.saturating_sub(1).max(1);
        let crossings = match state.boat {
            Bank::Left => 2 * (left - 1).div_ceil(net).max(1) - 1,
            Bank::Right => 2 * left.div_ceil(net).max(1),
        };
        crossings as f64
    }
}
