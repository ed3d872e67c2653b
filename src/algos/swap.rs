use crate::balance::Balance;
use crate::model::{Assignments, TeamId};
use tracing::{debug, trace};

/// Outcome of a refinement run.
#[derive(Clone, Copy, Debug)]
pub struct Refinement {
    pub rounds: usize,
    pub swaps: usize,
}

/// Pairwise-swap local search. Every round examines every cross-team pair of
/// seats and keeps an exchange only when it strictly lowers the combined
/// imbalance of the two teams involved. The search stops after the first
/// round without an accepted swap, or when the round budget runs out.
pub struct SwapOptimizer<'a> {
    assignments: &'a mut Assignments,
    balance: Balance,
    max_rounds: usize,
}

impl<'a> SwapOptimizer<'a> {
    pub fn new(
        assignments: &'a mut Assignments,
        balance: Balance,
        max_rounds: usize,
    ) -> SwapOptimizer<'a> {
        SwapOptimizer {
            assignments,
            balance,
            max_rounds,
        }
    }

    /// Run improvement rounds until one passes without any accepted swap or
    /// `max_rounds` is reached. A zero budget disables refinement entirely.
    pub fn refine(&mut self) -> Refinement {
        let mut refinement = Refinement {
            rounds: 0,
            swaps: 0,
        };
        for _ in 0..self.max_rounds {
            let swaps = self.round();
            refinement.rounds += 1;
            refinement.swaps += swaps;
            trace!(round = refinement.rounds, swaps, "Refinement round done");
            if swaps == 0 {
                break;
            }
        }
        debug!(
            rounds = refinement.rounds,
            swaps = refinement.swaps,
            "Refinement finished"
        );
        refinement
    }

    fn round(&mut self) -> usize {
        let teams = self.assignments.all_teams();
        let mut swaps = 0;
        for (i, &ta) in teams.iter().enumerate() {
            for &tb in &teams[i + 1..] {
                for sa in 0..self.assignments.size(ta) {
                    for sb in 0..self.assignments.size(tb) {
                        if self.improve_pair(ta, sa, tb, sb) {
                            swaps += 1;
                        }
                    }
                }
            }
        }
        swaps
    }

    /// Exchange the students at the given seats, keeping the exchange only
    /// when it strictly improves the two teams' combined imbalance.
    fn improve_pair(&mut self, ta: TeamId, sa: usize, tb: TeamId, sb: usize) -> bool {
        let a = self.assignments.members_of(ta)[sa];
        let b = self.assignments.members_of(tb)[sb];
        let before = self.balance.imbalance(self.assignments, ta)
            + self.balance.imbalance(self.assignments, tb);
        self.assignments.swap(a, b);
        let after = self.balance.imbalance(self.assignments, ta)
            + self.balance.imbalance(self.assignments, tb);
        if after < before {
            trace!(
                a = %self.assignments.student(a).name,
                b = %self.assignments.student(b).name,
                before,
                after,
                "Keeping improving swap"
            );
            true
        } else {
            self.assignments.swap(a, b);
            false
        }
    }
}
