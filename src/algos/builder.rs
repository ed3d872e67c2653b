use crate::balance::Balance;
use crate::model::{Assignments, StudentId, TeamId};
use rand::prelude::*;
use tracing::{debug, trace};

/// Randomized round-robin greedy construction. Teams take turns picking one
/// student at a time from the pool of students the balance rules still admit;
/// the shuffle and the uniform pick diversify which students get first-pick
/// priority between runs.
pub struct Builder<'a> {
    assignments: &'a mut Assignments,
    balance: Balance,
    rng: &'a mut StdRng,
}

impl<'a> Builder<'a> {
    pub fn new(
        assignments: &'a mut Assignments,
        balance: Balance,
        rng: &'a mut StdRng,
    ) -> Builder<'a> {
        Builder {
            assignments,
            balance,
            rng,
        }
    }

    /// Fill every team of the group up to its capacity. Students the seats
    /// cannot accommodate stay unassigned; the caller surfaces them.
    pub fn assign(&mut self) {
        let teams = self.assignments.all_teams();
        let mut remaining = self.assignments.all_students();
        remaining.shuffle(self.rng);
        while !remaining.is_empty() && teams.iter().any(|&t| !self.assignments.is_full(t)) {
            for &team in &teams {
                if remaining.is_empty() {
                    break;
                }
                if self.assignments.is_full(team) {
                    continue;
                }
                self.place_one(team, &mut remaining);
            }
        }
    }

    /// Place one student into `team`: a uniform pick from the admissible
    /// candidates, or the last remaining student when nobody passes the
    /// balance checks and the imbalance has to be tolerated.
    fn place_one(&mut self, team: TeamId, remaining: &mut Vec<StudentId>) {
        let pool: Vec<usize> = (0..remaining.len())
            .filter(|&i| self.balance.can_admit(self.assignments, team, remaining[i]))
            .collect();
        match pool.choose(self.rng) {
            Some(&pick) => {
                // Order-preserving removal keeps "last remaining" well
                // defined for later forced placements.
                let student = remaining.remove(pick);
                self.assignments.assign_to(student, team);
                trace!(
                    student = %self.assignments.student(student).name,
                    team = team.0 + 1,
                    "Placing student"
                );
            }
            None => {
                let student = remaining.pop().expect("remaining students exhausted");
                self.assignments.assign_to(student, team);
                self.assignments.mark_forced(student);
                debug!(
                    student = %self.assignments.student(student).name,
                    team = team.0 + 1,
                    "No admissible candidate, forcing placement"
                );
            }
        }
    }
}
