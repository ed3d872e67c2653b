use crate::model::{Assignments, Student, StudentId, TeamId};
use std::collections::HashMap;
use std::iter;

/// Admission filter and quality score shared by the team builder and the swap
/// optimizer. `target_cgpa` is the owning tutorial group's overall mean.
#[derive(Clone, Copy, Debug)]
pub struct Balance {
    target_cgpa: f64,
    tolerance: f64,
}

impl Balance {
    pub fn new(target_cgpa: f64, tolerance: f64) -> Balance {
        Balance {
            target_cgpa,
            tolerance,
        }
    }

    pub fn target_cgpa(&self) -> f64 {
        self.target_cgpa
    }

    /// Whether `candidate` may join `team` without breaking any of the three
    /// balance rules. An empty team admits anyone. The CGPA rule bounds the
    /// would-be team mean within `tolerance` of the group target; the school
    /// and gender rules cap any single category at half the would-be size,
    /// rounded down (a team of 5 tolerates a count of 2, not 3).
    pub fn can_admit(&self, a: &Assignments, team: TeamId, candidate: StudentId) -> bool {
        let members = a.members_of(team);
        if members.is_empty() {
            return true;
        }
        let next_size = members.len() + 1;

        let total: f64 = members.iter().map(|&s| a.student(s).cgpa).sum::<f64>()
            + a.student(candidate).cgpa;
        if (total / next_size as f64 - self.target_cgpa).abs() > self.tolerance {
            return false;
        }

        let with_candidate = || members.iter().copied().chain(iter::once(candidate));
        top_category_count(a, with_candidate(), |s| s.school.as_str()) <= next_size / 2
            && top_category_count(a, with_candidate(), |s| s.gender.as_str()) <= next_size / 2
    }

    /// Non-negative score of a team: CGPA deviation from the target plus how
    /// far the dominant school and gender exceed half the team size. Lower is
    /// better; an on-target, evenly mixed team scores 0. Deterministic for a
    /// given membership.
    pub fn imbalance(&self, a: &Assignments, team: TeamId) -> f64 {
        let members = a.members_of(team);
        if members.is_empty() {
            return 0.0;
        }
        let half = members.len() / 2;
        let cgpa_deviation = (a.mean_cgpa(team) - self.target_cgpa).abs();
        let school_excess = top_category_count(a, members.iter().copied(), |s| s.school.as_str())
            .saturating_sub(half);
        let gender_excess = top_category_count(a, members.iter().copied(), |s| s.gender.as_str())
            .saturating_sub(half);
        cgpa_deviation + (school_excess + gender_excess) as f64
    }
}

/// Count of the most frequent value of one categorical field among the given
/// students.
fn top_category_count<'a, I, F>(a: &'a Assignments, students: I, field: F) -> usize
where
    I: IntoIterator<Item = StudentId>,
    F: Fn(&'a Student) -> &'a str,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for student in students {
        *counts.entry(field(a.student(student))).or_insert(0) += 1;
    }
    counts.into_values().max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TutorialGroup;

    /// Build a one-team group from `(school, gender, cgpa)` triples and
    /// assign every student but the last to team 0. The last student is the
    /// admission candidate.
    fn team_and_candidate(profile: &[(&str, &str, f64)]) -> (Assignments, StudentId) {
        let students = profile
            .iter()
            .enumerate()
            .map(|(i, &(school, gender, cgpa))| Student {
                tutorial_group: "G-1".to_owned(),
                student_id: format!("{i}"),
                name: format!("Student {i}"),
                school: school.to_owned(),
                gender: gender.to_owned(),
                cgpa,
            })
            .collect::<Vec<_>>();
        let group = TutorialGroup {
            name: "G-1".to_owned(),
            students,
        };
        let mut a = Assignments::new(group, profile.len());
        for id in 0..profile.len() - 1 {
            a.assign_to(StudentId(id), TeamId(0));
        }
        (a, StudentId(profile.len() - 1))
    }

    #[test]
    fn empty_team_admits_anyone() {
        let (mut a, candidate) = team_and_candidate(&[("A", "Male", 0.0)]);
        // A wildly off-target candidate against an absurd target.
        let balance = Balance::new(5.0, 0.5);
        assert!(balance.can_admit(&a, TeamId(0), candidate));
        a.assign_to(candidate, TeamId(0));
        assert!(balance.imbalance(&a, TeamId(0)) > 0.0);
    }

    #[test]
    fn cgpa_window_is_inclusive_at_the_tolerance() {
        // Team mean with the candidate would be 4.5 against a 4.0 target.
        let (a, candidate) = team_and_candidate(&[("A", "Male", 4.0), ("B", "Female", 5.0)]);
        assert!(Balance::new(4.0, 0.5).can_admit(&a, TeamId(0), candidate));
        // Nudge the target so the deviation exceeds the tolerance.
        assert!(!Balance::new(3.99, 0.5).can_admit(&a, TeamId(0), candidate));
    }

    #[test]
    fn school_majority_uses_floor_of_next_size() {
        // Next size 5, floor half 2: a third A-school member must be refused.
        let (a, candidate) = team_and_candidate(&[
            ("A", "Male", 4.0),
            ("A", "Female", 4.0),
            ("B", "Male", 4.0),
            ("C", "Female", 4.0),
            ("A", "Male", 4.0),
        ]);
        assert!(!Balance::new(4.0, 0.5).can_admit(&a, TeamId(0), candidate));

        // Next size 4, floor half 2: a second A-school member stays within
        // the cap.
        let (a, candidate) = team_and_candidate(&[
            ("A", "Male", 4.0),
            ("B", "Female", 4.0),
            ("C", "Male", 4.0),
            ("A", "Female", 4.0),
        ]);
        assert!(Balance::new(4.0, 0.5).can_admit(&a, TeamId(0), candidate));
    }

    #[test]
    fn fifth_member_of_a_two_gender_team_always_trips_the_cap() {
        // Four members split 2-2 by gender: whoever arrives fifth creates a
        // 3-of-5 gender majority, above floor(5 / 2). This is why builders
        // routinely finish such teams through the forced fallback.
        for gender in ["Male", "Female"] {
            let (a, candidate) = team_and_candidate(&[
                ("A", "Male", 4.0),
                ("B", "Female", 4.0),
                ("C", "Male", 4.0),
                ("D", "Female", 4.0),
                ("E", gender, 4.0),
            ]);
            assert!(!Balance::new(4.0, 0.5).can_admit(&a, TeamId(0), candidate));
        }
    }

    #[test]
    fn pairs_cannot_share_a_category() {
        // Next size 2, floor half 1: two of anything is a strict majority.
        let (a, candidate) = team_and_candidate(&[("A", "Male", 4.0), ("A", "Female", 4.0)]);
        assert!(!Balance::new(4.0, 0.5).can_admit(&a, TeamId(0), candidate));
        let (a, candidate) = team_and_candidate(&[("A", "Male", 4.0), ("B", "Male", 4.0)]);
        assert!(!Balance::new(4.0, 0.5).can_admit(&a, TeamId(0), candidate));
        let (a, candidate) = team_and_candidate(&[("A", "Male", 4.0), ("B", "Female", 4.0)]);
        assert!(Balance::new(4.0, 0.5).can_admit(&a, TeamId(0), candidate));
    }

    #[test]
    fn majority_check_ignores_category_labels() {
        let decision = |labels: [&str; 4]| {
            let (a, candidate) = team_and_candidate(&[
                (labels[0], "Male", 4.0),
                (labels[1], "Female", 4.0),
                (labels[2], "Male", 4.0),
                (labels[3], "Female", 4.0),
            ]);
            Balance::new(4.0, 0.5).can_admit(&a, TeamId(0), candidate)
        };
        // Relabeling the schools must not change the outcome.
        assert_eq!(
            decision(["A", "A", "B", "A"]),
            decision(["Science", "Science", "Arts", "Science"])
        );
        assert_eq!(decision(["A", "B", "C", "A"]), decision(["X", "Y", "Z", "X"]));
    }

    #[test]
    fn imbalance_sums_deviation_and_category_excesses() {
        let (mut a, candidate) = team_and_candidate(&[
            ("A", "Male", 4.2),
            ("A", "Male", 4.2),
            ("A", "Male", 4.2),
            ("B", "Female", 4.2),
            ("B", "Female", 4.2),
        ]);
        a.assign_to(candidate, TeamId(0));
        let balance = Balance::new(4.0, 0.5);
        // Mean 4.2 vs 4.0 target, school majority 3 of 5 (excess 1), gender
        // majority 3 of 5 (excess 1).
        let score = balance.imbalance(&a, TeamId(0));
        assert!((score - 2.2).abs() < 1e-9);
    }

    #[test]
    fn imbalance_is_zero_for_balanced_on_target_team() {
        let (mut a, candidate) = team_and_candidate(&[
            ("A", "Male", 4.0),
            ("A", "Male", 4.0),
            ("B", "Female", 4.0),
            ("B", "Female", 4.0),
        ]);
        a.assign_to(candidate, TeamId(0));
        assert_eq!(Balance::new(4.0, 0.5).imbalance(&a, TeamId(0)), 0.0);
    }

    #[test]
    fn imbalance_is_deterministic() {
        let (mut a, candidate) = team_and_candidate(&[
            ("A", "Male", 3.1),
            ("B", "Female", 4.9),
            ("C", "Male", 4.4),
        ]);
        a.assign_to(candidate, TeamId(0));
        let balance = Balance::new(4.1, 0.5);
        let first = balance.imbalance(&a, TeamId(0));
        for _ in 0..10 {
            assert_eq!(balance.imbalance(&a, TeamId(0)), first);
        }
    }
}
