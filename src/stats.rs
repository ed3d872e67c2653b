use crate::model::{Assignments, TeamId};
use std::collections::HashSet;

pub struct TeamStats {
    pub team: TeamId,
    pub schools: usize,
    pub genders: usize,
    pub mean_cgpa: f64,
}

/// Per-team diversity and CGPA figures for one finalized group.
pub fn team_statistics(a: &Assignments) -> Vec<TeamStats> {
    a.all_teams()
        .into_iter()
        .map(|team| {
            let members = a.members_of(team);
            let schools = members
                .iter()
                .map(|&s| a.student(s).school.as_str())
                .collect::<HashSet<_>>();
            let genders = members
                .iter()
                .map(|&s| a.student(s).gender.as_str())
                .collect::<HashSet<_>>();
            TeamStats {
                team,
                schools: schools.len(),
                genders: genders.len(),
                mean_cgpa: a.mean_cgpa(team),
            }
        })
        .collect()
}
