use crate::model::Assignments;
use crate::reports::AssignmentRow;
use eyre::{Result, WrapErr, bail, ensure};
use std::collections::HashSet;
use tracing::warn;

pub fn check_dropped_students(a: &Assignments) {
    let dropped = a
        .unassigned_students()
        .into_iter()
        .map(|s| a.student(s).name.clone())
        .collect::<Vec<_>>();
    if !dropped.is_empty() {
        warn!(
            group = %a.group,
            students = ?dropped,
            "Not enough students for a full team, dropping"
        );
    }
}

pub fn check_forced_placements(a: &Assignments) {
    let forced = a
        .forced_students()
        .into_iter()
        .map(|s| a.student(s).name.clone())
        .collect::<Vec<_>>();
    if !forced.is_empty() {
        warn!(
            group = %a.group,
            students = ?forced,
            "Balance rules could not be fully satisfied, placements forced"
        );
    }
}

/// Structural double check of one finalized group: every team holds exactly
/// `team_size` distinct members and every member points back at its team.
pub fn ensure_consistent(a: &Assignments) -> Result<()> {
    let mut seen = HashSet::new();
    for team in a.all_teams() {
        let members = a.members_of(team);
        ensure!(
            members.len() == a.team_size(),
            "team {} in {} has {} members, expected {}",
            team.0 + 1,
            a.group,
            members.len(),
            a.team_size()
        );
        for &member in members {
            ensure!(
                seen.insert(member),
                "student {} in {} appears in more than one team",
                a.student(member).name,
                a.group
            );
            if a.team_of(member) != Some(team) {
                bail!(
                    "student {} in {} is not registered on team {}",
                    a.student(member).name,
                    a.group,
                    team.0 + 1
                );
            }
        }
    }
    Ok(())
}

/// The report must agree with the assignments it was derived from: walking
/// the teams in report order, every row's team CGPA re-parses to the
/// recomputed member mean at the written precision.
pub fn ensure_reported_means(outcomes: &[Assignments], rows: &[AssignmentRow]) -> Result<()> {
    let mut rows = rows.iter();
    for assignments in outcomes {
        for team in assignments.all_teams() {
            let expected: f64 = format!("{:.2}", assignments.mean_cgpa(team))
                .parse()
                .expect("formatted mean must parse");
            for _ in assignments.members_of(team) {
                let Some(row) = rows.next() else {
                    bail!("report is missing rows for {}", assignments.group);
                };
                let reported: f64 = row
                    .team_cgpa
                    .parse()
                    .wrap_err_with(|| format!("unreadable team CGPA {:?}", row.team_cgpa))?;
                ensure!(
                    (reported - expected).abs() < 1e-6,
                    "reported team CGPA {} for {} in {} does not match the member mean {:.2}",
                    row.team_cgpa,
                    row.name,
                    row.tutorial_group,
                    expected
                );
            }
        }
    }
    ensure!(rows.next().is_none(), "report has more rows than assignments");
    Ok(())
}

pub fn ensure_distinct_students(rows: &[AssignmentRow]) -> Result<()> {
    let mut seen = HashSet::new();
    for row in rows {
        ensure!(
            seen.insert((row.tutorial_group.as_str(), row.student_id.as_str())),
            "student {} in {} appears twice in the report",
            row.student_id,
            row.tutorial_group
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Numbering;
    use crate::model::{Student, StudentId, TeamId, TutorialGroup};
    use crate::reports;

    fn student(id: usize, cgpa: f64) -> Student {
        Student {
            tutorial_group: "G-1".to_owned(),
            student_id: format!("{id}"),
            name: format!("Student {id}"),
            school: ["A", "B"][id % 2].to_owned(),
            gender: ["Male", "Female"][id % 2].to_owned(),
            cgpa,
        }
    }

    fn full_teams() -> Assignments {
        let students = (0..4).map(|i| student(i, 3.0 + i as f64 * 0.5)).collect();
        let mut a = Assignments::new(
            TutorialGroup {
                name: "G-1".to_owned(),
                students,
            },
            2,
        );
        for s in a.all_students() {
            a.assign_to(s, TeamId(s.0 / 2));
        }
        a
    }

    #[test]
    fn well_formed_assignments_pass_all_checks() {
        let a = full_teams();
        ensure_consistent(&a).unwrap();
        let rows = reports::rows(std::slice::from_ref(&a), Numbering::PerGroup);
        ensure_reported_means(std::slice::from_ref(&a), &rows).unwrap();
        ensure_distinct_students(&rows).unwrap();
    }

    #[test]
    fn underfilled_team_is_rejected() {
        let students = (0..4).map(|i| student(i, 3.0)).collect();
        let mut a = Assignments::new(
            TutorialGroup {
                name: "G-1".to_owned(),
                students,
            },
            2,
        );
        a.assign_to(StudentId(0), TeamId(0));
        a.assign_to(StudentId(1), TeamId(1));
        a.assign_to(StudentId(2), TeamId(1));

        let err = ensure_consistent(&a).unwrap_err();
        assert!(err.to_string().contains("expected 2"));
    }

    #[test]
    fn tampered_team_cgpa_is_detected() {
        let a = full_teams();
        let mut rows = reports::rows(std::slice::from_ref(&a), Numbering::PerGroup);
        rows[1].team_cgpa = "9.99".to_owned();

        let err = ensure_reported_means(std::slice::from_ref(&a), &rows).unwrap_err();
        assert!(err.to_string().contains("9.99"));
    }

    #[test]
    fn missing_rows_are_detected() {
        let a = full_teams();
        let mut rows = reports::rows(std::slice::from_ref(&a), Numbering::PerGroup);
        rows.pop();

        assert!(ensure_reported_means(std::slice::from_ref(&a), &rows).is_err());
    }

    #[test]
    fn duplicate_student_rows_are_rejected() {
        let a = full_teams();
        let mut rows = reports::rows(std::slice::from_ref(&a), Numbering::PerGroup);
        rows.push(rows[0].clone());

        assert!(ensure_distinct_students(&rows).is_err());
    }
}
