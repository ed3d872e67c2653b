use crate::config::Numbering;
use crate::model::Assignments;
use eyre::{Result, WrapErr};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

const HEADER: [&str; 8] = [
    "Tutorial Group",
    "Student ID",
    "School",
    "Name",
    "Gender",
    "CGPA",
    "Team CGPA",
    "Team Assigned",
];

/// One report row for an assigned student. CGPA fields are already formatted
/// to two decimals so that the written file, the displayed rosters, and the
/// final consistency checks all see the same values.
#[derive(Clone)]
pub struct AssignmentRow {
    pub tutorial_group: String,
    pub student_id: String,
    pub school: String,
    pub name: String,
    pub gender: String,
    pub cgpa: String,
    pub team_cgpa: String,
    pub team_assigned: String,
}

/// Flatten finalized assignments into report rows, one per assigned student,
/// in team order then seat order. Dropped students get no row.
pub fn rows(outcomes: &[Assignments], numbering: Numbering) -> Vec<AssignmentRow> {
    let mut rows = Vec::new();
    let mut global_team = 0;
    for assignments in outcomes {
        for team in assignments.all_teams() {
            global_team += 1;
            let label = match numbering {
                Numbering::PerGroup => format!("Team {}", team.0 + 1),
                Numbering::Global => format!("Team {global_team}"),
            };
            let mean = assignments.mean_cgpa(team);
            for &member in assignments.members_of(team) {
                let student = assignments.student(member);
                rows.push(AssignmentRow {
                    tutorial_group: student.tutorial_group.clone(),
                    student_id: student.student_id.clone(),
                    school: student.school.clone(),
                    name: student.name.clone(),
                    gender: student.gender.clone(),
                    cgpa: format!("{:.2}", student.cgpa),
                    team_cgpa: format!("{mean:.2}"),
                    team_assigned: label.clone(),
                });
            }
        }
    }
    rows
}

pub fn save(path: &Path, rows: &[AssignmentRow]) -> Result<()> {
    let file = File::create(path)
        .wrap_err_with(|| format!("cannot create report file {}", path.display()))?;
    write_rows(file, rows)
        .wrap_err_with(|| format!("cannot write report file {}", path.display()))?;
    info!(rows = rows.len(), path = %path.display(), "Assignment report written");
    Ok(())
}

fn write_rows<W: Write>(output: W, rows: &[AssignmentRow]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(output);
    writer.write_record(HEADER)?;
    for row in rows {
        writer.write_record([
            &row.tutorial_group,
            &row.student_id,
            &row.school,
            &row.name,
            &row.gender,
            &row.cgpa,
            &row.team_cgpa,
            &row.team_assigned,
        ])?;
    }
    writer.flush()?;
    Ok(())
}
