use crate::algos::Refinement;
use crate::model::Assignments;
use crate::stats;

pub fn display_details(a: &Assignments) {
    println!("{}:", a.group);
    for team in a.all_teams() {
        let mut students = a
            .members_of(team)
            .iter()
            .map(|&s| (a.student(s).name.clone(), s))
            .collect::<Vec<_>>();
        students.sort_by_key(|(name, _)| name.clone());
        println!(
            "  Team {} (mean CGPA {:.2}):",
            team.0 + 1,
            a.mean_cgpa(team)
        );
        for (name, s) in students {
            let student = a.student(s);
            print!(
                "    - {} ({}, {}, CGPA {:.2})",
                name, student.school, student.gender, student.cgpa
            );
            if a.is_forced(s) {
                print!(" (forced)");
            }
            println!();
        }
    }
    let mut dropped = a
        .unassigned_students()
        .into_iter()
        .map(|s| a.student(s).name.clone())
        .collect::<Vec<_>>();
    dropped.sort();
    if !dropped.is_empty() {
        println!("  Dropped:");
        for name in dropped {
            println!("    - {name}");
        }
    }
    println!();
}

/// Terminal bar charts of the per-team figures of one group. CGPA bars are
/// scaled by four so a full 5.0 mean stays readable on one line.
pub fn display_charts(a: &Assignments) {
    let stats = stats::team_statistics(a);
    if stats.is_empty() {
        return;
    }
    println!("{} charts:", a.group);
    println!("  Schools per team:");
    for s in &stats {
        println!(
            "    Team {}: {} ({})",
            s.team.0 + 1,
            "█".repeat(s.schools),
            s.schools
        );
    }
    println!("  Genders per team:");
    for s in &stats {
        println!(
            "    Team {}: {} ({})",
            s.team.0 + 1,
            "█".repeat(s.genders),
            s.genders
        );
    }
    println!("  Mean CGPA per team:");
    for s in &stats {
        let bar = (s.mean_cgpa * 4.0).round().max(0.0) as usize;
        println!(
            "    Team {}: {} ({:.2})",
            s.team.0 + 1,
            "█".repeat(bar),
            s.mean_cgpa
        );
    }
    println!();
}

pub fn display_stats(outcomes: &[Assignments], refinement: Refinement) {
    let students: usize = outcomes.iter().map(|a| a.students.len()).sum();
    let dropped: usize = outcomes
        .iter()
        .map(|a| a.unassigned_students().len())
        .sum();
    let forced: usize = outcomes.iter().map(|a| a.forced_students().len()).sum();
    let teams: usize = outcomes.iter().map(|a| a.all_teams().len()).sum();
    println!("Groups/teams: {}/{}", outcomes.len(), teams);
    println!(
        "Students assigned/dropped/total: {}/{}/{}",
        students - dropped,
        dropped,
        students
    );
    println!("Forced placements: {forced}");
    println!(
        "Refinement rounds/swaps: {}/{}",
        refinement.rounds, refinement.swaps
    );
}
