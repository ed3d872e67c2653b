use super::Student;
use std::collections::BTreeMap;

/// One tutorial group's share of the loaded records. Teams are always drawn
/// from a single group, never across groups.
#[derive(Debug)]
pub struct TutorialGroup {
    pub name: String,
    pub students: Vec<Student>,
}

impl TutorialGroup {
    /// Split the loaded records by tutorial group. Groups come back sorted by
    /// name so that a run with a fixed seed always visits them, and draws
    /// from the random generator, in the same order.
    pub fn partition(students: Vec<Student>) -> Vec<TutorialGroup> {
        let mut groups: BTreeMap<String, Vec<Student>> = BTreeMap::new();
        for student in students {
            groups
                .entry(student.tutorial_group.clone())
                .or_default()
                .push(student);
        }
        groups
            .into_iter()
            .map(|(name, students)| TutorialGroup { name, students })
            .collect()
    }

    /// Mean CGPA over the whole group, the balance target for every team
    /// formed from it. An empty group yields 0 rather than dividing by zero.
    pub fn average_cgpa(&self) -> f64 {
        if self.students.is_empty() {
            return 0.0;
        }
        let total: f64 = self.students.iter().map(|s| s.cgpa).sum();
        total / self.students.len() as f64
    }
}
