/// Index of a student within one tutorial group's `Assignments`. Ids are
/// dense and assigned in record order when the group is set up.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct StudentId(pub usize);

#[derive(Clone, Debug, PartialEq)]
pub struct Student {
    pub tutorial_group: String,
    pub student_id: String,
    pub name: String,
    pub school: String,
    pub gender: String,
    pub cgpa: f64,
}
