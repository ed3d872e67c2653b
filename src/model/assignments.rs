use super::{Student, StudentId, TutorialGroup};

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TeamId(pub usize);

/// Team membership state for one tutorial group. The number of teams is fixed
/// at creation to `floor(students / team_size)`; a team never grows past
/// `team_size`. Students the seats cannot accommodate stay unassigned.
#[derive(Debug)]
pub struct Assignments {
    pub group: String,
    pub students: Vec<Student>,
    team_size: usize,
    assigned_to: Vec<Option<TeamId>>,
    assigned: Vec<Vec<StudentId>>,
    forced: Vec<bool>,
}

impl Assignments {
    pub fn new(group: TutorialGroup, team_size: usize) -> Assignments {
        assert!(team_size > 0, "team size must be positive");
        let TutorialGroup { name, students } = group;
        let slen = students.len();
        let teams = slen / team_size;
        Assignments {
            group: name,
            students,
            team_size,
            assigned_to: vec![None; slen],
            assigned: (0..teams).map(|_| Vec::with_capacity(team_size)).collect(),
            forced: vec![false; slen],
        }
    }

    pub fn student(&self, StudentId(student): StudentId) -> &Student {
        &self.students[student]
    }

    pub fn all_students(&self) -> Vec<StudentId> {
        (0..self.students.len()).map(StudentId).collect()
    }

    pub fn all_teams(&self) -> Vec<TeamId> {
        (0..self.assigned.len()).map(TeamId).collect()
    }

    pub fn team_size(&self) -> usize {
        self.team_size
    }

    pub fn team_of(&self, StudentId(student): StudentId) -> Option<TeamId> {
        self.assigned_to[student]
    }

    pub fn members_of(&self, TeamId(team): TeamId) -> &[StudentId] {
        &self.assigned[team]
    }

    pub fn size(&self, TeamId(team): TeamId) -> usize {
        self.assigned[team].len()
    }

    pub fn is_full(&self, team: TeamId) -> bool {
        self.size(team) >= self.team_size
    }

    pub fn assign_to(&mut self, student: StudentId, team: TeamId) {
        assert!(
            self.team_of(student).is_none(),
            "a team is already assigned to this student"
        );
        assert!(!self.is_full(team), "cannot assign to a full team");
        self.assigned_to[student.0] = Some(team);
        self.assigned[team.0].push(student);
    }

    /// Exchange two students belonging to different teams. Each one takes the
    /// other's exact slot, so a second call with the arguments reversed
    /// restores the previous state.
    pub fn swap(&mut self, a: StudentId, b: StudentId) {
        let team_a = self.team_of(a).expect("student is not assigned to any team");
        let team_b = self.team_of(b).expect("student is not assigned to any team");
        assert_ne!(team_a, team_b, "cannot swap students within one team");
        let pos_a = self.position_of(a, team_a);
        let pos_b = self.position_of(b, team_b);
        self.assigned[team_a.0][pos_a] = b;
        self.assigned[team_b.0][pos_b] = a;
        self.assigned_to[a.0] = Some(team_b);
        self.assigned_to[b.0] = Some(team_a);
    }

    fn position_of(&self, student: StudentId, TeamId(team): TeamId) -> usize {
        self.assigned[team]
            .iter()
            .position(|&s| s == student)
            .expect("student not found in team")
    }

    /// Record that a student was placed by the fallback path, with the
    /// balance constraints overridden.
    pub fn mark_forced(&mut self, StudentId(student): StudentId) {
        self.forced[student] = true;
    }

    pub fn is_forced(&self, StudentId(student): StudentId) -> bool {
        self.forced[student]
    }

    pub fn forced_students(&self) -> Vec<StudentId> {
        (0..self.students.len())
            .map(StudentId)
            .filter(|&s| self.is_forced(s))
            .collect()
    }

    pub fn unassigned_students(&self) -> Vec<StudentId> {
        self.assigned_to
            .iter()
            .enumerate()
            .filter_map(|(id, assignment)| {
                if assignment.is_none() {
                    Some(StudentId(id))
                } else {
                    None
                }
            })
            .collect()
    }

    pub fn mean_cgpa(&self, TeamId(team): TeamId) -> f64 {
        let members = &self.assigned[team];
        if members.is_empty() {
            return 0.0;
        }
        let total: f64 = members.iter().map(|&s| self.student(s).cgpa).sum();
        total / members.len() as f64
    }
}
