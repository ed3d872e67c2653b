pub use self::assignments::{Assignments, TeamId};
pub use self::group::TutorialGroup;
pub use self::student::{Student, StudentId};

mod assignments;
mod group;
mod student;
