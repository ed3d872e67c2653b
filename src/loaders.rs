use crate::model::Student;
use csv::{Position, StringRecord};
use eyre::{Result, WrapErr, bail, ensure, eyre};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

const KNOWN_COLUMNS: [&str; 6] = [
    "tutorial_group",
    "student_id",
    "school",
    "name",
    "gender",
    "cgpa",
];

/// Positions of the semantic student fields inside an input record, built
/// from the configured column order.
#[derive(Debug)]
pub struct ColumnMap {
    tutorial_group: usize,
    student_id: usize,
    school: usize,
    name: usize,
    gender: usize,
    cgpa: usize,
    width: usize,
}

impl ColumnMap {
    pub fn new(columns: &[String]) -> Result<ColumnMap> {
        let mut indices = HashMap::new();
        for (index, column) in columns.iter().enumerate() {
            if !KNOWN_COLUMNS.contains(&column.as_str()) {
                bail!("unknown input column {column:?}");
            }
            ensure!(
                indices.insert(column.as_str(), index).is_none(),
                "duplicate input column {column:?}"
            );
        }
        let index = |column: &str| {
            indices
                .get(column)
                .copied()
                .ok_or_else(|| eyre!("missing input column {column:?}"))
        };
        Ok(ColumnMap {
            tutorial_group: index("tutorial_group")?,
            student_id: index("student_id")?,
            school: index("school")?,
            name: index("name")?,
            gender: index("gender")?,
            cgpa: index("cgpa")?,
            width: columns.len(),
        })
    }
}

pub struct Loader {
    columns: ColumnMap,
}

impl Loader {
    pub fn new(columns: &[String]) -> Result<Loader> {
        Ok(Loader {
            columns: ColumnMap::new(columns).wrap_err("cannot map input columns")?,
        })
    }

    /// Load every student from `path`. Any malformed row fails the whole
    /// load; partial data never reaches the solver.
    pub fn load(&self, path: &Path) -> Result<Vec<Student>> {
        let file = File::open(path)
            .wrap_err_with(|| format!("cannot load student file {}", path.display()))?;
        let students = self
            .read_records(file)
            .wrap_err_with(|| format!("cannot parse student file {}", path.display()))?;
        debug!(
            students = students.len(),
            path = %path.display(),
            "Loaded student records"
        );
        Ok(students)
    }

    fn read_records<R: Read>(&self, input: R) -> Result<Vec<Student>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(input);
        let mut students = Vec::new();
        for record in reader.records() {
            let record = record?;
            let line = record.position().map_or(0, Position::line);
            students.push(self.student(&record, line)?);
        }
        Ok(students)
    }

    fn student(&self, record: &StringRecord, line: u64) -> Result<Student> {
        ensure!(
            record.len() >= self.columns.width,
            "line {line} has {} fields, expected {}",
            record.len(),
            self.columns.width
        );
        let cgpa = record[self.columns.cgpa].trim().parse().wrap_err_with(|| {
            format!(
                "invalid CGPA {:?} on line {line}",
                &record[self.columns.cgpa]
            )
        })?;
        Ok(Student {
            tutorial_group: record[self.columns.tutorial_group].to_owned(),
            student_id: record[self.columns.student_id].to_owned(),
            name: record[self.columns.name].to_owned(),
            school: record[self.columns.school].to_owned(),
            gender: record[self.columns.gender].to_owned(),
            cgpa,
        })
    }
}
