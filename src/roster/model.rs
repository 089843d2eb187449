use std::str::FromStr;

/// Number of subject/grade pairs every record carries.
pub const SUBJECT_COUNT: usize = 3;

/// One student's stored data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentRecord {
    pub name: String,
    pub surname: String,
    pub middle_name: String,
    pub birth_year: i32,
    pub course: i32,
    pub subjects: [String; SUBJECT_COUNT],
    pub grades: [String; SUBJECT_COUNT],
}

impl StudentRecord {
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
        middle_name: impl Into<String>,
        birth_year: i32,
        course: i32,
    ) -> Self {
        Self {
            name: name.into(),
            surname: surname.into(),
            middle_name: middle_name.into(),
            birth_year,
            course,
            ..Default::default()
        }
    }

    pub fn with_subject(mut self, slot: usize, subject: SubjectGrade) -> Self {
        self.set_subject(slot, subject);
        self
    }

    pub fn set_subject(&mut self, slot: usize, subject: SubjectGrade) {
        self.subjects[slot] = subject.subject;
        self.grades[slot] = subject.grades;
    }

    /// Mean of every digit across the three grade strings, 0.0 when none parse.
    pub fn average_grade(&self) -> f64 {
        let digits: Vec<u32> = self
            .grades
            .iter()
            .flat_map(|g| g.chars().filter_map(|c| c.to_digit(10)))
            .collect();

        if digits.is_empty() {
            return 0.0;
        }
        digits.iter().sum::<u32>() as f64 / digits.len() as f64
    }
}

/// A subject name paired with its grade string (e.g. `"5,4,3"`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectGrade {
    pub subject: String,
    pub grades: String,
}

impl SubjectGrade {
    pub fn new(subject: impl Into<String>, grades: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            grades: grades.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    BirthYear,
    Course,
    Name,
    Surname,
    MiddleName,
    AverageGrade,
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SortField::BirthYear => "year",
            SortField::Course => "course",
            SortField::Name => "name",
            SortField::Surname => "surname",
            SortField::MiddleName => "middle-name",
            SortField::AverageGrade => "average",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "year" | "birth-year" => Ok(SortField::BirthYear),
            "course" => Ok(SortField::Course),
            "name" => Ok(SortField::Name),
            "surname" => Ok(SortField::Surname),
            "middle-name" | "middle" => Ok(SortField::MiddleName),
            "average" | "avg" | "average-grade" => Ok(SortField::AverageGrade),
            other => Err(format!("Unknown sort field: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Field names accepted by the edit operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    BirthYear,
    Course,
    Name,
    Surname,
    MiddleName,
    Subjects,
}

impl std::fmt::Display for EditField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EditField::BirthYear => "year",
            EditField::Course => "course",
            EditField::Name => "name",
            EditField::Surname => "surname",
            EditField::MiddleName => "middle-name",
            EditField::Subjects => "subjects",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for EditField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "year" | "birth-year" => Ok(EditField::BirthYear),
            "course" => Ok(EditField::Course),
            "name" => Ok(EditField::Name),
            "surname" => Ok(EditField::Surname),
            "middle-name" | "middle" => Ok(EditField::MiddleName),
            "subjects" => Ok(EditField::Subjects),
            other => Err(format!("Unknown field: {}", other)),
        }
    }
}

/// A validated-on-apply change to a single record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditRequest {
    BirthYear(i32),
    Course(i32),
    Name(String),
    Surname(String),
    MiddleName(String),
    Subjects([SubjectGrade; SUBJECT_COUNT]),
}

impl EditRequest {
    pub fn field(&self) -> EditField {
        match self {
            EditRequest::BirthYear(_) => EditField::BirthYear,
            EditRequest::Course(_) => EditField::Course,
            EditRequest::Name(_) => EditField::Name,
            EditRequest::Surname(_) => EditField::Surname,
            EditRequest::MiddleName(_) => EditField::MiddleName,
            EditRequest::Subjects(_) => EditField::Subjects,
        }
    }

    /// Returns a copy of `record` with this change applied.
    pub fn apply_to(&self, record: &StudentRecord) -> StudentRecord {
        let mut updated = record.clone();
        match self {
            EditRequest::BirthYear(year) => updated.birth_year = *year,
            EditRequest::Course(course) => updated.course = *course,
            EditRequest::Name(name) => updated.name = name.clone(),
            EditRequest::Surname(surname) => updated.surname = surname.clone(),
            EditRequest::MiddleName(middle) => updated.middle_name = middle.clone(),
            EditRequest::Subjects(subjects) => {
                for (slot, subject) in subjects.iter().enumerate() {
                    updated.set_subject(slot, subject.clone());
                }
            }
        }
        updated
    }
}
