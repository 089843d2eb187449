//! Field validation for student records.
//!
//! The boolean predicates (`is_*`, `check_grades`) are the primitive rules and
//! never fail loudly. The `validate_*`/`parse_*` wrappers turn a rejection into
//! a [`ValidationError`] naming the rule that was broken, for callers that
//! need to report why input was refused.
//!
//! Rules:
//! - Names: non-empty, letters (ASCII or any non-ASCII alphabetic character,
//!   which covers Cyrillic) and spaces; no digits.
//! - Subjects: as names, plus `.` for abbreviations.
//! - Birth year: 1930 to 2010 inclusive, at most 4 digits.
//! - Course: inside [`CourseBounds`] (0 to 6 by default), a single digit.
//! - Grades: exactly three comma-separated digits, each 1 to 5 (`"5,4,3"`).

use crate::model::{StudentRecord, SUBJECT_COUNT};

pub const MIN_BIRTH_YEAR: i32 = 1930;
pub const MAX_BIRTH_YEAR: i32 = 2010;
pub const YEAR_DIGITS: usize = 4;
pub const COURSE_DIGITS: usize = 1;
pub const GRADES_PER_SUBJECT: usize = 3;

/// Inclusive range of accepted course numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseBounds {
    pub min: i32,
    pub max: i32,
}

impl Default for CourseBounds {
    fn default() -> Self {
        Self { min: 0, max: 6 }
    }
}

impl CourseBounds {
    pub fn contains(&self, course: i32) -> bool {
        course >= self.min && course <= self.max
    }
}

/// True iff `s` is non-empty and made only of ASCII digits.
pub fn is_number(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Parses `s` only if it is 1 to `max_len` ASCII digits.
pub fn parse_int_with_limit(s: &str, max_len: usize) -> Option<i32> {
    if s.is_empty() || s.len() > max_len || !is_number(s) {
        return None;
    }
    s.parse().ok()
}

pub fn is_valid_name(s: &str) -> bool {
    is_valid_text(s, false)
}

pub fn is_valid_subject(s: &str) -> bool {
    is_valid_text(s, true)
}

fn is_valid_text(s: &str, allow_dot: bool) -> bool {
    if s.is_empty() {
        return false;
    }

    s.chars().all(|c| {
        if c.is_ascii() {
            c.is_ascii_alphabetic() || c == ' ' || (allow_dot && c == '.')
        } else {
            c.is_alphabetic()
        }
    })
}

pub fn is_valid_year(year: i32) -> bool {
    (MIN_BIRTH_YEAR..=MAX_BIRTH_YEAR).contains(&year)
}

pub fn is_valid_course(course: i32) -> bool {
    CourseBounds::default().contains(course)
}

/// Grammar: `DIGIT ',' DIGIT ',' DIGIT` with every digit in 1..=5.
pub fn check_grades(s: &str) -> bool {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != GRADES_PER_SUBJECT {
        return false;
    }

    parts.iter().all(|part| match parse_int_with_limit(part, 1) {
        Some(grade) => (1..=5).contains(&grade),
        None => false,
    })
}

/// Error type for rejected field input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is empty
    EmptyField(&'static str),
    /// A text field contains digits or characters outside the allowed alphabet
    InvalidCharacters(&'static str),
    /// A numeric field contains non-digit characters
    NotANumber(String),
    /// A numeric field has more digits than allowed
    TooManyDigits { field: &'static str, max: usize },
    YearOutOfRange(i32),
    CourseOutOfRange { course: i32, bounds: CourseBounds },
    /// A grade string does not match the three-grade grammar
    InvalidGrades(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyField(field) => write!(f, "{} cannot be empty", field),
            ValidationError::InvalidCharacters(field) => write!(
                f,
                "{} may only contain letters and spaces",
                field
            ),
            ValidationError::NotANumber(input) => write!(f, "'{}' is not a number", input),
            ValidationError::TooManyDigits { field, max } => {
                write!(f, "{} must have at most {} digit(s)", field, max)
            }
            ValidationError::YearOutOfRange(year) => write!(
                f,
                "birth year {} is outside {}-{}",
                year, MIN_BIRTH_YEAR, MAX_BIRTH_YEAR
            ),
            ValidationError::CourseOutOfRange { course, bounds } => write!(
                f,
                "course {} is outside {}-{}",
                course, bounds.min, bounds.max
            ),
            ValidationError::InvalidGrades(input) => write!(
                f,
                "'{}' is not exactly 3 grades (1-5) separated by commas, e.g. 5,4,3",
                input
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

pub fn validate_name(field: &'static str, s: &str) -> Result<(), ValidationError> {
    if s.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    if !is_valid_name(s) {
        return Err(ValidationError::InvalidCharacters(field));
    }
    Ok(())
}

pub fn validate_subject(s: &str) -> Result<(), ValidationError> {
    if s.is_empty() {
        return Err(ValidationError::EmptyField("subject"));
    }
    if !is_valid_subject(s) {
        return Err(ValidationError::InvalidCharacters("subject"));
    }
    Ok(())
}

pub fn validate_grades(s: &str) -> Result<(), ValidationError> {
    if check_grades(s) {
        Ok(())
    } else {
        Err(ValidationError::InvalidGrades(s.to_string()))
    }
}

pub fn validate_year(year: i32) -> Result<(), ValidationError> {
    if is_valid_year(year) {
        Ok(())
    } else {
        Err(ValidationError::YearOutOfRange(year))
    }
}

pub fn validate_course(course: i32, bounds: CourseBounds) -> Result<(), ValidationError> {
    if bounds.contains(course) {
        Ok(())
    } else {
        Err(ValidationError::CourseOutOfRange { course, bounds })
    }
}

fn parse_digits(field: &'static str, s: &str, max_len: usize) -> Result<i32, ValidationError> {
    if !is_number(s) {
        return Err(ValidationError::NotANumber(s.to_string()));
    }
    parse_int_with_limit(s, max_len).ok_or(ValidationError::TooManyDigits {
        field,
        max: max_len,
    })
}

/// Parses and range-checks raw birth year input.
pub fn parse_year(s: &str) -> Result<i32, ValidationError> {
    let year = parse_digits("birth year", s.trim(), YEAR_DIGITS)?;
    validate_year(year)?;
    Ok(year)
}

/// Parses and range-checks raw course input.
pub fn parse_course(s: &str, bounds: CourseBounds) -> Result<i32, ValidationError> {
    let course = parse_digits("course", s.trim(), COURSE_DIGITS)?;
    validate_course(course, bounds)?;
    Ok(course)
}

/// Runs every field rule against a full record.
pub fn validate_record(
    record: &StudentRecord,
    bounds: CourseBounds,
) -> Result<(), ValidationError> {
    validate_name("name", &record.name)?;
    validate_name("surname", &record.surname)?;
    validate_name("middle name", &record.middle_name)?;
    validate_year(record.birth_year)?;
    validate_course(record.course, bounds)?;
    for slot in 0..SUBJECT_COUNT {
        validate_subject(&record.subjects[slot])?;
        validate_grades(&record.grades[slot])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SubjectGrade;

    #[test]
    fn test_is_number() {
        assert!(is_number("2004"));
        assert!(is_number("0"));
        assert!(!is_number(""));
        assert!(!is_number("20a4"));
        assert!(!is_number("-1"));
        assert!(!is_number(" 1"));
    }

    #[test]
    fn test_parse_int_with_limit() {
        assert_eq!(parse_int_with_limit("5", 1), Some(5));
        assert_eq!(parse_int_with_limit("1999", 4), Some(1999));
        assert_eq!(parse_int_with_limit("19999", 4), None);
        assert_eq!(parse_int_with_limit("", 4), None);
        assert_eq!(parse_int_with_limit("1x", 4), None);
    }

    #[test]
    fn test_valid_latin_and_cyrillic_names() {
        assert!(is_valid_name("Anna"));
        assert!(is_valid_name("Анна"));
        assert!(is_valid_name("Мария Луиза"));
        assert!(is_valid_name("Jean Luc"));
        assert!(is_valid_name("Ёлкин"));
    }

    #[test]
    fn test_names_with_digits_are_rejected() {
        assert!(!is_valid_name("Anna1"));
        assert!(!is_valid_name("7"));
        assert!(!is_valid_name("Ив4н"));
        for digit in '0'..='9' {
            assert!(!is_valid_name(&format!("Петр{}", digit)));
        }
    }

    #[test]
    fn test_names_reject_punctuation_and_empty() {
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("O'Neil"));
        assert!(!is_valid_name("a-b"));
        assert!(!is_valid_name("Dr."));
        assert!(!is_valid_name("Tab\tName"));
    }

    #[test]
    fn test_subjects_allow_dot() {
        assert!(is_valid_subject("Phys. Ed."));
        assert!(is_valid_subject("Математика"));
        assert!(!is_valid_subject("Math 2"));
        assert!(!is_valid_subject(""));
    }

    #[test]
    fn test_year_range() {
        assert!(is_valid_year(1930));
        assert!(is_valid_year(2010));
        assert!(!is_valid_year(1929));
        assert!(!is_valid_year(2011));
    }

    #[test]
    fn test_course_range() {
        assert!(is_valid_course(0));
        assert!(is_valid_course(6));
        assert!(!is_valid_course(7));
        assert!(!is_valid_course(-1));

        let strict = CourseBounds { min: 1, max: 6 };
        assert!(!strict.contains(0));
        assert!(strict.contains(1));
    }

    #[test]
    fn test_check_grades() {
        assert!(check_grades("5,4,3"));
        assert!(check_grades("1,1,1"));
        assert!(!check_grades("5,4"));
        assert!(!check_grades("5,,3"));
        assert!(!check_grades("6,1,1"));
        assert!(!check_grades("0,1,1"));
        assert!(!check_grades("5,4,3,"));
        assert!(!check_grades(",5,4,3"));
        assert!(!check_grades("5,4,3,2"));
        assert!(!check_grades("5, 4,3"));
        assert!(!check_grades("55,4,3"));
        assert!(!check_grades(""));
    }

    #[test]
    fn test_parse_year_reports_reason() {
        assert_eq!(parse_year("2004"), Ok(2004));
        assert_eq!(
            parse_year("20o4"),
            Err(ValidationError::NotANumber("20o4".into()))
        );
        assert!(matches!(
            parse_year("02004"),
            Err(ValidationError::TooManyDigits { max: 4, .. })
        ));
        assert_eq!(parse_year("1800"), Err(ValidationError::YearOutOfRange(1800)));
    }

    #[test]
    fn test_parse_course_respects_bounds() {
        assert_eq!(parse_course("3", CourseBounds::default()), Ok(3));
        assert!(matches!(
            parse_course("12", CourseBounds::default()),
            Err(ValidationError::TooManyDigits { .. })
        ));
        assert!(matches!(
            parse_course("0", CourseBounds { min: 1, max: 6 }),
            Err(ValidationError::CourseOutOfRange { course: 0, .. })
        ));
    }

    #[test]
    fn test_validate_record() {
        let mut record = StudentRecord::new("Anna", "Ivanova", "Petrovna", 2001, 2);
        for slot in 0..SUBJECT_COUNT {
            record.set_subject(slot, SubjectGrade::new("Math", "5,4,3"));
        }
        assert!(validate_record(&record, CourseBounds::default()).is_ok());

        record.grades[1] = "5,4".into();
        assert_eq!(
            validate_record(&record, CourseBounds::default()),
            Err(ValidationError::InvalidGrades("5,4".into()))
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::EmptyField("name").to_string(),
            "name cannot be empty"
        );
        assert_eq!(
            ValidationError::YearOutOfRange(1900).to_string(),
            "birth year 1900 is outside 1930-2010"
        );
    }
}
