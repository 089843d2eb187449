//! Line-oriented prompting over any reader and writer, so the loops can be
//! driven from tests as well as from the terminal.

use colored::Colorize;
use roster::error::{Result, RosterError};
use roster::model::{SubjectGrade, SUBJECT_COUNT};
use roster::validation::{
    parse_course, parse_year, validate_grades, validate_name, validate_subject, CourseBounds,
    ValidationError,
};
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

pub struct Prompter<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl Prompter<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// One line of input without its line ending. End of input is an error so
    /// that no reprompt loop can spin forever on a closed stdin.
    pub fn line(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut buffer = String::new();
        if self.input.read_line(&mut buffer)? == 0 {
            return Err(RosterError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed",
            )));
        }
        Ok(buffer.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Asks until `parse` accepts the trimmed answer.
    pub fn ask_until<T>(
        &mut self,
        label: &str,
        parse: impl Fn(&str) -> std::result::Result<T, ValidationError>,
    ) -> Result<T> {
        loop {
            let answer = self.line(label)?;
            match parse(answer.trim()) {
                Ok(value) => return Ok(value),
                Err(e) => writeln!(self.output, "{}", format!("Invalid input: {}", e).red())?,
            }
        }
    }

    /// Asks until the answer parses as `T`.
    pub fn ask_parsed<T>(&mut self, label: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        loop {
            let answer = self.line(label)?;
            match answer.trim().parse::<T>() {
                Ok(value) => return Ok(value),
                Err(e) => writeln!(self.output, "{}", format!("Invalid input: {}", e).red())?,
            }
        }
    }

    /// Yes/no question; anything but y or n asks again.
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        loop {
            let answer = self.line(&format!("{} (y/n): ", question))?;
            match answer.trim().to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.output, "Please answer y or n.")?,
            }
        }
    }

    pub fn ask_name(&mut self, label: &str, field: &'static str) -> Result<String> {
        self.ask_until(label, |s| validate_name(field, s).map(|_| s.to_string()))
    }

    pub fn ask_year(&mut self) -> Result<i32> {
        self.ask_until("Birth year (1930-2010): ", parse_year)
    }

    pub fn ask_course(&mut self, bounds: CourseBounds) -> Result<i32> {
        let label = format!("Course ({}-{}): ", bounds.min, bounds.max);
        self.ask_until(&label, |s| parse_course(s, bounds))
    }

    pub fn ask_subject(&mut self, slot: usize) -> Result<SubjectGrade> {
        let subject = self.ask_until(&format!("Subject {}: ", slot + 1), |s| {
            validate_subject(s).map(|_| s.to_string())
        })?;
        let grades = self.ask_until(
            &format!("Grades for {} (three of 1-5, e.g. 5,4,3): ", subject),
            |s| validate_grades(s).map(|_| s.to_string()),
        )?;
        Ok(SubjectGrade::new(subject, grades))
    }

    pub fn ask_subjects(&mut self) -> Result<[SubjectGrade; SUBJECT_COUNT]> {
        Ok([self.ask_subject(0)?, self.ask_subject(1)?, self.ask_subject(2)?])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn reprompts_until_year_is_valid() {
        let mut p = prompter("abc\n1920\n20011\n2001\n");
        assert_eq!(p.ask_year().unwrap(), 2001);

        let shown = String::from_utf8(p.output).unwrap();
        assert_eq!(shown.matches("Invalid input").count(), 3);
    }

    #[test]
    fn course_respects_bounds_and_single_digit() {
        let mut p = prompter("12\n7\n0\n");
        assert_eq!(p.ask_course(CourseBounds::default()).unwrap(), 0);
    }

    #[test]
    fn grades_need_exactly_three() {
        let mut p = prompter("Math\n5,4\n5,,3\n6,1,1\n5,4,3\n");
        let subject = p.ask_subject(0).unwrap();
        assert_eq!(subject, SubjectGrade::new("Math", "5,4,3"));
    }

    #[test]
    fn names_reject_digits() {
        let mut p = prompter("R2D2\nАнна\n");
        assert_eq!(p.ask_name("Name: ", "name").unwrap(), "Анна");
    }

    #[test]
    fn confirm_accepts_y_and_n_only() {
        let mut p = prompter("maybe\nY\n");
        assert!(p.confirm("Apply?").unwrap());

        let mut p = prompter("n\n");
        assert!(!p.confirm("Apply?").unwrap());
    }

    #[test]
    fn parsed_answers_reprompt_on_error() {
        let mut p = prompter("two\n2\n");
        assert_eq!(p.ask_parsed::<usize>("Number: ").unwrap(), 2);
    }

    #[test]
    fn closed_input_ends_the_loop() {
        let mut p = prompter("bad\n");
        assert!(p.ask_year().is_err());
    }
}
