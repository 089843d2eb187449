use crate::commands::{describe, resolve_number, save, CmdMessage, CmdResult, EditOutcome};
use crate::error::{Result, RosterError};
use crate::model::{EditRequest, StudentRecord};
use crate::store::backend::StorageBackend;
use crate::store::RecordStore;
use crate::validation::{
    validate_course, validate_grades, validate_name, validate_subject, validate_year,
    CourseBounds, ValidationError,
};
use tracing::debug;

/// Asked with the current record and the candidate; `true` commits.
pub type Confirm<'a> = dyn FnMut(&StudentRecord, &StudentRecord) -> bool + 'a;

/// Changes one field of the record at a 1-based position.
///
/// The candidate record is built aside and only swapped in after `confirm`
/// accepts it, so a declined edit leaves the store and the text file as they
/// were. An accepted edit rewrites the text file.
pub fn run<B: StorageBackend>(
    store: &mut RecordStore,
    backend: &B,
    number: usize,
    request: &EditRequest,
    bounds: CourseBounds,
    confirm: &mut Confirm<'_>,
) -> Result<CmdResult> {
    let index = resolve_number(store, number)?;
    validate_request(request, bounds)?;

    let current = store
        .get(index)
        .cloned()
        .ok_or(RosterError::IndexOutOfRange {
            index: number,
            count: store.len(),
        })?;
    let candidate = request.apply_to(&current);

    if !confirm(&current, &candidate) {
        debug!("Edit of {} on student {} declined", request.field(), number);
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::info("Edit cancelled, no changes made."));
        return Ok(result.with_outcome(EditOutcome::Cancelled));
    }

    store.replace_at(index, candidate.clone())?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Student {} updated ({}): {}",
        number,
        request.field(),
        describe(&candidate)
    )));
    let saved = save::text(store, backend)?;
    result.absorb(saved);
    Ok(result
        .with_affected(vec![candidate])
        .with_outcome(EditOutcome::Applied))
}

/// Checks only the value being changed, so records loaded from the binary
/// file with out-of-rule fields can still be edited one field at a time.
pub fn validate_request(
    request: &EditRequest,
    bounds: CourseBounds,
) -> std::result::Result<(), ValidationError> {
    match request {
        EditRequest::BirthYear(year) => validate_year(*year),
        EditRequest::Course(course) => validate_course(*course, bounds),
        EditRequest::Name(name) => validate_name("name", name),
        EditRequest::Surname(surname) => validate_name("surname", surname),
        EditRequest::MiddleName(middle) => validate_name("middle name", middle),
        EditRequest::Subjects(subjects) => {
            for subject in subjects {
                validate_subject(&subject.subject)?;
                validate_grades(&subject.grades)?;
            }
            Ok(())
        }
    }
}
