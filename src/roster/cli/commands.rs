use super::print::{format_change, print_config, print_messages, print_rendered};
use super::prompt::Prompter;
use super::setup::{AddArgs, Cli, Commands, FileFormat};
use clap::Parser;
use colored::Colorize;
use roster::api::{ConfigAction, RosterApi};
use roster::error::{Result, RosterError};
use roster::init::{initialize, resolve_data_dir, HOME_ENV};
use roster::model::{
    EditField, EditRequest, SortField, SortOrder, StudentRecord, SubjectGrade, SUBJECT_COUNT,
};
use roster::store::backend::StorageBackend;
use roster::validation::{
    parse_course, parse_year, validate_grades, validate_name, validate_subject, CourseBounds,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

const MENU: &str = "\n\
1. Add student\n\
2. List students\n\
3. Edit student\n\
4. Delete student\n\
5. Sort students\n\
6. Save to text file\n\
7. Load from text file\n\
8. Save to binary file\n\
9. Load from binary file\n\
0. Exit";

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_home = std::env::var_os(HOME_ENV).map(PathBuf::from);
    let data_dir = resolve_data_dir(cli.dir.as_deref(), env_home, &cwd);

    let mut ctx = initialize(data_dir);
    print_messages(&ctx.startup.messages);
    let api = &mut ctx.api;
    let mut prompter = Prompter::stdio();

    match cli.command {
        Some(Commands::Add(args)) => handle_add(api, &mut prompter, args),
        Some(Commands::List) => handle_list(api),
        Some(Commands::Edit {
            number,
            field,
            value,
            yes,
        }) => handle_edit(api, &mut prompter, number, field, value, yes),
        Some(Commands::Delete { number }) => handle_delete(api, number),
        Some(Commands::Sort { field, desc }) => handle_sort(api, field, desc),
        Some(Commands::Save { format }) => handle_save(api, format),
        Some(Commands::Load { format }) => handle_load(api, format),
        Some(Commands::Config { key, value }) => handle_config(api, key, value),
        None => run_menu(api, &mut prompter),
    }
}

/// Diagnostics go to stderr so tables on stdout stay clean. `RUST_LOG` wins
/// over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}

fn handle_add<B, R, W>(
    api: &mut RosterApi<B>,
    p: &mut Prompter<R, W>,
    args: AddArgs,
) -> Result<()>
where
    B: StorageBackend,
    R: BufRead,
    W: Write,
{
    let record = collect_record(p, args, api.settings().course_bounds())?;
    let result = api.add_record(record)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list<B: StorageBackend>(api: &RosterApi<B>) -> Result<()> {
    let result = api.list_records()?;
    print_rendered(result.rendered.as_deref());
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit<B, R, W>(
    api: &mut RosterApi<B>,
    p: &mut Prompter<R, W>,
    number: usize,
    field: EditField,
    value: Option<String>,
    yes: bool,
) -> Result<()>
where
    B: StorageBackend,
    R: BufRead,
    W: Write,
{
    // Bad numbers fail before any value is asked for.
    api.student(number)?;
    let request = build_request(p, field, value, api.settings().course_bounds())?;

    let result = if yes {
        api.edit_record(number, &request, &mut |_, _| true)?
    } else {
        let mut confirm = |before: &StudentRecord, after: &StudentRecord| {
            print!("{}", format_change(before, after));
            p.confirm("Apply this change?").unwrap_or_else(|e| {
                warn!("Treating unreadable answer as no: {}", e);
                false
            })
        };
        api.edit_record(number, &request, &mut confirm)?
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete<B: StorageBackend>(api: &mut RosterApi<B>, number: usize) -> Result<()> {
    let result = api.delete_record(number)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_sort<B: StorageBackend>(
    api: &mut RosterApi<B>,
    field: SortField,
    desc: bool,
) -> Result<()> {
    let order = if desc {
        SortOrder::Descending
    } else {
        SortOrder::Ascending
    };
    let result = api.sort_records(field, order)?;
    print_messages(&result.messages);
    handle_list(api)
}

fn handle_save<B: StorageBackend>(api: &RosterApi<B>, format: FileFormat) -> Result<()> {
    let result = match format {
        FileFormat::Text => api.save_text()?,
        FileFormat::Binary => api.save_binary()?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_load<B: StorageBackend>(api: &mut RosterApi<B>, format: FileFormat) -> Result<()> {
    let result = match format {
        FileFormat::Text => api.load_text()?,
        FileFormat::Binary => api.load_binary()?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_config<B: StorageBackend>(
    api: &mut RosterApi<B>,
    key: Option<String>,
    value: Option<String>,
) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let is_show_all = matches!(action, ConfigAction::ShowAll);
    let result = api.config(action)?;
    if is_show_all {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn run_menu<B, R, W>(api: &mut RosterApi<B>, p: &mut Prompter<R, W>) -> Result<()>
where
    B: StorageBackend,
    R: BufRead,
    W: Write,
{
    loop {
        p.say(MENU)?;
        let choice = match p.line("Choose an option: ") {
            Ok(choice) => choice,
            Err(e) if is_end_of_input(&e) => return Ok(()),
            Err(e) => return Err(e),
        };

        let outcome = match choice.trim() {
            "1" => handle_add(api, p, AddArgs::default()),
            "2" => handle_list(api),
            "3" => menu_edit(api, p),
            "4" => p
                .ask_parsed::<usize>("Student number: ")
                .and_then(|number| handle_delete(api, number)),
            "5" => menu_sort(api, p),
            "6" => handle_save(api, FileFormat::Text),
            "7" => handle_load(api, FileFormat::Text),
            "8" => handle_save(api, FileFormat::Binary),
            "9" => handle_load(api, FileFormat::Binary),
            "0" | "exit" | "q" => return Ok(()),
            other => p.say(&format!("Unknown option: {}", other)),
        };

        match outcome {
            Err(e) if is_end_of_input(&e) => return Ok(()),
            Err(e) => println!("{}", format!("Error: {}", e).red()),
            Ok(()) => {}
        }
    }
}

fn menu_edit<B, R, W>(api: &mut RosterApi<B>, p: &mut Prompter<R, W>) -> Result<()>
where
    B: StorageBackend,
    R: BufRead,
    W: Write,
{
    let number = p.ask_parsed::<usize>("Student number: ")?;
    let current = api.student(number)?.clone();
    print!("{}", format_change(&current, &current));
    let field = p.ask_parsed::<EditField>(
        "Field to edit (year, course, name, surname, middle-name, subjects): ",
    )?;
    handle_edit(api, p, number, field, None, false)
}

fn menu_sort<B, R, W>(api: &mut RosterApi<B>, p: &mut Prompter<R, W>) -> Result<()>
where
    B: StorageBackend,
    R: BufRead,
    W: Write,
{
    let field = p.ask_parsed::<SortField>(
        "Sort by (year, course, name, surname, middle-name, average): ",
    )?;
    let desc = !p.confirm("Ascending?")?;
    handle_sort(api, field, desc)
}

fn is_end_of_input(error: &RosterError) -> bool {
    matches!(error, RosterError::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof)
}

/// Record from command-line values, asking for whatever is missing. Values
/// given on the command line are validated but never re-asked.
fn collect_record<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    args: AddArgs,
    bounds: CourseBounds,
) -> Result<StudentRecord> {
    if args.subjects.len() > SUBJECT_COUNT {
        return Err(RosterError::Store(format!(
            "At most {} subjects can be given, got {}",
            SUBJECT_COUNT,
            args.subjects.len()
        )));
    }
    let given: Vec<SubjectGrade> = args
        .subjects
        .iter()
        .map(|s| parse_subject_arg(s))
        .collect::<Result<_>>()?;

    let name = name_value(p, args.name, "Name: ", "name")?;
    let surname = name_value(p, args.surname, "Surname: ", "surname")?;
    let middle_name = name_value(p, args.middle_name, "Middle name: ", "middle name")?;
    let birth_year = match args.year {
        Some(year) => parse_year(&year)?,
        None => p.ask_year()?,
    };
    let course = match args.course {
        Some(course) => parse_course(&course, bounds)?,
        None => p.ask_course(bounds)?,
    };

    let mut record = StudentRecord::new(name, surname, middle_name, birth_year, course);
    for slot in 0..SUBJECT_COUNT {
        let subject = match given.get(slot) {
            Some(subject) => subject.clone(),
            None => p.ask_subject(slot)?,
        };
        record.set_subject(slot, subject);
    }
    Ok(record)
}

fn build_request<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    field: EditField,
    value: Option<String>,
    bounds: CourseBounds,
) -> Result<EditRequest> {
    let request = match field {
        EditField::BirthYear => EditRequest::BirthYear(match value {
            Some(year) => parse_year(&year)?,
            None => p.ask_year()?,
        }),
        EditField::Course => EditRequest::Course(match value {
            Some(course) => parse_course(&course, bounds)?,
            None => p.ask_course(bounds)?,
        }),
        EditField::Name => EditRequest::Name(name_value(p, value, "New name: ", "name")?),
        EditField::Surname => {
            EditRequest::Surname(name_value(p, value, "New surname: ", "surname")?)
        }
        EditField::MiddleName => EditRequest::MiddleName(name_value(
            p,
            value,
            "New middle name: ",
            "middle name",
        )?),
        EditField::Subjects => EditRequest::Subjects(match value {
            Some(list) => parse_subject_list(&list)?,
            None => p.ask_subjects()?,
        }),
    };
    Ok(request)
}

fn name_value<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    given: Option<String>,
    label: &str,
    field: &'static str,
) -> Result<String> {
    match given {
        Some(value) => {
            let value = value.trim().to_string();
            validate_name(field, &value)?;
            Ok(value)
        }
        None => p.ask_name(label, field),
    }
}

/// `NAME:GRADES`, e.g. `Math:5,4,3`.
fn parse_subject_arg(raw: &str) -> Result<SubjectGrade> {
    let (subject, grades) = raw.split_once(':').ok_or_else(|| {
        RosterError::Store(format!("Expected NAME:GRADES (e.g. Math:5,4,3), got '{}'", raw))
    })?;
    let (subject, grades) = (subject.trim(), grades.trim());
    validate_subject(subject)?;
    validate_grades(grades)?;
    Ok(SubjectGrade::new(subject, grades))
}

/// Three `NAME:GRADES` items separated by `;`.
fn parse_subject_list(raw: &str) -> Result<[SubjectGrade; SUBJECT_COUNT]> {
    let items: Vec<SubjectGrade> = raw
        .split(';')
        .map(parse_subject_arg)
        .collect::<Result<_>>()?;
    <[SubjectGrade; SUBJECT_COUNT]>::try_from(items).map_err(|items| {
        RosterError::Store(format!(
            "Expected {} subjects separated by ';', got {}",
            SUBJECT_COUNT,
            items.len()
        ))
    })
}
