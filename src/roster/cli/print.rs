use colored::Colorize;
use roster::api::{CmdMessage, MessageLevel};
use roster::config::{RosterConfig, KEYS};
use roster::model::{StudentRecord, SUBJECT_COUNT};

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_rendered(rendered: Option<&str>) {
    if let Some(text) = rendered {
        print!("{}", text);
    }
}

/// Field-by-field view of an edit, changed lines highlighted.
pub(super) fn format_change(before: &StudentRecord, after: &StudentRecord) -> String {
    let mut rows = vec![
        ("Year", before.birth_year.to_string(), after.birth_year.to_string()),
        ("Course", before.course.to_string(), after.course.to_string()),
        ("Name", before.name.clone(), after.name.clone()),
        ("Surname", before.surname.clone(), after.surname.clone()),
        ("Middle name", before.middle_name.clone(), after.middle_name.clone()),
    ];
    for slot in 0..SUBJECT_COUNT {
        rows.push((
            "Subject",
            format!("{} [{}]", before.subjects[slot], before.grades[slot]),
            format!("{} [{}]", after.subjects[slot], after.grades[slot]),
        ));
    }

    let mut out = String::new();
    for (label, old, new) in rows {
        if old == new {
            out.push_str(&format!("  {:<12} {}\n", label, old));
        } else {
            out.push_str(&format!(
                "  {:<12} {} -> {}\n",
                label,
                old.red(),
                new.green()
            ));
        }
    }
    out
}

pub(super) fn print_config(config: &RosterConfig) {
    for key in KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }
}
