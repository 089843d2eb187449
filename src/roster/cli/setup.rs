use clap::{Args, Parser, Subcommand, ValueEnum};
use roster::model::{EditField, SortField};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "roster", bin_name = "roster", version, disable_help_subcommand = true)]
#[command(
    about = "Student roster with text and binary storage",
    long_about = "Keeps student records (name, birth year, course, three subjects with grades),\n\
                  saves them as text or binary files and prints them as a console table.\n\
                  Run without a command for the interactive menu."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (default: $ROSTER_HOME or the platform data dir)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a student; missing fields are asked for
    #[command(alias = "a", display_order = 1)]
    Add(AddArgs),

    /// Show all students as a table
    #[command(alias = "ls", display_order = 2)]
    List,

    /// Change one field of a student
    #[command(alias = "e", display_order = 3)]
    Edit {
        /// Student number as shown by `list`
        number: usize,

        /// year, course, name, surname, middle-name or subjects
        field: EditField,

        /// New value; asked for when omitted
        value: Option<String>,

        /// Apply without asking for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete a student
    #[command(alias = "rm", display_order = 4)]
    Delete {
        /// Student number as shown by `list`
        number: usize,
    },

    /// Print the roster sorted by a field
    #[command(display_order = 5)]
    Sort {
        /// year, course, name, surname, middle-name or average
        field: SortField,

        /// Sort descending
        #[arg(long)]
        desc: bool,
    },

    /// Write the roster to disk
    #[command(display_order = 6)]
    Save {
        #[arg(value_enum, default_value_t = FileFormat::Text)]
        format: FileFormat,
    },

    /// Replace the roster with a file's contents
    #[command(display_order = 7)]
    Load {
        #[arg(value_enum, default_value_t = FileFormat::Text)]
        format: FileFormat,
    },

    /// Show or change settings
    #[command(display_order = 8)]
    Config {
        key: Option<String>,
        value: Option<String>,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct AddArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub surname: Option<String>,

    #[arg(long = "middle-name")]
    pub middle_name: Option<String>,

    /// Birth year, 1930-2010
    #[arg(long)]
    pub year: Option<String>,

    #[arg(long)]
    pub course: Option<String>,

    /// Subject and grades as NAME:G,G,G; repeat up to three times
    #[arg(long = "subject", value_name = "NAME:GRADES")]
    pub subjects: Vec<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FileFormat {
    Text,
    Binary,
}
