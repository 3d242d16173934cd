use std::fmt;

use crate::entry::ClassEntry;
use crate::resolve::ResolvedSchedule;

impl fmt::Display for ClassEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}  {} @ {} ({})",
            self.start_time,
            self.end_time,
            self.subject_name,
            self.venue,
            self.instructor_or_program
        )
    }
}

impl fmt::Display for ResolvedSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_section(f, "now", &self.current)?;
        writeln!(f)?;
        write_section(f, "upcoming", &self.upcoming)
    }
}

fn write_section(f: &mut fmt::Formatter<'_>, title: &str, entries: &[ClassEntry]) -> fmt::Result {
    write!(f, "{title}:")?;
    if entries.is_empty() {
        return write!(f, " none");
    }
    for entry in entries {
        write!(f, "\n  {entry}")?;
    }
    Ok(())
}
