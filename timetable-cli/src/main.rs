use std::io::Read;
use std::path::PathBuf;
use std::{fs, io, process};

use clap::{Parser, ValueEnum};
use jiff::Zoned;
use timetable::day::parse_weekday;
use timetable::{DaySelection, Moment, Shape, Timetable};

#[derive(Clone, Copy, ValueEnum)]
enum ShapeArg {
    /// course_name / venue / teacher_name
    Student,
    /// Subject / Location / program
    Teacher,
}

impl From<ShapeArg> for Shape {
    fn from(arg: ShapeArg) -> Self {
        match arg {
            ShapeArg::Student => Shape::Student,
            ShapeArg::Teacher => Shape::Teacher,
        }
    }
}

#[derive(Parser)]
#[command(
    name = "timetable",
    about = "Show which classes are on now and which are next",
    version
)]
struct Cli {
    /// Class list JSON file (reads stdin when omitted or "-")
    input: Option<PathBuf>,

    /// Field naming of the records
    #[arg(long, value_enum, default_value = "student")]
    shape: ShapeArg,

    /// Reference time, e.g. 2026-02-09T09:30 or 2026-02-09T09:30:00+00:00[UTC].
    /// Defaults to now.
    #[arg(long)]
    at: Option<String>,

    /// Input already holds a single day's classes; do not filter by weekday
    #[arg(long)]
    all_days: bool,

    /// Print the full timetable for a weekday (e.g. "We" or "wednesday")
    #[arg(long, conflicts_with_all = ["at", "all_days"])]
    day: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Validate records without resolving
    #[arg(long)]
    check: bool,
}

fn read_input(input: Option<&PathBuf>) -> io::Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path),
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Accepts a zoned datetime or a civil one; a civil one is taken as-is.
fn parse_reference(s: &str) -> Result<Moment, String> {
    if let Ok(zoned) = s.parse::<Zoned>() {
        return Ok(Moment::from(&zoned));
    }
    s.parse::<jiff::civil::DateTime>()
        .map(Moment::from)
        .map_err(|e| e.to_string())
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("error: failed to serialize: {e}");
            process::exit(1);
        }
    }
}

fn main() {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let text = match read_input(cli.input.as_ref()) {
        Ok(t) => t,
        Err(e) => {
            let source = cli
                .input
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "stdin".to_string());
            eprintln!("error: cannot read {source}: {e}");
            process::exit(1);
        }
    };

    let shape = Shape::from(cli.shape);
    let timetable = match Timetable::from_json(&text, &shape.field_map()) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("{}", e.display_rich());
            process::exit(1);
        }
    };
    log::debug!(
        "loaded {} {shape} records, {} skipped",
        timetable.entries().len(),
        timetable.skipped().len()
    );

    if cli.check {
        if timetable.skipped().is_empty() {
            println!("\u{2713} {} records valid", timetable.entries().len());
            process::exit(0);
        }
        for skipped in timetable.skipped() {
            eprintln!("record {}: {}", skipped.index, skipped.reason);
        }
        eprintln!(
            "{} of {} records invalid",
            timetable.skipped().len(),
            timetable.entries().len() + timetable.skipped().len()
        );
        process::exit(1);
    }

    for skipped in timetable.skipped() {
        log::warn!("skipping record {}: {}", skipped.index, skipped.reason);
    }

    if let Some(ref day) = cli.day {
        let Some(weekday) = parse_weekday(day) else {
            eprintln!("error: unknown weekday '{day}'");
            process::exit(1);
        };
        let classes = timetable.for_day(weekday);
        if cli.json {
            print_json(&classes);
        } else if classes.is_empty() {
            eprintln!("no classes on {weekday}");
        } else {
            for class in &classes {
                println!("{class}");
            }
        }
        process::exit(0);
    }

    let moment = match cli.at {
        Some(ref at) => match parse_reference(at) {
            Ok(m) => m,
            Err(e) => {
                eprintln!("error: invalid --at datetime: {e}");
                process::exit(1);
            }
        },
        None => Moment::now(),
    };
    let selection = if cli.all_days {
        DaySelection::Preselected
    } else {
        DaySelection::Reference
    };

    let resolution = timetable.resolution_at(moment, selection);
    if cli.json {
        print_json(&resolution);
        return;
    }

    println!("{}", resolution.schedule);
    if let (Some(next), Some(minutes)) = (
        resolution.schedule.next(),
        resolution.schedule.minutes_until_next(moment),
    ) {
        println!("\nnext: {} in {minutes} min", next.subject_name);
    }
}
