extern crate calnote as lib;

use chrono::{Datelike, Month, NaiveDate};
use flexi_logger::{FileSpec, Logger};
use lib::config::Config;
use lib::context::Context;
use lib::error::{Error, ErrorKind};
use lib::event::EventInput;
use lib::grid::{CalendarDate, WEEKDAY_NAMES};
use lib::month_key::{format_date, parse_date};
use lib::store::EventStore;
use num_traits::FromPrimitive;
use std::fmt::{self, Display};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "calnote",
    about = "Month calendar with per-day event notes."
)]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(
        short = "d",
        long = "date",
        help = "selected day as DD/MM/YYYY, defaults to today",
        parse(try_from_str = parse_date)
    )]
    pub date: Option<NaiveDate>,

    #[structopt(
        short = "e",
        long = "event",
        help = "event on the selected day as \"HH:MM name\", may be repeated",
        parse(try_from_str = parse_event)
    )]
    pub events: Vec<EventInput>,

    #[structopt(long = "next", default_value = "0", help = "months to move forward")]
    pub next: u32,

    #[structopt(long = "prev", default_value = "0", help = "months to move backward")]
    pub prev: u32,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

fn parse_event(s: &str) -> Result<EventInput, Error> {
    let invalid = || {
        Error::new(
            ErrorKind::InvalidEventInput,
            &format!("'{}' is not \"HH:MM name\"", s),
        )
    };

    let (time, name) = s.trim().split_once(' ').ok_or_else(invalid)?;
    let (hours, minutes) = time.split_once(':').ok_or_else(invalid)?;

    Ok(EventInput {
        hours: hours.parse().map_err(|_| invalid())?,
        minutes: minutes.parse().map_err(|_| invalid())?,
        name: name.to_owned(),
    })
}

struct DayCell<'a> {
    day: &'a CalendarDate,
    in_month: bool,
    config: &'a Config,
}

impl Display for DayCell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arg_today = if self.day.is_today {
            self.config.today_char.unwrap_or(' ')
        } else {
            ' '
        };

        let arg_focus = if self.day.is_selected {
            self.config.selected_char.unwrap_or(' ')
        } else {
            ' '
        };

        if self.in_month {
            write!(f, "{}{}{:>2}", arg_today, arg_focus, self.day.date.day())
        } else {
            write!(f, "{}{}{:>2}", arg_today, arg_focus, '.')
        }
    }
}

fn print_month(context: &mut Context, config: &Config) {
    let current = *context.current();

    let month_name = Month::from_u32(current.month()).map_or("", |month| month.name());
    println!("{:^28}", format!("{} {}", month_name, current.year()));
    if config.warn_past_months && !context.is_navigable() {
        println!("{:^28}", "(past month)");
    }

    if config.show_weekday_header {
        for head in WEEKDAY_NAMES.iter() {
            print!("{:>4}", head);
        }
        println!();
    }

    for week in context.weeks() {
        for day in week {
            let cell = DayCell {
                day,
                in_month: day.date.month() == current.month(),
                config,
            };
            print!("{}", cell);
        }
        println!();
    }

    println!();
    match context.active_events() {
        Some(events) if !events.is_empty() => {
            for event in events {
                println!("{}", event);
            }
        }
        _ => println!("No events"),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    // Keep stdout for the calendar itself.
    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    logger.start()?;

    let config = lib::config::load_suitable_config(args.configfile.as_deref())?;

    let mut context = Context::new(EventStore::new())?;

    if let Some(date) = args.date {
        context.goto_month(date)?;
        context.select_date(date)?;
    }

    for input in args.events {
        let record = context.submit_event(input)?;
        log::info!("Added {}", record);
    }

    for _ in 0..args.next {
        context.next_month()?;
    }
    for _ in 0..args.prev {
        context.prev_month()?;
    }

    log::debug!("Selected day is {}", format_date(context.selected()));

    print_month(&mut context, &config);

    Ok(())
}
