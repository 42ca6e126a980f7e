//! goodbye-world: bids `who-to-farewell` farewell and reports the date.

use std::fmt::Display;

use action_core::{Output, TemplatedAction};
use chrono::{DateTime, Local, TimeZone};

pub const INPUT: &str = "who-to-farewell";
pub const DATE_OUTPUT: &str = "date";
pub const MESSAGE_OUTPUT: &str = "message";

pub fn action() -> TemplatedAction {
    TemplatedAction::new("goodbye-world", INPUT, farewell)
        .announce(|name| format!("Goodbye {name}!"))
}

fn farewell(name: &str, now: DateTime<Local>) -> Vec<Output> {
    vec![
        Output::new(DATE_OUTPUT, date_string(&now)),
        Output::new(MESSAGE_OUTPUT, farewell_message(name)),
    ]
}

/// Calendar date as month/day/year without padding, e.g. `3/5/2024`.
pub fn date_string<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    now.format("%-m/%-d/%Y").to_string()
}

pub fn farewell_message(name: &str) -> String {
    format!("Farewell {name}, until we meet again!")
}
