//! hello-world: greets `who-to-greet` and reports the time of the greeting.

use std::fmt::Display;

use action_core::{Output, TemplatedAction};
use chrono::{DateTime, Local, TimeZone};

pub const INPUT: &str = "who-to-greet";
pub const TIME_OUTPUT: &str = "time";

pub fn action() -> TemplatedAction {
    TemplatedAction::new("hello-world", INPUT, greet).announce(|name| format!("Hello {name}!"))
}

fn greet(_name: &str, now: DateTime<Local>) -> Vec<Output> {
    vec![Output::new(TIME_OUTPUT, time_string(&now))]
}

/// Time of day with its UTC offset, e.g. `14:39:07 GMT+0100`.
pub fn time_string<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    now.format("%H:%M:%S GMT%z").to_string()
}
