pub(crate) mod date;
pub(crate) mod debug;

pub(crate) use date::{month_name, parse_timestamp, weekday_name};
pub(crate) use debug::{parse_debug_enabled, set_parse_debug};
