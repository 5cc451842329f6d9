/// Timestamp layout used by every city dataset: "2017-06-23 15:09:32"
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Joins start and end station into a directional trip key
pub(crate) const COMBO_SEPARATOR: &str = " + ";

/// Rendered in place of a statistic that has no value (empty selection)
pub(crate) const UNDEFINED: &str = "undefined";

/// Raw rows shown per page when nothing else is configured
pub(crate) const DEFAULT_PAGE_SIZE: usize = 5;
