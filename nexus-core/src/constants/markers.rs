//! Marker Fields and Wrapper Keys
//!
//! The transform stage enriches data with marker fields. The output stage
//! hides every key starting with [`MARKER_PREFIX`], so markers never show up
//! in rendered results.
//!
//! ```text
//! {"a": 1}  ──Transform──▶  {"a": 1, "_processed": true, "_timestamp": 1.7e9}
//!                                       └──── hidden by OutputStage ────┘
//! ```

/// Prefix shared by all marker fields.
pub const MARKER_PREFIX: char = '_';

/// Boolean flag set on everything the transform stage touched.
pub const PROCESSED_MARKER: &str = "_processed";

/// Capture time in seconds since the Unix epoch.
pub const TIMESTAMP_MARKER: &str = "_timestamp";

/// Key holding a wrapped sequence.
pub const ITEMS_KEY: &str = "items";

/// Key holding the length of a wrapped sequence.
pub const COUNT_KEY: &str = "count";

/// Key holding wrapped text.
pub const TEXT_KEY: &str = "text";

/// Key holding the character count of wrapped text.
pub const LENGTH_KEY: &str = "length";

/// Key holding any other wrapped value.
pub const VALUE_KEY: &str = "value";

/// Separator the input stage splits delimited text on.
pub const CSV_SEPARATOR: char = ',';

/// Prefix of every rendered result.
pub const OUTPUT_PREFIX: &str = "Output: ";
