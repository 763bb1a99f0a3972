//! Constants used throughout xmlpath-diff.

/// Path separator between ancestor and child segments.
pub const PATH_SEPARATOR: char = '/';

/// Maximum length, in characters, of a parser diagnostic carried by a parse error.
pub const MAX_DIAGNOSTIC_CHARS: usize = 200;

/// Marker appended to a diagnostic that was cut at `MAX_DIAGNOSTIC_CHARS`.
pub const ELLIPSIS: char = '…';

/// Attributes consulted, in priority order, when building a comparison key.
pub const KEY_ATTRIBUTES: [&str; 3] = ["id", "name", "key"];
