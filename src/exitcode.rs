//! Process exit codes, following BSD sysexits.h.

pub const OK: i32 = 0;

/// Bad arguments, missing subcommand, or refusing to overwrite a config file
pub const USAGE: i32 = 64;

/// Invalid source row, malformed table header, or malformed taxonomy document
pub const DATAERR: i32 = 65;

/// Input table or document does not exist
pub const NOINPUT: i32 = 66;

/// Error with no more specific mapping
pub const SOFTWARE: i32 = 70;

/// Reading input or writing a package file failed
pub const IOERR: i32 = 74;

/// Settings could not be loaded or parsed
pub const CONFIG: i32 = 78;
