//! Building blocks of the `caproj` binary: input checks and one report
//! builder per subcommand.
pub mod commands;
pub mod util;
