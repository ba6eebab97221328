//! `clarion` is a declarative command line parser for Rust.
//!
//! A program registers its arguments on an [`ArgumentParser`], receiving a typed handle for each, and then parses
//! the command line.
//! After a successful parse every handle yields its value.
//!
//! There are four kinds of argument:
//! * *Switches*, ex: `--verbose` or `-v`.
//! A switch is `true` when supplied.
//! * *Options*, ex: `--count=3` or `-c=3`.
//! An option carries a value, may declare a default (used when omitted) and a preset (used when supplied without
//! `=value`), and may be required or repeated.
//! * *Positionals*, ex: `notes.txt`.
//! Positionals are filled in registration order, and may be optional, defaulted, required or repeated.
//! * *Verbs*, ex: `archiver create ...`.
//! A verb hands every token after its name to its own handler, which registers the verb's arguments on a child
//! parser.
//!
//! The command line may also contain:
//! * Bundled single letter names: `-abc` is `-a -b -c`.
//! * The end of options marker `--`: every later token is positional.
//! * Response files: `@path` is replaced by the lines of the file at `path`.
//! Blank lines and lines starting with `#` are skipped.
//! A line starting with the name of a named argument is read as if prefixed with `--`, ex: `count=3`.
//! * The help switch: `--help` or `-?` displays the help and stops.
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/greeter.rs")]
//! ```
//!
//! ```console
//! $ greeter -?
//! usage: greeter [-l] [--times=<count>] [--language=<language>] [-?] [<name> ...]
//!
//! options:
//!   -l, --loud             Shout the greeting.
//!   -t, --times=<count>    How many times to greet.
//!                          If omitted, the default is 1.
//!   --language=<language>  The language of the greeting.
//!                          If omitted, the default is en.
//!   -?, --help             Display this help.
//!
//! positional arguments:
//!   <name> ...             Who to greet.
//!
//! $ greeter --times=x
//! 'x' is not a valid value for argument 'times'.
//! Because: Expected an integer, found 'x'
//! Try 'greeter --help' for more information.
//! ```
//!
//! # Verbs
//! A verb handler is invoked with a [`ChildArgumentParser`], on which it registers the verb's arguments before
//! calling [`ChildArgumentParser::try_parse`] exactly once.
//! The handler runs when the verb is added (to validate its arguments early, during which `try_parse` returns
//! `false`) and again when the verb is selected on the command line.
//! ```no_run
#![doc = include_str!("../demos/archiver.rs")]
//! ```
//!
//! # Errors
//! Failures are split in two:
//! * [`ProgrammerError`]: the program configured the parser incorrectly (ex: a duplicate name).
//! These panic by default; see [`FailurePolicy`].
//! * [`UserError`]: the command line is invalid.
//! [`ArgumentParser::try_parse`] prints these, and returns `false`.
pub use clarion_core::*;
