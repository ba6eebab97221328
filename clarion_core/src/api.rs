mod argument;
mod handle;
mod option;
mod parameter;
mod positional;
mod slot;
mod switch;
mod verb;

pub use argument::Argument;
pub use handle::*;
pub use parameter::*;
pub use verb::VerbHandler;

pub(crate) use argument::{ArgumentNode, ParseFlag, ValueArgument};
pub(crate) use verb::VerbArgument;
