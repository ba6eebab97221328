mod base;
mod child;
pub(crate) mod interface;
mod printer;
mod root;

pub use base::BaseArgumentParser;
pub use child::ChildArgumentParser;
pub use interface::{ConsoleInterface, FileReader, FsFileReader, UserInterface};
pub use root::{ArgumentParser, ArgumentParserBuilder};

pub(crate) use base::Profile;
pub(crate) use root::Settings;
