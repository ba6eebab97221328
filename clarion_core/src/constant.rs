pub(crate) const HELP_NAME: &str = "help";
pub(crate) const HELP_SINGLE_LETTER: char = '?';
pub(crate) const HELP_MESSAGE: &str = "Display this help";
pub(crate) const DEFAULT_DESCRIPTION: &str = "See user's manual";
pub(crate) const DEFAULT_VERB_TERM: &str = "verb";
pub(crate) const DEFAULT_SCREEN_WIDTH: usize = 120;
pub(crate) const END_OF_OPTIONS: &str = "--";
pub(crate) const RESPONSE_FILE_PREFIX: char = '@';
pub(crate) const COMMENT_PREFIX: char = '#';
