use std::path::Path;
use std::rc::Rc;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The sink for everything the parser reports to the user.
pub trait UserInterface {
    /// Print a line of help.
    fn print(&self, message: String);

    /// Print a line of an error report.
    fn print_error(&self, message: String);
}

/// Writes every line to standard error.
#[derive(Debug, Default)]
pub struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        eprintln!("{message}");
    }

    fn print_error(&self, message: String) {
        eprintln!("{message}");
    }
}

impl<U: UserInterface + ?Sized> UserInterface for Rc<U> {
    fn print(&self, message: String) {
        (**self).print(message);
    }

    fn print_error(&self, message: String) {
        (**self).print_error(message);
    }
}

/// Reads the text of a response file.
pub trait FileReader {
    /// The full text of the file at `path`.
    fn read(&self, path: &Path) -> std::io::Result<String>;
}

/// Reads files from the file system.
#[derive(Debug, Default)]
pub struct FsFileReader {}

impl FileReader for FsFileReader {
    fn read(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }
}

impl<F> FileReader for F
where
    F: Fn(&Path) -> std::io::Result<String>,
{
    fn read(&self, path: &Path) -> std::io::Result<String> {
        self(path)
    }
}

#[derive(Debug)]
pub(crate) struct PaddingWidth(usize);

impl PaddingWidth {
    pub(crate) fn new(width: usize) -> Self {
        // padding must be at least 1
        PaddingWidth(std::cmp::max(width, 1))
    }
}

#[derive(Debug)]
pub(crate) struct LeftWidth(usize);

impl LeftWidth {
    pub(crate) fn new(width: usize) -> Self {
        // left must be at least 1
        LeftWidth(std::cmp::max(width, 1))
    }
}

#[derive(Debug)]
pub(crate) struct TotalWidth(pub usize);

/// Lays out a left column (the argument usage) beside a word wrapped right column (its description).
#[derive(Debug)]
pub(crate) struct ColumnRenderer {
    padding: usize,
    left: usize,
    right: usize,
}

// Let's assume the average word length is 5.
// Then 17 is a good minimum, because it allows precisely 3 words with a space between them.
pub(crate) const MINIMUM_RIGHT_WIDTH: usize = 17;

impl ColumnRenderer {
    /// Give the right column whatever the total width leaves, but never less than the minimum.
    pub(crate) fn guided(
        indent: usize,
        padding: PaddingWidth,
        left: LeftWidth,
        total_width: TotalWidth,
    ) -> Self {
        let non_right = indent + left.0 + padding.0;

        let right = if non_right + MINIMUM_RIGHT_WIDTH <= total_width.0 {
            total_width.0 - non_right
        } else {
            MINIMUM_RIGHT_WIDTH
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Columns {non_right} within the total {}.  Selecting right: {right}.",
                total_width.0
            );
        }

        Self {
            padding: padding.0,
            left: left.0,
            right,
        }
    }

    /// Render one row, wrapping each paragraph of `right` onto its own lines.
    pub(crate) fn render(&self, indent: usize, left: &str, right: &[String]) -> Vec<String> {
        let padding = self.padding;
        let left_width = self.left;
        let mut parts = Vec::default();

        for paragraph in right {
            parts.extend(chunk(paragraph, self.right));
        }

        let mut out = Vec::default();

        for (i, part) in parts.iter().enumerate() {
            let label = if i == 0 { left } else { "" };
            out.push(format!(
                "{:indent$}{:left_width$}{:padding$}{}",
                "", label, "", part
            ));
        }

        if out.is_empty() {
            out.push(format!("{:indent$}{}", "", left));
        }

        out
    }
}

/// Break the paragraph into lines no wider than `width`.
pub(crate) fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split(' ') {
        if !word.is_empty() {
            if current.is_empty() {
                hyphenate(width, &mut lines, &mut current, word);
            } else if current.chars().count() + word.chars().count() < width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(current);
                current = String::default();
                hyphenate(width, &mut lines, &mut current, word);
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    let characters: Vec<char> = word.chars().collect();
    let increment = std::cmp::max(width, 2) - 1;
    let mut left = 0;

    while left + increment + 1 < characters.len() {
        let piece: String = characters[left..left + increment].iter().collect();
        lines.push(format!("{piece}-"));
        left += increment;
    }

    current.extend(&characters[left..]);
}
