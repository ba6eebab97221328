use crate::api::ArgumentNode;
use crate::model::ArgumentKind;
use crate::parser::interface::{ColumnRenderer, LeftWidth, PaddingWidth, TotalWidth};
use std::rc::Rc;

const INDENT: usize = 2;
const PADDING: usize = 2;

/// Renders the help of one parser.
pub(crate) struct Printer<'a> {
    program: &'a str,
    arguments: &'a [Rc<dyn ArgumentNode>],
    verb_term: &'a str,
    screen_width: usize,
}

impl<'a> Printer<'a> {
    pub(crate) fn new(
        program: &'a str,
        arguments: &'a [Rc<dyn ArgumentNode>],
        verb_term: &'a str,
        screen_width: usize,
    ) -> Self {
        Self {
            program,
            arguments,
            verb_term,
            screen_width,
        }
    }

    pub(crate) fn render(&self) -> Vec<String> {
        let mut summary: Vec<String> = self
            .arguments
            .iter()
            .filter(|a| a.kind() != ArgumentKind::Verb)
            .map(|a| a.summary())
            .collect();

        if self.of_kind(ArgumentKind::Verb).next().is_some() {
            summary.push(format!("<{}> ...", self.verb_term));
        }

        let mut lines = vec![format!("usage: {} {}", self.program, summary.join(" "))
            .trim_end()
            .to_string()];

        let left_column_width = self
            .arguments
            .iter()
            .map(|a| a.short_usage().chars().count())
            .max()
            .unwrap_or_default();
        let column_renderer = ColumnRenderer::guided(
            INDENT,
            PaddingWidth::new(PADDING),
            LeftWidth::new(left_column_width),
            TotalWidth(self.screen_width),
        );

        let sections = [
            ("options:".to_string(), self.named().collect::<Vec<_>>()),
            (
                "positional arguments:".to_string(),
                self.of_kind(ArgumentKind::Positional).collect(),
            ),
            (
                format!("{}s:", self.verb_term),
                self.of_kind(ArgumentKind::Verb).collect(),
            ),
        ];

        for (title, arguments) in sections {
            if arguments.is_empty() {
                continue;
            }

            lines.push(String::default());
            lines.push(title);

            for argument in arguments {
                lines.extend(column_renderer.render(
                    INDENT,
                    &argument.short_usage(),
                    &argument.long_usage(),
                ));
            }
        }

        lines
    }

    fn named(&self) -> impl Iterator<Item = &Rc<dyn ArgumentNode>> {
        self.arguments.iter().filter(|a| a.kind().is_named())
    }

    fn of_kind(&self, kind: ArgumentKind) -> impl Iterator<Item = &Rc<dyn ArgumentNode>> {
        self.arguments.iter().filter(move |a| a.kind() == kind)
    }
}
