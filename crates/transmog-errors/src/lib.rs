use std::fmt::Display;

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
use line_index::{LineCol, LineIndex};
pub use text_size::TextRange;
use text_size::TextSize;
use thiserror::Error;
pub use transmog_span::Position;

/// A parse failure reported by a parser front end.
///
/// Positions are 1-based, with columns counted in characters.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Diagnostic {
    message: String,
    position: Option<Position>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, position: Option<Position>) -> Self {
        Self { message: message.into(), position }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// The byte range of the character at the diagnostic's position, or an
    /// empty range at the end of the line when the column is past it.
    pub fn range(&self, text: &str) -> Option<TextRange> {
        let Position { line, column } = self.position?;
        let index = LineIndex::new(text);
        let line_start = index.offset(LineCol { line: line.checked_sub(1)?, col: 0 })?;

        let rest = &text[usize::from(line_start)..];
        let line_text = &rest[..rest.find('\n').unwrap_or(rest.len())];
        let column = column.saturating_sub(1) as usize;
        let range = match line_text.char_indices().nth(column) {
            Some((offset, c)) => TextRange::at(to_size(offset), TextSize::of(c)),
            None => TextRange::empty(to_size(line_text.len())),
        };
        Some(range + line_start)
    }

    pub fn render<'a>(
        &'a self,
        renderer: &'a Renderer,
        path: &'a str,
        text: &'a str,
    ) -> impl Display + 'a {
        let mut snippet = Snippet::source(text).origin(path).fold(true);
        if let Some(range) = self.range(text) {
            snippet = snippet.annotation(Level::Error.span(range.into()).label("here"));
        }
        renderer.render(Level::Error.title(&self.message).snippet(snippet))
    }
}

fn to_size(offset: usize) -> TextSize {
    TextSize::try_from(offset).unwrap_or(TextSize::from(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "class A {\n  int x = ;\n}\n";

    #[test]
    fn range_counts_characters() {
        let diagnostic = Diagnostic::error("expected expression", Some(Position::new(2, 11)));
        let range = diagnostic.range(TEXT).unwrap();
        assert_eq!(&TEXT[range], ";");

        let text = "String s = \"é\" +;\n";
        let diagnostic = Diagnostic::error("expected expression", Some(Position::new(1, 17)));
        assert_eq!(&text[diagnostic.range(text).unwrap()], ";");
    }

    #[test]
    fn range_past_the_line_is_empty() {
        let diagnostic = Diagnostic::error("unexpected end of line", Some(Position::new(1, 40)));
        let range = diagnostic.range(TEXT).unwrap();
        assert!(range.is_empty());
        assert_eq!(usize::from(range.start()), "class A {".len());

        let nowhere = Diagnostic::error("lost", Some(Position::new(9, 1)));
        assert_eq!(nowhere.range(TEXT), None);
        assert_eq!(Diagnostic::error("lost", None).range(TEXT), None);
    }

    #[test]
    fn render_points_at_the_position() {
        let diagnostic = Diagnostic::error("expected expression", Some(Position::new(2, 11)));
        let rendered = diagnostic.render(&Renderer::plain(), "src/A.java", TEXT).to_string();
        assert!(rendered.starts_with("error: expected expression"), "{rendered}");
        assert!(rendered.contains("src/A.java:2:11"), "{rendered}");
        assert!(rendered.contains("^ here"), "{rendered}");

        let unplaced = Diagnostic::error("file is empty", None);
        let rendered = unplaced.render(&Renderer::plain(), "src/A.java", TEXT).to_string();
        assert!(rendered.starts_with("error: file is empty"), "{rendered}");
    }
}
