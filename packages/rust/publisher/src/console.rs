//! Human-readable console rendering of resolved pages.

use std::io::{self, Write};

use docpush_shared::ResolvedPage;

/// Renders resolved pages to a stream: folder line, title line, a literal
/// `markdown page:` marker, the raw content, and a blank separator, per page,
/// in input order. Empty input produces no output.
pub struct ConsoleSink<W: Write> {
    out: W,
}

impl ConsoleSink<io::Stdout> {
    /// Sink writing to the process's standard output.
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Render a batch of pages. A stream failure is fatal to the pass.
    pub fn render(&mut self, pages: &[ResolvedPage]) -> io::Result<()> {
        for page in pages {
            writeln!(self.out, "folder: {}", page.folder)?;
            writeln!(self.out, "title: {}", page.title)?;
            writeln!(self.out, "markdown page:")?;
            writeln!(self.out, "{}", page.content)?;
            writeln!(self.out)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_to_string(pages: &[ResolvedPage]) -> String {
        let mut buf = Vec::new();
        ConsoleSink::new(&mut buf).render(pages).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn empty_batch_produces_no_output() {
        assert_eq!(render_to_string(&[]), "");
    }

    #[test]
    fn pages_render_as_labeled_blocks() {
        let pages = [ResolvedPage {
            folder: "api/orders".into(),
            title: "Create order".into(),
            content: "# Create order".into(),
        }];

        assert_eq!(
            render_to_string(&pages),
            "folder: api/orders\ntitle: Create order\nmarkdown page:\n# Create order\n\n"
        );
    }

    #[test]
    fn batches_render_in_input_order() {
        let pages = [
            ResolvedPage {
                folder: "a".into(),
                title: "first".into(),
                content: "".into(),
            },
            ResolvedPage {
                folder: "b".into(),
                title: "second".into(),
                content: "".into(),
            },
        ];

        let out = render_to_string(&pages);
        let first = out.find("title: first").unwrap();
        let second = out.find("title: second").unwrap();
        assert!(first < second);
    }
}
