use pulldown_cmark::{Event, Tag, TagEnd};

/// One heading discovered in the source document, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Inline text of the heading, with code spans re-quoted in backticks.
    pub text: String,
    /// Heading level, 1 through 6.
    pub level: u8,
    /// Position of the heading's opening event in the event stream.
    pub index: usize,
}

/// A pulldown-cmark adapter that records the headings of a Markdown
/// document. When this iterator runs, it pushes one `Heading` per heading
/// into a vector that you supply, passing every event through unchanged.
///
/// Headings inside fenced or indented code blocks produce no record, and
/// neither do headings with no visible text.
pub struct Headings<'a, 'b, I>
where
    I: Iterator<Item = Event<'a>>,
{
    iter: I,
    headings: &'b mut Vec<Heading>,
    in_heading: bool,
    in_code: bool,
    pos: usize,
}

impl<'a, 'b, I> Headings<'a, 'b, I>
where
    I: Iterator<Item = Event<'a>>,
{
    pub fn new(iter: I, headings: &'b mut Vec<Heading>) -> Self {
        Self {
            iter,
            headings,
            in_heading: false,
            in_code: false,
            pos: 0,
        }
    }

    fn append(&mut self, text: &str) {
        if let Some(heading) = self.headings.last_mut() {
            heading.text.push_str(text);
        }
    }
}

impl<'a, 'b, I> Iterator for Headings<'a, 'b, I>
where
    I: Iterator<Item = Event<'a>>,
{
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let event = self.iter.next()?;
        let pos = self.pos;
        self.pos += 1;

        match &event {
            Event::Start(Tag::CodeBlock(_)) => self.in_code = true,
            Event::End(TagEnd::CodeBlock) => self.in_code = false,
            Event::Start(Tag::Heading { level, .. }) if !self.in_code => {
                self.headings.push(Heading {
                    text: String::new(),
                    level: *level as u8,
                    index: pos,
                });
                self.in_heading = true;
            }
            Event::End(TagEnd::Heading(_)) if self.in_heading => {
                self.in_heading = false;
                // A heading with nothing but whitespace gets no entry.
                if self.headings.last().is_some_and(|h| h.text.trim().is_empty()) {
                    self.headings.pop();
                }
            }
            Event::Text(text) if self.in_heading => self.append(text),
            Event::Code(code) if self.in_heading => {
                let quoted = format!("`{code}`");
                self.append(&quoted);
            }
            Event::SoftBreak | Event::HardBreak if self.in_heading => self.append(" "),
            _ => (),
        }
        Some(event)
    }
}
