use crate::headings::Headings;
use crate::options::Options;
use crate::slug::{self, SlugRegistry};
use anyhow::Result;
use pulldown_cmark::{Event, Parser};
use serde::Serialize;

/// One rendered TOC entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Display text, after stripping.
    pub content: String,
    /// Anchor slug, unique within one build.
    pub slug: String,
    /// Heading level, 1 through 6.
    pub lvl: u8,
    /// Index into the bullet list used for this entry.
    pub bullet: usize,
}

/// The result of building a table of contents.
#[derive(Debug)]
pub struct Toc<'a> {
    /// The rendered nested bullet list, with no trailing newline.
    pub content: String,
    /// The smallest heading level considered for the TOC.
    pub highest: u8,
    /// The document's full parser event stream, for callers that want to
    /// post-process the rest of the document themselves.
    pub tokens: Vec<Event<'a>>,
    /// The entries behind `content`, in the same order.
    pub json: Vec<Entry>,
}

/// Build a table of contents from the headings of a Markdown document.
///
/// The result is a pure function of the input and options; all duplicate
/// numbering state lives inside this one call.
pub fn toc<'a>(input: &'a str, options: &Options) -> Result<Toc<'a>> {
    options.validate()?;

    let mut headings = Vec::new();
    let tokens: Vec<Event<'a>> = Headings::new(Parser::new(input), &mut headings).collect();

    // Removing the first top-level heading can expose a new highest
    // level, so the minimum is recomputed afterwards.
    if !options.firsth1
        && let Some(min) = headings.iter().map(|h| h.level).min()
        && let Some(first) = headings.iter().position(|h| h.level == min)
    {
        headings.remove(first);
    }
    let highest = headings.iter().map(|h| h.level).min().unwrap_or(0);

    let mut registry = SlugRegistry::default();
    let mut lines = Vec::new();
    let mut json = Vec::new();

    for heading in &headings {
        // Depth limits are relative to the highest level present, not to
        // the absolute heading level.
        if let Some(maxdepth) = options.maxdepth
            && usize::from(heading.level) >= usize::from(highest) + maxdepth
        {
            continue;
        }

        let content = options.display(&heading.text);
        if !options.keep(&content, heading, &headings) {
            continue;
        }

        // Entries that never render must not claim a duplicate number,
        // so the slug is assigned only past this point.
        let slug = registry.assign(options.slug(&heading.text));
        let depth = usize::from(heading.level - highest);
        let bullet = depth % options.bullets.len();

        let indent = "  ".repeat(depth);
        let marker = &options.bullets[bullet];
        lines.push(if options.linkify {
            format!("{indent}{marker} [{content}](#{})", slug::escape(&slug))
        } else {
            format!("{indent}{marker} {content}")
        });
        json.push(Entry {
            content,
            slug,
            lvl: heading.level,
            bullet,
        });
    }

    Ok(Toc {
        content: lines.join("\n"),
        highest,
        tokens,
        json,
    })
}
