use crate::headings::Heading;
use anyhow::{Result, bail};
use std::borrow::Cow;

pub type SlugifyFn = Box<dyn Fn(&str) -> String + Send + Sync>;
pub type StripFn = Box<dyn Fn(&str) -> String + Send + Sync>;
pub type FilterFn = Box<dyn Fn(&str, &Heading, &[Heading]) -> bool + Send + Sync>;

/// How anchor slugs are derived from heading text.
pub enum Slugify {
    /// The built-in algorithm in [`crate::slug`].
    Default,
    /// Keep the raw heading text as the slug basis. Duplicates are still
    /// numbered and the anchor is still percent-encoded.
    Off,
    /// A replacement for the whole derivation. Whatever the function
    /// returns goes through duplicate numbering and percent-encoding
    /// like any other slug.
    Custom(SlugifyFn),
}

/// How heading text is reduced to display text.
pub enum Strip {
    /// Leave the text alone.
    None,
    /// Remove every occurrence of each word, then a single hyphen the
    /// removal left dangling at either end.
    Words(Vec<String>),
    /// A caller-supplied rewrite of the whole heading text.
    Custom(StripFn),
}

/// Options for one TOC build or insertion. A plain record: set the fields
/// you care about and take `Default` for the rest.
pub struct Options {
    pub slugify: Slugify,
    pub strip: Strip,
    /// Keep only entries for which this returns true. Called with the
    /// display text, the heading itself, and all extracted headings.
    pub filter: Option<FilterFn>,
    /// Deepest heading level to include, counted from the highest level
    /// present in the document. `None` means no limit.
    pub maxdepth: Option<usize>,
    /// Include the first top-level heading. When false it is removed
    /// before anything else happens.
    pub firsth1: bool,
    /// Bullet marker per depth, cycling when the nesting goes deeper than
    /// the list.
    pub bullets: Vec<String>,
    /// Render entries as markdown links; plain text when false.
    pub linkify: bool,
    /// Literal TOC to insert instead of building one from the document.
    pub toc: Option<String>,
    /// Marker comment that opens the TOC region of a document.
    pub open: String,
    /// Marker comment that closes the TOC region.
    pub close: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            slugify: Slugify::Default,
            strip: Strip::None,
            filter: None,
            maxdepth: None,
            firsth1: true,
            bullets: vec!["-".to_string(), "*".to_string(), "+".to_string()],
            linkify: true,
            toc: None,
            open: "<!-- toc -->".to_string(),
            close: "<!-- tocstop -->".to_string(),
        }
    }
}

impl Options {
    /// Reject configurations that could only produce wrong output.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.bullets.is_empty() {
            bail!("bullets must contain at least one marker");
        }
        if self.maxdepth == Some(0) {
            bail!("maxdepth must be at least 1");
        }
        Ok(())
    }

    /// The slug for a heading, before duplicate numbering.
    pub(crate) fn slug(&self, text: &str) -> String {
        match &self.slugify {
            Slugify::Default => crate::slug::slugify(text),
            Slugify::Off => text.to_string(),
            Slugify::Custom(f) => f(text),
        }
    }

    /// The display text for a heading: the strip hook, then whitespace
    /// runs condensed to single spaces.
    pub(crate) fn display(&self, text: &str) -> String {
        let stripped: Cow<str> = match &self.strip {
            Strip::None => Cow::Borrowed(text),
            Strip::Words(words) => Cow::Owned(strip_words(text, words)),
            Strip::Custom(f) => Cow::Owned(f(text)),
        };
        condense(&stripped)
    }

    pub(crate) fn keep(&self, display: &str, heading: &Heading, all: &[Heading]) -> bool {
        match &self.filter {
            Some(f) => f(display, heading, all),
            None => true,
        }
    }
}

fn strip_words(text: &str, words: &[String]) -> String {
    let mut out = text.trim().to_string();
    for word in words {
        out = out.replace(word.as_str(), "");
    }
    let out = out.strip_prefix('-').unwrap_or(&out);
    out.strip_suffix('-').unwrap_or(out).to_string()
}

/// Collapse runs of spaces and tabs to single spaces and trim the ends.
fn condense(text: &str) -> String {
    text.split([' ', '\t'])
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
