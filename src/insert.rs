use crate::build::toc;
use crate::options::Options;
use anyhow::Result;

/// A marker comment located in the document: the byte offset where its
/// line starts and the offset just past the marker text itself.
struct Marker {
    line_start: usize,
    text_end: usize,
}

/// Find the first line at or after `from` whose trimmed content is
/// `marker`, ignoring ASCII case. Markers are recognized regardless of
/// leading or trailing whitespace on their line.
fn find_marker(text: &str, from: usize, marker: &str) -> Option<Marker> {
    let mut offset = from;
    for line in text[from..].split_inclusive('\n') {
        let content = line.trim_end_matches('\n');
        let trimmed = content.trim();
        if trimmed.eq_ignore_ascii_case(marker) {
            let indent = content.len() - content.trim_start().len();
            return Some(Marker {
                line_start: offset,
                text_end: offset + indent + trimmed.len(),
            });
        }
        offset += line.len();
    }
    None
}

/// Insert or refresh a table of contents between the marker comments of a
/// document.
///
/// The TOC replaces whatever sits between the opening and closing markers;
/// a missing closing marker is added. When the document has no opening
/// marker at all it is returned unchanged. Everything outside the marker
/// region is preserved byte for byte, including the trailing newline run.
///
/// Unless a literal TOC is supplied in the options, the list is built from
/// the document text that follows the marker region, so a title above the
/// markers never lists itself.
pub fn insert(input: &str, options: &Options) -> Result<String> {
    options.validate()?;

    let body = input.trim_end_matches('\n');
    let trailing = &input[body.len()..];

    let Some(open) = find_marker(body, 0, &options.open) else {
        return Ok(input.to_string());
    };
    // The closing marker is only looked for after the opening one, so a
    // repeated pair further down is ordinary content.
    let close = find_marker(body, open.text_end, &options.close);

    let rest = match &close {
        Some(close) => &body[close.text_end..],
        None => &body[open.text_end..],
    };

    let rendered = match &options.toc {
        Some(literal) => literal.clone(),
        None => toc(rest, options)?.content,
    };

    let mut out = String::with_capacity(input.len() + rendered.len());
    out.push_str(&body[..open.line_start]);
    out.push_str(&options.open);
    out.push_str("\n\n");
    out.push_str(&rendered);
    out.push_str("\n\n");
    out.push_str(&options.close);
    out.push_str(rest);
    out.push_str(trailing);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_without_marker_is_unchanged() {
        let doc = "# Title\n\nsome text\n";
        assert_eq!(insert(doc, &Options::default()).unwrap(), doc);
    }

    #[test]
    fn unchanged_document_keeps_trailing_newlines() {
        let doc = "# Title\n\nsome text\n\n\n";
        assert_eq!(insert(doc, &Options::default()).unwrap(), doc);
        let bare = "# Title";
        assert_eq!(insert(bare, &Options::default()).unwrap(), bare);
    }

    #[test]
    fn inserts_below_open_marker() {
        let doc = "# Title\n\n<!-- toc -->\n\n## One\n\n### Two\n";
        assert_eq!(
            insert(doc, &Options::default()).unwrap(),
            "# Title\n\n<!-- toc -->\n\n- [One](#one)\n  * [Two](#two)\n\n<!-- tocstop -->\n\n## One\n\n### Two\n"
        );
    }

    #[test]
    fn replaces_between_markers() {
        let doc = "# Title\n\n<!-- toc -->\n\n- [Old](#old)\n\n<!-- tocstop -->\n\n## One\n";
        assert_eq!(
            insert(doc, &Options::default()).unwrap(),
            "# Title\n\n<!-- toc -->\n\n- [One](#one)\n\n<!-- tocstop -->\n\n## One\n"
        );
    }

    #[test]
    fn title_above_marker_is_not_listed() {
        let doc = "# Title\n\n<!-- toc -->\n\n## One\n";
        let out = insert(doc, &Options::default()).unwrap();
        assert!(out.contains("- [One](#one)"));
        assert!(!out.contains("[Title]"));
    }

    #[test]
    fn inserting_twice_is_stable() {
        let doc = "# Title\n\n<!-- toc -->\n\n## One\n\n### Two\n";
        let once = insert(doc, &Options::default()).unwrap();
        let twice = insert(&once, &Options::default()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn literal_toc_overrides_the_built_one() {
        let doc = "# Title\n\n<!-- toc -->\n\n- [Old](#old)\n\n<!-- tocstop -->\n\n## One\n";
        let options = Options {
            toc: Some("- Foo".to_string()),
            ..Options::default()
        };
        assert_eq!(
            insert(doc, &options).unwrap(),
            "# Title\n\n<!-- toc -->\n\n- Foo\n\n<!-- tocstop -->\n\n## One\n"
        );
    }

    #[test]
    fn preserves_trailing_newline_run() {
        let doc = "<!-- toc -->\n\n## One\n\n\n";
        let out = insert(doc, &Options::default()).unwrap();
        assert!(out.ends_with("## One\n\n\n"));
        assert!(!out.ends_with("\n\n\n\n"));
    }

    #[test]
    fn marker_match_ignores_case_and_surrounding_whitespace() {
        let doc = "# Title\n\n  <!-- TOC -->\n\n## One\n";
        let out = insert(doc, &Options::default()).unwrap();
        assert!(out.contains("<!-- toc -->\n\n- [One](#one)\n\n<!-- tocstop -->"));
    }

    #[test]
    fn repeated_markers_are_ordinary_content() {
        let doc = "<!-- toc -->\n\n<!-- tocstop -->\n\n## One\n\n<!-- toc -->\n";
        let out = insert(doc, &Options::default()).unwrap();
        // The first pair is refreshed; the later marker stays where it was.
        assert_eq!(
            out,
            "<!-- toc -->\n\n- [One](#one)\n\n<!-- tocstop -->\n\n## One\n\n<!-- toc -->\n"
        );
    }

    #[test]
    fn custom_markers() {
        let doc = "<!-- index -->\n\n## One\n";
        let options = Options {
            open: "<!-- index -->".to_string(),
            close: "<!-- indexstop -->".to_string(),
            ..Options::default()
        };
        assert_eq!(
            insert(doc, &options).unwrap(),
            "<!-- index -->\n\n- [One](#one)\n\n<!-- indexstop -->\n\n## One\n"
        );
    }

    #[test]
    fn insertion_options_reach_the_builder() {
        let doc = "<!-- toc -->\n\n## One\n\n### Two\n";
        let options = Options {
            maxdepth: Some(1),
            ..Options::default()
        };
        assert_eq!(
            insert(doc, &options).unwrap(),
            "<!-- toc -->\n\n- [One](#one)\n\n<!-- tocstop -->\n\n## One\n\n### Two\n"
        );
    }

    #[test]
    fn invalid_options_fail_fast() {
        let options = Options {
            bullets: vec![],
            ..Options::default()
        };
        assert!(insert("<!-- toc -->\n", &options).is_err());
    }
}
