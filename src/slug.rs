use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::collections::HashMap;

/// ASCII punctuation that never survives into a slug.
const PUNCTUATION: &[char] = &[
    '|', '$', '&', '`', '~', '=', '\\', '/', '@', '+', '*', '!', '?', '(', '{', '[', ']', '}',
    ')', '<', '>', '.', ',', ';', ':', '\'', '"', '^',
];

/// CJK punctuation, dropped the same way as its ASCII counterpart.
const CJK_PUNCTUATION: &[char] = &[
    '。', '？', '！', '，', '、', '；', '：', '“', '”', '【', '】', '（', '）', '〔', '〕',
    '［', '］', '﹃', '﹄', '‘', '’', '﹁', '﹂', '—', '…', '－', '～', '《', '》', '〈', '〉',
    '「', '」', '　',
];

/// Bytes that stay verbatim in an anchor; everything else is
/// percent-encoded, so multi-byte characters come out in their full
/// percent-escaped UTF-8 form.
const FRAGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Turn heading text into an anchor slug.
///
/// Each space maps to one hyphen (a run of four spaces becomes four
/// hyphens) and each tab to two, punctuation is dropped, and the rest is
/// lowercased. Non-ASCII letters pass through untouched for [`escape`] to
/// percent-encode.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            ' ' => slug.push('-'),
            '\t' => slug.push_str("--"),
            c if PUNCTUATION.contains(&c) || CJK_PUNCTUATION.contains(&c) => (),
            c => slug.extend(c.to_lowercase()),
        }
    }
    slug
}

/// Percent-encode a slug so it is a valid URL fragment.
pub fn escape(slug: &str) -> String {
    utf8_percent_encode(slug, FRAGMENT).to_string()
}

/// The slugs already handed out during one TOC build, so that later
/// duplicates can be numbered. A registry lives for exactly one build and
/// is never shared across invocations.
#[derive(Debug, Default)]
pub struct SlugRegistry {
    counts: HashMap<String, usize>,
}

impl SlugRegistry {
    /// Claim a slug. The first occurrence comes back unchanged; the Nth
    /// duplicate comes back as `{slug}-{N}`.
    pub fn assign(&mut self, slug: String) -> String {
        match self.counts.get_mut(&slug) {
            Some(count) => {
                *count += 1;
                format!("{slug}-{count}")
            }
            None => {
                self.counts.insert(slug.clone(), 0);
                slug
            }
        }
    }
}
