//! Markdown block lexer.
//!
//! Folds the `pulldown-cmark` event stream into a flat list of top-level
//! [`Block`]s. Block text is sliced from the source by event offsets, so
//! inline markup (`**bold**`, links, ...) is preserved for later stripping.

use std::ops::Range;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use crate::util::heading_level_to_num;

/// A top-level markdown block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    /// ATX or setext heading; `text` is the inline source without markers.
    Heading { depth: u8, text: String },
    /// Paragraph source.
    Paragraph { text: String },
    /// List with one source string per item.
    List { ordered: bool, items: Vec<String> },
    /// Quote content with `>` markers removed.
    BlockQuote { text: String },
    /// Fenced or indented code, verbatim.
    Code { text: String },
    /// Anything the layout does not render (rules, HTML, tables, ...).
    Other,
}

type Spanned<'a> = (Event<'a>, Range<usize>);

/// Parser options used for lexing (GitHub Flavored Markdown).
#[must_use]
pub fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM
}

/// Lex markdown into top-level blocks, in document order.
#[must_use]
pub fn lex(markdown: &str) -> Vec<Block> {
    let mut events = Parser::new_ext(markdown, parser_options()).into_offset_iter();
    let mut blocks = Vec::new();

    while let Some((event, range)) = events.next() {
        let block = match event {
            Event::Start(tag) => {
                let children = take_children(&mut events);
                block_from_tag(markdown, tag, range, &children)
            }
            _ => Block::Other,
        };
        blocks.push(block);
    }

    blocks
}

/// Consume events up to (and including) the end tag closing the current block.
fn take_children<'a, I>(events: &mut I) -> Vec<Spanned<'a>>
where
    I: Iterator<Item = Spanned<'a>>,
{
    let mut depth = 0usize;
    let mut children = Vec::new();

    for (event, range) in events {
        match &event {
            Event::Start(_) => depth += 1,
            Event::End(_) if depth == 0 => break,
            Event::End(_) => depth -= 1,
            _ => {}
        }
        children.push((event, range));
    }

    children
}

fn block_from_tag(source: &str, tag: Tag<'_>, range: Range<usize>, children: &[Spanned<'_>]) -> Block {
    match tag {
        Tag::Heading { level, .. } => Block::Heading {
            depth: heading_level_to_num(level),
            text: inner_source(source, children).trim().to_owned(),
        },
        Tag::Paragraph => Block::Paragraph {
            text: source[range].trim().to_owned(),
        },
        Tag::List(start) => Block::List {
            ordered: start.is_some(),
            items: list_items(source, children),
        },
        Tag::BlockQuote(_) => Block::BlockQuote {
            text: unquote(&source[range]),
        },
        Tag::CodeBlock(_) => Block::Code {
            text: code_text(children),
        },
        _ => Block::Other,
    }
}

/// Source spanned by a run of child events.
fn inner_source<'s>(source: &'s str, children: &[Spanned<'_>]) -> &'s str {
    let start = children.iter().map(|(_, r)| r.start).min();
    let end = children.iter().map(|(_, r)| r.end).max();
    match (start, end) {
        (Some(start), Some(end)) if start <= end => &source[start..end],
        _ => "",
    }
}

fn list_items(source: &str, children: &[Spanned<'_>]) -> Vec<String> {
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut item_start = 0;

    for (i, (event, _)) in children.iter().enumerate() {
        match event {
            Event::Start(Tag::Item) if depth == 0 => {
                item_start = i + 1;
                depth += 1;
            }
            Event::Start(_) => depth += 1,
            Event::End(TagEnd::Item) if depth == 1 => {
                items.push(item_text(source, &children[item_start..i]));
                depth -= 1;
            }
            Event::End(_) => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    items
}

/// Item source without indentation or a leading `[ ]` / `[x]` task marker.
fn item_text(source: &str, item: &[Spanned<'_>]) -> String {
    let text = dedent(inner_source(source, item));
    let is_task = item
        .iter()
        .find(|(event, _)| !matches!(event, Event::Start(Tag::Paragraph)))
        .is_some_and(|(event, _)| matches!(event, Event::TaskListMarker(_)));

    if !is_task {
        return text;
    }
    match text.split_once(']') {
        Some((marker, rest)) if marker.starts_with('[') => rest.trim_start().to_owned(),
        _ => text,
    }
}

fn dedent(text: &str) -> String {
    text.lines()
        .map(str::trim_start)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_owned()
}

fn unquote(raw: &str) -> String {
    raw.lines()
        .map(|line| {
            let line = line.trim_start();
            match line.strip_prefix('>') {
                Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
                None => line,
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_owned()
}

fn code_text(children: &[Spanned<'_>]) -> String {
    let mut text: String = children
        .iter()
        .filter_map(|(event, _)| match event {
            Event::Text(t) => Some(t.as_ref()),
            _ => None,
        })
        .collect();
    if text.ends_with('\n') {
        text.pop();
    }
    text
}
