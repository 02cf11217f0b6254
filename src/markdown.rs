//! Markdown rendering for bot replies.
//!
//! Bot text is trusted and rendered as rich content; user text never goes
//! through here and is only escaped.

use colored::Colorize;
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use crate::theme::Palette;

fn options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH
}

/// Render Markdown to an HTML fragment.
pub fn to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, options());
    let mut html = String::with_capacity(markdown.len() * 3 / 2);
    pulldown_cmark::html::push_html(&mut html, parser);
    html
}

/// Escape literal text for inclusion in HTML, attribute-safe.
pub fn escape_html(text: &str) -> String {
    html_escape::encode_double_quoted_attribute(text).into_owned()
}

/// Render Markdown as styled terminal text.
///
/// Headings and inline code use the accent color, lists get bullets or
/// numbers, and code blocks are indented.
pub fn to_terminal(markdown: &str, palette: Palette) -> String {
    let mut out = String::new();

    let mut bold = 0usize;
    let mut italic = 0usize;
    let mut heading = false;
    let mut in_code_block = false;
    let mut lists: Vec<Option<u64>> = Vec::new();

    for event in Parser::new_ext(markdown, options()) {
        match event {
            Event::Start(tag) => match tag {
                Tag::Heading { .. } => {
                    block_break(&mut out);
                    heading = true;
                }
                Tag::Paragraph if lists.is_empty() => block_break(&mut out),
                Tag::List(start) => {
                    if lists.is_empty() {
                        block_break(&mut out);
                    } else {
                        line_break(&mut out);
                    }
                    lists.push(start);
                }
                Tag::Item => {
                    line_break(&mut out);
                    out.push_str(&"  ".repeat(lists.len().saturating_sub(1)));
                    match lists.last_mut() {
                        Some(Some(n)) => {
                            out.push_str(&format!("{n}. "));
                            *n += 1;
                        }
                        _ => out.push_str("• "),
                    }
                }
                Tag::CodeBlock(_) => {
                    block_break(&mut out);
                    in_code_block = true;
                }
                Tag::Strong => bold += 1,
                Tag::Emphasis => italic += 1,
                _ => {}
            },
            Event::End(tag) => match tag {
                TagEnd::Heading(_) => {
                    heading = false;
                    out.push('\n');
                }
                TagEnd::Paragraph | TagEnd::Item => line_break(&mut out),
                TagEnd::List(_) => {
                    lists.pop();
                }
                TagEnd::CodeBlock => in_code_block = false,
                TagEnd::Strong => bold = bold.saturating_sub(1),
                TagEnd::Emphasis => italic = italic.saturating_sub(1),
                _ => {}
            },
            Event::Text(text) => {
                let text: &str = &text;
                if in_code_block {
                    for line in text.lines() {
                        out.push_str("    ");
                        out.push_str(&line.color(palette.accent).to_string());
                        out.push('\n');
                    }
                } else {
                    let color = if heading { palette.accent } else { palette.bot };
                    let mut styled = text.color(color);
                    if heading || bold > 0 {
                        styled = styled.bold();
                    }
                    if italic > 0 {
                        styled = styled.italic();
                    }
                    out.push_str(&styled.to_string());
                }
            }
            Event::Code(code) => {
                out.push_str(&format!("`{code}`").color(palette.accent).to_string());
            }
            Event::SoftBreak => out.push(' '),
            Event::HardBreak => out.push('\n'),
            Event::Rule => {
                block_break(&mut out);
                out.push_str(&"────────".color(palette.muted).to_string());
                out.push('\n');
            }
            _ => {}
        }
    }

    out.trim_end().to_string()
}

fn line_break(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

fn block_break(out: &mut String) {
    if out.is_empty() || out.ends_with("\n\n") {
        return;
    }
    line_break(out);
    out.push('\n');
}
