//! Directive syntax scanner.
//!
//! Splits directive source into literal text and directives, validating the
//! subset the compiler supports: `{{ path }}`, `{% if path %}`, `{% else %}`
//! and `{% endif %}`, with no nesting of conditional blocks.

use super::error::TemplateError;

const VARIABLE_OPEN: &str = "{{";
const VARIABLE_CLOSE: &str = "}}";
const TAG_OPEN: &str = "{%";
const TAG_CLOSE: &str = "%}";

/// Longest fragment quoted back in error messages, in characters.
const MAX_FRAGMENT_CHARS: usize = 40;

/// A 1-based position in the directive source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// One piece of scanned directive source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Variable {
        path: &'a str,
        position: Position,
    },
    If {
        path: &'a str,
        position: Position,
    },
    Else {
        position: Position,
    },
    EndIf {
        position: Position,
    },
}

/// Scan and validate directive source.
///
/// # Errors
///
/// Returns [`TemplateError::Syntax`] for unterminated markers, expressions
/// that are not dotted paths, unsupported tags, misplaced `else`/`endif`,
/// nested `if` blocks and `if` blocks left open.
pub fn parse(source: &str) -> Result<Vec<Segment<'_>>, TemplateError> {
    let mut segments = Vec::new();
    let mut open_block: Option<(Position, &str, bool)> = None;
    let mut cursor = 0;

    while let Some((start, is_tag)) = next_marker(source, cursor) {
        if start > cursor {
            segments.push(Segment::Text(&source[cursor..start]));
        }

        let position = position_at(source, start);
        let (close, open_len) = if is_tag {
            (TAG_CLOSE, TAG_OPEN.len())
        } else {
            (VARIABLE_CLOSE, VARIABLE_OPEN.len())
        };
        let body_start = start + open_len;
        let Some(body_len) = source[body_start..].find(close) else {
            let opener = if is_tag { TAG_OPEN } else { VARIABLE_OPEN };
            return Err(TemplateError::syntax(
                format!("unterminated `{}` marker", opener),
                position.line,
                position.column,
                fragment_at(source, start),
            ));
        };
        let end = body_start + body_len + close.len();
        let marker = &source[start..end];
        let body = source[body_start..body_start + body_len].trim();

        if !is_tag {
            validate_path(body, "variable reference", position, marker)?;
            segments.push(Segment::Variable {
                path: body,
                position,
            });
            cursor = end;
            continue;
        }

        let (keyword, argument) = match body.split_once(char::is_whitespace) {
            Some((keyword, argument)) => (keyword, argument.trim()),
            None => (body, ""),
        };

        match keyword {
            "if" => {
                if let Some((outer, _, _)) = open_block {
                    return Err(TemplateError::syntax(
                        format!(
                            "nested conditional blocks are not supported (outer block opened at line {}, column {})",
                            outer.line, outer.column
                        ),
                        position.line,
                        position.column,
                        marker,
                    ));
                }
                validate_path(argument, "condition", position, marker)?;
                open_block = Some((position, marker, false));
                segments.push(Segment::If {
                    path: argument,
                    position,
                });
            }
            "else" => {
                reject_argument(keyword, argument, position, marker)?;
                match open_block.as_mut() {
                    Some((_, _, seen_else)) if !*seen_else => *seen_else = true,
                    Some(_) => {
                        return Err(TemplateError::syntax(
                            "conditional block already has an `else`",
                            position.line,
                            position.column,
                            marker,
                        ));
                    }
                    None => {
                        return Err(TemplateError::syntax(
                            "`else` outside of an `if` block",
                            position.line,
                            position.column,
                            marker,
                        ));
                    }
                }
                segments.push(Segment::Else {
                    position,
                });
            }
            "endif" => {
                reject_argument(keyword, argument, position, marker)?;
                if open_block.take().is_none() {
                    return Err(TemplateError::syntax(
                        "`endif` without a matching `if`",
                        position.line,
                        position.column,
                        marker,
                    ));
                }
                segments.push(Segment::EndIf {
                    position,
                });
            }
            "" => {
                return Err(TemplateError::syntax(
                    "empty directive",
                    position.line,
                    position.column,
                    marker,
                ));
            }
            other => {
                return Err(TemplateError::syntax(
                    format!("unsupported directive `{}`", other),
                    position.line,
                    position.column,
                    marker,
                ));
            }
        }

        cursor = end;
    }

    if cursor < source.len() {
        segments.push(Segment::Text(&source[cursor..]));
    }

    if let Some((position, marker, _)) = open_block {
        return Err(TemplateError::syntax(
            "unclosed `if` block: missing `endif`",
            position.line,
            position.column,
            marker,
        ));
    }

    Ok(segments)
}

/// Whether `path` is a dotted path the compiler accepts.
///
/// The first segment is an identifier; later segments may also be numeric
/// indexes. Segment names are opaque; words like `in` or `not` are ordinary
/// segments.
pub fn is_dotted_path(path: &str) -> bool {
    if path.is_empty() {
        return false;
    }

    path.split('.').enumerate().all(|(index, segment)| {
        let mut chars = segment.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() || first == '_' => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            Some(first) if first.is_ascii_digit() && index > 0 => {
                chars.all(|c| c.is_ascii_digit())
            }
            _ => false,
        }
    })
}

fn validate_path(
    path: &str,
    what: &str,
    position: Position,
    marker: &str,
) -> Result<(), TemplateError> {
    if path.is_empty() {
        return Err(TemplateError::syntax(
            format!("empty {}", what),
            position.line,
            position.column,
            marker,
        ));
    }
    if !is_dotted_path(path) {
        return Err(TemplateError::syntax(
            format!("{} `{}` is not a dotted variable path", what, path),
            position.line,
            position.column,
            marker,
        ));
    }
    Ok(())
}

fn reject_argument(
    keyword: &str,
    argument: &str,
    position: Position,
    marker: &str,
) -> Result<(), TemplateError> {
    if argument.is_empty() {
        Ok(())
    } else {
        Err(TemplateError::syntax(
            format!("`{}` takes no expression, found `{}`", keyword, argument),
            position.line,
            position.column,
            marker,
        ))
    }
}

/// Byte offset of the next `{{` or `{%` at or after `from`, and whether it is a tag.
fn next_marker(source: &str, from: usize) -> Option<(usize, bool)> {
    let rest = &source[from..];
    let variable = rest.find(VARIABLE_OPEN);
    let tag = rest.find(TAG_OPEN);

    match (variable, tag) {
        (Some(v), Some(t)) if t < v => Some((from + t, true)),
        (Some(v), _) => Some((from + v, false)),
        (None, Some(t)) => Some((from + t, true)),
        (None, None) => None,
    }
}

fn position_at(source: &str, offset: usize) -> Position {
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    Position {
        line,
        column,
    }
}

/// The rest of the line starting at `offset`, truncated for display.
fn fragment_at(source: &str, offset: usize) -> String {
    let line = source[offset..].lines().next().unwrap_or_default();
    let mut fragment: String = line.chars().take(MAX_FRAGMENT_CHARS).collect();
    if line.chars().count() > MAX_FRAGMENT_CHARS {
        fragment.push_str("...");
    }
    fragment
}
