//! Template compilation and rendering with Tera.
//!
//! This module turns validated directive source into a [`CompiledTemplate`]:
//! a private Tera instance holding one template plus a table of slots. Each
//! slot is a Tera variable standing in for one dotted path, so path
//! resolution, missing-variable handling and truthiness follow
//! [`VariableContext`] rules while Tera executes the control flow and
//! escaping.

use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;
use tera::{Context as TeraContext, Tera};

use super::TemplateOptions;
use super::context::{ContextValue, VariableContext};
use super::directive::{self, Position, Segment};
use super::error::TemplateError;
use super::utils::find_similar;

static TERA_POSITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+):(\d+)").expect("valid tera position pattern"));

/// Template name used when interpolated values are HTML-escaped.
const ESCAPED_TEMPLATE_NAME: &str = "__brackt_template.html";
/// Template name used when values are emitted verbatim.
const RAW_TEMPLATE_NAME: &str = "__brackt_template.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum SlotKind {
    Value,
    Condition,
}

#[derive(Debug, Clone)]
struct Slot {
    ident: String,
    path: String,
    kind: SlotKind,
    position: Position,
}

/// Slots allocated while compiling, one per distinct (kind, path) pair.
#[derive(Default)]
struct SlotTable {
    slots: Vec<Slot>,
    idents: HashMap<(SlotKind, String), usize>,
}

impl SlotTable {
    fn slot_for(&mut self, kind: SlotKind, path: &str, position: Position) -> &str {
        let index = match self.idents.get(&(kind, path.to_string())) {
            Some(&index) => index,
            None => {
                let index = self.slots.len();
                self.slots.push(Slot {
                    ident: format!("slot_{}", index),
                    path: path.to_string(),
                    kind,
                    position,
                });
                self.idents.insert((kind, path.to_string()), index);
                index
            }
        };
        &self.slots[index].ident
    }
}

/// An executable template produced by [`compile`].
///
/// Rendering borrows the template immutably and has no side effects, so one
/// compiled template can serve any number of renders.
pub struct CompiledTemplate {
    tera: Tera,
    name: &'static str,
    slots: Vec<Slot>,
    strict: bool,
}

impl fmt::Debug for CompiledTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledTemplate")
            .field("name", &self.name)
            .field("slots", &self.slots)
            .field("strict", &self.strict)
            .finish_non_exhaustive()
    }
}

/// Compile directive source with default options.
///
/// # Examples
///
/// ```
/// use brackt::templating::{compile, VariableContext};
///
/// let template = compile("{% if a %}X{% else %}Y{% endif %}").unwrap();
/// assert_eq!(template.render(&VariableContext::new().with("a", true)).unwrap(), "X");
/// assert_eq!(template.render(&VariableContext::new()).unwrap(), "Y");
/// ```
///
/// # Errors
///
/// See [`compile_with`].
pub fn compile(directive_source: &str) -> Result<CompiledTemplate, TemplateError> {
    compile_with(directive_source, &TemplateOptions::default())
}

/// Compile directive source.
///
/// # Errors
///
/// - [`TemplateError::Syntax`] when directives are unbalanced, nested,
///   unsupported, or reference something other than a dotted path
/// - [`TemplateError::Malformed`] when Tera rejects the generated template
pub fn compile_with(
    directive_source: &str,
    options: &TemplateOptions,
) -> Result<CompiledTemplate, TemplateError> {
    let segments = directive::parse(directive_source)?;

    let mut table = SlotTable::default();
    let mut emitted = String::with_capacity(directive_source.len());

    for segment in &segments {
        match *segment {
            Segment::Text(text) => emitted.push_str(text),
            Segment::Variable {
                path,
                position,
            } => {
                let ident = table.slot_for(SlotKind::Value, path, position);
                emitted.push_str(&format!("{{{{ {} }}}}", ident));
            }
            Segment::If {
                path,
                position,
            } => {
                let ident = table.slot_for(SlotKind::Condition, path, position);
                emitted.push_str(&format!("{{% if {} %}}", ident));
            }
            Segment::Else {
                ..
            } => emitted.push_str("{% else %}"),
            Segment::EndIf {
                ..
            } => emitted.push_str("{% endif %}"),
        }
    }

    let name = if options.escape_html {
        ESCAPED_TEMPLATE_NAME
    } else {
        RAW_TEMPLATE_NAME
    };

    let mut tera = Tera::default();
    tera.autoescape_on(vec![".html"]);
    tera.add_raw_template(name, &emitted)
        .map_err(|e| malformed_from_tera(&e, directive_source))?;

    tracing::debug!(
        "Compiled template with {} slot(s) (strict={}, escape_html={})",
        table.slots.len(),
        options.strict,
        options.escape_html
    );

    Ok(CompiledTemplate {
        tera,
        name,
        slots: table.slots,
        strict: options.strict,
    })
}

impl CompiledTemplate {
    /// Render the template against `context`.
    ///
    /// # Errors
    ///
    /// In lenient mode only a failure inside Tera itself is reported. In
    /// strict mode missing variables and mappings used as text or as a
    /// condition raise [`TemplateError::Render`].
    pub fn render(&self, context: &VariableContext) -> Result<String, TemplateError> {
        let mut tera_context = TeraContext::new();

        for slot in &self.slots {
            let value = context.lookup(&slot.path);
            match slot.kind {
                SlotKind::Value => {
                    let text = self.interpolate(slot, value, context)?;
                    tera_context.insert(slot.ident.as_str(), &text);
                }
                SlotKind::Condition => {
                    let truthy = self.evaluate(slot, value, context)?;
                    tera_context.insert(slot.ident.as_str(), &truthy);
                }
            }
        }

        self.tera.render(self.name, &tera_context).map_err(|e| TemplateError::Render {
            variable: None,
            message: format_tera_error(&e),
            suggestions: Vec::new(),
        })
    }

    /// Paths referenced by variable interpolations, in first-use order.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.slots_of(SlotKind::Value)
    }

    /// Paths referenced by conditional blocks, in first-use order.
    pub fn conditions(&self) -> impl Iterator<Item = &str> {
        self.slots_of(SlotKind::Condition)
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    fn slots_of(&self, kind: SlotKind) -> impl Iterator<Item = &str> {
        self.slots.iter().filter(move |slot| slot.kind == kind).map(|slot| slot.path.as_str())
    }

    fn interpolate(
        &self,
        slot: &Slot,
        value: Option<&ContextValue>,
        context: &VariableContext,
    ) -> Result<String, TemplateError> {
        match value {
            None if self.strict => Err(missing_variable(slot, context)),
            None => Ok(String::new()),
            Some(ContextValue::Map(_)) if self.strict => Err(TemplateError::Render {
                variable: Some(slot.path.clone()),
                message: format!(
                    "variable `{}` (line {}, column {}) is a mapping and cannot be rendered as text",
                    slot.path, slot.position.line, slot.position.column
                ),
                suggestions: Vec::new(),
            }),
            Some(value) => Ok(value.as_text().unwrap_or_default()),
        }
    }

    fn evaluate(
        &self,
        slot: &Slot,
        value: Option<&ContextValue>,
        context: &VariableContext,
    ) -> Result<bool, TemplateError> {
        match value {
            None if self.strict => Err(missing_variable(slot, context)),
            None => Ok(false),
            Some(ContextValue::Map(_)) if self.strict => Err(TemplateError::Render {
                variable: Some(slot.path.clone()),
                message: format!(
                    "condition `{}` (line {}, column {}) is a mapping, not a boolean-like value",
                    slot.path, slot.position.line, slot.position.column
                ),
                suggestions: Vec::new(),
            }),
            Some(value) => Ok(value.is_truthy()),
        }
    }
}

fn missing_variable(slot: &Slot, context: &VariableContext) -> TemplateError {
    let available = context.paths();
    TemplateError::Render {
        variable: Some(slot.path.clone()),
        message: format!(
            "variable `{}` (line {}, column {}) is not defined",
            slot.path, slot.position.line, slot.position.column
        ),
        suggestions: find_similar(&slot.path, available.iter().map(String::as_str)),
    }
}

/// Map a Tera parse error back onto the directive source.
fn malformed_from_tera(error: &tera::Error, directive_source: &str) -> TemplateError {
    let fragment = extract_line_from_tera_error(error)
        .and_then(|line| directive_source.lines().nth(line.saturating_sub(1)))
        .or_else(|| directive_source.lines().next())
        .unwrap_or_default()
        .trim()
        .to_string();

    TemplateError::Malformed {
        fragment,
        message: format_tera_error(error),
    }
}

/// Extract line number from Tera error message
///
/// Tera includes line:column information in parse error messages.
/// Examples: "1:7", "15:23", "864:1"
fn extract_line_from_tera_error(error: &tera::Error) -> Option<usize> {
    let error_msg = format!("{:?}", error);
    let caps = TERA_POSITION.captures(&error_msg)?;
    caps.get(1)?.as_str().parse::<usize>().ok()
}

/// Format a Tera error with detailed information about what went wrong.
///
/// Walks the error chain and strips Tera's internal template names, which
/// mean nothing to a template author.
pub fn format_tera_error(error: &tera::Error) -> String {
    use std::error::Error;

    let mut all_messages = vec![error.to_string()];
    let mut current_error: Option<&dyn Error> = error.source();
    while let Some(err) = current_error {
        all_messages.push(err.to_string());
        current_error = err.source();
    }

    let messages: Vec<String> = all_messages
        .into_iter()
        .map(|msg| {
            msg.replace(&format!("Failed to parse '{}'", ESCAPED_TEMPLATE_NAME), "")
                .replace(&format!("Failed to parse '{}'", RAW_TEMPLATE_NAME), "")
                .replace(&format!("Failed to render '{}'", ESCAPED_TEMPLATE_NAME), "")
                .replace(&format!("Failed to render '{}'", RAW_TEMPLATE_NAME), "")
                .replace(&format!("'{}'", ESCAPED_TEMPLATE_NAME), "template")
                .replace(&format!("'{}'", RAW_TEMPLATE_NAME), "template")
                .trim()
                .to_string()
        })
        .filter(|msg| !msg.is_empty())
        .collect();

    if messages.is_empty() {
        "template engine rejected the template".to_string()
    } else {
        messages.join("\n  → ")
    }
}
