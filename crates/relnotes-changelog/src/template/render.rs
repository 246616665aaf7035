//! Template execution against a JSON value tree

use relnotes_core::TemplateError;
use serde_json::Value;

use super::parser::{Expr, Node};

/// Field names accepted for templates written against the older
/// `Groups`/`GetTitle` naming.
fn field_alias(field: &str) -> Option<&'static str> {
    match field {
        "Groups" => Some("Sections"),
        "GetTitle" => Some("Title"),
        "GetID" => Some("ID"),
        "GetURL" => Some("URL"),
        _ => None,
    }
}

fn render_error(line: usize, message: impl Into<String>) -> TemplateError {
    TemplateError::Render {
        line,
        message: message.into(),
    }
}

pub(crate) struct Renderer {
    root: Value,
    vars: Vec<(String, Value)>,
    out: String,
}

impl Renderer {
    pub(crate) fn new(root: Value) -> Self {
        Self {
            root,
            vars: Vec::new(),
            out: String::new(),
        }
    }

    pub(crate) fn render(mut self, nodes: &[Node]) -> Result<String, TemplateError> {
        let root = self.root.clone();
        self.render_nodes(nodes, &root)?;
        Ok(self.out)
    }

    fn render_nodes(&mut self, nodes: &[Node], dot: &Value) -> Result<(), TemplateError> {
        for node in nodes {
            match node {
                Node::Text(text) => self.out.push_str(text),
                Node::Output { expr, line } => {
                    let value = self.eval(expr, dot, *line)?;
                    write_value(&mut self.out, &value, *line)?;
                }
                Node::If {
                    cond,
                    body,
                    else_body,
                    line,
                } => {
                    if is_truthy(&self.eval(cond, dot, *line)?) {
                        self.render_nodes(body, dot)?;
                    } else {
                        self.render_nodes(else_body, dot)?;
                    }
                }
                Node::Range {
                    index_var,
                    elem_var,
                    expr,
                    body,
                    else_body,
                    line,
                } => {
                    let items = match self.eval(expr, dot, *line)? {
                        Value::Array(items) => items,
                        Value::Null => Vec::new(),
                        other => {
                            return Err(render_error(
                                *line,
                                format!("range can't iterate over {}", kind(&other)),
                            ))
                        }
                    };

                    if items.is_empty() {
                        self.render_nodes(else_body, dot)?;
                        continue;
                    }

                    let mark = self.vars.len();
                    for (index, item) in items.iter().enumerate() {
                        self.vars.truncate(mark);
                        if let Some(name) = index_var {
                            self.vars.push((name.clone(), Value::from(index)));
                        }
                        if let Some(name) = elem_var {
                            self.vars.push((name.clone(), item.clone()));
                        }
                        self.render_nodes(body, item)?;
                    }
                    self.vars.truncate(mark);
                }
            }
        }
        Ok(())
    }

    fn eval(&self, expr: &Expr, dot: &Value, line: usize) -> Result<Value, TemplateError> {
        match expr {
            Expr::Dot(fields) => resolve(dot, fields, line),
            Expr::Var { name, fields } => {
                let base = if name == "$" {
                    &self.root
                } else {
                    self.lookup_var(name)
                        .ok_or_else(|| render_error(line, format!("undefined variable: {}", name)))?
                };
                resolve(base, fields, line)
            }
            Expr::Not(inner) => Ok(Value::Bool(!is_truthy(&self.eval(inner, dot, line)?))),
        }
    }

    fn lookup_var(&self, name: &str) -> Option<&Value> {
        self.vars
            .iter()
            .rev()
            .find(|(var, _)| var == name)
            .map(|(_, value)| value)
    }
}

fn resolve(base: &Value, fields: &[String], line: usize) -> Result<Value, TemplateError> {
    let mut current = base;
    for field in fields {
        current = match current {
            Value::Object(map) => map
                .get(field.as_str())
                .or_else(|| field_alias(field).and_then(|alias| map.get(alias)))
                .ok_or_else(|| render_error(line, format!("can't evaluate field {}", field)))?,
            other => {
                return Err(render_error(
                    line,
                    format!("can't evaluate field {} in type {}", field, kind(other)),
                ))
            }
        };
    }
    Ok(current.clone())
}

fn write_value(out: &mut String, value: &Value, line: usize) -> Result<(), TemplateError> {
    match value {
        Value::Null => {}
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => out.push_str(s),
        Value::Array(items) => {
            out.push('[');
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    out.push(' ');
                }
                write_value(out, item, line)?;
            }
            out.push(']');
        }
        Value::Object(_) => return Err(render_error(line, "can't print a map value")),
    }
    Ok(())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "nil",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "map",
    }
}
