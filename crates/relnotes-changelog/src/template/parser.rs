//! Template lexing and parsing

use relnotes_core::TemplateError;

/// A parsed template node
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    /// Literal text copied to the output
    Text(String),
    /// `{{ expr }}`
    Output { expr: Expr, line: usize },
    /// `{{ if expr }} ... {{ else }} ... {{ end }}`
    If {
        cond: Expr,
        body: Vec<Node>,
        else_body: Vec<Node>,
        line: usize,
    },
    /// `{{ range [$i,] [$x :=] expr }} ... {{ else }} ... {{ end }}`
    Range {
        index_var: Option<String>,
        elem_var: Option<String>,
        expr: Expr,
        body: Vec<Node>,
        else_body: Vec<Node>,
        line: usize,
    },
}

/// An expression inside an action
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expr {
    /// `.` or `.Field.Field`, relative to the current dot
    Dot(Vec<String>),
    /// `$`, `$name` or `$name.Field`
    Var { name: String, fields: Vec<String> },
    /// `not expr`
    Not(Box<Expr>),
}

#[derive(Debug, PartialEq)]
enum Token {
    Text(String),
    Action { body: String, line: usize },
}

enum Terminator {
    End(usize),
    Else(usize),
}

fn syntax(line: usize, message: impl Into<String>) -> TemplateError {
    TemplateError::Syntax {
        line,
        message: message.into(),
    }
}

/// Parse template source into a node tree
pub(crate) fn parse(source: &str) -> Result<Vec<Node>, TemplateError> {
    let tokens = lex(source)?;
    let mut parser = Parser {
        tokens: tokens.into_iter(),
    };

    let (nodes, terminator) = parser.parse_block()?;
    match terminator {
        None => Ok(nodes),
        Some(Terminator::End(line)) => Err(syntax(line, "unexpected {{end}}")),
        Some(Terminator::Else(line)) => Err(syntax(line, "unexpected {{else}}")),
    }
}

fn lex(source: &str) -> Result<Vec<Token>, TemplateError> {
    let mut tokens = Vec::new();
    let mut rest = source;
    let mut line = 1;
    let mut trim_next = false;

    while let Some(start) = rest.find("{{") {
        let text = &rest[..start];
        let after_open = &rest[start + 2..];
        let trim_left = after_open.starts_with('-')
            && after_open[1..].starts_with(|c: char| c.is_whitespace());

        push_text(&mut tokens, text, trim_next, trim_left);
        line += text.matches('\n').count();

        let end = after_open
            .find("}}")
            .ok_or_else(|| syntax(line, "unclosed action"))?;
        let raw = &after_open[..end];
        let action_line = line;
        line += raw.matches('\n').count();

        let mut inner = if trim_left { &raw[1..] } else { raw };
        trim_next = inner.ends_with('-')
            && inner[..inner.len() - 1].ends_with(|c: char| c.is_whitespace());
        if trim_next {
            inner = &inner[..inner.len() - 1];
        }

        let inner = inner.trim();
        if inner.starts_with("/*") {
            if !inner.ends_with("*/") || inner.len() < 4 {
                return Err(syntax(action_line, "unclosed comment"));
            }
        } else if inner.is_empty() {
            return Err(syntax(action_line, "missing value for action"));
        } else {
            tokens.push(Token::Action {
                body: inner.to_string(),
                line: action_line,
            });
        }

        rest = &after_open[end + 2..];
    }

    push_text(&mut tokens, rest, trim_next, false);
    Ok(tokens)
}

fn push_text(tokens: &mut Vec<Token>, text: &str, trim_start: bool, trim_end: bool) {
    let mut text = text;
    if trim_start {
        text = text.trim_start();
    }
    if trim_end {
        text = text.trim_end();
    }
    if !text.is_empty() {
        tokens.push(Token::Text(text.to_string()));
    }
}

struct Parser {
    tokens: std::vec::IntoIter<Token>,
}

impl Parser {
    fn parse_block(&mut self) -> Result<(Vec<Node>, Option<Terminator>), TemplateError> {
        let mut nodes = Vec::new();

        while let Some(token) = self.tokens.next() {
            let (body, line) = match token {
                Token::Text(text) => {
                    nodes.push(Node::Text(text));
                    continue;
                }
                Token::Action { body, line } => (body, line),
            };

            let (keyword, rest) = match body.split_once(char::is_whitespace) {
                Some((keyword, rest)) => (keyword, rest.trim()),
                None => (body.as_str(), ""),
            };

            match keyword {
                "end" | "else" if !rest.is_empty() => {
                    return Err(syntax(line, format!("unexpected arguments to {{{{{}}}}}", keyword)));
                }
                "end" => return Ok((nodes, Some(Terminator::End(line)))),
                "else" => return Ok((nodes, Some(Terminator::Else(line)))),
                "if" => {
                    if rest.is_empty() {
                        return Err(syntax(line, "missing condition in {{if}}"));
                    }
                    let cond = parse_expr(rest, line)?;
                    let (body, else_body) = self.parse_branches("if", line)?;
                    nodes.push(Node::If {
                        cond,
                        body,
                        else_body,
                        line,
                    });
                }
                "range" => {
                    if rest.is_empty() {
                        return Err(syntax(line, "missing value for {{range}}"));
                    }
                    let (index_var, elem_var, expr) = parse_range_clause(rest, line)?;
                    let (body, else_body) = self.parse_branches("range", line)?;
                    nodes.push(Node::Range {
                        index_var,
                        elem_var,
                        expr,
                        body,
                        else_body,
                        line,
                    });
                }
                "with" | "define" | "template" | "block" | "break" | "continue" => {
                    return Err(syntax(line, format!("unsupported action {{{{{}}}}}", keyword)));
                }
                _ => nodes.push(Node::Output {
                    expr: parse_expr(&body, line)?,
                    line,
                }),
            }
        }

        Ok((nodes, None))
    }

    fn parse_branches(
        &mut self,
        keyword: &str,
        line: usize,
    ) -> Result<(Vec<Node>, Vec<Node>), TemplateError> {
        let missing_end = || syntax(line, format!("unclosed {{{{{}}}}}: missing {{{{end}}}}", keyword));

        let (body, terminator) = self.parse_block()?;
        match terminator {
            None => Err(missing_end()),
            Some(Terminator::End(_)) => Ok((body, Vec::new())),
            Some(Terminator::Else(_)) => {
                let (else_body, terminator) = self.parse_block()?;
                match terminator {
                    None => Err(missing_end()),
                    Some(Terminator::End(_)) => Ok((body, else_body)),
                    Some(Terminator::Else(else_line)) => {
                        Err(syntax(else_line, "unexpected {{else}}"))
                    }
                }
            }
        }
    }
}

fn parse_range_clause(
    clause: &str,
    line: usize,
) -> Result<(Option<String>, Option<String>, Expr), TemplateError> {
    let Some((vars, expr)) = clause.split_once(":=") else {
        return Ok((None, None, parse_expr(clause, line)?));
    };

    let names: Vec<&str> = vars.split(',').map(str::trim).collect();
    let (index_var, elem_var) = match names.as_slice() {
        [elem] => (None, Some(parse_var_name(elem, line)?)),
        [index, elem] => (
            Some(parse_var_name(index, line)?),
            Some(parse_var_name(elem, line)?),
        ),
        _ => return Err(syntax(line, "too many declarations in range")),
    };

    Ok((index_var, elem_var, parse_expr(expr.trim(), line)?))
}

fn parse_var_name(name: &str, line: usize) -> Result<String, TemplateError> {
    match name.strip_prefix('$') {
        Some(ident) if is_identifier(ident) => Ok(name.to_string()),
        _ => Err(syntax(line, format!("invalid variable name '{}'", name))),
    }
}

fn parse_expr(text: &str, line: usize) -> Result<Expr, TemplateError> {
    let text = text.trim();

    if let Some(inner) = text.strip_prefix("not ") {
        return Ok(Expr::Not(Box::new(parse_expr(inner, line)?)));
    }

    if text.contains(char::is_whitespace) {
        return Err(syntax(line, format!("unsupported expression '{}'", text)));
    }

    if text == "." {
        return Ok(Expr::Dot(Vec::new()));
    }

    if let Some(path) = text.strip_prefix('.') {
        return Ok(Expr::Dot(parse_fields(path, text, line)?));
    }

    if text.starts_with('$') {
        let (name, fields) = match text.split_once('.') {
            Some((name, path)) => (name, parse_fields(path, text, line)?),
            None => (text, Vec::new()),
        };
        if name != "$" && !is_identifier(&name[1..]) {
            return Err(syntax(line, format!("invalid variable name '{}'", name)));
        }
        return Ok(Expr::Var {
            name: name.to_string(),
            fields,
        });
    }

    Err(syntax(line, format!("function \"{}\" not defined", text)))
}

fn parse_fields(path: &str, text: &str, line: usize) -> Result<Vec<String>, TemplateError> {
    path.split('.')
        .map(|field| {
            if is_identifier(field) {
                Ok(field.to_string())
            } else {
                Err(syntax(line, format!("bad field name in '{}'", text)))
            }
        })
        .collect()
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syntax_line(source: &str) -> usize {
        match parse(source) {
            Err(TemplateError::Syntax { line, .. }) => line,
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_text_and_output() {
        let nodes = parse("Release {{ .Version }}!").unwrap();
        assert_eq!(
            nodes,
            vec![
                Node::Text("Release ".to_string()),
                Node::Output {
                    expr: Expr::Dot(vec!["Version".to_string()]),
                    line: 1,
                },
                Node::Text("!".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_range_with_variable() {
        let nodes = parse("{{ range $s := .Sections }}{{ $s.Title }}{{ end }}").unwrap();
        match &nodes[0] {
            Node::Range {
                index_var,
                elem_var,
                expr,
                body,
                else_body,
                ..
            } => {
                assert_eq!(index_var, &None);
                assert_eq!(elem_var.as_deref(), Some("$s"));
                assert_eq!(expr, &Expr::Dot(vec!["Sections".to_string()]));
                assert_eq!(body.len(), 1);
                assert!(else_body.is_empty());
            }
            other => panic!("expected range node, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_range_with_index() {
        let nodes = parse("{{ range $i, $x := .Items }}{{ $i }}{{ end }}").unwrap();
        assert!(matches!(
            &nodes[0],
            Node::Range { index_var: Some(i), elem_var: Some(x), .. } if i == "$i" && x == "$x"
        ));
    }

    #[test]
    fn test_parse_if_else() {
        let nodes = parse("{{ if not .Prerelease }}stable{{ else }}pre{{ end }}").unwrap();
        match &nodes[0] {
            Node::If {
                cond,
                body,
                else_body,
                ..
            } => {
                assert!(matches!(cond, Expr::Not(_)));
                assert_eq!(body, &vec![Node::Text("stable".to_string())]);
                assert_eq!(else_body, &vec![Node::Text("pre".to_string())]);
            }
            other => panic!("expected if node, got {:?}", other),
        }
    }

    #[test]
    fn test_comments_are_dropped() {
        let nodes = parse("a{{/* note */}}b").unwrap();
        assert_eq!(
            nodes,
            vec![Node::Text("a".to_string()), Node::Text("b".to_string())]
        );
    }

    #[test]
    fn test_trim_markers() {
        let nodes = parse("a  \n{{- .Version -}}\n  b").unwrap();
        assert_eq!(
            nodes,
            vec![
                Node::Text("a".to_string()),
                Node::Output {
                    expr: Expr::Dot(vec!["Version".to_string()]),
                    line: 2,
                },
                Node::Text("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_unclosed_action() {
        assert_eq!(syntax_line("line one\n{{ .Version"), 2);
    }

    #[test]
    fn test_missing_end() {
        assert_eq!(syntax_line("{{ range .Sections }}\n### x\n"), 1);
    }

    #[test]
    fn test_unexpected_end() {
        assert_eq!(syntax_line("a\nb\n{{ end }}"), 3);
    }

    #[test]
    fn test_unexpected_else() {
        assert_eq!(syntax_line("{{ else }}"), 1);
        assert_eq!(
            syntax_line("{{ if .A }}x{{ else }}y\n{{ else }}z{{ end }}"),
            2
        );
    }

    #[test]
    fn test_unknown_function() {
        assert!(parse("{{ printf .Version }}").is_err());
        assert!(parse("{{ upper }}").is_err());
    }

    #[test]
    fn test_empty_action() {
        assert!(parse("{{ }}").is_err());
    }

    #[test]
    fn test_unsupported_action() {
        assert!(parse("{{ with .Version }}{{ . }}{{ end }}").is_err());
    }

    #[test]
    fn test_bad_field_name() {
        assert!(parse("{{ .Sections..Title }}").is_err());
        assert!(parse("{{ $1x }}").is_err());
    }
}
