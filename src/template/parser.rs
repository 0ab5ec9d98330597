//! Template parser
//!
//! Single left-to-right pass over the tokens. Each `IF` is closed by the
//! first `ENDIF` after it and split by the first `ELSE` in between; an `IF`
//! met inside a branch is kept as text. Anything that does not close is
//! flushed back as literal source text.

use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::template::ast::{Conditional, Node, Template, TemplateCondition};
use crate::template::lexer::{tokenize, Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Literal,
    InIfBranch,
    InElseBranch,
}

/// Block opened by an `IF` token, waiting for its `ENDIF`
struct OpenBlock {
    condition: TemplateCondition,
    offset: usize,
    then_branch: Vec<Node>,
    else_branch: Option<Vec<Node>>,
}

/// Parse a template into its AST
pub fn parse_template(source: &str) -> Template {
    parse_template_with(source, &TracingSink)
}

/// Parse, reporting fail-open fallbacks to `sink`
pub fn parse_template_with(source: &str, sink: &dyn DiagnosticSink) -> Template {
    let mut nodes: Vec<Node> = Vec::new();
    let mut state = State::Literal;
    let mut block: Option<OpenBlock> = None;

    for token in tokenize(source) {
        match (state, token.kind) {
            (State::Literal, TokenKind::If { header }) => match TemplateCondition::parse(header) {
                Some(condition) => {
                    block = Some(OpenBlock {
                        condition,
                        offset: token.offset,
                        then_branch: Vec::new(),
                        else_branch: None,
                    });
                    state = State::InIfBranch;
                }
                None => {
                    sink.report(&Diagnostic::MalformedConditional {
                        header: header.to_string(),
                    });
                    push_text(&mut nodes, token.raw);
                }
            },
            (State::Literal, TokenKind::Else) => {
                report_orphan(sink, "ELSE", &token);
                push_text(&mut nodes, token.raw);
            }
            (State::Literal, TokenKind::EndIf) => {
                report_orphan(sink, "ENDIF", &token);
                push_text(&mut nodes, token.raw);
            }
            (State::Literal, TokenKind::Text) => push_text(&mut nodes, token.raw),

            (State::InIfBranch, TokenKind::Else) => {
                if let Some(open) = block.as_mut() {
                    open.else_branch = Some(Vec::new());
                }
                state = State::InElseBranch;
            }
            (State::InIfBranch | State::InElseBranch, TokenKind::EndIf) => {
                if let Some(open) = block.take() {
                    nodes.push(Node::Conditional(Conditional {
                        condition: open.condition,
                        then_branch: open.then_branch,
                        else_branch: open.else_branch,
                    }));
                }
                state = State::Literal;
            }
            // Text, a nested IF, or a second ELSE all land in the current branch
            (State::InIfBranch | State::InElseBranch, _) => {
                if let Some(open) = block.as_mut() {
                    let branch = match state {
                        State::InElseBranch => open.else_branch.get_or_insert_with(Vec::new),
                        _ => &mut open.then_branch,
                    };
                    push_text(branch, token.raw);
                }
            }
        }
    }

    if let Some(open) = block {
        sink.report(&Diagnostic::UnterminatedConditional {
            offset: open.offset,
        });
        push_text(&mut nodes, &source[open.offset..]);
    }

    Template { nodes }
}

fn report_orphan(sink: &dyn DiagnosticSink, keyword: &'static str, token: &Token<'_>) {
    sink.report(&Diagnostic::OrphanKeyword {
        keyword,
        offset: token.offset,
    });
}

/// Append text, merging with a preceding text node
fn push_text(nodes: &mut Vec<Node>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Node::Text(last)) = nodes.last_mut() {
        last.push_str(text);
        return;
    }
    nodes.push(Node::Text(text.to_string()));
}
