//! Recursive-descent, precedence-climbing parser, grounded on the distilled source's
//! `parse_1_hybrid -> parse_2_iff -> ... -> parse_9_terminal_and_parentheses` chain:
//! each precedence level scans its token slice left to right for the first operator of
//! its level and splits there, recursing on both sides. Because the tokenizer already
//! collapses parenthesised and bracketed sub-blocks into nested [`Token::Group`] /
//! [`Token::Bracket`] values, "top level" here is just "this slice" -- no parenthesis
//! depth counter is needed.

use crate::ast::action::{ActionFormula, Event, FairnessRecord};
use crate::ast::node::{Node, PathDecoration};
use crate::ast::operators::Atomic;
use crate::ast::tokenizer::{tokenize, Token};

pub fn parse_formula(input: &str) -> Result<Node, String> {
    let tokens = tokenize(input)?;
    parse_1_iff(&tokens)
}

fn parse_1_iff(tokens: &[Token]) -> Result<Node, String> {
    match index_of(tokens, |t| matches!(t, Token::Iff)) {
        Some(i) => Ok(Node::mk_iff(parse_2_imply(&tokens[..i])?, parse_1_iff(&tokens[i + 1..])?)),
        None => parse_2_imply(tokens),
    }
}

fn parse_2_imply(tokens: &[Token]) -> Result<Node, String> {
    match index_of(tokens, |t| matches!(t, Token::Imply)) {
        Some(i) => Ok(Node::mk_imply(
            parse_3_or(&tokens[..i])?,
            parse_2_imply(&tokens[i + 1..])?,
        )),
        None => parse_3_or(tokens),
    }
}

fn parse_3_or(tokens: &[Token]) -> Result<Node, String> {
    match index_of(tokens, |t| matches!(t, Token::Or)) {
        Some(i) => Ok(Node::mk_or(parse_4_and(&tokens[..i])?, parse_3_or(&tokens[i + 1..])?)),
        None => parse_4_and(tokens),
    }
}

fn parse_4_and(tokens: &[Token]) -> Result<Node, String> {
    match index_of(tokens, |t| matches!(t, Token::And)) {
        Some(i) => Ok(Node::mk_and(
            parse_5_binary_path(&tokens[..i])?,
            parse_4_and(&tokens[i + 1..])?,
        )),
        None => parse_5_binary_path(tokens),
    }
}

fn parse_5_binary_path(tokens: &[Token]) -> Result<Node, String> {
    match index_of(tokens, |t| matches!(t, Token::Binary(_))) {
        Some(i) => {
            let op = match &tokens[i] {
                Token::Binary(op) => *op,
                _ => unreachable!(),
            };
            let decoration_end = decoration_end(tokens, i + 1);
            let decoration = parse_decoration_at(tokens, i + 1, decoration_end)?;
            let lhs = parse_6_unary(&tokens[..i])?;
            let rhs = parse_5_binary_path(&tokens[decoration_end..])?;
            Ok(Node::mk_binary(op, lhs, rhs, decoration))
        }
        None => parse_6_unary(tokens),
    }
}

fn parse_6_unary(tokens: &[Token]) -> Result<Node, String> {
    if tokens.is_empty() {
        return Err("expected a formula, found nothing".to_string());
    }
    match &tokens[0] {
        Token::Not => Ok(Node::mk_not(parse_6_unary(&tokens[1..])?)),
        Token::Unary(op) => {
            let op = *op;
            let decoration_end = decoration_end(tokens, 1);
            let decoration = parse_decoration_at(tokens, 1, decoration_end)?;
            let child = parse_6_unary(&tokens[decoration_end..])?;
            Ok(Node::mk_unary(op, child, decoration))
        }
        _ => parse_7_terminal(tokens),
    }
}

fn parse_7_terminal(tokens: &[Token]) -> Result<Node, String> {
    if tokens.len() != 1 {
        return Err(format!(
            "expected a single atom or parenthesised formula, found {} tokens",
            tokens.len()
        ));
    }
    match &tokens[0] {
        Token::Atom(Atomic::Bool(b)) => Ok(Node::mk_bool(*b)),
        Token::Atom(Atomic::Name(name)) => Ok(Node::mk_name(name.clone())),
        Token::Group(inner) => parse_1_iff(inner),
        other => Err(format!("unexpected token {other:?}")),
    }
}

/// Returns the index right after an optional `Bracket` decoration starting at `from`.
fn decoration_end(tokens: &[Token], from: usize) -> usize {
    match tokens.get(from) {
        Some(Token::Bracket(_)) => from + 1,
        _ => from,
    }
}

fn parse_decoration_at(tokens: &[Token], from: usize, end: usize) -> Result<PathDecoration, String> {
    if end == from {
        return Ok(PathDecoration::default());
    }
    match &tokens[from] {
        Token::Bracket(inner) => parse_decoration(inner),
        _ => unreachable!("decoration_end only advances past a Bracket token"),
    }
}

fn parse_decoration(tokens: &[Token]) -> Result<PathDecoration, String> {
    let mut decoration = PathDecoration::default();
    for item in split_on(tokens, |t| matches!(t, Token::Semicolon)) {
        if item.is_empty() {
            continue;
        }
        let (keyword, rest) = (&item[0], &item[1..]);
        let keyword = match keyword {
            Token::Ident(name) => name.as_str(),
            other => return Err(format!("expected a decoration keyword, found {other:?}")),
        };
        let inner = match rest {
            [Token::Group(inner)] => inner.as_slice(),
            _ => return Err(format!("expected a single parenthesised argument after '{keyword}'")),
        };
        match keyword {
            "act" => decoration.actions = Some(parse_action_formula(inner)?),
            "U" => decoration.ufair.push(parse_event(inner)?),
            "W" => decoration.wfair.push(parse_fairness_record(inner)?),
            "S" => decoration.sfair.push(parse_fairness_record(inner)?),
            other => return Err(format!("unknown decoration keyword '{other}'")),
        }
    }
    Ok(decoration)
}

fn parse_fairness_record(tokens: &[Token]) -> Result<FairnessRecord, String> {
    let mut parts = split_on(tokens, |t| matches!(t, Token::Comma));
    if parts.len() != 2 {
        return Err("expected exactly two comma-separated events".to_string());
    }
    let then = parts.pop().unwrap();
    let condition = parts.pop().unwrap();
    Ok(FairnessRecord {
        condition: parse_event(condition)?,
        then: parse_event(then)?,
    })
}

fn parse_event(tokens: &[Token]) -> Result<Event, String> {
    if let [Token::Ident(name), Token::Group(inner)] = tokens {
        if name == "act" {
            return Ok(Event::Action(parse_action_formula(inner)?));
        }
    }
    Ok(Event::State(Box::new(parse_1_iff(tokens)?)))
}

fn parse_action_1_or(tokens: &[Token]) -> Result<ActionFormula, String> {
    match index_of(tokens, |t| matches!(t, Token::Or)) {
        Some(i) => Ok(ActionFormula::mk_or(
            parse_action_2_and(&tokens[..i])?,
            parse_action_1_or(&tokens[i + 1..])?,
        )),
        None => parse_action_2_and(tokens),
    }
}

fn parse_action_2_and(tokens: &[Token]) -> Result<ActionFormula, String> {
    match index_of(tokens, |t| matches!(t, Token::And)) {
        Some(i) => Ok(ActionFormula::mk_and(
            parse_action_3_not(&tokens[..i])?,
            parse_action_2_and(&tokens[i + 1..])?,
        )),
        None => parse_action_3_not(tokens),
    }
}

fn parse_action_3_not(tokens: &[Token]) -> Result<ActionFormula, String> {
    if let Some(Token::Not) = tokens.first() {
        return Ok(ActionFormula::mk_not(parse_action_3_not(&tokens[1..])?));
    }
    parse_action_4_terminal(tokens)
}

fn parse_action_4_terminal(tokens: &[Token]) -> Result<ActionFormula, String> {
    if tokens.len() != 1 {
        return Err(format!(
            "expected a single action atom or parenthesised action formula, found {} tokens",
            tokens.len()
        ));
    }
    match &tokens[0] {
        Token::Atom(Atomic::Bool(b)) => Ok(ActionFormula::Bool(*b)),
        Token::Atom(Atomic::Name(name)) => Ok(ActionFormula::Name(name.clone())),
        Token::Group(inner) => parse_action_formula(inner),
        other => Err(format!("unexpected token {other:?} in action formula")),
    }
}

fn parse_action_formula(tokens: &[Token]) -> Result<ActionFormula, String> {
    parse_action_1_or(tokens)
}

fn index_of<F: Fn(&Token) -> bool>(tokens: &[Token], pred: F) -> Option<usize> {
    tokens.iter().position(pred)
}

fn split_on<F: Fn(&Token) -> bool>(tokens: &[Token], pred: F) -> Vec<&[Token]> {
    let mut parts = Vec::new();
    let mut start = 0;
    for (i, token) in tokens.iter().enumerate() {
        if pred(token) {
            parts.push(&tokens[start..i]);
            start = i + 1;
        }
    }
    parts.push(&tokens[start..]);
    parts
}
