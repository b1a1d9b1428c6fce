use crate::style::owned_css::{
    AtRule, KeyframeStep, KeyframesBlock, MediaBlock, OwnedDeclaration, OwnedRule, StyleRule,
    Stylesheet, TopLevelRule,
};
use cssparser::{
    BasicParseErrorKind, Delimiter, ParseErrorKind, Parser, ParserInput, SourcePosition, ToCss,
    Token,
};
use thiserror::Error;

/// Why a stylesheet could not be turned into a tree. Line and column are
/// 1-based.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} at line {line}, column {column}")]
pub struct ParseError {
    pub line: u32,
    pub column: u32,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Failure {
    MissingBlock,
    MissingSelector,
}

type ParseResult<'i, T> = Result<T, cssparser::ParseError<'i, Failure>>;

/// Parse raw CSS into an owned tree.
///
/// Comments are kept wherever they appear between rules or declarations, and
/// declaration values are kept as written (minus surrounding whitespace and
/// any comments), so serializing the tree again does not reformat anything
/// inside a value. A leading byte order mark is ignored.
pub fn parse_stylesheet(css_text: &str) -> Result<Stylesheet, ParseError> {
    let css_text = css_text.trim_start_matches('\u{feff}');
    let mut input = ParserInput::new(css_text);
    let mut parser = Parser::new(&mut input);

    let rules = parse_rule_list(&mut parser).map_err(into_owned)?;
    Ok(Stylesheet { rules })
}

/// `cssparser` errors borrow the input; we hand out an owned copy.
fn into_owned(err: cssparser::ParseError<'_, Failure>) -> ParseError {
    let message = match &err.kind {
        ParseErrorKind::Basic(BasicParseErrorKind::UnexpectedToken(token)) => {
            format!("unexpected `{}`", token.to_css_string())
        }
        ParseErrorKind::Basic(BasicParseErrorKind::EndOfInput) => {
            "unexpected end of input".to_string()
        }
        ParseErrorKind::Basic(other) => format!("{:?}", other),
        ParseErrorKind::Custom(Failure::MissingBlock) => "expected a `{}` block".to_string(),
        ParseErrorKind::Custom(Failure::MissingSelector) => {
            "block without a selector".to_string()
        }
    };
    ParseError {
        line: err.location.line + 1,
        column: err.location.column,
        message,
    }
}

/// A list of rules: the whole sheet, or the body of an `@media` block.
fn parse_rule_list<'i, 't>(p: &mut Parser<'i, 't>) -> ParseResult<'i, Vec<TopLevelRule>> {
    let mut rules = Vec::new();
    loop {
        let start = p.position();
        let token = match p.next_including_whitespace_and_comments().cloned() {
            Ok(token) => token,
            Err(_) => break,
        };
        match &token {
            Token::WhiteSpace(_) | Token::CDO | Token::CDC | Token::Semicolon => {}
            Token::Comment(text) => {
                rules.push(TopLevelRule::Style(StyleRule::Comment(text.to_string())));
            }
            Token::AtKeyword(name) => rules.push(parse_at_rule(p, name)?),
            Token::CurlyBracketBlock => return Err(p.new_custom_error(Failure::MissingSelector)),
            Token::CloseCurlyBracket => return Err(p.new_unexpected_token_error(token.clone())),
            _ => {
                let selectors = parse_prelude_list(p, start)?;
                let children = p.parse_nested_block(|p| parse_block_items(p))?;
                rules.push(TopLevelRule::Style(StyleRule::Rule(OwnedRule {
                    selectors,
                    children,
                })));
            }
        }
    }
    Ok(rules)
}

/// Consume a comma-separated prelude up to and including its `{`, returning
/// the trimmed items with comments removed. The caller has already consumed
/// the first token, which starts at `start`.
fn parse_prelude_list<'i, 't>(
    p: &mut Parser<'i, 't>,
    start: SourcePosition,
) -> ParseResult<'i, Vec<String>> {
    let mut items = Vec::new();
    let mut item = String::new();
    let mut chunk_start = start;
    loop {
        let before = p.position();
        let token = match p.next_including_whitespace_and_comments().cloned() {
            Ok(token) => token,
            Err(_) => return Err(p.new_custom_error(Failure::MissingBlock)),
        };
        match &token {
            Token::Comment(_) => {
                skip_comment(&mut item, p.slice(chunk_start..before));
                chunk_start = p.position();
            }
            Token::Comma => {
                item.push_str(p.slice(chunk_start..before));
                push_item(&mut items, &item);
                item.clear();
                chunk_start = p.position();
            }
            Token::CurlyBracketBlock => {
                item.push_str(p.slice(chunk_start..before));
                push_item(&mut items, &item);
                return Ok(items);
            }
            Token::Semicolon => return Err(p.new_custom_error(Failure::MissingBlock)),
            Token::CloseCurlyBracket => return Err(p.new_unexpected_token_error(token.clone())),
            _ => {}
        }
    }
}

fn push_item(items: &mut Vec<String>, raw: &str) {
    let item = raw.trim();
    if !item.is_empty() {
        items.push(item.to_string());
    }
}

/// Append the text that preceded a comment, leaving a space where the
/// comment was so `1px/**/solid` does not glue into one word.
fn skip_comment(text: &mut String, before_comment: &str) {
    text.push_str(before_comment);
    if !text.is_empty() && !text.ends_with(char::is_whitespace) {
        text.push(' ');
    }
}

/// Declarations and comments inside `{}`.
fn parse_block_items<'i, 't>(p: &mut Parser<'i, 't>) -> ParseResult<'i, Vec<StyleRule>> {
    let mut children = Vec::new();
    loop {
        let token = match p.next_including_whitespace_and_comments().cloned() {
            Ok(token) => token,
            Err(_) => break,
        };
        match &token {
            Token::WhiteSpace(_) | Token::Semicolon => {}
            Token::Comment(text) => children.push(StyleRule::Comment(text.to_string())),
            Token::Ident(property) => {
                children.push(parse_declaration(p, property.to_string())?);
            }
            // The `*property` hack for old IE.
            Token::Delim('*') => {
                let property = p.expect_ident_cloned()?;
                children.push(parse_declaration(p, format!("*{}", property))?);
            }
            _ => return Err(p.new_unexpected_token_error(token.clone())),
        }
    }
    Ok(children)
}

/// The rest of a declaration after its property name.
fn parse_declaration<'i, 't>(
    p: &mut Parser<'i, 't>,
    property: String,
) -> ParseResult<'i, StyleRule> {
    p.expect_colon()?;
    let value = p.parse_until_before(Delimiter::Semicolon, |p| {
        Ok::<_, cssparser::ParseError<'i, Failure>>(text_without_comments(p).trim().to_string())
    })?;
    Ok(StyleRule::Declaration(OwnedDeclaration { property, value }))
}

/// Everything left in the current (possibly delimited) parser, verbatim.
fn raw_rest<'i, 't>(p: &mut Parser<'i, 't>) -> &'i str {
    let start = p.position();
    while p.next_including_whitespace_and_comments().is_ok() {}
    p.slice_from(start)
}

/// Everything left in the current parser with top-level comments cut out.
fn text_without_comments<'i, 't>(p: &mut Parser<'i, 't>) -> String {
    let mut text = String::new();
    let mut chunk_start = p.position();
    loop {
        let before = p.position();
        let is_comment = match p.next_including_whitespace_and_comments() {
            Ok(token) => matches!(token, Token::Comment(_)),
            Err(_) => break,
        };
        if is_comment {
            skip_comment(&mut text, p.slice(chunk_start..before));
            chunk_start = p.position();
        }
    }
    text.push_str(p.slice_from(chunk_start));
    text
}

fn parse_at_rule<'i, 't>(p: &mut Parser<'i, 't>, name: &str) -> ParseResult<'i, TopLevelRule> {
    let name = name.to_ascii_lowercase();
    let mut prelude = String::new();
    let mut chunk_start = p.position();
    let has_block = loop {
        let before = p.position();
        match p.next_including_whitespace_and_comments().cloned() {
            Ok(Token::CurlyBracketBlock) => {
                prelude.push_str(p.slice(chunk_start..before));
                break true;
            }
            Ok(Token::Semicolon) => {
                prelude.push_str(p.slice(chunk_start..before));
                break false;
            }
            Ok(Token::Comment(_)) => {
                skip_comment(&mut prelude, p.slice(chunk_start..before));
                chunk_start = p.position();
            }
            Ok(_) => {}
            Err(_) => {
                prelude.push_str(p.slice_from(chunk_start));
                break false;
            }
        }
    };
    let prelude = prelude.trim().to_string();

    if !has_block {
        return Ok(TopLevelRule::Style(StyleRule::AtRule(AtRule {
            name,
            prelude,
            block: None,
        })));
    }

    if name == "media" {
        let rules = p.parse_nested_block(|p| parse_rule_list(p))?;
        return Ok(TopLevelRule::Media(MediaBlock {
            condition: prelude,
            rules,
        }));
    }

    if let Some(vendor_prefix) = keyframes_prefix(&name) {
        let vendor_prefix = vendor_prefix.to_string();
        let steps = p.parse_nested_block(|p| parse_keyframe_steps(p))?;
        return Ok(TopLevelRule::Keyframes(KeyframesBlock {
            vendor_prefix,
            name: prelude,
            steps,
        }));
    }

    let block = p.parse_nested_block(|p| {
        Ok::<_, cssparser::ParseError<'i, Failure>>(raw_rest(p).to_string())
    })?;
    Ok(TopLevelRule::Style(StyleRule::AtRule(AtRule {
        name,
        prelude,
        block: Some(block),
    })))
}

/// "" for `keyframes`, "-webkit-" for `-webkit-keyframes`, and so on.
fn keyframes_prefix(name: &str) -> Option<&str> {
    name.strip_suffix("keyframes")
        .filter(|prefix| prefix.is_empty() || (prefix.starts_with('-') && prefix.ends_with('-')))
}

fn parse_keyframe_steps<'i, 't>(p: &mut Parser<'i, 't>) -> ParseResult<'i, Vec<StyleRule>> {
    let mut steps = Vec::new();
    loop {
        let start = p.position();
        let token = match p.next_including_whitespace_and_comments().cloned() {
            Ok(token) => token,
            Err(_) => break,
        };
        match &token {
            Token::WhiteSpace(_) | Token::Semicolon => {}
            Token::Comment(text) => steps.push(StyleRule::Comment(text.to_string())),
            Token::CurlyBracketBlock => return Err(p.new_custom_error(Failure::MissingSelector)),
            _ => {
                let values = parse_prelude_list(p, start)?;
                let children = p.parse_nested_block(|p| parse_block_items(p))?;
                steps.push(StyleRule::KeyframeStep(KeyframeStep { values, children }));
            }
        }
    }
    Ok(steps)
}
