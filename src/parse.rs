// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Translating a character stream to a token stream. The only tokens
//! that denote nesting are `Token::Open` and `Token::Close`; string
//! literals are fully decoded here, so the tree layer in
//! [read](../read/index.html) never sees an escape sequence.

use crate::pos::Pos;
use genawaiter::rc::Gen;
use kstring::KString;
use std::fmt::Write;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error ({0}) after")]
    IOError(anyhow::Error),
    #[error("unexpected newline in string literal")]
    NewlineInString,
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unfinished escape sequence at the end of the string")]
    UnfinishedEscape,
    #[error("invalid escape char '{0}'")]
    InvalidEscapeChar(char),
}

#[derive(Error, Debug)]
#[error("{err} {pos}")]
pub struct ParseErrorWithPos {
    pub err: ParseError,
    pub pos: Pos,
}

impl ParseError {
    fn at(self, p: Pos) -> ParseErrorWithPos {
        ParseErrorWithPos { err: self, pos: p }
    }
}

#[derive(Debug, PartialEq)]
pub enum Token {
    Open,
    Close,
    Atom(KString),
    Whitespace(KString),
    Comment(KString),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        match self {
            Token::Open => f.write_char('('),
            Token::Close => f.write_char(')'),
            Token::Atom(s) => f.write_str(s),
            Token::Whitespace(s) => f.write_str(s),
            Token::Comment(s) => f.write_str(s),
        }
    }
}

#[derive(Debug)]
pub struct TokenWithPos(pub Token, pub Pos);

/// Whether the tokenizer reports whitespace and comments or drops
/// them. Tree building always drops them.
#[derive(Debug)]
pub struct Modes {
    pub retain_whitespace: bool,
    pub retain_comments: bool,
}

/// The escape sequences recognized inside string literals: the
/// classic C table. Process-wide constant, no other sequences are
/// accepted.
fn escape_replacement(c: char) -> Option<char> {
    match c {
        '\'' => Some('\''),
        '"' => Some('"'),
        '?' => Some('?'),
        '\\' => Some('\\'),
        'a' => Some('\x07'),
        'b' => Some('\x08'),
        'f' => Some('\x0C'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        'v' => Some('\x0B'),
        _ => None,
    }
}

// A bare atom extends until whitespace or a closing paren. Note that
// '(' does not end it, matching the reference scanner: `a(b` is a
// single atom.
fn is_bare_atom_char(c: char) -> bool {
    !c.is_whitespace() && c != ')'
}

// Scan a string literal, decoding escapes into `out` as we go. The
// opening '"' has already been consumed; consumes through the closing
// one.
fn read_string_literal(
    startpos: Pos,
    cs: &mut impl Iterator<Item = anyhow::Result<(char, Pos)>>,
    out: &mut String,
) -> Result<(), ParseErrorWithPos> {
    out.clear();
    let mut escaped = false;
    let mut lastpos = startpos;
    loop {
        let (c, pos) = match cs.next() {
            None => {
                let err = if escaped {
                    ParseError::UnfinishedEscape
                } else {
                    ParseError::UnterminatedString
                };
                return Err(err.at(startpos));
            }
            Some(Err(e)) => return Err(ParseError::IOError(e).at(lastpos)),
            Some(Ok(cp)) => cp,
        };
        lastpos = pos;
        if escaped {
            match escape_replacement(c) {
                Some(replacement) => out.push(replacement),
                None => return Err(ParseError::InvalidEscapeChar(c).at(pos)),
            }
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '"' {
            return Ok(());
        } else if c == '\n' {
            return Err(ParseError::NewlineInString.at(pos));
        } else {
            out.push(c);
        }
    }
}

// Read characters into `out` while `accepted` holds, starting with
// the already-consumed `c`. Returns the first rejected character and
// its position, or None at EOF.
fn read_while(
    c: char,
    startpos: Pos,
    cs: &mut impl Iterator<Item = anyhow::Result<(char, Pos)>>,
    accepted: fn(char) -> bool,
    out: &mut String,
) -> Result<Option<(char, Pos)>, ParseErrorWithPos> {
    out.clear();
    out.push(c);
    let mut lastpos = startpos;
    loop {
        match cs.next() {
            None => return Ok(None),
            Some(Err(e)) => return Err(ParseError::IOError(e).at(lastpos)),
            Some(Ok((c, pos))) => {
                lastpos = pos;
                if accepted(c) {
                    out.push(c);
                } else {
                    return Ok(Some((c, pos)));
                }
            }
        }
    }
}

/// Tokenize a character stream. Each token carries the position of
/// its first character. The iterator ends after the first `Err`.
pub fn parse<'s>(
    cs: impl Iterator<Item = anyhow::Result<(char, Pos)>> + 's,
    modes: &'s Modes,
) -> impl Iterator<Item = Result<TokenWithPos, ParseErrorWithPos>> + 's {
    Gen::new(|co| async move {
        let mut cs = cs;
        let mut tmp = String::new();
        let mut maybe_next_c_pos = None;
        let mut lastpos = Pos::origin();
        loop {
            let c;
            let pos;
            if let Some(cp) = maybe_next_c_pos {
                (c, pos) = cp;
                maybe_next_c_pos = None;
            } else if let Some(r) = cs.next() {
                match r {
                    Err(e) => {
                        co.yield_(Err(ParseError::IOError(e).at(lastpos))).await;
                        return;
                    }
                    Ok(cp) => {
                        (c, pos) = cp;
                    }
                }
            } else {
                return;
            }
            lastpos = pos;

            if c == '(' {
                co.yield_(Ok(TokenWithPos(Token::Open, pos))).await;
            } else if c == ')' {
                co.yield_(Ok(TokenWithPos(Token::Close, pos))).await;
            } else if c.is_whitespace() {
                if modes.retain_whitespace {
                    match read_while(c, pos, &mut cs, |c| c.is_whitespace(),
                                     &mut tmp) {
                        Err(e) => {
                            co.yield_(Err(e)).await;
                            return;
                        }
                        Ok(mcp) => {
                            co.yield_(Ok(TokenWithPos(
                                Token::Whitespace(KString::from_ref(&tmp)),
                                pos))).await;
                            if mcp.is_none() {
                                // avoid calling next() again!
                                return;
                            }
                            maybe_next_c_pos = mcp;
                        }
                    }
                }
            } else if c == ';' {
                // line comments
                match read_while(c, pos, &mut cs, |c| c != '\n' && c != '\r',
                                 &mut tmp) {
                    Err(e) => {
                        co.yield_(Err(e)).await;
                        return;
                    }
                    Ok(mcp) => {
                        if modes.retain_comments {
                            co.yield_(Ok(TokenWithPos(
                                Token::Comment(KString::from_ref(&tmp)),
                                pos))).await;
                        }
                        if mcp.is_none() {
                            return;
                        }
                        maybe_next_c_pos = mcp;
                    }
                }
            } else if c == '"' {
                match read_string_literal(pos, &mut cs, &mut tmp) {
                    Err(e) => {
                        co.yield_(Err(e)).await;
                        return;
                    }
                    Ok(()) => {
                        co.yield_(Ok(TokenWithPos(
                            Token::Atom(KString::from_ref(&tmp)),
                            pos))).await;
                    }
                }
            } else {
                // bare atoms; no escape processing applies here
                match read_while(c, pos, &mut cs, is_bare_atom_char, &mut tmp) {
                    Err(e) => {
                        co.yield_(Err(e)).await;
                        return;
                    }
                    Ok(mcp) => {
                        co.yield_(Ok(TokenWithPos(
                            Token::Atom(KString::from_ref(&tmp)),
                            pos))).await;
                        if mcp.is_none() {
                            return;
                        }
                        maybe_next_c_pos = mcp;
                    }
                }
            }
        }
    })
    .into_iter()
}
