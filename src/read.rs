// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Assembling the token stream from [parse](../parse/index.html) into
//! a [Sexp](crate::value::Sexp) tree, and writing trees back out.

use crate::buffered_chars::buffered_chars;
use crate::context::{Context, FileContext};
use crate::parse::{parse, Modes, ParseError, ParseErrorWithPos, Token,
                   TokenWithPos};
use crate::pos::Pos;
use crate::value::Sexp;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("{0}")]
    PE(ParseError),
    #[error("too many ')' characters, closing lists that were never opened")]
    UnmatchedCloseParen,
    #[error("not enough s-expressions were closed by the end of input")]
    UnclosedParen,
}

#[derive(Error, Debug)]
#[error("{err} {pos}")]
pub struct ReadErrorWithPos {
    pub err: ReadError,
    pub pos: Pos,
}

impl ReadError {
    fn at(self, p: Pos) -> ReadErrorWithPos {
        ReadErrorWithPos { err: self, pos: p }
    }
}

impl From<ParseErrorWithPos> for ReadErrorWithPos {
    fn from(ep: ParseErrorWithPos) -> ReadErrorWithPos {
        let ParseErrorWithPos { err, pos } = ep;
        ReadErrorWithPos {
            err: ReadError::PE(err),
            pos,
        }
    }
}

/// A read error together with the file it came from.
#[derive(Error, Debug)]
pub struct ReadErrorWithPosContext {
    err_with_pos: ReadErrorWithPos,
    container: Box<dyn Context>,
}

impl Display for ReadErrorWithPosContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        f.write_fmt(format_args!("{} ", self.err_with_pos.err))?;
        self.container.format_with_pos(self.err_with_pos.pos, f)?;
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ReadErrorWithContext {
    #[error("{}: {0}", .1.to_string_without_pos())]
    IO(std::io::Error, Box<dyn Context>),
}

#[derive(Error, Debug)]
pub enum ReadErrorWithLocation {
    #[error("{0}")]
    PC(Box<ReadErrorWithPosContext>),
    #[error("{0}")]
    IO(Box<ReadErrorWithContext>),
}

impl ReadErrorWithPos {
    fn in_file(self, path: &Path) -> ReadErrorWithLocation {
        ReadErrorWithLocation::PC(Box::new(ReadErrorWithPosContext {
            err_with_pos: self,
            container: Box::new(FileContext {
                path: path.to_path_buf(),
            }),
        }))
    }
}

fn open_file(path: &Path) -> Result<File, ReadErrorWithLocation> {
    File::open(path).map_err(|e| {
        ReadErrorWithLocation::IO(Box::new(ReadErrorWithContext::IO(
            e,
            Box::new(FileContext {
                path: path.to_path_buf(),
            }),
        )))
    })
}

/// Build a tree from a token stream. The returned value is the
/// document root: a list holding the top-level forms.
///
/// The nesting structure is tracked with an explicit stack of
/// in-progress lists seeded with the root, so nesting depth never
/// translates into call stack depth. Any error discards the partial
/// tree.
pub fn build(
    ts: impl Iterator<Item = Result<TokenWithPos, ParseErrorWithPos>>,
) -> Result<Sexp, ReadErrorWithPos> {
    let mut stack = vec![Sexp::default()];
    let mut lastpos = Pos::origin();
    for te in ts {
        let TokenWithPos(t, pos) = te?;
        lastpos = pos;
        match t {
            Token::Open => stack.push(Sexp::default()),
            Token::Close => {
                let finished = stack.pop();
                let parent = match stack.last_mut() {
                    Some(parent) => parent,
                    None => return Err(ReadError::UnmatchedCloseParen.at(pos)),
                };
                if let Some(finished) = finished {
                    parent.add_child(finished);
                }
            }
            Token::Atom(s) => {
                if let Some(top) = stack.last_mut() {
                    top.add_child(Sexp::Atom(s));
                }
            }
            Token::Whitespace(_) => {}
            Token::Comment(_) => {}
        }
    }
    if stack.len() != 1 {
        return Err(ReadError::UnclosedParen.at(lastpos));
    }
    Ok(stack.pop().unwrap_or_default())
}

/// Read the whole stream as one document tree.
pub fn read_all(fh: impl Read) -> Result<Sexp, ReadErrorWithPos> {
    let cs = buffered_chars(fh);
    let modes = Modes {
        retain_whitespace: false,
        retain_comments: false,
    };
    build(parse(cs, &modes))
}

pub fn read_str(s: &str) -> Result<Sexp, ReadErrorWithPos> {
    read_all(s.as_bytes())
}

/// Like [read_str](read_str) but discarding the diagnostic: any
/// failure yields the empty root.
pub fn read_str_or_empty(s: &str) -> Sexp {
    read_str(s).unwrap_or_default()
}

pub fn read_file(path: &Path) -> Result<Sexp, ReadErrorWithLocation> {
    let fh = open_file(path)?;
    read_all(fh).map_err(|e| e.in_file(path))
}

/// Write the canonical serialization of a document root, followed by
/// a newline.
pub fn write_all(out: impl Write, doc: &Sexp) -> Result<(), std::io::Error> {
    let mut out = out; // for `File`
    writeln!(out, "{}", doc)
}

pub fn write_file(path: &Path, doc: &Sexp) -> Result<(), std::io::Error> {
    write_all(File::create(path)?, doc)
}
