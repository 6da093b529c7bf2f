// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A small S-expression library: parse text into a tree of atoms and
//! lists, inspect and mutate the tree, and serialize it back out.
//!
//! # Syntax
//!
//! - **Lists** are sequences of values delimited by `(` and `)` and
//!   separated by whitespace. The document itself is an implicit list
//!   of its top-level forms; it serializes without outer parentheses.
//!
//! - **Atoms** are strings. Quoted atoms (`"..."`) support the C
//!   escape sequences `\'`, `\"`, `\?`, `\\`, `\a`, `\b`, `\f`, `\n`,
//!   `\r`, `\t` and `\v`, and may not contain a literal newline. Bare
//!   atoms end at whitespace or `)` only; in particular a `(` does
//!   *not* end one, so `a(b` is a single three-character atom.
//!
//! - **Comments** begin with `;` and extend to the end of the line.
//!
//! # Entry points
//!
//! [read::read_str](read::read_str) (or [read::read_all](read::read_all),
//! [read::read_file](read::read_file)) produces the document root as a
//! [value::Sexp](value::Sexp); its `Display` impl is the canonical
//! serializer. [parse::parse](parse::parse) offers the underlying
//! token stream directly.
//!
//! # Known limitations
//!
//! Serialization quotes an atom that contains a space but does not
//! escape interior `"` or `\` characters, so such atoms do not
//! round-trip through a reparse. Trees built purely from non-empty,
//! space-free atom text round-trip exactly.

pub mod buffered_chars;
pub mod context;
pub mod parse;
pub mod pos;
pub mod read;
pub mod value;
