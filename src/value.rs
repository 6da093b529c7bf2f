// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The runtime data type representing an S-expression tree, plus the
//! navigation helpers and the canonical serializer layered on it.

//! A [Sexp](Sexp) is either an atom carrying a string, or a list of
//! child values. A list exclusively owns its children; there are no
//! parent back references and hence no cycles.

use kstring::KString;
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sexp {
    Atom(KString),
    List(Vec<Sexp>),
}

/// The empty list, which doubles as the canonical nil value and as
/// the seed for a document root.
impl Default for Sexp {
    fn default() -> Self {
        Sexp::List(Vec::new())
    }
}

impl From<&str> for Sexp {
    fn from(s: &str) -> Self {
        Sexp::Atom(KString::from_ref(s))
    }
}

impl From<String> for Sexp {
    fn from(s: String) -> Self {
        Sexp::Atom(KString::from_string(s))
    }
}

impl From<KString> for Sexp {
    fn from(s: KString) -> Self {
        Sexp::Atom(s)
    }
}

impl From<Vec<Sexp>> for Sexp {
    fn from(children: Vec<Sexp>) -> Self {
        Sexp::List(children)
    }
}

impl Sexp {
    /// Append a child. An atom receiver is first widened to a list
    /// whose single element is an atom carrying the old text, then
    /// the child is appended; so `x` becomes `(x y)`, not `(y)`.
    pub fn add_child(&mut self, child: impl Into<Sexp>) {
        let child = child.into();
        match self {
            Sexp::List(children) => children.push(child),
            Sexp::Atom(_) => {
                let head = std::mem::take(self);
                if let Sexp::List(children) = self {
                    children.push(head);
                    children.push(child);
                }
            }
        }
    }

    /// Number of children of a list. An atom counts as a one-element
    /// sequence containing itself, so callers can index uniformly.
    pub fn child_count(&self) -> usize {
        match self {
            Sexp::List(children) => children.len(),
            Sexp::Atom(_) => 1,
        }
    }

    /// Child at `index`, or None for an atom or an out of range index.
    pub fn get_child(&self, index: usize) -> Option<&Sexp> {
        match self {
            Sexp::List(children) => children.get(index),
            Sexp::Atom(_) => None,
        }
    }

    pub fn get_child_mut(&mut self, index: usize) -> Option<&mut Sexp> {
        match self {
            Sexp::List(children) => children.get_mut(index),
            Sexp::Atom(_) => None,
        }
    }

    /// The text of an atom, or None for a list.
    pub fn get_string(&self) -> Option<&str> {
        match self {
            Sexp::Atom(text) => Some(text.as_str()),
            Sexp::List(_) => None,
        }
    }

    pub fn is_atom(&self) -> bool {
        matches!(self, Sexp::Atom(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Sexp::List(_))
    }

    /// True iff this is a list with no children.
    pub fn is_nil(&self) -> bool {
        matches!(self, Sexp::List(children) if children.is_empty())
    }

    /// Look up a descendant by a `/`-delimited path of names.
    ///
    /// Each segment is matched against the children of the current
    /// list in order: a list child matches when its first child is an
    /// atom with the segment's text (the walk descends into it); an
    /// atom child matches only as the final segment. Looking up on an
    /// atom, or failing to match some segment, returns None.
    ///
    /// A `/` in the very first position is not treated as a separator
    /// but as part of the first segment name.
    pub fn child_by_path(&self, path: &str) -> Option<&Sexp> {
        let route = self.path_route(path)?;
        let mut cur = self;
        for index in route {
            cur = cur.get_child(index)?;
        }
        Some(cur)
    }

    /// Like [child_by_path](Sexp::child_by_path) but yields a mutable
    /// reference, for in-place edits of the found subtree.
    pub fn child_by_path_mut(&mut self, path: &str) -> Option<&mut Sexp> {
        let route = self.path_route(path)?;
        let mut cur = self;
        for index in route {
            cur = cur.get_child_mut(index)?;
        }
        Some(cur)
    }

    // The child indices leading from self to the value the path
    // names, shared by the two child_by_path variants.
    fn path_route(&self, path: &str) -> Option<Vec<usize>> {
        if self.is_atom() {
            return None;
        }

        let mut segments: Vec<&str> = Vec::new();
        let mut start = 0;
        for (i, c) in path.char_indices() {
            if i > 0 && c == '/' {
                segments.push(&path[start..i]);
                start = i + 1;
            }
        }
        segments.push(&path[start..]);

        let mut route = Vec::new();
        let mut cur = self;
        let mut seg_index = 0;
        while seg_index < segments.len() {
            let segment = segments[seg_index];
            let is_last = seg_index + 1 == segments.len();
            let children = match cur {
                Sexp::List(children) => children,
                Sexp::Atom(_) => return None,
            };
            let mut descended = false;
            for (i, child) in children.iter().enumerate() {
                match child {
                    Sexp::Atom(text) => {
                        if is_last && text.as_str() == segment {
                            route.push(i);
                            return Some(route);
                        }
                    }
                    Sexp::List(grandchildren) => {
                        if let Some(Sexp::Atom(head)) = grandchildren.first() {
                            if head.as_str() == segment {
                                route.push(i);
                                cur = child;
                                seg_index += 1;
                                descended = true;
                                break;
                            }
                        }
                    }
                }
            }
            if !descended {
                return None;
            }
        }
        Some(route)
    }

    /// Iterator over the children past the head (the conventional
    /// operator position). Empty for nil lists and for atoms.
    pub fn arguments(&self) -> Arguments<'_> {
        let rest: &[Sexp] = match self {
            Sexp::List(children) if !children.is_empty() => &children[1..],
            _ => &[],
        };
        Arguments { iter: rest.iter() }
    }
}

/// A restartable view over the non-head children of a list; see
/// [arguments](Sexp::arguments).
#[derive(Debug, Clone)]
pub struct Arguments<'a> {
    iter: std::slice::Iter<'a, Sexp>,
}

impl<'a> Iterator for Arguments<'a> {
    type Item = &'a Sexp;

    fn next(&mut self) -> Option<&'a Sexp> {
        self.iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl ExactSizeIterator for Arguments<'_> {}

// An atom prints as its raw text, except that an empty atom prints as
// "" and an atom containing a space is wrapped in quotes. Interior
// quote and backslash characters are deliberately left alone, so such
// atoms do not survive a reparse; see the crate docs.
fn fmt_atom(text: &str, f: &mut std::fmt::Formatter<'_>)
            -> Result<(), std::fmt::Error> {
    if text.is_empty() {
        f.write_str("\"\"")
    } else if text.contains(' ') {
        f.write_char('"')?;
        f.write_str(text)?;
        f.write_char('"')
    } else {
        f.write_str(text)
    }
}

fn fmt_nested(sexp: &Sexp, f: &mut std::fmt::Formatter<'_>)
              -> Result<(), std::fmt::Error> {
    match sexp {
        Sexp::Atom(text) => fmt_atom(text, f),
        Sexp::List(children) => {
            f.write_char('(')?;
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    f.write_char(' ')?;
                }
                fmt_nested(child, f)?;
            }
            f.write_char(')')
        }
    }
}

/// The canonical serialization. The receiver is taken to be a
/// document root: a list prints as its children space-joined with no
/// surrounding parentheses (only nested lists are parenthesized).
impl std::fmt::Display for Sexp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        match self {
            Sexp::Atom(text) => fmt_atom(text, f),
            Sexp::List(children) => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        f.write_char(' ')?;
                    }
                    fmt_nested(child, f)?;
                }
                Ok(())
            }
        }
    }
}

/// Easily create an atom
pub fn atom(s: &str) -> Sexp {
    Sexp::Atom(KString::from_ref(s))
}

/// Easily create a list from its children
pub fn list(children: impl IntoIterator<Item = Sexp>) -> Sexp {
    Sexp::List(children.into_iter().collect())
}
