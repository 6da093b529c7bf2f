// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Not an example, but a program to show the struct sizes for
//! possible optimization.

use kstring::KString;
use sexptree::context::FileContext;
use sexptree::parse::{Modes, ParseError, ParseErrorWithPos, Token, TokenWithPos};
use sexptree::pos::Pos;
use sexptree::read::{ReadError, ReadErrorWithContext, ReadErrorWithLocation,
                     ReadErrorWithPos};
use sexptree::value::{Arguments, Sexp};

fn pr(ctx: &str, nam: &str, siz: usize) {
    println!("{siz}\t{ctx}\t{nam}")
}

const FQTY: bool = false;

macro_rules! ctx {
    ( $ctx:expr ) => {
        macro_rules! p {
            ( $t:ty ) => {
                let typename =
                    if FQTY {
                        std::any::type_name::<$t>()
                    } else {
                        stringify!($t)
                    };
                pr($ctx, typename, std::mem::size_of::<$t>())
            }
        }
    }
}

fn main() {
    {
        ctx!("context");
        p!{FileContext};
        p!{Pos};
    }

    {
        ctx!("value");
        p!{KString};
        p!{Sexp};
        p!{Arguments<'static>};
    }

    {
        ctx!("parse");
        p!{Modes};
        p!{Token};
        p!{TokenWithPos};
        p!{ParseError};
        p!{ParseErrorWithPos};

        // Item in impl Iterator<Item = Result<TokenWithPos, ParseErrorWithPos>> + 's:
        p!{Result<TokenWithPos, ParseErrorWithPos>};
    }

    {
        ctx!("read");
        p!{std::io::Error};
        p!{ReadError};
        p!{ReadErrorWithPos};
        p!{ReadErrorWithContext};
        p!{ReadErrorWithLocation};

        p!{Result<Sexp, ReadErrorWithPos>};
        p!{Result<Sexp, ReadErrorWithLocation>};
    }
}
