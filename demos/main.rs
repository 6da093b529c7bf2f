// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use anyhow::{bail, Result};
use clap::Parser as ClapParser;
use sexptree::buffered_chars::buffered_chars;
use sexptree::parse::{parse, Modes, Token, TokenWithPos};
use sexptree::pos::Pos;
use sexptree::read::{read_file, write_all};
use sexptree::value::Sexp;
use std::io::{stdout, BufWriter};
use std::path::PathBuf;

fn indentstr(i: usize) -> Option<&'static str> {
    "                                                                  ".get(0..i)
}

#[derive(clap::Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Build up a tree of all content (default: stream tokens)
    #[clap(short, long, value_parser)]
    ast: bool,
    /// Print the parsed data
    #[clap(long, value_parser)]
    print: bool,
    /// Look up a /-delimited path in the tree (implies --ast)
    #[clap(short, long, value_parser)]
    get: Option<String>,
    /// Show the token position (only with --print and no --ast)
    #[clap(long, value_parser)]
    pos: bool,
    /// Show the whitespace (only with --print and no --ast)
    #[clap(short, long, value_parser)]
    whitespace: bool,
    /// Show the comments (only with --print and no --ast)
    #[clap(short, long, value_parser)]
    comments: bool,
    /// Path to the input file
    #[clap(value_parser, required(true))]
    input_path: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.ast || args.get.is_some() {

        // Slurp in the whole file contents as a tree, then optionally
        // print it or a subtree of it.

        let doc: Sexp = read_file(&args.input_path)?;
        if let Some(path) = &args.get {
            match doc.child_by_path(path) {
                Some(found) => println!("{}", found),
                None => bail!("no value at path {:?} in {:?}",
                              path, args.input_path),
            }
        } else if args.print {
            write_all(BufWriter::new(stdout()), &doc)?;
        }

    } else {

        // Read through the token stream of the file contents and just
        // do some bookkeeping and optionally print the tokens.

        let fh = std::fs::File::open(&args.input_path)?;
        let cs = buffered_chars(fh);
        let modes = Modes {
            retain_whitespace: args.whitespace,
            retain_comments: args.comments,
        };
        let ts = parse(cs, &modes);
        let mut count_toplevel = 0;
        let mut count_enter = 0;
        let mut parenstack: Vec<Pos> = Vec::new();
        for te in ts {
            let TokenWithPos(token, pos) = te?;
            let indentlevel;
            match token {
                Token::Open => {
                    count_enter += 1;
                    if parenstack.is_empty() {
                        count_toplevel += 1;
                    }
                    indentlevel = parenstack.len();
                    parenstack.push(pos);
                }
                Token::Close => {
                    if parenstack.pop().is_none() {
                        bail!("unexpected closing character ')' at {:?}{}",
                              args.input_path, pos)
                    }
                    indentlevel = parenstack.len();
                }
                _ => {
                    indentlevel = parenstack.len();
                }
            }
            if args.print {
                if let Some(indent) = indentstr(indentlevel) {
                    if args.pos {
                        println!("{indent}{pos} {token}");
                    } else {
                        println!("{indent}{token}");
                    }
                } else {
                    bail!("lists nested too deeply at {:?}{}",
                          args.input_path, pos)
                }
            }
        }
        println!(";; count_toplevel = {count_toplevel}, count_enter = {count_enter}");

    }
    Ok(())
}
