// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Get characters and their positions from anything implementing
//! `Read`.

use crate::pos::Pos;
use anyhow::{anyhow, Result};
use std::collections::VecDeque;
use std::io::{BufReader, Read};
use utf8::BufReadDecoder;

/// Iterator over the characters of a byte stream, each paired with
/// its position. UTF-8 decoding errors end the iteration after
/// yielding one `Err`.
pub struct BufferedChars<R: Read> {
    decoder: BufReadDecoder<BufReader<R>>,
    queue: VecDeque<char>,
    pos: Pos,
    poisoned: bool,
}

pub fn buffered_chars<R: Read>(fh: R) -> BufferedChars<R> {
    BufferedChars {
        decoder: BufReadDecoder::new(BufReader::new(fh)),
        queue: VecDeque::new(),
        pos: Pos::origin(),
        poisoned: false,
    }
}

impl<R: Read> Iterator for BufferedChars<R> {
    type Item = Result<(char, Pos)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.poisoned {
            return None;
        }
        while self.queue.is_empty() {
            let failure = match self.decoder.next_strict() {
                None => return None,
                Some(Ok(chunk)) => {
                    self.queue.extend(chunk.chars());
                    None
                }
                Some(Err(e)) => Some(e.to_string()),
            };
            if let Some(msg) = failure {
                self.poisoned = true;
                return Some(Err(anyhow!("buffered_chars: {}", msg)));
            }
        }
        let c = self.queue.pop_front()?;
        let pos = self.pos;
        self.pos = pos.after(c);
        Some(Ok((c, pos)))
    }
}
