//! Argument tokenizer shared by all commands

use core::str::{FromStr, SplitAsciiWhitespace};

use super::CommandError;

/// Cursor over the whitespace-separated tokens after the command name
pub struct Args<'a> {
    tokens: SplitAsciiWhitespace<'a>,
}

impl<'a> Args<'a> {
    pub fn new(tokens: SplitAsciiWhitespace<'a>) -> Self {
        Self { tokens }
    }

    /// Next token, if any
    pub fn next_token(&mut self) -> Option<&'a str> {
        self.tokens.next()
    }

    /// Next token, failing with `ArgumentMissing`
    pub fn require(&mut self) -> Result<&'a str, CommandError<'a>> {
        self.next_token().ok_or(CommandError::ArgumentMissing)
    }

    /// Next token parsed as `T`
    pub fn parse<T: FromStr>(&mut self) -> Result<T, CommandError<'a>> {
        let token = self.require()?;
        token.parse().map_err(|_| CommandError::InvalidArgument(token))
    }
}

impl<'a> Iterator for Args<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}
