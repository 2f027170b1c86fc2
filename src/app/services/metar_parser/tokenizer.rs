//! Whitespace tokenizer and the token queue consumed by the parse stages
//!
//! The queue only ever shrinks from the front. Stages borrow it mutably,
//! look at the leading token and consume it when their grammar matches.

use std::collections::VecDeque;
use tracing::{debug, trace};

use super::group_parsers::GroupOutcome;
use crate::error::{END_OF_REPORT, Result};

/// Ordered tokens of a single report
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenQueue {
    tokens: VecDeque<String>,
}

impl TokenQueue {
    /// Split a raw report on whitespace
    pub fn tokenize(report: &str) -> Self {
        Self {
            tokens: report.split_whitespace().map(str::to_string).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn peek(&self) -> Option<&str> {
        self.tokens.front().map(String::as_str)
    }

    /// Token `offset` places behind the front
    pub fn peek_nth(&self, offset: usize) -> Option<&str> {
        self.tokens.get(offset).map(String::as_str)
    }

    /// Front token for error reporting, or the end-of-report placeholder
    pub fn describe_front(&self) -> String {
        self.peek().unwrap_or(END_OF_REPORT).to_string()
    }

    /// Consume the front token if it equals `literal`
    pub fn take_literal(&mut self, literal: &str) -> bool {
        if self.peek() == Some(literal) {
            self.tokens.pop_front();
            true
        } else {
            false
        }
    }

    /// Consume the front token if it is any of `literals`
    pub fn take_any_literal(&mut self, literals: &[&str]) -> bool {
        match self.peek() {
            Some(token) if literals.contains(&token) => {
                self.tokens.pop_front();
                true
            }
            _ => false,
        }
    }

    /// Run a single-token grammar against the front token.
    ///
    /// The token is consumed only on a match. `Invalid` outcomes surface as
    /// errors and leave the queue untouched.
    pub fn take<T>(&mut self, parse: impl FnOnce(&str) -> GroupOutcome<T>) -> Result<Option<T>> {
        let Some(token) = self.peek() else {
            return Ok(None);
        };

        match parse(token) {
            GroupOutcome::Matched(value) => {
                debug!("Matched group '{}'", token);
                self.tokens.pop_front();
                Ok(Some(value))
            }
            GroupOutcome::NoMatch => {
                trace!("No match at '{}'", token);
                Ok(None)
            }
            GroupOutcome::Invalid(error) => Err(error),
        }
    }

    /// Run a two-token grammar against the first two tokens, consuming both
    /// on a match
    pub fn take_pair<T>(
        &mut self,
        parse: impl FnOnce(&str, &str) -> GroupOutcome<T>,
    ) -> Result<Option<T>> {
        let (Some(first), Some(second)) = (self.peek_nth(0), self.peek_nth(1)) else {
            return Ok(None);
        };

        match parse(first, second) {
            GroupOutcome::Matched(value) => {
                self.tokens.drain(..2);
                Ok(Some(value))
            }
            GroupOutcome::NoMatch => Ok(None),
            GroupOutcome::Invalid(error) => Err(error),
        }
    }

    /// Apply a grammar repeatedly, collecting matches until the first
    /// non-match
    pub fn take_while<T>(&mut self, parse: impl Fn(&str) -> GroupOutcome<T>) -> Result<Vec<T>> {
        let mut values = Vec::new();
        while let Some(value) = self.take(&parse)? {
            values.push(value);
        }
        Ok(values)
    }

    /// Remove and return every remaining token
    pub fn drain(&mut self) -> Vec<String> {
        self.tokens.drain(..).collect()
    }

    pub fn remaining(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }
}
