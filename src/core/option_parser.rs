// src/core/option_parser.rs

use crate::error::CommandError;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{HashMap, VecDeque};
use thiserror::Error;

lazy_static! {
    // `-h, --help[=PARAM] : desc`
    static ref SHORT_AND_LONG_RE: Regex =
        Regex::new(r"^-(\w), --(\w[-\w]*)(?:=(\S+))?\s*:\s*(\S.*)?$").unwrap();
    // `-n[ PARAM] : desc`
    static ref SHORT_ONLY_RE: Regex =
        Regex::new(r"^-(\w)(?:\s+(\S+))?\s*:\s*(\S.*)?$").unwrap();
    // `--name[=PARAM] : desc`
    static ref LONG_ONLY_RE: Regex =
        Regex::new(r"^--(\w[-\w]*)(?:=(\S+))?\s*:\s*(\S.*)?$").unwrap();
    // `--name` or `--name=value` on the command line.
    static ref LONG_ARG_RE: Regex = Regex::new(r"^--([-\w]+)(?:=(.*))?$").unwrap();
}

/// An option-definition string that matches none of the accepted forms.
/// This is a programming error in the definition table, not a user error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unexpected option definition: {0}")]
pub struct DefinitionError(pub String);

/// One declared option. At least one of `short`/`long` is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDefinition {
    /// Single-character name, used as `-x`.
    pub short: Option<char>,
    /// Multi-character name, used as `--name`.
    pub long: Option<String>,
    /// Placeholder name of the required value, e.g. `NAME` in `--name=NAME`.
    /// `None` means the option is a boolean flag.
    pub param: Option<String>,
    /// Help text after the `:`.
    pub desc: Option<String>,
}

impl OptionDefinition {
    /// Parses one definition string in any of the three accepted forms:
    /// `-s, --long[=PARAM] : desc`, `-s[ PARAM] : desc`, `--long[=PARAM] : desc`.
    pub fn parse(definition: &str) -> Result<Self, DefinitionError> {
        let trimmed = definition.trim();
        let text = |caps: &regex::Captures<'_>, i: usize| caps.get(i).map(|m| m.as_str().to_string());
        let short = |caps: &regex::Captures<'_>| caps.get(1).and_then(|m| m.as_str().chars().next());

        if let Some(caps) = SHORT_AND_LONG_RE.captures(trimmed) {
            return Ok(Self {
                short: short(&caps),
                long: text(&caps, 2),
                param: text(&caps, 3),
                desc: text(&caps, 4),
            });
        }
        if let Some(caps) = SHORT_ONLY_RE.captures(trimmed) {
            return Ok(Self {
                short: short(&caps),
                long: None,
                param: text(&caps, 2),
                desc: text(&caps, 3),
            });
        }
        if let Some(caps) = LONG_ONLY_RE.captures(trimmed) {
            return Ok(Self {
                short: None,
                long: text(&caps, 1),
                param: text(&caps, 2),
                desc: text(&caps, 3),
            });
        }
        Err(DefinitionError(definition.to_string()))
    }

    /// True if the option requires a value.
    pub fn takes_value(&self) -> bool {
        self.param.is_some()
    }

    /// The key the parsed value is stored under: the long name if any, else the short one.
    pub fn key(&self) -> String {
        match (&self.long, self.short) {
            (Some(long), _) => long.clone(),
            (None, Some(short)) => short.to_string(),
            (None, None) => String::new(),
        }
    }
}

/// The value recorded for an option seen on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// A boolean flag was given.
    Flag,
    /// An option that carries a value was given this value.
    Value(String),
}

/// The options found on one command line, keyed by [`OptionDefinition::key`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedOptions {
    values: HashMap<String, OptionValue>,
}

impl ParsedOptions {
    /// The raw value recorded under `name`.
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name)
    }

    /// True if the option was given at all, with or without a value.
    pub fn is_set(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// The value of an option that carries one.
    pub fn value(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(OptionValue::Value(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Number of distinct options given.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if no option was given.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn insert(&mut self, key: String, value: OptionValue) {
        self.values.insert(key, value);
    }
}

/// Parses leading option tokens according to a fixed list of definitions.
#[derive(Debug, Clone)]
pub struct OptionParser {
    definitions: Vec<OptionDefinition>,
}

impl OptionParser {
    /// Builds a parser from definition strings. Any malformed string fails the
    /// whole table, before a single argument is looked at.
    pub fn new(definitions: &[&str]) -> Result<Self, DefinitionError> {
        let definitions = definitions
            .iter()
            .map(|d| OptionDefinition::parse(d))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { definitions })
    }

    /// Consumes every leading token of `args` that starts with `-` and returns
    /// the options they set. Parsing stops at the first token that does not
    /// start with `-`; that token and everything after it stay in `args`, in order.
    ///
    /// A value-taking short option uses the rest of its cluster as its value
    /// (`-nfoo`), or else the next whole token (`-n foo`), and ends the cluster.
    pub fn parse(&self, args: &mut Vec<String>) -> Result<ParsedOptions, CommandError> {
        let mut pending: VecDeque<String> = args.drain(..).collect();
        let mut options = ParsedOptions::default();
        let outcome = self.consume_options(&mut pending, &mut options);
        args.extend(pending);
        outcome?;
        log::debug!("Parsed options: {:?}, positional: {:?}", options, args);
        Ok(options)
    }

    fn consume_options(
        &self,
        pending: &mut VecDeque<String>,
        options: &mut ParsedOptions,
    ) -> Result<(), CommandError> {
        while pending.front().is_some_and(|token| token.starts_with('-')) {
            let Some(token) = pending.pop_front() else {
                break;
            };
            if token.starts_with("--") {
                self.parse_long(&token, options)?;
            } else {
                self.parse_short_cluster(&token, pending, options)?;
            }
        }
        Ok(())
    }

    fn parse_long(&self, token: &str, options: &mut ParsedOptions) -> Result<(), CommandError> {
        let caps = LONG_ARG_RE
            .captures(token)
            .ok_or_else(|| CommandError::InvalidOptionFormat(token.to_string()))?;
        let name = caps.get(1).map_or("", |m| m.as_str());
        let value = caps.get(2).map(|m| m.as_str().to_string());

        let def = self
            .find_by_long(name)
            .ok_or_else(|| CommandError::UnknownOption(format!("--{}", name)))?;

        let parsed = match (def.takes_value(), value) {
            (true, Some(v)) => OptionValue::Value(v),
            (true, None) => return Err(CommandError::MissingArgument(token.to_string())),
            (false, None) => OptionValue::Flag,
            (false, Some(_)) => return Err(CommandError::UnexpectedArgument(token.to_string())),
        };
        options.insert(def.key(), parsed);
        Ok(())
    }

    fn parse_short_cluster(
        &self,
        token: &str,
        pending: &mut VecDeque<String>,
        options: &mut ParsedOptions,
    ) -> Result<(), CommandError> {
        let cluster = token.strip_prefix('-').unwrap_or(token);

        for (idx, ch) in cluster.char_indices() {
            let def = self
                .find_by_short(ch)
                .ok_or_else(|| CommandError::UnknownOption(format!("-{}", ch)))?;

            if !def.takes_value() {
                options.insert(def.key(), OptionValue::Flag);
                continue;
            }

            let rest = cluster.get(idx + ch.len_utf8()..).unwrap_or("");
            let value = if rest.is_empty() {
                pending
                    .pop_front()
                    .ok_or_else(|| CommandError::MissingArgument(format!("-{}", ch)))?
            } else {
                rest.to_string()
            };
            options.insert(def.key(), OptionValue::Value(value));
            break;
        }
        Ok(())
    }

    fn find_by_short(&self, ch: char) -> Option<&OptionDefinition> {
        self.definitions.iter().find(|d| d.short == Some(ch))
    }

    fn find_by_long(&self, name: &str) -> Option<&OptionDefinition> {
        self.definitions
            .iter()
            .find(|d| d.long.as_deref() == Some(name))
    }
}
