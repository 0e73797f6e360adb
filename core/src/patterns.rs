// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Display Name Patterns
//!
//! The service display name input is either one regular expression or a
//! comma separated list of them. Commas cannot be escaped: a comma always
//! separates two patterns.
//!
//! A pattern matches a display name only if it matches the *whole* name, so
//! `Win.*` selects "Windows Update" but not "Microsoft Windows Update".

use std::collections::HashSet;

use regex::Regex;
use svcwatch_common::error::ProbeError;
use svcwatch_common::{debug, error};

const SEPARATOR: char = ',';

/// Splits the raw input into the set of distinct, syntactically valid patterns.
pub fn extract_patterns(raw: &str) -> Result<HashSet<String>, ProbeError> {
    if !raw.contains(SEPARATOR) {
        validate(raw).map_err(|_| ProbeError::InvalidPattern {
            pattern: raw.to_string(),
        })?;
        return Ok(HashSet::from([raw.to_string()]));
    }

    let mut segments: Vec<&str> = raw.split(SEPARATOR).collect();
    // "a,b," means "a" and "b"; a trailing separator adds nothing.
    while segments.last().is_some_and(|s| s.is_empty()) {
        segments.pop();
    }

    let mut patterns = HashSet::new();
    for segment in segments {
        validate(segment).map_err(|_| ProbeError::InvalidPatternList {
            pattern: segment.to_string(),
        })?;
        patterns.insert(segment.to_string());
    }
    Ok(patterns)
}

fn validate(pattern: &str) -> Result<(), regex::Error> {
    Regex::new(pattern).map(|_| ()).inspect_err(|e| {
        error!("Invalid regex syntax in '{pattern}': {e}");
    })
}

/// A compiled display name pattern, anchored at both ends.
#[derive(Debug, Clone)]
pub struct DisplayNamePattern {
    source: String,
    regex: Regex,
}

impl DisplayNamePattern {
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        // Validate the pattern on its own first: wrapping it can turn an
        // unbalanced group such as "a)(b" into a valid expression.
        Regex::new(source)?;
        let regex = Regex::new(&format!("^(?:{source})$"))?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, display_name: &str) -> bool {
        self.regex.is_match(display_name)
    }
}

/// All patterns of one run, ready for matching.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<DisplayNamePattern>,
}

impl PatternSet {
    /// Extracts and compiles every pattern of the raw input.
    pub fn compile(raw: &str) -> Result<Self, ProbeError> {
        let is_list = raw.contains(SEPARATOR);
        let mut sources: Vec<String> = extract_patterns(raw)?.into_iter().collect();
        sources.sort();

        let patterns = sources
            .iter()
            .map(|source| {
                DisplayNamePattern::new(source).map_err(|_| {
                    let pattern = source.clone();
                    if is_list {
                        ProbeError::InvalidPatternList { pattern }
                    } else {
                        ProbeError::InvalidPattern { pattern }
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(verbosity = 1, "Compiled {} display name pattern(s)", patterns.len());
        Ok(Self { patterns })
    }

    pub fn iter(&self) -> impl Iterator<Item = &DisplayNamePattern> {
        self.patterns.iter()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
