// Copyright 2026 the anchorwm authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! src/criteria/matcher.rs
//!
//! Atomic window-criteria predicates
//!
//! A criterion tests one named window property against a pattern. A
//! pattern delimited by `/.../` is a partial-match regular expression,
//! compiled once at load; anything else is a case-sensitive substring
//! test. A criteria set is a short-circuiting AND that runs all substring
//! tests before any regular expression.

use regex::Regex;
use thiserror::Error;

/// The window properties a criterion can select.
///
/// A closed enum: an unrecognised selector cannot reach the matcher, it is
/// rejected while the loader maps keywords.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertySelector {
    WindowName,
    IconName,
    Command,
    AppName,
    AppClass,
}

impl PropertySelector {
    /// Map a config keyword to a selector.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "name" => Some(PropertySelector::WindowName),
            "icon_name" => Some(PropertySelector::IconName),
            "command" => Some(PropertySelector::Command),
            "app_name" => Some(PropertySelector::AppName),
            "app_class" => Some(PropertySelector::AppClass),
            _ => None,
        }
    }
}

/// Window metadata as delivered by the window-metadata collaborator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WindowProperties {
    pub window_name: String,
    pub icon_name: String,
    pub command: String,
    pub app_name: String,
    pub app_class: String,
}

impl WindowProperties {
    fn get(&self, selector: PropertySelector) -> &str {
        match selector {
            PropertySelector::WindowName => &self.window_name,
            PropertySelector::IconName => &self.icon_name,
            PropertySelector::Command => &self.command,
            PropertySelector::AppName => &self.app_name,
            PropertySelector::AppClass => &self.app_class,
        }
    }
}

/// Errors building a criterion from config data.
#[derive(Debug, Error)]
pub enum CriterionError {
    #[error("empty criterion pattern")]
    EmptyPattern,

    #[error("invalid regular expression '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        source: regex::Error,
    },
}

#[derive(Clone, Debug)]
enum Pattern {
    Substring(String),
    Regex(Regex),
}

/// One atomic predicate: property selector plus pattern.
#[derive(Clone, Debug)]
pub struct WindowCriterion {
    selector: PropertySelector,
    pattern: Pattern,
}

impl WindowCriterion {
    /// Classify and compile the pattern. `/re/` becomes a partial-match
    /// regular expression, compiled here exactly once; anything else is a
    /// literal substring test.
    pub fn new(selector: PropertySelector, pattern: &str) -> Result<Self, CriterionError> {
        if pattern.is_empty() {
            return Err(CriterionError::EmptyPattern);
        }
        let pattern = if pattern.len() >= 2 && pattern.starts_with('/') && pattern.ends_with('/') {
            let inner = &pattern[1..pattern.len() - 1];
            let regex = Regex::new(inner).map_err(|source| CriterionError::InvalidRegex {
                pattern: pattern.to_string(),
                source,
            })?;
            Pattern::Regex(regex)
        } else {
            Pattern::Substring(pattern.to_string())
        };
        Ok(Self { selector, pattern })
    }

    fn is_substring(&self) -> bool {
        matches!(self.pattern, Pattern::Substring(_))
    }

    pub fn matches(&self, props: &WindowProperties) -> bool {
        let value = props.get(self.selector);
        match &self.pattern {
            Pattern::Substring(needle) => value.contains(needle),
            Pattern::Regex(regex) => regex.is_match(value),
        }
    }
}

/// Conjunction of criteria. An empty set matches unconditionally.
#[derive(Clone, Debug, Default)]
pub struct WindowCriteriaSet {
    criteria: Vec<WindowCriterion>,
}

impl WindowCriteriaSet {
    pub fn new(criteria: Vec<WindowCriterion>) -> Self {
        Self { criteria }
    }

    pub fn push(&mut self, criterion: WindowCriterion) {
        self.criteria.push(criterion);
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Short-circuiting AND, substring tests before regular expressions.
    pub fn matches(&self, props: &WindowProperties) -> bool {
        for criterion in self.criteria.iter().filter(|c| c.is_substring()) {
            if !criterion.matches(props) {
                return false;
            }
        }
        for criterion in self.criteria.iter().filter(|c| !c.is_substring()) {
            if !criterion.matches(props) {
                return false;
            }
        }
        true
    }
}
