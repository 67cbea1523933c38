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

//! src/criteria/classifier.rs
//!
//! Rule-driven window classification
//!
//! A classifier rule pairs alternative criteria sets (an OR of ANDs) with
//! one or more named display configurations. Classification walks the
//! rules in registration order and merges the configs of every matching
//! rule into the caller's output set, later rules overriding same-named
//! fields of earlier ones.

use serde::{Deserialize, Serialize};

use crate::criteria::matcher::{WindowCriteriaSet, WindowProperties};

/// One named display configuration. Fields left unset by a rule do not
/// override values an earlier rule already merged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    pub name: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl WindowConfig {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            width: None,
            height: None,
        }
    }

    fn merge_from(&mut self, other: &WindowConfig) {
        if other.width.is_some() {
            self.width = other.width;
        }
        if other.height.is_some() {
            self.height = other.height;
        }
    }
}

/// Output of classification: configs unique by name, insertion order
/// preserved.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WindowConfigSet {
    configs: Vec<WindowConfig>,
}

impl WindowConfigSet {
    /// Merge one config by name: update the existing entry in place, or
    /// append.
    pub fn merge(&mut self, config: &WindowConfig) {
        match self.configs.iter_mut().find(|c| c.name == config.name) {
            Some(existing) => existing.merge_from(config),
            None => self.configs.push(config.clone()),
        }
    }

    pub fn get(&self, name: &str) -> Option<&WindowConfig> {
        self.configs.iter().find(|c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WindowConfig> {
        self.configs.iter()
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

/// One criteria-set → configs mapping. An empty criteria-set list matches
/// unconditionally.
#[derive(Clone, Debug, Default)]
pub struct ClassifierRule {
    pub criteria: Vec<WindowCriteriaSet>,
    pub configs: Vec<WindowConfig>,
}

impl ClassifierRule {
    fn matches(&self, props: &WindowProperties) -> bool {
        self.criteria.is_empty() || self.criteria.iter().any(|set| set.matches(props))
    }
}

/// The compiled, ordered rule list.
#[derive(Clone, Debug, Default)]
pub struct WindowClassifier {
    rules: Vec<ClassifierRule>,
}

impl WindowClassifier {
    pub fn add_rule(&mut self, rule: ClassifierRule) {
        self.rules.push(rule);
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Merge the configs of every matching rule into `out`, in
    /// registration order. Returns whether at least one rule matched;
    /// `false` means "could not classify" and leaves the fallback to the
    /// caller.
    pub fn classify_window(&self, props: &WindowProperties, out: &mut WindowConfigSet) -> bool {
        let mut matched = false;
        for rule in &self.rules {
            if rule.matches(props) {
                matched = true;
                for config in &rule.configs {
                    out.merge(config);
                }
            }
        }
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::matcher::{PropertySelector, WindowCriterion};

    fn criteria_on_name(pattern: &str) -> Vec<WindowCriteriaSet> {
        vec![WindowCriteriaSet::new(vec![WindowCriterion::new(
            PropertySelector::WindowName,
            pattern,
        )
        .unwrap()])]
    }

    fn sized_config(name: &str, width: u32, height: u32) -> WindowConfig {
        WindowConfig {
            name: name.to_string(),
            width: Some(width),
            height: Some(height),
        }
    }

    fn props_named(window_name: &str) -> WindowProperties {
        WindowProperties {
            window_name: window_name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_rules_is_a_miss() {
        let classifier = WindowClassifier::default();
        let mut out = WindowConfigSet::default();
        assert!(!classifier.classify_window(&props_named("window"), &mut out));
        assert!(out.is_empty());
    }

    #[test]
    fn test_rule_without_criteria_matches_unconditionally() {
        let mut classifier = WindowClassifier::default();
        classifier.add_rule(ClassifierRule {
            criteria: Vec::new(),
            configs: vec![sized_config("default", 80, 24)],
        });

        let mut out = WindowConfigSet::default();
        assert!(classifier.classify_window(&props_named("anything"), &mut out));
        assert_eq!(out.get("default"), Some(&sized_config("default", 80, 24)));
    }

    #[test]
    fn test_later_rule_overrides_same_named_config() {
        let mut classifier = WindowClassifier::default();
        classifier.add_rule(ClassifierRule {
            criteria: criteria_on_name("win"),
            configs: vec![sized_config("default", 80, 24)],
        });
        classifier.add_rule(ClassifierRule {
            criteria: criteria_on_name("/wi.*o/"),
            configs: vec![sized_config("default", 120, 40)],
        });

        let mut out = WindowConfigSet::default();
        assert!(classifier.classify_window(&props_named("window"), &mut out));
        assert_eq!(out.len(), 1);
        assert_eq!(out.get("default").unwrap().width, Some(120));
    }

    #[test]
    fn test_partial_config_merges_field_wise() {
        let mut classifier = WindowClassifier::default();
        classifier.add_rule(ClassifierRule {
            criteria: Vec::new(),
            configs: vec![sized_config("default", 80, 24)],
        });
        let mut width_only = WindowConfig::new("default");
        width_only.width = Some(132);
        classifier.add_rule(ClassifierRule {
            criteria: Vec::new(),
            configs: vec![width_only],
        });

        let mut out = WindowConfigSet::default();
        classifier.classify_window(&WindowProperties::default(), &mut out);
        let merged = out.get("default").unwrap();
        assert_eq!(merged.width, Some(132));
        assert_eq!(merged.height, Some(24)); // untouched by the later rule
    }

    #[test]
    fn test_alternative_criteria_sets_are_an_or() {
        let mut rule = ClassifierRule {
            criteria: criteria_on_name("xterm"),
            configs: vec![sized_config("term", 100, 30)],
        };
        rule.criteria
            .push(WindowCriteriaSet::new(vec![WindowCriterion::new(
                PropertySelector::WindowName,
                "rxvt",
            )
            .unwrap()]));
        let mut classifier = WindowClassifier::default();
        classifier.add_rule(rule);

        let mut out = WindowConfigSet::default();
        assert!(classifier.classify_window(&props_named("urxvt"), &mut out));
    }

    #[test]
    fn test_miss_reported_as_false() {
        let mut classifier = WindowClassifier::default();
        classifier.add_rule(ClassifierRule {
            criteria: criteria_on_name("emacs"),
            configs: vec![sized_config("editor", 120, 50)],
        });

        let mut out = WindowConfigSet::default();
        assert!(!classifier.classify_window(&props_named("window"), &mut out));
        assert!(out.is_empty());
    }

    #[test]
    fn test_classification_is_idempotent() {
        let mut classifier = WindowClassifier::default();
        classifier.add_rule(ClassifierRule {
            criteria: criteria_on_name("win"),
            configs: vec![sized_config("default", 80, 24)],
        });
        classifier.add_rule(ClassifierRule {
            criteria: criteria_on_name("dow"),
            configs: vec![sized_config("default", 90, 30), sized_config("alt", 10, 10)],
        });

        let props = props_named("window");
        let mut first = WindowConfigSet::default();
        classifier.classify_window(&props, &mut first);
        let mut second = WindowConfigSet::default();
        classifier.classify_window(&props, &mut second);
        assert_eq!(first, second);
    }
}
