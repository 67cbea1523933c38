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

//! src/criteria/mod.rs
//!
//! Window-criteria matching and classification
//!
//! `matcher` holds the atomic predicates (substring and regular-expression
//! tests over window properties); `classifier` the ordered rule list that
//! merges matching display configurations by name.

pub mod classifier;
pub mod matcher;

pub use classifier::{ClassifierRule, WindowClassifier, WindowConfig, WindowConfigSet};
pub use matcher::{
    CriterionError, PropertySelector, WindowCriteriaSet, WindowCriterion, WindowProperties,
};
