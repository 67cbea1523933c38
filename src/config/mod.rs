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

//! src/config/mod.rs
//!
//! Configuration compilation
//!
//! Text flows one way through this module: source characters through the
//! `tokenizer`, tokens through the `tree` builder, and the resulting parse
//! tree through the `loader` into one compiled [`Config`]. Fatal parse
//! errors carry line numbers; the caller keeps its previous `Config` when
//! compilation fails.

pub mod error;
pub mod loader;
pub mod tokenizer;
pub mod tree;

pub use error::ConfigError;
pub use loader::Config;
pub use tokenizer::{Token, TokenKind, Tokenizer, MAX_TOKEN_LEN};
pub use tree::{build_tree, ParseNode};
