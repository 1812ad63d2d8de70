// SPDX-FileCopyrightText: Copyright (c) 2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Path key types for the mapping passes
//!
//! `JsonPath` is the concrete location of a value in a resource
//! document; `PropertyPath` is the logical dot-joined chain of
//! role-name-qualified property names used as the map key.

use crate::compiler::casemungler::uncapitalize;
use serde::Serialize;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

/// A concrete JSON location: `$` root, `.field` object members, `[*]`
/// immediately after a collection field. Construction goes through
/// [`JsonPath::root`] and the append methods, which keep the grammar
/// well-formed (`[*]` never follows `[*]` directly).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct JsonPath(String);

impl JsonPath {
    /// The document root `$`.
    #[must_use]
    pub fn root() -> Self {
        Self("$".to_string())
    }

    /// Append an object member, uncapitalizing the PascalCase name.
    #[must_use]
    pub fn field(&self, name: &str) -> Self {
        let mut path = self.0.clone();
        path.push('.');
        path.push_str(&uncapitalize(name));
        Self(path)
    }

    /// Append a collection marker. Must follow a field segment.
    #[must_use]
    pub fn array(&self) -> Self {
        debug_assert!(
            !self.0.ends_with("[*]") && self.0 != "$",
            "collection marker must follow a field segment"
        );
        let mut path = self.0.clone();
        path.push_str("[*]");
        Self(path)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for JsonPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        self.0.fmt(f)
    }
}

/// A logical dot-joined chain of role-name-qualified property names
/// rooted at an entity, e.g. `CourseOffering.School.SchoolId`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PropertyPath(String);

impl PropertyPath {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Join a further segment onto this path. Joining onto an empty
    /// path yields the segment alone.
    #[must_use]
    pub fn join(&self, segment: &str) -> Self {
        if self.0.is_empty() {
            Self(segment.to_string())
        } else {
            let mut path = self.0.clone();
            path.push('.');
            path.push_str(segment);
            Self(path)
        }
    }

    /// Join another path onto this one. Either side may be empty.
    #[must_use]
    pub fn join_path(&self, other: &Self) -> Self {
        if other.0.is_empty() {
            self.clone()
        } else {
            self.join(&other.0)
        }
    }

    /// Append a bare suffix with no separator, used for the
    /// `Descriptor` suffix on descriptor path keys.
    #[must_use]
    pub fn with_suffix(&self, suffix: &str) -> Self {
        let mut path = self.0.clone();
        path.push_str(suffix);
        Self(path)
    }

    /// The path relative to `prefix`, when this path descends strictly
    /// below it.
    #[must_use]
    pub fn relative_to(&self, prefix: &Self) -> Option<Self> {
        let rest = self.0.strip_prefix(&prefix.0)?;
        let rest = rest.strip_prefix('.')?;
        Some(Self(rest.to_string()))
    }

    /// Whether this path is `prefix` itself or descends below it.
    #[must_use]
    pub fn is_at_or_below(&self, prefix: &str) -> bool {
        self.0 == prefix
            || (self.0.starts_with(prefix) && self.0.as_bytes().get(prefix.len()) == Some(&b'.'))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PropertyPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        self.0.fmt(f)
    }
}
