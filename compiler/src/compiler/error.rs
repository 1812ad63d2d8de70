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

use crate::model::EntityName;
use crate::model::PropertyName;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

/// Compilation error kinds.
///
/// Model-definition errors (unresolved names, identity cycles,
/// unresolvable merge targets) are expected to have been rejected by an
/// upstream model validation pass; encountering one here aborts the
/// whole compile. A reference-order violation is a scheduling defect,
/// never a legal model state.
#[derive(Debug)]
pub enum Error<'a> {
    /// Entity name declared more than once.
    DuplicateEntity(&'a EntityName),
    /// Entity referenced by name was not found.
    EntityNotFound(&'a EntityName),
    /// Subclass declared without a base entity.
    MissingBaseEntity(&'a EntityName),
    /// The identity reference graph has a cycle through this entity.
    IdentityCycle(&'a EntityName),
    /// A referenced entity had no finalized flattened identity when a
    /// dependent entity needed it.
    ReferenceOrderViolation(&'a EntityName),
    /// Merge directive source path does not resolve on the model.
    UnresolvedMergeSource(String),
    /// Merge directive target path has no flattened identity to cover
    /// the merged-away chain.
    UnresolvedMergeTarget(String),
    /// Reference expansion produced a property path absent from the
    /// referenced entity's mapping.
    UnmatchedReferencePath(String),
    /// Error while compiling an entity.
    Entity(&'a EntityName, Box<Error<'a>>),
    /// Error while compiling a property.
    Property(&'a PropertyName, Box<Error<'a>>),
}

impl Display for Error<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::DuplicateEntity(name) => write!(f, "duplicate entity declaration: {name}"),
            Self::EntityNotFound(name) => write!(f, "entity not found: {name}"),
            Self::MissingBaseEntity(name) => {
                write!(f, "subclass has no base entity: {name}")
            }
            Self::IdentityCycle(name) => {
                write!(f, "identity reference cycle through entity: {name}")
            }
            Self::ReferenceOrderViolation(name) => write!(
                f,
                "flattened identity of {name} was not finalized before a dependent entity needed it"
            ),
            Self::UnresolvedMergeSource(path) => {
                write!(f, "merge directive source path does not resolve: {path}")
            }
            Self::UnresolvedMergeTarget(path) => {
                write!(f, "merge directive target path has no covering identity: {path}")
            }
            Self::UnmatchedReferencePath(path) => write!(
                f,
                "property path not found in referenced entity mapping: {path}"
            ),
            Self::Entity(name, err) => {
                write!(f, "while compiling entity: {name}\n{err}")
            }
            Self::Property(name, err) => {
                write!(f, "while compiling property: {name}\n{err}")
            }
        }
    }
}
