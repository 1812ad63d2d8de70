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

//! Entity declarations of the model

use crate::model::EntityName;
use crate::model::MergeDirective;
use crate::model::Property;
use crate::model::PropertyName;
use serde::Deserialize;

/// Kind of an entity declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    DomainEntity,
    Association,
    Common,
    InlineCommon,
    Choice,
    Descriptor,
    Enumeration,
    DomainEntitySubclass,
    AssociationSubclass,
}

impl EntityKind {
    /// Entities that surface as API resources and receive mappings.
    #[must_use]
    pub const fn is_resource(&self) -> bool {
        matches!(
            self,
            Self::DomainEntity
                | Self::Association
                | Self::DomainEntitySubclass
                | Self::AssociationSubclass
        )
    }

    /// Subclass kinds carry a base entity link.
    #[must_use]
    pub const fn is_subclass(&self) -> bool {
        matches!(self, Self::DomainEntitySubclass | Self::AssociationSubclass)
    }
}

/// A named entity declaration. Property order is declaration order and
/// is significant for tie-breaks downstream.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub name: EntityName,
    pub kind: EntityKind,
    /// Abstract base entities compile like any other resource target.
    #[serde(default)]
    pub is_abstract: bool,
    /// Base entity, present on subclass kinds only.
    #[serde(default)]
    pub base_entity: Option<EntityName>,
    /// The base identity property this subclass renames. The renaming
    /// property is declared among the subclass's own properties.
    #[serde(default)]
    pub identity_rename: Option<PropertyName>,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub merge_directives: Vec<MergeDirective>,
}

impl Entity {
    /// Find a declared property by its role-name-qualified name.
    #[must_use]
    pub fn find_property(&self, full_name: &str) -> Option<&Property> {
        self.properties
            .iter()
            .find(|p| p.full_property_name() == full_name)
    }
}
