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

//! Aggregated compilation outputs

use crate::compiler::all_paths::AllJsonPathsMapping;
use crate::compiler::api_naming::ResourceNaming;
use crate::compiler::collect::CollectedProperty;
use crate::compiler::document_paths::DocumentPathsMapping;
use crate::compiler::flatten::FlattenedIdentityProperty;
use crate::compiler::flatten::ReferenceGroup;
use crate::compiler::reference_paths::ReferenceJsonPathsMapping;
use crate::model::Entity;
use crate::model::ProjectName;
use std::collections::BTreeMap;

/// The flattening outputs of one entity.
#[derive(Debug, Default)]
pub struct EntityApiMapping<'a> {
    /// Every identity leaf reachable from the entity, merged-away
    /// chains included and marked.
    pub flattened_identity_properties: Vec<FlattenedIdentityProperty<'a>>,
    /// Top-level properties expanding into nested identity
    /// structures, ascending by qualified name.
    pub reference_groups: Vec<ReferenceGroup<'a>>,
    /// Descriptor properties on the resource body, inline commons and
    /// choices included.
    pub descriptor_collected_properties: Vec<CollectedProperty<'a>>,
}

impl<'a> EntityApiMapping<'a> {
    /// The deduplicated view consumed by reference expansion: one
    /// entry per distinct physical identity leaf.
    pub fn flattened_identity_properties_omitting_merges(
        &self,
    ) -> impl Iterator<Item = &FlattenedIdentityProperty<'a>> {
        self.flattened_identity_properties
            .iter()
            .filter(|f| f.merged_away_by.is_none())
    }
}

/// Everything compiled for one entity.
#[derive(Debug)]
pub struct EntityMappings<'a> {
    pub entity: &'a Entity,
    pub api_mapping: EntityApiMapping<'a>,
    pub naming: ResourceNaming,
    pub all_json_paths_mapping: AllJsonPathsMapping<'a>,
    pub document_paths_mapping: DocumentPathsMapping,
    pub reference_json_paths_mapping: ReferenceJsonPathsMapping,
}

/// Compiled mappings for a whole model, keyed by entity name. Derived,
/// immutable once compilation completes, and recomputed whenever the
/// model changes.
#[derive(Debug)]
pub struct Compiled<'a> {
    pub project_name: &'a ProjectName,
    pub mappings: BTreeMap<&'a str, EntityMappings<'a>>,
}

impl<'a> Compiled<'a> {
    #[must_use]
    pub fn mappings_for(&self, entity_name: &str) -> Option<&EntityMappings<'a>> {
        self.mappings.get(entity_name)
    }
}
