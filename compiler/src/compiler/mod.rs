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

//! Compiler of domain models into API schema mappings
//!
//! Three passes over the entity graph, in fixed dependency order:
//! property naming, reference flattening with merge-driven key
//! unification, and JSON path synthesis. Entities flatten in an order
//! consistent with their identity reference graph so each reference
//! splices in an already-finalized flattened identity.

/// All-paths mapping synthesis
pub mod all_paths;

/// Aggregated compilation outputs
pub mod api_mapping;

/// Property naming for the API surface
pub mod api_naming;

/// Name munging for JSON field synthesis
pub mod casemungler;

/// Property collection over entities and groups
pub mod collect;

/// Document-paths mapping synthesis
pub mod document_paths;

/// Index of model entities
pub mod entity_index;

/// Error diagnostics
pub mod error;

/// Reference flattening and key unification
pub mod flatten;

/// Path key types
pub mod json_path;

/// Covering links for merged-away identities
pub mod merge_covering;

/// Reference-paths mapping synthesis
pub mod reference_paths;

use crate::model::DomainModel;
use crate::model::Entity;
use crate::model::EntityKind;
use log::debug;
use std::collections::BTreeMap;

pub use all_paths::AllJsonPathsMapping;
pub use all_paths::JsonPathPropertyPair;
pub use all_paths::JsonPathsInfo;
pub use api_mapping::Compiled;
pub use api_mapping::EntityApiMapping;
pub use api_mapping::EntityMappings;
pub use api_naming::PropertyApiMapping;
pub use api_naming::ResourceNaming;
pub use collect::CollectedProperty;
pub use collect::PropertyModifier;
pub use document_paths::DocumentPathEntry;
pub use document_paths::DocumentPathsMapping;
pub use entity_index::EntityIndex;
pub use error::Error;
pub use flatten::FlattenedIdentityProperty;
pub use flatten::ReferenceGroup;
pub use json_path::JsonPath;
pub use json_path::PropertyPath;
pub use reference_paths::ReferenceJsonPaths;
pub use reference_paths::ReferenceJsonPathsMapping;

/// Compile a finalized model into per-entity API schema mappings.
///
/// A partially-compiled model on error is discarded; any
/// inconsistency aborts the whole compile rather than degrading a
/// single mapping, since a corrupted mapping corrupts every consumer
/// of the generated schema.
///
/// # Errors
///
/// Returns an error on duplicate or unresolvable entity names,
/// identity cycles, and unresolvable merge directive paths.
pub fn compile(model: &DomainModel) -> Result<Compiled<'_>, Error<'_>> {
    let index = EntityIndex::new(model)?;
    let order = index.compile_order()?;
    debug!("compile order over {} resource entities", order.len());

    let mut flattened = flatten::FlattenedByEntity::new();
    for &entity in &order {
        let mut entity_flattened = flatten::flatten_entity(entity, &index, &flattened)
            .map_err(Box::new)
            .map_err(|e| Error::Entity(&entity.name, e))?;
        merge_covering::link_merge_covering(&mut entity_flattened)
            .map_err(Box::new)
            .map_err(|e| Error::Entity(&entity.name, e))?;
        flattened.insert(entity.name.as_ref(), entity_flattened);
    }
    debug!("flattened identities for {} entities", flattened.len());

    let mut namings: BTreeMap<&str, ResourceNaming> = BTreeMap::new();
    for entity in index.resource_entities() {
        namings.insert(
            entity.name.as_ref(),
            api_naming::resource_naming(entity, &index)?,
        );
    }

    let mut all_paths_by_entity = all_paths::AllPathsByEntity::new();
    for entity in index.resource_entities() {
        let naming = namings
            .get(entity.name.as_ref())
            .ok_or(Error::ReferenceOrderViolation(&entity.name))?;
        let mapping = all_paths::build_all_paths(entity, &index, naming, &flattened)
            .map_err(Box::new)
            .map_err(|e| Error::Entity(&entity.name, e))?;
        all_paths_by_entity.insert(entity.name.as_ref(), mapping);
    }
    debug!("all-paths mappings for {} entities", all_paths_by_entity.len());

    let mut reference_paths_by_entity: BTreeMap<&str, ReferenceJsonPathsMapping> = BTreeMap::new();
    for entity in index.resource_entities() {
        let own_all_paths = all_paths_by_entity
            .get(entity.name.as_ref())
            .ok_or(Error::ReferenceOrderViolation(&entity.name))?;
        let mapping = reference_paths::build_reference_paths(
            &index,
            own_all_paths,
            &all_paths_by_entity,
            &flattened,
        )
        .map_err(Box::new)
        .map_err(|e| Error::Entity(&entity.name, e))?;
        reference_paths_by_entity.insert(entity.name.as_ref(), mapping);
    }

    let mut mappings: BTreeMap<&str, EntityMappings<'_>> = BTreeMap::new();
    for entity in index.resource_entities() {
        let reference_mapping = reference_paths_by_entity
            .remove(entity.name.as_ref())
            .unwrap_or_default();
        let all_mapping = all_paths_by_entity
            .remove(entity.name.as_ref())
            .unwrap_or_default();
        let naming = match namings.remove(entity.name.as_ref()) {
            Some(naming) => naming,
            None => continue,
        };
        let document_mapping =
            document_paths::build_document_paths(&index, &all_mapping, &reference_mapping)
                .map_err(Box::new)
                .map_err(|e| Error::Entity(&entity.name, e))?;

        let api_mapping = EntityApiMapping {
            flattened_identity_properties: flattened
                .remove(entity.name.as_ref())
                .unwrap_or_default(),
            reference_groups: flatten::reference_groups(entity, &index)?,
            descriptor_collected_properties: collect::descriptor_collected_properties(
                entity, &index,
            )?,
        };

        mappings.insert(
            entity.name.as_ref(),
            EntityMappings {
                entity,
                api_mapping,
                naming,
                all_json_paths_mapping: all_mapping,
                document_paths_mapping: document_mapping,
                reference_json_paths_mapping: reference_mapping,
            },
        );
    }

    // descriptors surface with empty mappings
    for entity in descriptor_entities(&index) {
        mappings.insert(
            entity.name.as_ref(),
            EntityMappings {
                entity,
                api_mapping: EntityApiMapping::default(),
                naming: api_naming::resource_naming(entity, &index)?,
                all_json_paths_mapping: AllJsonPathsMapping::default(),
                document_paths_mapping: DocumentPathsMapping::default(),
                reference_json_paths_mapping: ReferenceJsonPathsMapping::default(),
            },
        );
    }

    debug!("compiled {} entity mappings", mappings.len());
    Ok(Compiled {
        project_name: index.project_name(),
        mappings,
    })
}

fn descriptor_entities<'a>(index: &EntityIndex<'a>) -> Vec<&'a Entity> {
    index
        .entities()
        .filter(|e| e.kind == EntityKind::Descriptor)
        .collect()
}
