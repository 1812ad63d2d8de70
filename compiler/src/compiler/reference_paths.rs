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

//! Identity-equality path pairs per reference
//!
//! For each top-level reference, pairs the referenced resource's own
//! identity locations with the locations the referencing document
//! carries for them. A chain merged away on the referenced entity uses
//! the covering chain's location, so one physical path serves both
//! logical keys; a chain that merely repeats another chain's physical
//! path with no declared merge is dropped as an implicit duplicate.

use crate::compiler::all_paths::AllJsonPathsMapping;
use crate::compiler::all_paths::AllPathsByEntity;
use crate::compiler::api_naming::DESCRIPTOR_SUFFIX;
use crate::compiler::flatten::FlattenedByEntity;
use crate::compiler::flatten::FlattenedIdentityProperty;
use crate::compiler::json_path::JsonPath;
use crate::compiler::json_path::PropertyPath;
use crate::compiler::EntityIndex;
use crate::compiler::Error;
use crate::model::PathType;
use crate::model::PropertyKind;
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// One identity-equality pair: where the referenced resource declares
/// the identity value, and where the referencing document carries it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceJsonPaths {
    pub identity_json_path: JsonPath,
    pub reference_json_path: JsonPath,
    #[serde(rename = "type")]
    pub path_type: PathType,
}

/// Mapping from top-level reference paths to their ordered pairs.
pub type ReferenceJsonPathsMapping = BTreeMap<PropertyPath, Vec<ReferenceJsonPaths>>;

/// Build the reference-paths mapping for one entity from its finished
/// all-paths mapping.
///
/// # Errors
///
/// Returns an error when an expansion path cannot be matched back to
/// the referenced entity's mapping, which indicates a scheduling or
/// model-validation defect upstream.
pub fn build_reference_paths<'a>(
    index: &EntityIndex<'a>,
    own_all_paths: &AllJsonPathsMapping<'a>,
    all_paths_by_entity: &AllPathsByEntity<'a>,
    flattened: &FlattenedByEntity<'a>,
) -> Result<ReferenceJsonPathsMapping, Error<'a>> {
    let mut result = ReferenceJsonPathsMapping::new();

    for (key, info) in own_all_paths {
        if !info.is_top_level {
            continue;
        }
        let property = match info.terminal_property {
            Some(property) => property,
            None => continue,
        };
        let target_name = match &property.kind {
            PropertyKind::DomainEntity(name) | PropertyKind::Association(name) => name,
            _ => continue,
        };
        let target = index.resolve(target_name)?;
        let pairs = reference_json_paths_for(
            key,
            target.name.as_ref(),
            own_all_paths,
            all_paths_by_entity,
            flattened,
        )?;
        result.insert(key.clone(), pairs);
    }
    Ok(result)
}

/// Pair up identity locations for one reference, one pair per
/// identity leaf of the referenced resource.
pub fn reference_json_paths_for<'a>(
    reference_key: &PropertyPath,
    target_name: &str,
    own_all_paths: &AllJsonPathsMapping<'a>,
    all_paths_by_entity: &AllPathsByEntity<'a>,
    flattened: &FlattenedByEntity<'a>,
) -> Result<Vec<ReferenceJsonPaths>, Error<'a>> {
    let target_flattened = flattened
        .get(target_name)
        .map_or(&[] as &[FlattenedIdentityProperty<'a>], Vec::as_slice);
    let target_all_paths = all_paths_by_entity.get(target_name);

    let mut pairs: Vec<ReferenceJsonPaths> = Vec::new();
    let mut seen_reference_paths: BTreeSet<JsonPath> = BTreeSet::new();

    for fip in target_flattened {
        let identity_key = leaf_key(fip);
        let identity_json_path = target_all_paths
            .and_then(|mapping| mapping.get(&identity_key))
            .and_then(|info| info.json_path_property_pairs.first())
            .map(|pair| pair.json_path.clone())
            .ok_or_else(|| Error::UnmatchedReferencePath(identity_key.as_str().to_string()))?;

        // merged-away chains carry the covering chain's location
        let carrying = match fip.merge_covered_by {
            Some(covering) => &target_flattened[covering],
            None => fip,
        };
        let reference_key_for_leaf = reference_key.join_path(&leaf_key(carrying));
        let reference_json_path = own_all_paths
            .get(&reference_key_for_leaf)
            .and_then(|info| info.json_path_property_pairs.first())
            .map(|pair| pair.json_path.clone())
            .ok_or_else(|| {
                Error::UnmatchedReferencePath(reference_key_for_leaf.as_str().to_string())
            })?;

        if fip.merged_away_by.is_none() {
            // an undeclared repeat of an already-carried physical path
            // contributes nothing
            if !seen_reference_paths.insert(reference_json_path.clone()) {
                continue;
            }
        }

        let pair = ReferenceJsonPaths {
            identity_json_path,
            reference_json_path,
            path_type: fip.identity_property.kind.path_type(),
        };
        if !pairs.contains(&pair) {
            pairs.push(pair);
        }
    }

    pairs.sort_by(|a, b| a.identity_json_path.cmp(&b.identity_json_path));
    Ok(pairs)
}

fn leaf_key(fip: &FlattenedIdentityProperty<'_>) -> PropertyPath {
    let leaf = fip.leaf_path().clone();
    if matches!(fip.identity_property.kind, PropertyKind::Descriptor(_)) {
        leaf.with_suffix(DESCRIPTOR_SUFFIX)
    } else {
        leaf
    }
}
