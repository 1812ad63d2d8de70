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

//! The all-paths mapping
//!
//! Maps every reachable logical property path of an entity to its
//! concrete JSON locations. Choices and inline commons are invisible
//! in the JSON path but present in the logical key; reference
//! expansion follows the target's flattened identity, deduplicating
//! physically identical paths reached via different logical routes.

use crate::compiler::api_naming;
use crate::compiler::api_naming::identity_leaf_name;
use crate::compiler::api_naming::ResourceNaming;
use crate::compiler::casemungler::prepend_prefix_with_collapse;
use crate::compiler::collect;
use crate::compiler::collect::PropertyModifier;
use crate::compiler::flatten::FlattenedByEntity;
use crate::compiler::json_path::JsonPath;
use crate::compiler::json_path::PropertyPath;
use crate::compiler::EntityIndex;
use crate::compiler::Error;
use crate::model::Entity;
use crate::model::EntityName;
use crate::model::Property;
use crate::model::PropertyKind;
use std::collections::BTreeMap;

/// A concrete JSON path together with the terminal property providing
/// the value at that location.
#[derive(Clone, Debug)]
pub struct JsonPathPropertyPair<'a> {
    pub json_path: JsonPath,
    pub source_property: &'a Property,
}

/// All JSON locations of one logical property path.
#[derive(Clone, Debug)]
pub struct JsonPathsInfo<'a> {
    /// Ordered by JSON path, physically deduplicated.
    pub json_path_property_pairs: Vec<JsonPathPropertyPair<'a>>,
    /// Whether the path is directly addressable at the resource root
    /// rather than only through a parent reference chain.
    pub is_top_level: bool,
    /// The nearest terminal property, present on top-level entries.
    pub terminal_property: Option<&'a Property>,
    /// Whether the document requires a value here; meaningful on
    /// top-level entries.
    pub is_required: bool,
}

/// Mapping from logical property paths to JSON locations.
pub type AllJsonPathsMapping<'a> = BTreeMap<PropertyPath, JsonPathsInfo<'a>>;

/// All-paths mappings of already-mapped entities, keyed by entity
/// name.
pub type AllPathsByEntity<'a> = BTreeMap<&'a str, AllJsonPathsMapping<'a>>;

/// Build the all-paths mapping for one entity.
///
/// # Errors
///
/// Returns an error on an unresolvable reference or a
/// reference-order violation.
pub fn build_all_paths<'a>(
    entity: &'a Entity,
    index: &EntityIndex<'a>,
    naming: &ResourceNaming,
    flattened: &FlattenedByEntity<'a>,
) -> Result<AllJsonPathsMapping<'a>, Error<'a>> {
    let mut builder = AllPathsBuilder {
        index,
        flattened,
        mapping: BTreeMap::new(),
    };

    for collected in collect::top_level_properties(entity, index)? {
        let property = collected.property;
        let mapping = api_naming::api_mapping_for(collected.declaring_entity, property);
        let top_name = naming.top_level_api_name(&mapping);
        let key = PropertyPath::new(property.full_property_name());
        let json = if mapping.is_choice || mapping.is_inline_common {
            JsonPath::root()
        } else {
            JsonPath::root().field(&top_name)
        };
        builder
            .dispatch(
                property,
                collected.declaring_entity,
                &collected.modifier,
                &key,
                &json,
                true,
            )
            .map_err(Box::new)
            .map_err(|e| Error::Property(&property.name, e))?;
    }

    for info in builder.mapping.values_mut() {
        info.json_path_property_pairs
            .sort_by(|a, b| a.json_path.cmp(&b.json_path));
    }
    Ok(builder.mapping)
}

struct AllPathsBuilder<'a, 'b> {
    index: &'b EntityIndex<'a>,
    flattened: &'b FlattenedByEntity<'a>,
    mapping: AllJsonPathsMapping<'a>,
}

impl<'a> AllPathsBuilder<'a, '_> {
    /// Record a JSON path under each of the given logical keys,
    /// deduplicating physically identical paths.
    fn add(
        &mut self,
        keys: &[PropertyPath],
        json_path: &JsonPath,
        is_top_level: bool,
        source_property: &'a Property,
        is_required: bool,
    ) {
        for key in keys {
            let info = self
                .mapping
                .entry(key.clone())
                .or_insert_with(|| JsonPathsInfo {
                    json_path_property_pairs: Vec::new(),
                    is_top_level,
                    terminal_property: if is_top_level {
                        Some(source_property)
                    } else {
                        None
                    },
                    is_required,
                });
            let duplicate = info
                .json_path_property_pairs
                .iter()
                .any(|pair| pair.json_path == *json_path);
            if !duplicate {
                info.json_path_property_pairs.push(JsonPathPropertyPair {
                    json_path: json_path.clone(),
                    source_property,
                });
            }
        }
    }

    /// Record paths for a property whose own field segment is already
    /// appended to `json`.
    fn dispatch(
        &mut self,
        property: &'a Property,
        declaring: &'a Entity,
        modifier: &PropertyModifier<'a>,
        key: &PropertyPath,
        json: &JsonPath,
        top: bool,
    ) -> Result<(), Error<'a>> {
        let mapping = api_naming::api_mapping_for(declaring, property);
        let required = effective_required(property, modifier);

        match &property.kind {
            PropertyKind::SchoolYearEnumeration => {
                self.add(
                    &[key.clone()],
                    &json.field("SchoolYear"),
                    top,
                    property,
                    required,
                );
                Ok(())
            }
            PropertyKind::DomainEntity(target_name) | PropertyKind::Association(target_name) => {
                if mapping.is_reference_collection {
                    let item_json = json
                        .array()
                        .field(&modifier.prefixed_name(&mapping.reference_collection_name));
                    self.expand_reference(
                        property,
                        target_name,
                        &modifier.with_prefixes_reset(),
                        key,
                        &item_json,
                        top,
                        required,
                    )
                } else {
                    self.expand_reference(
                        property,
                        target_name,
                        modifier,
                        key,
                        json,
                        top,
                        required,
                    )
                }
            }
            PropertyKind::Descriptor(_) => {
                let descriptor_key = key.with_suffix(api_naming::DESCRIPTOR_SUFFIX);
                if mapping.is_descriptor_collection {
                    let item_json = json
                        .array()
                        .field(&modifier.prefixed_name(&mapping.descriptor_collection_name));
                    self.add(&[descriptor_key], &item_json, top, property, required);
                } else {
                    self.add(&[descriptor_key], json, top, property, required);
                }
                Ok(())
            }
            PropertyKind::Common(target_name) => {
                let inner_json = if mapping.is_common_collection {
                    json.array()
                } else {
                    json.clone()
                };
                let child_modifier = modifier.for_common_children(property);
                self.walk_common(target_name, &child_modifier, key, &inner_json, top)
            }
            PropertyKind::Choice(target_name) | PropertyKind::InlineCommon(target_name) => {
                let target = self.index.resolve(target_name)?;
                let child_modifier = modifier.for_group_children(property);
                for collected in collect::top_level_properties(target, self.index)? {
                    let child = collected.property;
                    let child_mapping =
                        api_naming::api_mapping_for(collected.declaring_entity, child);
                    let child_key = key.join(&child.full_property_name());
                    let child_json = if child_mapping.is_choice || child_mapping.is_inline_common {
                        json.clone()
                    } else {
                        json.field(&child_modifier.prefixed_name(&child_mapping.top_level_name))
                    };
                    self.dispatch(
                        child,
                        collected.declaring_entity,
                        &child_modifier,
                        &child_key,
                        &child_json,
                        top,
                    )?;
                }
                Ok(())
            }
            _ => {
                if property.is_collection.into_inner() {
                    let item_json = json
                        .array()
                        .field(&modifier.prefixed_name(&mapping.full_name_preserving_prefix));
                    self.add(&[key.clone()], &item_json, top, property, required);
                } else {
                    self.add(&[key.clone()], json, top, property, required);
                }
                Ok(())
            }
        }
    }

    /// Children of a common continue the parent's path as fields of
    /// the common's object (or array items for a collection common).
    fn walk_common(
        &mut self,
        target_name: &'a EntityName,
        modifier: &PropertyModifier<'a>,
        key: &PropertyPath,
        json: &JsonPath,
        top: bool,
    ) -> Result<(), Error<'a>> {
        let target = self.index.resolve(target_name)?;
        for collected in collect::top_level_properties(target, self.index)? {
            let child = collected.property;
            let child_mapping = api_naming::api_mapping_for(collected.declaring_entity, child);
            let child_key = key.join(&child.full_property_name());
            let child_json = if child_mapping.is_choice || child_mapping.is_inline_common {
                json.clone()
            } else {
                json.field(&modifier.prefixed_name(&child_mapping.top_level_name))
            };
            self.dispatch(
                child,
                collected.declaring_entity,
                modifier,
                &child_key,
                &child_json,
                top,
            )?;
        }
        Ok(())
    }

    /// Expand a reference through the target's flattened identity,
    /// omitting merged-away chains. Every chain prefix keys to the
    /// same concrete path as its leaf; the reference's own key
    /// collects all leaf paths.
    #[allow(clippy::too_many_arguments)]
    fn expand_reference(
        &mut self,
        property: &'a Property,
        target_name: &'a EntityName,
        modifier: &PropertyModifier<'a>,
        key: &PropertyPath,
        json: &JsonPath,
        top: bool,
        required: bool,
    ) -> Result<(), Error<'a>> {
        let target = self.index.resolve(target_name)?;
        let target_flattened = self
            .flattened
            .get(target.name.as_ref())
            .ok_or(Error::ReferenceOrderViolation(&target.name))?;

        for fip in target_flattened.iter().filter(|f| f.merged_away_by.is_none()) {
            let special_prefix = fip.identical_role_name_prefix().unwrap_or("");
            let leaf_name = prepend_prefix_with_collapse(
                &modifier.prefixed_name(&identity_leaf_name(fip.identity_property)),
                special_prefix,
            );
            let leaf_json = json.field(&leaf_name);

            let mut keys: Vec<PropertyPath> = fip
                .property_paths
                .iter()
                .map(|path| key.join_path(path))
                .collect();
            if matches!(fip.identity_property.kind, PropertyKind::Descriptor(_)) {
                if let Some(last) = keys.pop() {
                    keys.push(last.with_suffix(api_naming::DESCRIPTOR_SUFFIX));
                }
            }

            self.add(&keys, &leaf_json, false, fip.identity_property, false);
            self.add(&[key.clone()], &leaf_json, top, property, required);
        }
        Ok(())
    }
}

/// Whether the document requires a value for this property at the
/// resource top level.
#[must_use]
pub fn effective_required(property: &Property, modifier: &PropertyModifier<'_>) -> bool {
    (property.is_required.into_inner() || property.is_identity.into_inner())
        && !property.is_collection.into_inner()
        && !modifier.optional_due_to_parent
}
