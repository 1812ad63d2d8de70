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

//! Reference flattening and key unification
//!
//! Expands an entity's identity references transitively into the
//! identity chains of their targets, producing the ordered flattened
//! identity list. Entities are flattened in reference order so a
//! reference splices in the already-finalized flattened identity of
//! its target; only the chain of borrowed property handles is
//! materialized, never the target subtree.

use crate::compiler::collect;
use crate::compiler::json_path::PropertyPath;
use crate::compiler::EntityIndex;
use crate::compiler::Error;
use crate::model::Entity;
use crate::model::MergeDirective;
use crate::model::Property;
use crate::model::PropertyKind;
use std::collections::BTreeMap;

/// Flattened identity lists of already-compiled entities, keyed by
/// entity name.
pub type FlattenedByEntity<'a> = BTreeMap<&'a str, Vec<FlattenedIdentityProperty<'a>>>;

/// One terminal identity leaf reachable from an entity, with the chain
/// of reference properties leading to it.
#[derive(Clone, Debug)]
pub struct FlattenedIdentityProperty<'a> {
    /// The terminal scalar, descriptor, or school year leaf.
    pub identity_property: &'a Property,
    /// Reference properties from the entity's root to the leaf, leaf
    /// included. Commons are transparent and contribute no link.
    pub property_chain: Vec<&'a Property>,
    /// Ordered chain prefixes: one logical path per reference link
    /// plus the leaf path.
    pub property_paths: Vec<PropertyPath>,
    /// Set when a merge directive on the owning entity merges this
    /// chain away.
    pub merged_away_by: Option<&'a MergeDirective>,
    /// Index of the covering flattened identity within the same list,
    /// linked by the merge covering pass.
    pub merge_covered_by: Option<usize>,
}

impl<'a> FlattenedIdentityProperty<'a> {
    /// The logical path of the terminal leaf.
    #[must_use]
    pub fn leaf_path(&self) -> &PropertyPath {
        self.property_paths
            .last()
            .unwrap_or_else(|| unreachable!("a flattened identity always has a leaf path"))
    }

    /// Role name of the first chain property exhibiting the identical
    /// role name pattern (a reference role named after itself), used
    /// to disambiguate leaf fields during reference expansion.
    #[must_use]
    pub fn identical_role_name_prefix(&self) -> Option<&'a str> {
        self.property_chain
            .iter()
            .find(|p| p.has_identical_role_name())
            .and_then(|p| p.role_name.as_ref())
            .map(AsRef::as_ref)
    }
}

/// A top-level property that expands into a nested identity structure
/// rather than terminating in a scalar.
#[derive(Clone, Debug)]
pub struct ReferenceGroup<'a> {
    pub source_property: &'a Property,
}

/// Flatten an entity's identity into ordered leaves, splicing in the
/// finalized flattened identity of every referenced entity, then mark
/// chains merged away by the entity's merge directives.
///
/// # Errors
///
/// Returns an error on an unresolvable reference, a reference-order
/// violation, or an unresolvable merge directive path.
pub fn flatten_entity<'a>(
    entity: &'a Entity,
    index: &EntityIndex<'a>,
    finalized: &FlattenedByEntity<'a>,
) -> Result<Vec<FlattenedIdentityProperty<'a>>, Error<'a>> {
    let mut flattened = Vec::new();
    for (prefix, property) in collect::identity_properties(entity, index)? {
        expand(property, &prefix, index, finalized, &mut flattened)
            .map_err(Box::new)
            .map_err(|e| Error::Property(&property.name, e))?;
    }
    apply_merge_directives(entity, index, &mut flattened)?;
    Ok(flattened)
}

fn expand<'a>(
    property: &'a Property,
    prefix: &PropertyPath,
    index: &EntityIndex<'a>,
    finalized: &FlattenedByEntity<'a>,
    out: &mut Vec<FlattenedIdentityProperty<'a>>,
) -> Result<(), Error<'a>> {
    let full_name = property.full_property_name();
    match &property.kind {
        kind if kind.is_terminal() => {
            out.push(FlattenedIdentityProperty {
                identity_property: property,
                property_chain: vec![property],
                property_paths: vec![prefix.join(&full_name)],
                merged_away_by: None,
                merge_covered_by: None,
            });
            Ok(())
        }
        PropertyKind::DomainEntity(target_name) | PropertyKind::Association(target_name) => {
            let target = index.resolve(target_name)?;
            let target_flattened = finalized
                .get(target.name.as_ref())
                .ok_or(Error::ReferenceOrderViolation(&target.name))?;
            let base_path = prefix.join(&full_name);
            for flattened in target_flattened.iter().filter(|f| f.merged_away_by.is_none()) {
                let mut property_paths = vec![base_path.clone()];
                property_paths.extend(
                    flattened
                        .property_paths
                        .iter()
                        .map(|p| base_path.join_path(p)),
                );
                let mut property_chain = vec![property];
                property_chain.extend(&flattened.property_chain);
                out.push(FlattenedIdentityProperty {
                    identity_property: flattened.identity_property,
                    property_chain,
                    property_paths,
                    merged_away_by: None,
                    merge_covered_by: None,
                });
            }
            Ok(())
        }
        PropertyKind::Common(target_name) | PropertyKind::InlineCommon(target_name) => {
            // structurally transparent; visible in the logical path
            let target = index.resolve(target_name)?;
            let base_path = prefix.join(&full_name);
            for (sub_prefix, sub_property) in collect::identity_properties(target, index)? {
                expand(
                    sub_property,
                    &base_path.join_path(&sub_prefix),
                    index,
                    finalized,
                    out,
                )?;
            }
            Ok(())
        }
        // choices contribute no identity
        _ => Ok(()),
    }
}

/// Mark chains merged away by the entity's (and its base's) merge
/// directives, in declaration order. A chain already merged away is
/// never re-marked. Directives whose source ends at a choice, common,
/// inline common, or school year enumeration never merge anything
/// away.
fn apply_merge_directives<'a>(
    entity: &'a Entity,
    index: &EntityIndex<'a>,
    flattened: &mut [FlattenedIdentityProperty<'a>],
) -> Result<(), Error<'a>> {
    let mut directives: Vec<(&'a Entity, &'a MergeDirective)> = Vec::new();
    if let Some(base) = index.base_of(entity)? {
        directives.extend(base.merge_directives.iter().map(|d| (base, d)));
    }
    directives.extend(entity.merge_directives.iter().map(|d| (entity, d)));

    for (declaring, directive) in directives {
        let source_property = resolve_path_property(declaring, &directive.source_path, index)?
            .ok_or_else(|| Error::UnresolvedMergeSource(directive.source_path.clone()))?;
        if matches!(
            source_property.kind,
            PropertyKind::Choice(_)
                | PropertyKind::Common(_)
                | PropertyKind::InlineCommon(_)
                | PropertyKind::SchoolYearEnumeration
        ) {
            continue;
        }
        for fip in flattened.iter_mut() {
            if fip.merged_away_by.is_none()
                && fip.leaf_path().is_at_or_below(&directive.source_path)
            {
                fip.merged_away_by = Some(directive);
            }
        }
    }
    Ok(())
}

/// Resolve the property a dot-joined path ends at, walking from the
/// given entity through references and commons.
///
/// # Errors
///
/// Returns an error when an intermediate entity reference target is
/// not declared in the model.
pub fn resolve_path_property<'a>(
    entity: &'a Entity,
    path: &str,
    index: &EntityIndex<'a>,
) -> Result<Option<&'a Property>, Error<'a>> {
    let mut current = entity;
    let mut resolved = None;
    for segment in path.split('.') {
        let property = match find_property_on(current, index, segment)? {
            Some(property) => property,
            None => return Ok(None),
        };
        resolved = Some(property);
        if let Some(target_name) = property.kind.target() {
            current = index.resolve(target_name)?;
        }
    }
    Ok(resolved)
}

fn find_property_on<'a>(
    entity: &'a Entity,
    index: &EntityIndex<'a>,
    full_name: &str,
) -> Result<Option<&'a Property>, Error<'a>> {
    if let Some(property) = entity.find_property(full_name) {
        return Ok(Some(property));
    }
    if let Some(base) = index.base_of(entity)? {
        return Ok(base.find_property(full_name));
    }
    Ok(None)
}

/// All reference groups of an entity's top-level properties: domain
/// entity and association references, plus commons carrying identity
/// content, ascending by qualified property name.
///
/// # Errors
///
/// Returns an error when a common target cannot be resolved.
pub fn reference_groups<'a>(
    entity: &'a Entity,
    index: &EntityIndex<'a>,
) -> Result<Vec<ReferenceGroup<'a>>, Error<'a>> {
    let mut groups: Vec<ReferenceGroup<'a>> = Vec::new();
    for collected in collect::top_level_properties(entity, index)? {
        let property = collected.property;
        let is_group = match &property.kind {
            PropertyKind::DomainEntity(_) | PropertyKind::Association(_) => true,
            PropertyKind::Common(target_name) => {
                let target = index.resolve(target_name)?;
                !collect::identity_properties(target, index)?.is_empty()
            }
            _ => false,
        };
        if is_group {
            groups.push(ReferenceGroup {
                source_property: property,
            });
        }
    }
    groups.sort_by(|a, b| {
        a.source_property
            .full_property_name()
            .cmp(&b.source_property.full_property_name())
    });
    Ok(groups)
}
