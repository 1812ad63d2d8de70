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

//! Property naming for the API surface
//!
//! Assigns every declared property its JSON field name stems. All
//! names stay PascalCase here; camelCase happens at path append time.
//!
//! The stripping rule: a collection property whose role-name-qualified
//! name repeats its owning entity's name (or a word-boundary suffix of
//! it) drops that repetition from `full_name` and `top_level_name`,
//! avoiding stutter like `assessmentAssessmentScores`. Stripping never
//! applies to entity references or to non-collections, and never to
//! `full_name_preserving_prefix` or `decollisioned_top_level_name`.

use crate::compiler::casemungler::pluralize;
use crate::compiler::casemungler::prepend_prefix_with_collapse;
use crate::compiler::casemungler::strip_entity_prefix;
use crate::compiler::collect::top_level_properties;
use crate::compiler::CollectedProperty;
use crate::compiler::EntityIndex;
use crate::compiler::Error;
use crate::model::Entity;
use crate::model::Property;
use crate::model::PropertyKind;
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// Suffix of scalar domain entity and association reference fields.
pub const REFERENCE_SUFFIX: &str = "Reference";
/// Suffix of descriptor fields and descriptor path keys.
pub const DESCRIPTOR_SUFFIX: &str = "Descriptor";
/// Field stem of the reserved school year enumeration reference.
pub const SCHOOL_YEAR_TYPE_REFERENCE: &str = "SchoolYearTypeReference";
/// Project of the fixed school year core resource.
pub const SCHOOL_YEAR_PROJECT: &str = "Ed-Fi";
/// Resource name of the fixed school year core resource.
pub const SCHOOL_YEAR_RESOURCE: &str = "SchoolYearType";

/// JSON naming computed for one declared property.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyApiMapping {
    pub top_level_name: String,
    pub decollisioned_top_level_name: String,
    pub full_name: String,
    pub full_name_preserving_prefix: String,
    pub reference_collection_name: String,
    pub descriptor_collection_name: String,
    pub is_scalar_reference: bool,
    pub is_reference_collection: bool,
    pub is_common_collection: bool,
    pub is_descriptor_collection: bool,
    pub is_inline_common: bool,
    pub is_choice: bool,
    pub is_scalar_common: bool,
}

/// Compute the naming of one property as declared on its owning
/// entity.
#[must_use]
pub fn api_mapping_for(owner: &Entity, property: &Property) -> PropertyApiMapping {
    let base = property.full_property_name();
    let is_collection = property.is_collection.into_inner();

    let strips = is_collection && !property.kind.is_entity_reference();
    let stripped = if strips {
        strip_entity_prefix(&base, owner.name.as_ref())
    } else {
        base.clone()
    };

    let mut mapping = PropertyApiMapping {
        top_level_name: String::new(),
        decollisioned_top_level_name: String::new(),
        full_name: stripped.clone(),
        full_name_preserving_prefix: base.clone(),
        reference_collection_name: String::new(),
        descriptor_collection_name: String::new(),
        is_scalar_reference: false,
        is_reference_collection: false,
        is_common_collection: false,
        is_descriptor_collection: false,
        is_inline_common: false,
        is_choice: false,
        is_scalar_common: false,
    };

    match &property.kind {
        PropertyKind::DomainEntity(_) | PropertyKind::Association(_) => {
            if is_collection {
                mapping.top_level_name = pluralize(&base);
                mapping.reference_collection_name = format!("{}{}", base, REFERENCE_SUFFIX);
                mapping.is_reference_collection = true;
            } else {
                mapping.top_level_name = format!("{}{}", base, REFERENCE_SUFFIX);
                mapping.is_scalar_reference = true;
            }
            mapping.decollisioned_top_level_name = mapping.top_level_name.clone();
        }
        PropertyKind::Descriptor(_) => {
            if is_collection {
                mapping.top_level_name = pluralize(&stripped);
                mapping.decollisioned_top_level_name = pluralize(&base);
                mapping.descriptor_collection_name =
                    format!("{}{}", property.name.as_ref(), DESCRIPTOR_SUFFIX);
                mapping.is_descriptor_collection = true;
            } else {
                mapping.top_level_name = format!("{}{}", stripped, DESCRIPTOR_SUFFIX);
                mapping.decollisioned_top_level_name = format!("{}{}", base, DESCRIPTOR_SUFFIX);
            }
        }
        PropertyKind::SchoolYearEnumeration => {
            mapping.top_level_name = prepend_prefix_with_collapse(
                SCHOOL_YEAR_TYPE_REFERENCE,
                property.role_name_str(),
            );
            mapping.decollisioned_top_level_name = mapping.top_level_name.clone();
        }
        PropertyKind::Common(_) => {
            if is_collection {
                mapping.top_level_name = pluralize(&stripped);
                mapping.decollisioned_top_level_name = pluralize(&base);
                mapping.is_common_collection = true;
            } else {
                mapping.top_level_name = base.clone();
                mapping.decollisioned_top_level_name = base.clone();
                mapping.is_scalar_common = true;
            }
        }
        PropertyKind::InlineCommon(_) => {
            mapping.top_level_name = base.clone();
            mapping.decollisioned_top_level_name = base.clone();
            mapping.is_inline_common = true;
        }
        PropertyKind::Choice(_) => {
            mapping.top_level_name = base.clone();
            mapping.decollisioned_top_level_name = base.clone();
            mapping.is_choice = true;
        }
        _ => {
            if is_collection {
                mapping.top_level_name = pluralize(&stripped);
                mapping.decollisioned_top_level_name = pluralize(&base);
            } else {
                mapping.top_level_name = base.clone();
                mapping.decollisioned_top_level_name = base.clone();
            }
        }
    }

    mapping
}

/// JSON field name of a flattened identity leaf inside a reference
/// object: the leaf's qualified name, `Descriptor`-suffixed for
/// descriptor leaves. Leaves are never collections, so no stripping or
/// pluralization applies.
#[must_use]
pub fn identity_leaf_name(property: &Property) -> String {
    let name = property.full_property_name();
    if matches!(property.kind, PropertyKind::Descriptor(_)) {
        format!("{}{}", name, DESCRIPTOR_SUFFIX)
    } else {
        name
    }
}

/// Per-resource naming table with subclass collision resolution.
#[derive(Debug)]
pub struct ResourceNaming {
    by_full_name: BTreeMap<String, PropertyApiMapping>,
    collided_top_level_names: BTreeSet<String>,
}

impl ResourceNaming {
    /// Naming of a property by its role-name-qualified name.
    #[must_use]
    pub fn get(&self, full_property_name: &str) -> Option<&PropertyApiMapping> {
        self.by_full_name.get(full_property_name)
    }

    /// The name a property surfaces under on this resource: the
    /// decollisioned name when a subclass/superclass collision exists
    /// for it, the plain top level name otherwise.
    #[must_use]
    pub fn top_level_api_name(&self, mapping: &PropertyApiMapping) -> String {
        if self.collided_top_level_names.contains(&mapping.top_level_name) {
            mapping.decollisioned_top_level_name.clone()
        } else {
            mapping.top_level_name.clone()
        }
    }

    pub fn mappings(&self) -> impl Iterator<Item = (&String, &PropertyApiMapping)> {
        self.by_full_name.iter()
    }
}

/// Build the naming table for a resource entity. For subclasses, a
/// `top_level_name` declared on both sides of the subclass boundary is
/// re-qualified with each side's declaring entity name in its
/// decollisioned form.
///
/// # Errors
///
/// Returns an error when the subclass base entity cannot be resolved.
pub fn resource_naming<'a>(
    entity: &'a Entity,
    index: &EntityIndex<'a>,
) -> Result<ResourceNaming, Error<'a>> {
    let collected: Vec<CollectedProperty<'a>> = top_level_properties(entity, index)?;

    let mut named: Vec<(&'a Entity, &'a Property, PropertyApiMapping)> = collected
        .iter()
        .map(|cp| {
            (
                cp.declaring_entity,
                cp.property,
                api_mapping_for(cp.declaring_entity, cp.property),
            )
        })
        .collect();

    // A name colliding across the subclass boundary gets re-qualified
    // with its declaring entity's name.
    let mut collided_top_level_names = BTreeSet::new();
    for i in 0..named.len() {
        let collides = named.iter().enumerate().any(|(j, (declaring, _, other))| {
            j != i
                && other.top_level_name == named[i].2.top_level_name
                && declaring.name.as_ref() != named[i].0.name.as_ref()
        });
        if collides {
            collided_top_level_names.insert(named[i].2.top_level_name.clone());
        }
    }
    for (declaring, _, mapping) in &mut named {
        if collided_top_level_names.contains(&mapping.top_level_name) {
            mapping.decollisioned_top_level_name = prepend_prefix_with_collapse(
                &mapping.decollisioned_top_level_name,
                declaring.name.as_ref(),
            );
        }
    }

    let by_full_name = named
        .into_iter()
        .map(|(_, property, mapping)| (property.full_property_name(), mapping))
        .collect();

    Ok(ResourceNaming {
        by_full_name,
        collided_top_level_names,
    })
}
