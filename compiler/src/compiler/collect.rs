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

//! Property collection over entities and their groups
//!
//! Gathers the properties a resource surfaces (its own plus its
//! superclass's, minus a renamed-away base identity), the identity
//! properties that feed the flattener (including identities pulled up
//! from inline commons), and the descriptor properties reachable
//! through choices and inline commons.

use crate::compiler::casemungler::prepend_prefix_with_collapse;
use crate::compiler::json_path::PropertyPath;
use crate::compiler::EntityIndex;
use crate::compiler::Error;
use crate::model::Entity;
use crate::model::Property;
use crate::model::PropertyKind;

/// Naming context a property inherits from role-named choices and
/// inline commons above it, plus optionality forced by an optional
/// parent.
#[derive(Clone, Debug, Default)]
pub struct PropertyModifier<'a> {
    pub optional_due_to_parent: bool,
    pub parent_prefixes: Vec<&'a str>,
}

impl<'a> PropertyModifier<'a> {
    /// Extend this modifier for the children of a choice or inline
    /// common. A role name equal to the group's own name contributes
    /// no prefix.
    #[must_use]
    pub fn for_group_children(&self, group_property: &'a Property) -> Self {
        let mut parent_prefixes = self.parent_prefixes.clone();
        if !group_property.has_identical_role_name() {
            if let Some(role) = &group_property.role_name {
                parent_prefixes.push(role.as_ref());
            }
        }
        Self {
            optional_due_to_parent: self.optional_due_to_parent
                || !group_property.is_required.into_inner(),
            parent_prefixes,
        }
    }

    /// Modifier used inside a reference expansion: accumulated
    /// prefixes do not cross a collection reference boundary.
    #[must_use]
    pub fn with_prefixes_reset(&self) -> Self {
        Self {
            optional_due_to_parent: self.optional_due_to_parent,
            parent_prefixes: Vec::new(),
        }
    }

    /// Modifier for the children of a common: optionality flows down,
    /// prefixes are untouched (the common's own field carries its role
    /// name).
    #[must_use]
    pub fn for_common_children(&self, common_property: &Property) -> Self {
        Self {
            optional_due_to_parent: self.optional_due_to_parent
                || !common_property.is_required.into_inner(),
            parent_prefixes: self.parent_prefixes.clone(),
        }
    }

    /// Apply the accumulated prefixes to a name, outermost first, each
    /// with collapse.
    #[must_use]
    pub fn prefixed_name(&self, name: &str) -> String {
        self.parent_prefixes
            .iter()
            .rev()
            .fold(name.to_string(), |name, prefix| {
                prepend_prefix_with_collapse(&name, prefix)
            })
    }
}

/// A property paired with the entity that declares it and the modifier
/// it carries in the current resource context.
#[derive(Clone, Debug)]
pub struct CollectedProperty<'a> {
    pub declaring_entity: &'a Entity,
    pub property: &'a Property,
    pub modifier: PropertyModifier<'a>,
}

/// The properties a resource surfaces at its top level: the
/// superclass's (minus a renamed-away base identity) followed by its
/// own, in declaration order.
///
/// # Errors
///
/// Returns an error when a subclass base entity cannot be resolved.
pub fn top_level_properties<'a>(
    entity: &'a Entity,
    index: &EntityIndex<'a>,
) -> Result<Vec<CollectedProperty<'a>>, Error<'a>> {
    let mut collected = Vec::new();
    if let Some(base) = index.base_of(entity)? {
        for property in &base.properties {
            let renamed_away = entity
                .identity_rename
                .as_ref()
                .map_or(false, |renamed| renamed.as_ref() == property.name.as_ref());
            if renamed_away {
                continue;
            }
            collected.push(CollectedProperty {
                declaring_entity: base,
                property,
                modifier: PropertyModifier::default(),
            });
        }
    }
    for property in &entity.properties {
        collected.push(CollectedProperty {
            declaring_entity: entity,
            property,
            modifier: PropertyModifier::default(),
        });
    }
    Ok(collected)
}

/// The identity properties that feed the flattener: the entity's own
/// identity-marked properties plus identities pulled up from its
/// inline commons (recursively), each with the logical path prefix it
/// is reached through. Sorted ascending by each property's own
/// role-name-qualified name; this local sort is what makes flattened
/// output independent of declaration order.
///
/// # Errors
///
/// Returns an error when a group target cannot be resolved.
pub fn identity_properties<'a>(
    entity: &'a Entity,
    index: &EntityIndex<'a>,
) -> Result<Vec<(PropertyPath, &'a Property)>, Error<'a>> {
    let mut result = Vec::new();
    collect_identity_properties(entity, index, &PropertyPath::new(""), &mut result)?;
    result.sort_by(|(_, a), (_, b)| a.full_property_name().cmp(&b.full_property_name()));
    Ok(result)
}

fn collect_identity_properties<'a>(
    entity: &'a Entity,
    index: &EntityIndex<'a>,
    prefix: &PropertyPath,
    out: &mut Vec<(PropertyPath, &'a Property)>,
) -> Result<(), Error<'a>> {
    for collected in top_level_properties(entity, index)? {
        let property = collected.property;
        if let PropertyKind::InlineCommon(target_name) = &property.kind {
            let target = index.resolve(target_name)?;
            let nested_prefix = prefix.join(&property.full_property_name());
            collect_identity_properties(target, index, &nested_prefix, out)?;
        } else if property.is_identity.into_inner() {
            out.push((prefix.clone(), property));
        }
    }
    Ok(())
}

/// Descriptor properties reachable on the resource body: the entity's
/// own plus those inside its choices and inline commons, with role
/// name prefixes recorded along the way.
///
/// # Errors
///
/// Returns an error when a group target cannot be resolved.
pub fn descriptor_collected_properties<'a>(
    entity: &'a Entity,
    index: &EntityIndex<'a>,
) -> Result<Vec<CollectedProperty<'a>>, Error<'a>> {
    let mut result = Vec::new();
    collect_descriptors(entity, index, &PropertyModifier::default(), &mut result)?;
    Ok(result)
}

fn collect_descriptors<'a>(
    entity: &'a Entity,
    index: &EntityIndex<'a>,
    modifier: &PropertyModifier<'a>,
    out: &mut Vec<CollectedProperty<'a>>,
) -> Result<(), Error<'a>> {
    for collected in top_level_properties(entity, index)? {
        let property = collected.property;
        match &property.kind {
            PropertyKind::Descriptor(_) => out.push(CollectedProperty {
                declaring_entity: collected.declaring_entity,
                property,
                modifier: modifier.clone(),
            }),
            PropertyKind::Choice(target_name) | PropertyKind::InlineCommon(target_name) => {
                let target = index.resolve(target_name)?;
                let child_modifier = modifier.for_group_children(property);
                collect_descriptors(target, index, &child_modifier, out)?;
            }
            _ => {}
        }
    }
    Ok(())
}
