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

//! Index of model entities
//!
//! Resolves by-name references and derives the compile order over the
//! identity-reference graph, so that an entity's flattening can reuse
//! the already-finalized flattened identity of anything it references.

use crate::compiler::Error;
use crate::model::DomainModel;
use crate::model::Entity;
use crate::model::EntityName;
use crate::model::ProjectName;
use crate::model::Property;
use crate::model::PropertyKind;
use std::collections::HashMap;
use std::collections::HashSet;

/// Name lookup over the finalized model.
#[derive(Debug)]
pub struct EntityIndex<'a> {
    project_name: &'a ProjectName,
    by_name: HashMap<&'a str, &'a Entity>,
    entities: Vec<&'a Entity>,
}

impl<'a> EntityIndex<'a> {
    /// Build the index, rejecting duplicate entity names.
    ///
    /// # Errors
    ///
    /// Returns an error on a duplicate entity declaration.
    pub fn new(model: &'a DomainModel) -> Result<Self, Error<'a>> {
        let mut by_name = HashMap::new();
        for entity in &model.entities {
            if by_name.insert(entity.name.as_ref(), entity).is_some() {
                return Err(Error::DuplicateEntity(&entity.name));
            }
        }
        Ok(Self {
            project_name: &model.project_name,
            by_name,
            entities: model.entities.iter().collect(),
        })
    }

    #[must_use]
    pub const fn project_name(&self) -> &'a ProjectName {
        self.project_name
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<&'a Entity> {
        self.by_name.get(name).copied()
    }

    /// Resolve a referenced entity by name.
    ///
    /// # Errors
    ///
    /// Returns an error when the name is not declared in the model.
    pub fn resolve(&self, name: &'a EntityName) -> Result<&'a Entity, Error<'a>> {
        self.find(name.as_ref()).ok_or(Error::EntityNotFound(name))
    }

    /// Base entity of a subclass.
    ///
    /// # Errors
    ///
    /// Returns an error when a subclass entity has no resolvable base.
    pub fn base_of(&self, entity: &'a Entity) -> Result<Option<&'a Entity>, Error<'a>> {
        if !entity.kind.is_subclass() {
            return Ok(None);
        }
        match &entity.base_entity {
            Some(base) => self.resolve(base).map(Some),
            None => Err(Error::MissingBaseEntity(&entity.name)),
        }
    }

    /// All entities in model declaration order.
    pub fn entities(&self) -> impl Iterator<Item = &'a Entity> + '_ {
        self.entities.iter().copied()
    }

    /// Entities that surface as API resources, in declaration order.
    pub fn resource_entities(&self) -> impl Iterator<Item = &'a Entity> + '_ {
        self.entities
            .iter()
            .copied()
            .filter(|e| e.kind.is_resource())
    }

    /// Resource entities ordered so every entity follows everything it
    /// depends on through its identity references.
    ///
    /// # Errors
    ///
    /// Returns an error on an identity cycle or an unresolvable
    /// reference target.
    pub fn compile_order(&self) -> Result<Vec<&'a Entity>, Error<'a>> {
        let mut finished: Vec<&'a Entity> = Vec::new();
        let mut done: HashSet<&'a str> = HashSet::new();
        let mut in_progress: HashSet<&'a str> = HashSet::new();

        for entity in self.resource_entities() {
            self.visit(entity, &mut done, &mut in_progress, &mut finished)?;
        }
        Ok(finished)
    }

    fn visit(
        &self,
        entity: &'a Entity,
        done: &mut HashSet<&'a str>,
        in_progress: &mut HashSet<&'a str>,
        finished: &mut Vec<&'a Entity>,
    ) -> Result<(), Error<'a>> {
        if done.contains(entity.name.as_ref()) {
            return Ok(());
        }
        if !in_progress.insert(entity.name.as_ref()) {
            return Err(Error::IdentityCycle(&entity.name));
        }

        let mut targets = Vec::new();
        self.identity_targets(entity, &mut HashSet::new(), &mut targets)?;
        for target in targets {
            self.visit(target, done, in_progress, finished)
                .map_err(Box::new)
                .map_err(|e| Error::Entity(&entity.name, e))?;
        }

        in_progress.remove(entity.name.as_ref());
        done.insert(entity.name.as_ref());
        finished.push(entity);
        Ok(())
    }

    /// Entities this entity's flattening depends on: targets of its
    /// identity references, reached transitively through inline
    /// commons and identity-marked commons.
    fn identity_targets(
        &self,
        entity: &'a Entity,
        seen_groups: &mut HashSet<&'a str>,
        out: &mut Vec<&'a Entity>,
    ) -> Result<(), Error<'a>> {
        if let Some(base) = self.base_of(entity)? {
            self.identity_targets_in(&base.properties, seen_groups, out)?;
        }
        self.identity_targets_in(&entity.properties, seen_groups, out)
    }

    fn identity_targets_in(
        &self,
        properties: &'a [Property],
        seen_groups: &mut HashSet<&'a str>,
        out: &mut Vec<&'a Entity>,
    ) -> Result<(), Error<'a>> {
        for property in properties {
            match &property.kind {
                PropertyKind::DomainEntity(name) | PropertyKind::Association(name)
                    if property.is_identity.into_inner() =>
                {
                    out.push(self.resolve(name)?);
                }
                PropertyKind::InlineCommon(name) => {
                    let group = self.resolve(name)?;
                    if seen_groups.insert(group.name.as_ref()) {
                        self.identity_targets(group, seen_groups, out)?;
                    }
                }
                PropertyKind::Common(name) if property.is_identity.into_inner() => {
                    let group = self.resolve(name)?;
                    if seen_groups.insert(group.name.as_ref()) {
                        self.identity_targets(group, seen_groups, out)?;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }
}
