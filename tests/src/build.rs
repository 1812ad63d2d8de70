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

//! Fluent model builder
//!
//! Scenario fixtures read like model declarations: start an entity,
//! add properties, end with `build`.

use api_schema_compiler::model::DomainModel;
use api_schema_compiler::model::Entity;
use api_schema_compiler::model::EntityKind;
use api_schema_compiler::model::IsCollection;
use api_schema_compiler::model::IsIdentity;
use api_schema_compiler::model::IsRequired;
use api_schema_compiler::model::MergeDirective;
use api_schema_compiler::model::Property;
use api_schema_compiler::model::PropertyKind;

/// Builds a [`DomainModel`] entity by entity.
#[derive(Debug)]
pub struct ModelBuilder {
    project_name: String,
    entities: Vec<Entity>,
    current: Option<Entity>,
}

impl Default for ModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            project_name: "Ed-Fi".to_string(),
            entities: Vec::new(),
            current: None,
        }
    }

    fn start_entity(mut self, name: &str, kind: EntityKind) -> Self {
        self.finish_current();
        self.current = Some(Entity {
            name: name.parse().unwrap(),
            kind,
            is_abstract: false,
            base_entity: None,
            identity_rename: None,
            properties: Vec::new(),
            merge_directives: Vec::new(),
        });
        self
    }

    fn finish_current(&mut self) {
        if let Some(entity) = self.current.take() {
            self.entities.push(entity);
        }
    }

    fn current_mut(&mut self) -> &mut Entity {
        self.current
            .as_mut()
            .expect("start an entity before adding properties")
    }

    #[must_use]
    pub fn domain_entity(self, name: &str) -> Self {
        self.start_entity(name, EntityKind::DomainEntity)
    }

    #[must_use]
    pub fn abstract_entity(self, name: &str) -> Self {
        let mut builder = self.start_entity(name, EntityKind::DomainEntity);
        if let Some(entity) = builder.current.as_mut() {
            entity.is_abstract = true;
        }
        builder
    }

    #[must_use]
    pub fn association(self, name: &str) -> Self {
        self.start_entity(name, EntityKind::Association)
    }

    #[must_use]
    pub fn domain_entity_subclass(self, name: &str, base: &str) -> Self {
        let mut builder = self.start_entity(name, EntityKind::DomainEntitySubclass);
        if let Some(entity) = builder.current.as_mut() {
            entity.base_entity = Some(base.parse().unwrap());
        }
        builder
    }

    #[must_use]
    pub fn common(self, name: &str) -> Self {
        self.start_entity(name, EntityKind::Common)
    }

    #[must_use]
    pub fn inline_common(self, name: &str) -> Self {
        self.start_entity(name, EntityKind::InlineCommon)
    }

    #[must_use]
    pub fn choice(self, name: &str) -> Self {
        self.start_entity(name, EntityKind::Choice)
    }

    #[must_use]
    pub fn descriptor(self, name: &str) -> Self {
        self.start_entity(name, EntityKind::Descriptor)
    }

    /// Rename an inherited base identity property. The renaming
    /// property itself is declared among the subclass's properties.
    #[must_use]
    pub fn identity_rename(mut self, renamed_base_property: &str) -> Self {
        self.current_mut().identity_rename = Some(renamed_base_property.parse().unwrap());
        self
    }

    #[must_use]
    pub fn merge_directive(mut self, source_path: &str, target_path: &str) -> Self {
        self.current_mut().merge_directives.push(MergeDirective {
            source_path: source_path.to_string(),
            target_path: target_path.to_string(),
        });
        self
    }

    #[must_use]
    pub fn property(
        mut self,
        name: &str,
        role: Option<&str>,
        kind: PropertyKind,
        identity: bool,
        required: bool,
        collection: bool,
    ) -> Self {
        self.current_mut().properties.push(Property {
            name: name.parse().unwrap(),
            role_name: role.map(|r| r.parse().unwrap()),
            kind,
            is_identity: IsIdentity::new(identity),
            is_required: IsRequired::new(required),
            is_collection: IsCollection::new(collection),
        });
        self
    }

    #[must_use]
    pub fn string_identity(self, name: &str) -> Self {
        self.property(name, None, PropertyKind::String, true, true, false)
    }

    #[must_use]
    pub fn integer_identity(self, name: &str) -> Self {
        self.property(name, None, PropertyKind::Integer, true, true, false)
    }

    #[must_use]
    pub fn string_property(self, name: &str, required: bool, collection: bool) -> Self {
        self.property(name, None, PropertyKind::String, false, required, collection)
    }

    #[must_use]
    pub fn string_property_role(
        self,
        name: &str,
        role: &str,
        required: bool,
        collection: bool,
    ) -> Self {
        self.property(
            name,
            Some(role),
            PropertyKind::String,
            false,
            required,
            collection,
        )
    }

    #[must_use]
    pub fn boolean_property(self, name: &str, required: bool, collection: bool) -> Self {
        self.property(name, None, PropertyKind::Boolean, false, required, collection)
    }

    #[must_use]
    pub fn integer_property(self, name: &str, required: bool, collection: bool) -> Self {
        self.property(name, None, PropertyKind::Integer, false, required, collection)
    }

    #[must_use]
    pub fn datetime_identity(self, name: &str) -> Self {
        self.property(name, None, PropertyKind::Datetime, true, true, false)
    }

    #[must_use]
    pub fn domain_entity_identity(self, target: &str) -> Self {
        self.property(
            target,
            None,
            PropertyKind::DomainEntity(target.parse().unwrap()),
            true,
            true,
            false,
        )
    }

    #[must_use]
    pub fn domain_entity_identity_role(self, target: &str, role: &str) -> Self {
        self.property(
            target,
            Some(role),
            PropertyKind::DomainEntity(target.parse().unwrap()),
            true,
            true,
            false,
        )
    }

    #[must_use]
    pub fn domain_entity_property(self, target: &str, required: bool, collection: bool) -> Self {
        self.property(
            target,
            None,
            PropertyKind::DomainEntity(target.parse().unwrap()),
            false,
            required,
            collection,
        )
    }

    #[must_use]
    pub fn domain_entity_property_role(
        self,
        target: &str,
        role: &str,
        required: bool,
        collection: bool,
    ) -> Self {
        self.property(
            target,
            Some(role),
            PropertyKind::DomainEntity(target.parse().unwrap()),
            false,
            required,
            collection,
        )
    }

    #[must_use]
    pub fn association_identity(self, target: &str) -> Self {
        self.property(
            target,
            None,
            PropertyKind::Association(target.parse().unwrap()),
            true,
            true,
            false,
        )
    }

    #[must_use]
    pub fn descriptor_property(
        self,
        target: &str,
        role: Option<&str>,
        identity: bool,
        required: bool,
        collection: bool,
    ) -> Self {
        self.property(
            target,
            role,
            PropertyKind::Descriptor(target.parse().unwrap()),
            identity,
            required,
            collection,
        )
    }

    #[must_use]
    pub fn school_year_identity(self) -> Self {
        self.property(
            "SchoolYear",
            None,
            PropertyKind::SchoolYearEnumeration,
            true,
            true,
            false,
        )
    }

    #[must_use]
    pub fn school_year_property(self, role: Option<&str>) -> Self {
        self.property(
            "SchoolYear",
            role,
            PropertyKind::SchoolYearEnumeration,
            false,
            false,
            false,
        )
    }

    #[must_use]
    pub fn common_property(self, target: &str, required: bool, collection: bool) -> Self {
        self.property(
            target,
            None,
            PropertyKind::Common(target.parse().unwrap()),
            false,
            required,
            collection,
        )
    }

    #[must_use]
    pub fn inline_common_property(self, target: &str, role: Option<&str>, required: bool) -> Self {
        self.property(
            target,
            role,
            PropertyKind::InlineCommon(target.parse().unwrap()),
            false,
            required,
            false,
        )
    }

    #[must_use]
    pub fn choice_property(self, target: &str, role: Option<&str>, required: bool) -> Self {
        self.property(
            target,
            role,
            PropertyKind::Choice(target.parse().unwrap()),
            false,
            required,
            false,
        )
    }

    #[must_use]
    pub fn build(mut self) -> DomainModel {
        self.finish_current();
        let project_name = self.project_name.parse().unwrap();
        DomainModel {
            project_name,
            entities: self.entities,
        }
    }
}
