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

//! Declared properties of a model entity

use crate::compiler::casemungler::prepend_prefix_with_collapse;
use crate::model::EntityName;
use crate::model::PropertyName;
use crate::model::RoleName;
use serde::Deserialize;
use serde::Serialize;
use tagged_types::TaggedType;

/// Whether a property participates in its entity's identity.
pub type IsIdentity = TaggedType<bool, IsIdentityTag>;
#[doc(hidden)]
#[derive(tagged_types::Tag)]
#[implement(Clone, Copy)]
#[transparent(Debug, Deserialize)]
#[capability(inner_access)]
pub enum IsIdentityTag {}

/// Whether a property is required in the resource document.
pub type IsRequired = TaggedType<bool, IsRequiredTag>;
#[doc(hidden)]
#[derive(tagged_types::Tag)]
#[implement(Clone, Copy)]
#[transparent(Debug, Deserialize)]
#[capability(inner_access)]
pub enum IsRequiredTag {}

/// Whether a property is a collection.
pub type IsCollection = TaggedType<bool, IsCollectionTag>;
#[doc(hidden)]
#[derive(tagged_types::Tag)]
#[implement(Clone, Copy)]
#[transparent(Debug, Deserialize)]
#[capability(inner_access)]
pub enum IsCollectionTag {}

// serde defaults for omitted attributes
fn not_identity() -> IsIdentity {
    IsIdentity::new(false)
}

fn not_required() -> IsRequired {
    IsRequired::new(false)
}

fn not_collection() -> IsCollection {
    IsCollection::new(false)
}

/// Closed set of property kinds. Reference, common, and choice kinds
/// carry the name of the target entity; the name is resolved through
/// the entity index at compile time.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", content = "target", rename_all = "camelCase")]
pub enum PropertyKind {
    Boolean,
    Currency,
    Date,
    Datetime,
    Decimal,
    Duration,
    Integer,
    Percent,
    Short,
    String,
    Time,
    Year,
    DomainEntity(EntityName),
    Association(EntityName),
    Descriptor(EntityName),
    /// The reserved school year enumeration reference. Always resolves
    /// to the `Ed-Fi` core resource `SchoolYearType` no matter which
    /// namespace declares it.
    SchoolYearEnumeration,
    Common(EntityName),
    InlineCommon(EntityName),
    Choice(EntityName),
}

impl PropertyKind {
    /// Target entity name for reference, common, and choice kinds.
    #[must_use]
    pub const fn target(&self) -> Option<&EntityName> {
        match self {
            Self::DomainEntity(name)
            | Self::Association(name)
            | Self::Descriptor(name)
            | Self::Common(name)
            | Self::InlineCommon(name)
            | Self::Choice(name) => Some(name),
            _ => None,
        }
    }

    /// A domain entity or association reference, the kinds that expand
    /// into the target's flattened identity.
    #[must_use]
    pub const fn is_entity_reference(&self) -> bool {
        matches!(self, Self::DomainEntity(_) | Self::Association(_))
    }

    /// A grouping kind whose children are the target entity's own
    /// properties.
    #[must_use]
    pub const fn is_group(&self) -> bool {
        matches!(self, Self::Common(_) | Self::InlineCommon(_) | Self::Choice(_))
    }

    /// A plain scalar value kind.
    #[must_use]
    pub const fn is_simple_scalar(&self) -> bool {
        matches!(
            self,
            Self::Boolean
                | Self::Currency
                | Self::Date
                | Self::Datetime
                | Self::Decimal
                | Self::Duration
                | Self::Integer
                | Self::Percent
                | Self::Short
                | Self::String
                | Self::Time
                | Self::Year
        )
    }

    /// A kind that terminates a property chain: simple scalars,
    /// descriptors, and the school year enumeration.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.is_simple_scalar() || matches!(self, Self::Descriptor(_) | Self::SchoolYearEnumeration)
    }

    /// JSON value classification of the terminal kind.
    #[must_use]
    pub const fn path_type(&self) -> PathType {
        match self {
            Self::Boolean => PathType::Boolean,
            Self::Currency
            | Self::Decimal
            | Self::Duration
            | Self::Integer
            | Self::Percent
            | Self::Short
            | Self::Year => PathType::Number,
            Self::Date => PathType::Date,
            Self::Datetime => PathType::DateTime,
            Self::Time => PathType::Time,
            _ => PathType::String,
        }
    }
}

/// JSON value classification of a terminal property, carried on path
/// mapping entries for downstream renderers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum PathType {
    #[serde(rename = "boolean")]
    Boolean,
    #[serde(rename = "number")]
    Number,
    #[serde(rename = "string")]
    String,
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "date-time")]
    DateTime,
    #[serde(rename = "time")]
    Time,
}

/// A declared property of an entity.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub name: PropertyName,
    #[serde(default)]
    pub role_name: Option<RoleName>,
    #[serde(flatten)]
    pub kind: PropertyKind,
    #[serde(default = "not_identity")]
    pub is_identity: IsIdentity,
    #[serde(default = "not_required")]
    pub is_required: IsRequired,
    #[serde(default = "not_collection")]
    pub is_collection: IsCollection,
}

impl Property {
    /// The role-name-qualified name of the property. A role name that
    /// is already a prefix of the property name is not doubled.
    #[must_use]
    pub fn full_property_name(&self) -> String {
        match &self.role_name {
            Some(role) => prepend_prefix_with_collapse(self.name.as_ref(), role.as_ref()),
            None => self.name.as_ref().to_string(),
        }
    }

    /// Role name as a bare string, empty when absent.
    #[must_use]
    pub fn role_name_str(&self) -> &str {
        self.role_name.as_ref().map_or("", |role| role.as_ref())
    }

    /// The "identical role name pattern": a reference whose role name
    /// repeats its own name, e.g. a `GradingPeriod` reference role
    /// named `GradingPeriod`.
    #[must_use]
    pub fn has_identical_role_name(&self) -> bool {
        self.role_name
            .as_ref()
            .map_or(false, |role| role.as_ref() == self.name.as_ref())
    }
}
