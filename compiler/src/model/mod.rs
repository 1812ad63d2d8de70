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

//! The finalized domain model consumed by the compiler
//!
//! References between entities are by name; the compiler resolves them
//! through the entity index. Property declaration order is preserved.

/// Entity declarations
pub mod entity;

/// Merge directives
pub mod merge;

/// Validated name values
pub mod names;

/// Property declarations
pub mod property;

use serde::Deserialize;

pub use entity::Entity;
pub use entity::EntityKind;
pub use merge::MergeDirective;
pub use names::EntityName;
pub use names::ProjectName;
pub use names::PropertyName;
pub use names::RoleName;
pub use property::IsCollection;
pub use property::IsIdentity;
pub use property::IsRequired;
pub use property::PathType;
pub use property::Property;
pub use property::PropertyKind;

/// Root of a domain model document.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainModel {
    pub project_name: ProjectName,
    pub entities: Vec<Entity>,
}
