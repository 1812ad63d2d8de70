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

//! The document-paths mapping
//!
//! Restricts the all-paths mapping to the paths directly part of the
//! resource body. A scalar keeps its single location; a reference is a
//! composite key and carries its identity-equality pairs instead.

use crate::compiler::all_paths::AllJsonPathsMapping;
use crate::compiler::api_naming::SCHOOL_YEAR_PROJECT;
use crate::compiler::api_naming::SCHOOL_YEAR_RESOURCE;
use crate::compiler::json_path::JsonPath;
use crate::compiler::json_path::PropertyPath;
use crate::compiler::reference_paths::ReferenceJsonPaths;
use crate::compiler::reference_paths::ReferenceJsonPathsMapping;
use crate::compiler::EntityIndex;
use crate::compiler::Error;
use crate::model::PathType;
use crate::model::PropertyKind;
use serde::Serialize;
use std::collections::BTreeMap;

/// A path directly part of the resource body.
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum DocumentPathEntry {
    Scalar(ScalarPath),
    Reference(DocumentReferencePaths),
    Descriptor(DescriptorReferencePath),
}

/// A scalar value location.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalarPath {
    pub is_reference: bool,
    pub is_required: bool,
    pub path: JsonPath,
    #[serde(rename = "type")]
    pub path_type: PathType,
}

/// A reference's composite key: identity-equality pairs instead of a
/// single path.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentReferencePaths {
    pub is_reference: bool,
    pub is_descriptor: bool,
    pub is_required: bool,
    pub project_name: String,
    pub resource_name: String,
    pub reference_json_paths: Vec<ReferenceJsonPaths>,
}

/// A descriptor reference: a single path naming a vocabulary value.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptorReferencePath {
    pub is_reference: bool,
    pub is_descriptor: bool,
    pub is_required: bool,
    pub project_name: String,
    pub resource_name: String,
    pub path: JsonPath,
    #[serde(rename = "type")]
    pub path_type: PathType,
}

/// Mapping from top-level property paths to document path entries.
pub type DocumentPathsMapping = BTreeMap<PropertyPath, DocumentPathEntry>;

/// Build the document-paths mapping for one entity from its finished
/// all-paths and reference-paths mappings.
///
/// # Errors
///
/// Returns an error when a referenced entity cannot be resolved.
pub fn build_document_paths<'a>(
    index: &EntityIndex<'a>,
    own_all_paths: &AllJsonPathsMapping<'a>,
    reference_paths: &ReferenceJsonPathsMapping,
) -> Result<DocumentPathsMapping, Error<'a>> {
    let project_name = index.project_name().inner().clone();
    let mut result = DocumentPathsMapping::new();

    for (key, info) in own_all_paths {
        if !info.is_top_level {
            continue;
        }
        let property = match info.terminal_property {
            Some(property) => property,
            None => continue,
        };
        let path = match info.json_path_property_pairs.first() {
            Some(pair) => pair.json_path.clone(),
            None => continue,
        };

        let entry = match &property.kind {
            PropertyKind::DomainEntity(target_name) | PropertyKind::Association(target_name) => {
                let target = index.resolve(target_name)?;
                DocumentPathEntry::Reference(DocumentReferencePaths {
                    is_reference: true,
                    is_descriptor: false,
                    is_required: info.is_required,
                    project_name: project_name.clone(),
                    resource_name: target.name.as_ref().to_string(),
                    reference_json_paths: reference_paths.get(key).cloned().unwrap_or_default(),
                })
            }
            PropertyKind::Descriptor(target_name) => {
                let target = index.resolve(target_name)?;
                DocumentPathEntry::Descriptor(DescriptorReferencePath {
                    is_reference: true,
                    is_descriptor: true,
                    is_required: info.is_required,
                    project_name: project_name.clone(),
                    resource_name: target.name.as_ref().to_string(),
                    path,
                    path_type: property.kind.path_type(),
                })
            }
            PropertyKind::SchoolYearEnumeration => {
                // fixed platform convention, independent of the
                // declaring namespace
                DocumentPathEntry::Reference(DocumentReferencePaths {
                    is_reference: true,
                    is_descriptor: false,
                    is_required: info.is_required,
                    project_name: SCHOOL_YEAR_PROJECT.to_string(),
                    resource_name: SCHOOL_YEAR_RESOURCE.to_string(),
                    reference_json_paths: vec![ReferenceJsonPaths {
                        identity_json_path: JsonPath::root().field("SchoolYear"),
                        reference_json_path: path,
                        path_type: PathType::String,
                    }],
                })
            }
            _ => DocumentPathEntry::Scalar(ScalarPath {
                is_reference: false,
                is_required: info.is_required,
                path,
                path_type: property.kind.path_type(),
            }),
        };
        result.insert(key.clone(), entry);
    }
    Ok(result)
}
