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

//! Command-line entry points for the compiler
//!
//! The `Compile` subcommand reads one or more domain model documents
//! (JSON), compiles them into API schema mappings, and writes the
//! mappings document to the output path. Model files may also be
//! listed in a TOML manifest instead of on the command line.

use crate::compiler::compile;
use crate::compiler::Compiled;
use crate::compiler::DocumentPathsMapping;
use crate::compiler::EntityMappings;
use crate::compiler::PropertyApiMapping;
use crate::compiler::ReferenceJsonPathsMapping;
use crate::manifest::CompileManifest;
use crate::model::DomainModel;
use crate::Error;
use clap::Subcommand;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::write;
use std::fs::File;
use std::io::Read as _;
use std::path::PathBuf;

/// Compiler high-level commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile domain model documents into API schema mappings.
    Compile {
        /// Model document files (JSON), core first. May be omitted
        /// when a manifest is given.
        models: Vec<String>,
        /// Compile manifest (TOML) naming the model files.
        #[arg(short, long)]
        manifest: Option<PathBuf>,
        /// Output file for the mappings document.
        #[arg(short, long, default_value = "api-schema.json")]
        output: PathBuf,
    },
}

/// Process a compiler command.
///
/// # Errors
///
/// Returns an error if command processing fails.
pub fn process_command(command: &Commands) -> Result<Vec<String>, Error> {
    match command {
        Commands::Compile {
            models,
            manifest,
            output,
        } => {
            let mut model_files = models.clone();
            if let Some(manifest_file) = manifest {
                let manifest = CompileManifest::read(manifest_file).map_err(Error::Manifest)?;
                model_files.extend(manifest.model_files);
            }
            if model_files.is_empty() {
                return Err(Error::AtLeastOneModelFileNeeded);
            }

            let model = read_model(&model_files)?;
            let compiled = compile(&model).map_err(Error::compile_error)?;
            let document = ApiSchemaDocument::from_compiled(&compiled);
            let serialized =
                serde_json::to_string_pretty(&document).map_err(Error::SerializeOutput)?;
            write(output, serialized)
                .map_err(|e| Error::WriteOutput(output.clone(), e))?;

            Ok(vec![format!(
                "compiled {} entities to {}",
                compiled.mappings.len(),
                output.display()
            )])
        }
    }
}

/// Read model documents and concatenate extension entities after the
/// core model's.
fn read_model(model_files: &[String]) -> Result<DomainModel, Error> {
    let mut merged: Option<DomainModel> = None;
    for fname in model_files {
        let mut file = File::open(fname).map_err(|e| Error::Io(fname.clone(), e))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::Io(fname.clone(), e))?;
        let model: DomainModel =
            serde_json::from_str(&content).map_err(|e| Error::ModelFormat(fname.clone(), e))?;
        merged = Some(match merged {
            None => model,
            Some(mut core) => {
                core.entities.extend(model.entities);
                core
            }
        });
    }
    merged.ok_or(Error::AtLeastOneModelFileNeeded)
}

/// Export shape of the mappings document.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiSchemaDocument<'a> {
    project_name: &'a str,
    resources: BTreeMap<&'a str, ResourceMappings<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResourceMappings<'a> {
    resource_name: &'a str,
    flattened_identity_properties: Vec<FlattenedIdentityExport<'a>>,
    reference_groups: Vec<ReferenceGroupExport>,
    property_api_mappings: BTreeMap<&'a str, &'a PropertyApiMapping>,
    all_json_paths_mapping: BTreeMap<&'a str, AllPathsExport<'a>>,
    document_paths_mapping: &'a DocumentPathsMapping,
    reference_json_paths_mapping: &'a ReferenceJsonPathsMapping,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FlattenedIdentityExport<'a> {
    identity_property_name: String,
    property_paths: Vec<&'a str>,
    merged_away: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReferenceGroupExport {
    is_group: bool,
    source_property: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AllPathsExport<'a> {
    json_paths: Vec<&'a str>,
    is_top_level: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    terminal_property_full_name: Option<String>,
}

impl<'a> ApiSchemaDocument<'a> {
    fn from_compiled(compiled: &'a Compiled<'a>) -> Self {
        let resources = compiled
            .mappings
            .iter()
            .map(|(name, mappings)| (*name, ResourceMappings::from_mappings(mappings)))
            .collect();
        Self {
            project_name: compiled.project_name.as_ref(),
            resources,
        }
    }
}

impl<'a> ResourceMappings<'a> {
    fn from_mappings(mappings: &'a EntityMappings<'a>) -> Self {
        let flattened_identity_properties = mappings
            .api_mapping
            .flattened_identity_properties
            .iter()
            .map(|fip| FlattenedIdentityExport {
                identity_property_name: fip.identity_property.full_property_name(),
                property_paths: fip.property_paths.iter().map(|p| p.as_str()).collect(),
                merged_away: fip.merged_away_by.is_some(),
            })
            .collect();
        let reference_groups = mappings
            .api_mapping
            .reference_groups
            .iter()
            .map(|group| ReferenceGroupExport {
                is_group: true,
                source_property: group.source_property.full_property_name(),
            })
            .collect();
        let property_api_mappings = mappings
            .naming
            .mappings()
            .map(|(name, mapping)| (name.as_str(), mapping))
            .collect();
        let all_json_paths_mapping = mappings
            .all_json_paths_mapping
            .iter()
            .map(|(path, info)| {
                (
                    path.as_str(),
                    AllPathsExport {
                        json_paths: info
                            .json_path_property_pairs
                            .iter()
                            .map(|pair| pair.json_path.as_str())
                            .collect(),
                        is_top_level: info.is_top_level,
                        terminal_property_full_name: info
                            .terminal_property
                            .map(|p| p.full_property_name()),
                    },
                )
            })
            .collect();

        Self {
            resource_name: mappings.entity.name.as_ref(),
            flattened_identity_properties,
            reference_groups,
            property_api_mappings,
            all_json_paths_mapping,
            document_paths_mapping: &mappings.document_paths_mapping,
            reference_json_paths_mapping: &mappings.reference_json_paths_mapping,
        }
    }
}
