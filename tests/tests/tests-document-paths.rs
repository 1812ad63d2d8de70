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

use api_schema_compiler::compiler::compile;
use api_schema_compiler::compiler::DocumentPathEntry;
use api_schema_compiler::model::PathType;
use edfi_api_schema_tests::mappings_of;
use edfi_api_schema_tests::ModelBuilder;

fn entry<'a>(
    mappings: &'a api_schema_compiler::compiler::EntityMappings<'a>,
    key: &str,
) -> &'a DocumentPathEntry {
    mappings
        .document_paths_mapping
        .iter()
        .find(|(path, _)| path.as_str() == key)
        .map(|(_, entry)| entry)
        .unwrap_or_else(|| panic!("no document path entry for {key}"))
}

#[test]
fn scalar_entries_carry_path_and_type() {
    let model = ModelBuilder::new()
        .domain_entity("ReportCard")
        .integer_identity("ReportCardIdentity")
        .boolean_property("Flag", false, false)
        .build();
    let compiled = compile(&model).unwrap();
    let report_card = mappings_of(&compiled, "ReportCard");

    match entry(report_card, "ReportCardIdentity") {
        DocumentPathEntry::Scalar(scalar) => {
            assert!(!scalar.is_reference);
            assert!(scalar.is_required);
            assert_eq!(scalar.path.as_str(), "$.reportCardIdentity");
            assert_eq!(scalar.path_type, PathType::Number);
        }
        other => panic!("expected scalar entry, got {other:?}"),
    }
    match entry(report_card, "Flag") {
        DocumentPathEntry::Scalar(scalar) => {
            assert!(!scalar.is_required);
            assert_eq!(scalar.path_type, PathType::Boolean);
        }
        other => panic!("expected scalar entry, got {other:?}"),
    }
}

#[test]
fn reference_entries_carry_identity_pairs() {
    let model = ModelBuilder::new()
        .domain_entity("CourseOffering")
        .string_identity("LocalCourseCode")
        .domain_entity_identity("School")
        .domain_entity("School")
        .integer_identity("SchoolId")
        .string_identity("SchoolName")
        .build();
    let compiled = compile(&model).unwrap();
    let course_offering = mappings_of(&compiled, "CourseOffering");

    match entry(course_offering, "School") {
        DocumentPathEntry::Reference(reference) => {
            assert!(reference.is_reference);
            assert!(!reference.is_descriptor);
            assert!(reference.is_required);
            assert_eq!(reference.project_name, "Ed-Fi");
            assert_eq!(reference.resource_name, "School");
            let pairs: Vec<(&str, &str)> = reference
                .reference_json_paths
                .iter()
                .map(|p| {
                    (
                        p.identity_json_path.as_str(),
                        p.reference_json_path.as_str(),
                    )
                })
                .collect();
            assert_eq!(
                pairs,
                vec![
                    ("$.schoolId", "$.schoolReference.schoolId"),
                    ("$.schoolName", "$.schoolReference.schoolName")
                ]
            );
            assert_eq!(reference.reference_json_paths[0].path_type, PathType::Number);
            assert_eq!(reference.reference_json_paths[1].path_type, PathType::String);
        }
        other => panic!("expected reference entry, got {other:?}"),
    }
}

#[test]
fn collection_reference_is_not_required() {
    let model = ModelBuilder::new()
        .domain_entity("ReportCard")
        .integer_identity("ReportCardIdentity")
        .domain_entity_property("Grade", true, true)
        .domain_entity("Grade")
        .integer_identity("GradeIdentity")
        .build();
    let compiled = compile(&model).unwrap();
    let report_card = mappings_of(&compiled, "ReportCard");

    match entry(report_card, "Grade") {
        DocumentPathEntry::Reference(reference) => {
            assert!(!reference.is_required);
            assert_eq!(
                reference.reference_json_paths[0].reference_json_path.as_str(),
                "$.grades[*].gradeReference.gradeIdentity"
            );
        }
        other => panic!("expected reference entry, got {other:?}"),
    }
}

#[test]
fn descriptor_entries_are_single_paths() {
    let model = ModelBuilder::new()
        .domain_entity("Assessment")
        .integer_identity("AssessmentIdentifier")
        .descriptor_property("GradeLevel", Some("Assessed"), false, true, false)
        .descriptor("GradeLevel")
        .build();
    let compiled = compile(&model).unwrap();
    let assessment = mappings_of(&compiled, "Assessment");

    match entry(assessment, "AssessedGradeLevelDescriptor") {
        DocumentPathEntry::Descriptor(descriptor) => {
            assert!(descriptor.is_reference);
            assert!(descriptor.is_descriptor);
            assert_eq!(descriptor.resource_name, "GradeLevel");
            assert_eq!(descriptor.path.as_str(), "$.assessedGradeLevelDescriptor");
            assert_eq!(descriptor.path_type, PathType::String);
        }
        other => panic!("expected descriptor entry, got {other:?}"),
    }
}

// The reserved school year enumeration resolves to the fixed core
// resource no matter where it is declared.
#[test]
fn school_year_entry_uses_fixed_core_resource() {
    let model = ModelBuilder::new()
        .domain_entity("Session")
        .string_identity("SessionName")
        .school_year_identity()
        .build();
    let compiled = compile(&model).unwrap();
    let session = mappings_of(&compiled, "Session");

    match entry(session, "SchoolYear") {
        DocumentPathEntry::Reference(reference) => {
            assert_eq!(reference.project_name, "Ed-Fi");
            assert_eq!(reference.resource_name, "SchoolYearType");
            assert_eq!(reference.reference_json_paths.len(), 1);
            assert_eq!(
                reference.reference_json_paths[0].identity_json_path.as_str(),
                "$.schoolYear"
            );
            assert_eq!(
                reference.reference_json_paths[0].reference_json_path.as_str(),
                "$.schoolYearTypeReference.schoolYear"
            );
        }
        other => panic!("expected reference entry, got {other:?}"),
    }
}

// A subclass surfaces its own and inherited properties, with a renamed
// base identity replaced by the renaming property.
#[test]
fn subclass_identity_rename_replaces_base_identity() {
    let model = ModelBuilder::new()
        .abstract_entity("EducationOrganization")
        .integer_identity("EducationOrganizationId")
        .integer_property("SuperclassProperty", true, false)
        .domain_entity_subclass("School", "EducationOrganization")
        .identity_rename("EducationOrganizationId")
        .integer_identity("SchoolId")
        .integer_property("SubclassProperty", true, false)
        .build();
    let compiled = compile(&model).unwrap();
    let school = mappings_of(&compiled, "School");

    let keys: Vec<&str> = school
        .document_paths_mapping
        .keys()
        .map(|k| k.as_str())
        .collect();
    assert_eq!(keys, vec!["SchoolId", "SubclassProperty", "SuperclassProperty"]);
    match entry(school, "SchoolId") {
        DocumentPathEntry::Scalar(scalar) => {
            assert_eq!(scalar.path.as_str(), "$.schoolId");
        }
        other => panic!("expected scalar entry, got {other:?}"),
    }
}

// Descriptor properties collect from the entity body and from its
// inline commons, with the inline common's role name recorded.
#[test]
fn descriptor_properties_collect_through_inline_commons() {
    let model = ModelBuilder::new()
        .domain_entity("EntityName")
        .string_identity("SectionIdentifier")
        .descriptor_property("EntryType", None, false, true, false)
        .inline_common_property("InlineCommonName", Some("Role"), true)
        .inline_common("InlineCommonName")
        .descriptor_property("DescriptorName", None, false, true, false)
        .descriptor("EntryType")
        .descriptor("DescriptorName")
        .build();
    let compiled = compile(&model).unwrap();
    let entity = mappings_of(&compiled, "EntityName");

    let collected = &entity.api_mapping.descriptor_collected_properties;
    assert_eq!(collected.len(), 2);
    assert_eq!(collected[0].property.name.as_ref(), "EntryType");
    assert!(collected[0].modifier.parent_prefixes.is_empty());
    assert_eq!(collected[1].property.name.as_ref(), "DescriptorName");
    assert_eq!(collected[1].modifier.parent_prefixes, vec!["Role"]);
}

// Descriptor entities have no document paths of their own.
#[test]
fn descriptor_entities_have_empty_document_paths() {
    let model = ModelBuilder::new()
        .domain_entity("Assessment")
        .integer_identity("AssessmentIdentifier")
        .descriptor_property("GradeLevel", None, false, true, false)
        .descriptor("GradeLevel")
        .build();
    let compiled = compile(&model).unwrap();
    let descriptor = mappings_of(&compiled, "GradeLevel");

    assert!(descriptor.document_paths_mapping.is_empty());
}
