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
use edfi_api_schema_tests::flattened_leaf_names;
use edfi_api_schema_tests::mappings_of;
use edfi_api_schema_tests::ModelBuilder;

fn section_model() -> api_schema_compiler::model::DomainModel {
    ModelBuilder::new()
        .domain_entity("Section")
        .string_identity("SectionIdentifier")
        .domain_entity_identity("CourseOffering")
        .domain_entity_property("ClassPeriod", true, true)
        .domain_entity("CourseOffering")
        .string_identity("LocalCourseCode")
        .domain_entity_identity("School")
        .domain_entity("ClassPeriod")
        .string_identity("ClassPeriodName")
        .domain_entity_identity("School")
        .domain_entity("School")
        .string_identity("SchoolId")
        .build()
}

// A single-scalar-identity entity flattens to that one leaf.
#[test]
fn school_flattens_to_its_single_identity() {
    let model = section_model();
    let compiled = compile(&model).unwrap();
    let school = mappings_of(&compiled, "School");

    assert_eq!(flattened_leaf_names(school), vec!["SchoolId"]);
    let fip = &school.api_mapping.flattened_identity_properties[0];
    assert_eq!(
        fip.property_paths.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
        vec!["SchoolId"]
    );
    assert!(school.api_mapping.reference_groups.is_empty());
}

// Reference expansions sort before the entity's own scalar because
// "CourseOffering" < "SectionIdentifier" alphabetically.
#[test]
fn section_flattens_in_alphabetical_pre_order() {
    let model = section_model();
    let compiled = compile(&model).unwrap();
    let section = mappings_of(&compiled, "Section");

    assert_eq!(
        flattened_leaf_names(section),
        vec!["LocalCourseCode", "SchoolId", "SectionIdentifier"]
    );
}

#[test]
fn section_flattened_chains_carry_prefix_paths() {
    let model = section_model();
    let compiled = compile(&model).unwrap();
    let section = mappings_of(&compiled, "Section");
    let fips = &section.api_mapping.flattened_identity_properties;

    assert_eq!(
        fips[0].property_paths.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
        vec!["CourseOffering", "CourseOffering.LocalCourseCode"]
    );
    assert_eq!(
        fips[1].property_paths.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
        vec![
            "CourseOffering",
            "CourseOffering.School",
            "CourseOffering.School.SchoolId"
        ]
    );
    assert_eq!(
        fips[2].property_paths.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
        vec!["SectionIdentifier"]
    );
}

// Reference groups cover all reference properties, identity or not,
// ascending by name.
#[test]
fn section_reference_groups_are_sorted() {
    let model = section_model();
    let compiled = compile(&model).unwrap();
    let section = mappings_of(&compiled, "Section");

    let groups: Vec<String> = section
        .api_mapping
        .reference_groups
        .iter()
        .map(|g| g.source_property.full_property_name())
        .collect();
    assert_eq!(groups, vec!["ClassPeriod", "CourseOffering"]);

    let course_offering = mappings_of(&compiled, "CourseOffering");
    let groups: Vec<String> = course_offering
        .api_mapping
        .reference_groups
        .iter()
        .map(|g| g.source_property.full_property_name())
        .collect();
    assert_eq!(groups, vec!["School"]);
}

// Flattened output does not depend on the order identities are
// declared in.
#[test]
fn flattening_is_declaration_order_independent() {
    let forward = ModelBuilder::new()
        .domain_entity("Section")
        .string_identity("SectionIdentifier")
        .domain_entity_identity("CourseOffering")
        .domain_entity("CourseOffering")
        .string_identity("LocalCourseCode")
        .domain_entity("School")
        .string_identity("SchoolId")
        .build();
    let reversed = ModelBuilder::new()
        .domain_entity("Section")
        .domain_entity_identity("CourseOffering")
        .string_identity("SectionIdentifier")
        .domain_entity("CourseOffering")
        .string_identity("LocalCourseCode")
        .domain_entity("School")
        .string_identity("SchoolId")
        .build();

    let compiled_forward = compile(&forward).unwrap();
    let compiled_reversed = compile(&reversed).unwrap();
    assert_eq!(
        flattened_leaf_names(mappings_of(&compiled_forward, "Section")),
        flattened_leaf_names(mappings_of(&compiled_reversed, "Section"))
    );
}

// Identities on an inline common belong to the identity of the entity
// carrying it, visible in the logical path under the inline common's
// name.
#[test]
fn inline_common_identities_are_pulled_up() {
    let model = ModelBuilder::new()
        .domain_entity("ClassPeriod")
        .string_identity("ClassPeriodName")
        .inline_common_property("MeetingTime", None, true)
        .inline_common("MeetingTime")
        .integer_identity("StartTime")
        .build();
    let compiled = compile(&model).unwrap();
    let class_period = mappings_of(&compiled, "ClassPeriod");

    assert_eq!(
        flattened_leaf_names(class_period),
        vec!["ClassPeriodName", "StartTime"]
    );
    let pulled = &class_period.api_mapping.flattened_identity_properties[1];
    assert_eq!(
        pulled.property_paths.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
        vec!["MeetingTime.StartTime"]
    );
}

// An identity reference through another reference expands to the full
// depth of the chain.
#[test]
fn transitive_expansion_reaches_arbitrary_depth() {
    let model = ModelBuilder::new()
        .domain_entity("Grade")
        .integer_identity("GradeIdentity")
        .domain_entity_identity("Section")
        .domain_entity("Section")
        .string_identity("SectionIdentifier")
        .domain_entity_identity("CourseOffering")
        .domain_entity("CourseOffering")
        .string_identity("LocalCourseCode")
        .domain_entity_identity("School")
        .domain_entity("School")
        .string_identity("SchoolId")
        .build();
    let compiled = compile(&model).unwrap();
    let grade = mappings_of(&compiled, "Grade");

    assert_eq!(
        flattened_leaf_names(grade),
        vec!["GradeIdentity", "LocalCourseCode", "SchoolId", "SectionIdentifier"]
    );
    let deep = &grade.api_mapping.flattened_identity_properties[2];
    assert_eq!(
        deep.leaf_path().as_str(),
        "Section.CourseOffering.School.SchoolId"
    );
}
