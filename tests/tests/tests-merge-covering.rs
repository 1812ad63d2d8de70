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
use api_schema_compiler::model::DomainModel;
use edfi_api_schema_tests::flattened_leaf_names;
use edfi_api_schema_tests::mappings_of;
use edfi_api_schema_tests::ModelBuilder;

/// The grading period fixture: a role named reference whose school and
/// school year are declared equal to the ones reached through a long
/// association chain.
fn grade_model() -> DomainModel {
    ModelBuilder::new()
        .domain_entity("Grade")
        .domain_entity_identity_role("GradingPeriod", "GradingPeriod")
        .merge_directive(
            "GradingPeriod.School",
            "StudentSectionAssociation.Section.CourseOffering.Session.School",
        )
        .merge_directive(
            "GradingPeriod.SchoolYear",
            "StudentSectionAssociation.Section.CourseOffering.Session.SchoolYear",
        )
        .association_identity("StudentSectionAssociation")
        .domain_entity("Student")
        .integer_identity("StudentId")
        .domain_entity("CourseOffering")
        .domain_entity_identity("Session")
        .domain_entity_identity("School")
        .merge_directive("School", "Session.School")
        .domain_entity("Section")
        .domain_entity_identity("CourseOffering")
        .domain_entity("Session")
        .domain_entity_identity("School")
        .school_year_identity()
        .domain_entity("GradingPeriod")
        .domain_entity_identity("School")
        .school_year_identity()
        .integer_identity("GradingPeriodIdentity")
        .domain_entity("School")
        .integer_identity("SchoolId")
        .association("StudentSectionAssociation")
        .domain_entity_identity("Student")
        .domain_entity_identity("Section")
        .build()
}

#[test]
fn merged_away_chain_points_to_covering_chain() {
    let model = grade_model();
    let compiled = compile(&model).unwrap();
    let grade = mappings_of(&compiled, "Grade");
    let fips = &grade.api_mapping.flattened_identity_properties;

    assert_eq!(
        fips[1].property_paths.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
        vec![
            "GradingPeriod",
            "GradingPeriod.School",
            "GradingPeriod.School.SchoolId"
        ]
    );
    assert!(fips[1].merged_away_by.is_some());

    let covering = &fips[fips[1].merge_covered_by.unwrap()];
    assert_eq!(
        covering.property_paths.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
        vec![
            "StudentSectionAssociation",
            "StudentSectionAssociation.Section",
            "StudentSectionAssociation.Section.CourseOffering",
            "StudentSectionAssociation.Section.CourseOffering.Session",
            "StudentSectionAssociation.Section.CourseOffering.Session.School",
            "StudentSectionAssociation.Section.CourseOffering.Session.School.SchoolId"
        ]
    );
}

// The school year side of the unification keeps both chains: school
// year enumerations are never merged away.
#[test]
fn school_year_chains_are_never_merged_away() {
    let model = grade_model();
    let compiled = compile(&model).unwrap();
    let grade = mappings_of(&compiled, "Grade");

    let school_year_fips: Vec<_> = grade
        .api_mapping
        .flattened_identity_properties
        .iter()
        .filter(|fip| fip.leaf_path().as_str().ends_with("SchoolYear"))
        .collect();
    assert_eq!(school_year_fips.len(), 2);
    assert!(school_year_fips.iter().all(|fip| fip.merged_away_by.is_none()));
}

// A directive between sibling identity references on the same entity.
#[test]
fn direct_merge_collapses_to_one_physical_identity() {
    let model = grade_model();
    let compiled = compile(&model).unwrap();
    let course_offering = mappings_of(&compiled, "CourseOffering");
    let fips = &course_offering.api_mapping.flattened_identity_properties;

    assert_eq!(
        flattened_leaf_names(course_offering),
        vec!["SchoolId", "SchoolId", "SchoolYear"]
    );
    assert!(fips[0].merged_away_by.is_some());
    assert_eq!(fips[0].leaf_path().as_str(), "School.SchoolId");
    assert_eq!(fips[0].merge_covered_by, Some(1));
    assert_eq!(fips[1].leaf_path().as_str(), "Session.School.SchoolId");

    let surviving: Vec<_> = course_offering
        .api_mapping
        .flattened_identity_properties_omitting_merges()
        .map(|fip| fip.leaf_path().as_str().to_string())
        .collect();
    assert_eq!(surviving, vec!["Session.School.SchoolId", "Session.SchoolYear"]);
}

// Declaring the same directive twice changes nothing.
#[test]
fn merge_application_is_idempotent() {
    let once = grade_model();
    let twice = ModelBuilder::new()
        .domain_entity("CourseOffering")
        .domain_entity_identity("Session")
        .domain_entity_identity("School")
        .merge_directive("School", "Session.School")
        .merge_directive("School", "Session.School")
        .domain_entity("Session")
        .domain_entity_identity("School")
        .school_year_identity()
        .domain_entity("School")
        .integer_identity("SchoolId")
        .build();

    let compiled_once = compile(&once).unwrap();
    let compiled_twice = compile(&twice).unwrap();

    let once_mapping = mappings_of(&compiled_once, "CourseOffering");
    let twice_mapping = mappings_of(&compiled_twice, "CourseOffering");
    assert_eq!(
        flattened_leaf_names(once_mapping),
        flattened_leaf_names(twice_mapping)
    );
    assert_eq!(
        once_mapping
            .api_mapping
            .flattened_identity_properties_omitting_merges()
            .count(),
        twice_mapping
            .api_mapping
            .flattened_identity_properties_omitting_merges()
            .count()
    );
}

// A role named grading period reference sorts its expansion before
// the entity's own identity.
#[test]
fn report_card_orders_expansion_before_own_identity() {
    let model = ModelBuilder::new()
        .domain_entity("ReportCard")
        .integer_identity("ReportCardIdentity")
        .domain_entity_identity_role("GradingPeriod", "GradingPeriod")
        .domain_entity("GradingPeriod")
        .domain_entity_identity("School")
        .school_year_identity()
        .integer_identity("GradingPeriodIdentity")
        .domain_entity("School")
        .integer_identity("SchoolId")
        .build();
    let compiled = compile(&model).unwrap();
    let report_card = mappings_of(&compiled, "ReportCard");

    assert_eq!(
        flattened_leaf_names(report_card),
        vec!["GradingPeriodIdentity", "SchoolId", "SchoolYear", "ReportCardIdentity"]
    );
}

// An unresolvable merge source is a model definition error and aborts
// the compile.
#[test]
fn unresolved_merge_source_fails_compilation() {
    let model = ModelBuilder::new()
        .domain_entity("CourseOffering")
        .domain_entity_identity("Session")
        .domain_entity_identity("School")
        .merge_directive("NoSuchProperty", "Session.School")
        .domain_entity("Session")
        .domain_entity_identity("School")
        .domain_entity("School")
        .integer_identity("SchoolId")
        .build();

    assert!(compile(&model).is_err());
}
