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

//! Name munging for JSON field synthesis
//!
//! All model names are PascalCase; JSON fields are camelCase with
//! acronym-aware casing. Stripping and pluralization are idempotent:
//! re-applying either to its own output is a no-op.

/// Lowercase the leading word of a PascalCase name. A leading acronym
/// is lowercased entirely (`URI` becomes `uri`, `IEPBeginDate` becomes
/// `iepBeginDate`) while interior acronyms are left alone
/// (`RequiredURIs` becomes `requiredURIs`).
#[must_use]
pub fn uncapitalize(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let run = chars
        .iter()
        .take_while(|c| c.is_ascii_uppercase())
        .count();

    let lower_until = if run == chars.len() {
        // all-caps name lowercases entirely
        run
    } else if run > 1 {
        // the last uppercase of a leading acronym starts the next word
        run - 1
    } else {
        1
    };

    chars
        .iter()
        .enumerate()
        .map(|(i, c)| {
            if i < lower_until {
                c.to_ascii_lowercase()
            } else {
                *c
            }
        })
        .collect()
}

/// Regular English pluralization: trailing consonant + `y` becomes
/// `ies`, everything else appends `s`. Already-plural input is left
/// alone.
#[must_use]
pub fn pluralize(name: &str) -> String {
    if name.ends_with('s') {
        return name.to_string();
    }
    let chars: Vec<char> = name.chars().collect();
    let consonant_y = chars.len() >= 2
        && chars[chars.len() - 1] == 'y'
        && !matches!(chars[chars.len() - 2], 'a' | 'e' | 'i' | 'o' | 'u');
    if consonant_y {
        let mut plural: String = chars[..chars.len() - 1].iter().collect();
        plural.push_str("ies");
        plural
    } else {
        let mut plural = name.to_string();
        plural.push('s');
        plural
    }
}

/// Prepend `prefix` to `name` unless `name` already starts with it.
#[must_use]
pub fn prepend_prefix_with_collapse(name: &str, prefix: &str) -> String {
    if prefix.is_empty() || name.starts_with(prefix) {
        name.to_string()
    } else {
        let mut prefixed = prefix.to_string();
        prefixed.push_str(name);
        prefixed
    }
}

/// Word-boundary suffixes of a PascalCase name, longest first. The
/// whole name is always a candidate.
fn name_suffixes(name: &str) -> Vec<&str> {
    let chars: Vec<char> = name.chars().collect();
    let mut suffixes = vec![name];
    for i in 1..chars.len() {
        if chars[i].is_ascii_uppercase() && chars[i - 1].is_ascii_lowercase() {
            let byte_index = name
                .char_indices()
                .nth(i)
                .map(|(b, _)| b)
                .unwrap_or(name.len());
            suffixes.push(&name[byte_index..]);
        }
    }
    suffixes
}

/// Strip a leading repetition of the owning entity's name, or of a
/// word-boundary suffix of it, from a property name. The longest match
/// wins; stripping never empties the name. `AssessmentScore` on
/// `ObjectiveAssessment` strips to `Score`; `SuffixName` stays put on
/// a second application.
#[must_use]
pub fn strip_entity_prefix(name: &str, entity_name: &str) -> String {
    name_suffixes(entity_name)
        .into_iter()
        .filter(|suffix| name.starts_with(suffix) && name.len() > suffix.len())
        .max_by_key(|suffix| suffix.len())
        .map_or_else(|| name.to_string(), |suffix| name[suffix.len()..].to_string())
}
