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

//! Covering links for merged-away flattened identities
//!
//! A chain merged away by a directive resolves to the same physical
//! identity as the chain at the directive's target path. This pass
//! links each merged-away flattened identity to the surviving one
//! found by substituting the source path prefix with the target path.

use crate::compiler::flatten::FlattenedIdentityProperty;
use crate::compiler::Error;

/// Link every merged-away entry in a flattened identity list to its
/// covering entry.
///
/// # Errors
///
/// Returns an error when the substituted target path matches no
/// surviving flattened identity; a well-formed model never does this,
/// so hitting it means upstream validation was skipped.
pub fn link_merge_covering<'a>(
    flattened: &mut [FlattenedIdentityProperty<'a>],
) -> Result<(), Error<'a>> {
    let mut links: Vec<(usize, usize)> = Vec::new();

    for (i, fip) in flattened.iter().enumerate() {
        let directive = match fip.merged_away_by {
            Some(directive) => directive,
            None => continue,
        };
        let leaf = fip.leaf_path().as_str();
        let chain_below_source = &leaf[directive.source_path.len()..];
        let covering_leaf = format!("{}{chain_below_source}", directive.target_path);

        let covering = flattened
            .iter()
            .position(|candidate| {
                candidate.merged_away_by.is_none()
                    && candidate.leaf_path().as_str() == covering_leaf
            })
            .ok_or_else(|| Error::UnresolvedMergeTarget(covering_leaf.clone()))?;
        links.push((i, covering));
    }

    for (merged, covering) in links {
        flattened[merged].merge_covered_by = Some(covering);
    }
    Ok(())
}
