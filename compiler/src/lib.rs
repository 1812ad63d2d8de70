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

//! Compiles a declarative domain model into the structural contracts
//! a REST API needs: per-property JSON locations, flattened resource
//! identities, and identity-equality path pairs.

/// Command-line entry points
pub mod commands;

/// Compiler passes and mappings
pub mod compiler;

/// Compile manifest
pub mod manifest;

/// The domain model consumed by the compiler
pub mod model;

mod error;

pub use error::Error;
