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

//! Validated name values used by the model

use serde::de::Error as DeError;
use serde::de::Visitor;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::str::FromStr;

/// Name validation errors.
#[derive(Debug)]
pub enum Error {
    InvalidIdentifier(String),
    InvalidProjectName(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::InvalidIdentifier(name) => write!(f, "invalid identifier {name}"),
            Self::InvalidProjectName(name) => write!(f, "invalid project name {name}"),
        }
    }
}

/// A model identifier must be ASCII alphanumeric and start with an
/// uppercase letter, e.g. `SchoolYearTypeReference`.
fn validate_identifier(s: &str) -> Result<(), Error> {
    let valid = s.chars().next().map_or(false, |c| c.is_ascii_uppercase())
        && s.chars().all(|c| c.is_ascii_alphanumeric());
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidIdentifier(s.to_string()))
    }
}

macro_rules! identifier_value {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq, Eq, Ord, PartialOrd, Hash)]
        pub struct $name(String);

        impl $name {
            #[must_use]
            pub const fn inner(&self) -> &String {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
                self.0.fmt(f)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = Error;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                validate_identifier(s)?;
                Ok(Self(s.to_string()))
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
                struct IdVisitor {}
                impl Visitor<'_> for IdVisitor {
                    type Value = $name;

                    fn expecting(&self, formatter: &mut Formatter<'_>) -> FmtResult {
                        formatter.write_str("identifier string")
                    }
                    fn visit_str<E: DeError>(self, value: &str) -> Result<Self::Value, E> {
                        value.parse().map_err(DeError::custom)
                    }
                }

                de.deserialize_string(IdVisitor {})
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
                ser.serialize_str(&self.0)
            }
        }
    };
}

identifier_value! {
    /// Name of an entity declaration, e.g. `CourseOffering`.
    EntityName
}

identifier_value! {
    /// Declared name of a property, e.g. `SectionIdentifier`.
    PropertyName
}

identifier_value! {
    /// Optional qualifier distinguishing multiple properties of the
    /// same target on one entity, e.g. `ClassOf` on a school year.
    RoleName
}

/// Name of the project a model belongs to, e.g. `Ed-Fi`. Unlike
/// identifiers, a project name may carry interior hyphens.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ProjectName(String);

impl ProjectName {
    #[must_use]
    pub const fn inner(&self) -> &String {
        &self.0
    }
}

impl Display for ProjectName {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        self.0.fmt(f)
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for ProjectName {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = s.chars().next().map_or(false, |c| c.is_ascii_uppercase())
            && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(Error::InvalidProjectName(s.to_string()))
        }
    }
}

impl<'de> Deserialize<'de> for ProjectName {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        struct ProjectNameVisitor {}
        impl Visitor<'_> for ProjectNameVisitor {
            type Value = ProjectName;

            fn expecting(&self, formatter: &mut Formatter<'_>) -> FmtResult {
                formatter.write_str("project name string")
            }
            fn visit_str<E: DeError>(self, value: &str) -> Result<Self::Value, E> {
                value.parse().map_err(DeError::custom)
            }
        }

        de.deserialize_string(ProjectNameVisitor {})
    }
}
