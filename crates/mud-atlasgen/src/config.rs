// Copyright (c) 2023 the Hearth contributors.
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::Path;

use anyhow::Context;
use mud_atlas::AtlasConfig;
use tracing::info;

/// Loads an atlas configuration file. Missing keys keep their defaults.
pub fn load_config(path: &Path) -> anyhow::Result<AtlasConfig> {
    info!("Loading configuration file from {:?}", path);
    let config = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to load config file at {:?}", path))?;
    toml::from_str(&config).context("Failed to deserialize config")
}
