// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
mod envfile;
mod settings;

pub use envfile::EnvFile;
pub use settings::Settings;
