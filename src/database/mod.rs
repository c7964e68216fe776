// ABOUTME: Persistence layer for user-registered menus
// ABOUTME: Re-exports the JSON-file-backed MenuStore and its error type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// JSON-file-backed registered menu store
pub mod menu_store;

pub use menu_store::{MenuStore, MenuStoreError};
