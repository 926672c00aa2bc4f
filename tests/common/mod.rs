//! Common test utilities for geogrids.
//!
//! Shared field generators and assertions for the integration tests.

#![allow(dead_code)]

pub mod assertions;
pub mod image_utils;
pub mod test_data;
