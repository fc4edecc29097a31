//! Core library components.
//!
//! This module contains the key store, the rotation engine, the
//! cross-process lock and settings resolution. Nothing in here prints.

pub mod config;
pub mod constants;
pub mod domain;
pub mod env;
pub mod rotation;
pub mod store;
pub mod types;
pub mod validation;
