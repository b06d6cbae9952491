// The infra module contains implementations of core traits.
// Each feature implementation goes in its own submodule.

#[path = "plane/mod.rs"]
pub mod plane;

#[path = "config/env_config.rs"]
pub mod config;
