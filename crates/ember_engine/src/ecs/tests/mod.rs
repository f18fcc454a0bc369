//! Cross-module tests: scenes feeding systems, and states driven by events

mod gameplay_pipeline;
