//! # Integration tests against the public interface.
//!
//! Scenario tests for whole solving sessions: building a system, reading values back, editing
//! and removing. Split by theme:
//!
//! * `solving`: static systems that are built up once and read out
//! * `editing`: edit variables, suggested values and constraint removal
mod solving;
