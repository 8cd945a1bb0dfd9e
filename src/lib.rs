// ABOUTME: Library crate for the assessment draft wizard exposing its public API for the binary and tests

#![allow(missing_docs)]

pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod models;
pub mod sequencer;
pub mod shortcuts;
pub mod storage;
pub mod wizard;
