//! Shared test harness modules for the Voyager CLI.
#![expect(
    clippy::panic,
    reason = "tests panic on unexpected CLI outcomes"
)]

use super::*;

mod helpers;
