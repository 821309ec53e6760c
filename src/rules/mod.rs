// SPDX-License-Identifier: MIT

pub mod interpreter;
pub mod loader;
pub mod runner;
pub mod types;
