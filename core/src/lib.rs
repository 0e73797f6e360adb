// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.
//! # svcwatch core
//!
//! The service-query and filtering engine. Data flows strictly forward:
//!
//! [`validate`] → [`patterns`] → [`command`] → (external `wmic` via [`runner`])
//! → [`parser`] → [`filter`] → [`probe`], which sequences the stages and turns
//! the outcome into a report.

pub mod command;
pub mod filter;
pub mod parser;
pub mod patterns;
pub mod probe;
pub mod runner;
pub mod validate;
