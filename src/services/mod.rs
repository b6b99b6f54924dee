// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - clients for the hosted services.

pub mod generator;
pub mod payments;
pub mod photos;

pub use generator::GeneratorClient;
pub use payments::{CheckoutOutcome, PaymentsClient};
pub use photos::PhotoClient;
