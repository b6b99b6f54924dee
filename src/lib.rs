// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! FlashMinds: generate, store and study flashcard sets
//!
//! This crate provides the backend API for the FlashMinds web app. Card
//! generation, storage, sign-in and payments are handled by hosted services;
//! this service validates requests, keeps the per-user set index consistent
//! and talks to those services on the user's behalf.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::FirestoreDb;
use services::{GeneratorClient, PaymentsClient, PhotoClient};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub generator: GeneratorClient,
    pub payments: PaymentsClient,
    pub photos: PhotoClient,
}

impl AppState {
    /// Build the hosted-service clients described by `config`.
    pub fn new(config: Config, db: FirestoreDb) -> Self {
        let generator = GeneratorClient::new(config.generation_api_url.clone());
        let payments = PaymentsClient::new(
            config.stripe_api_base.clone(),
            config.stripe_secret_key.clone(),
        );
        let photos = PhotoClient::new(
            config.pexels_api_base.clone(),
            config.pexels_api_key.clone(),
        );

        Self {
            config,
            db,
            generator,
            payments,
            photos,
        }
    }
}
