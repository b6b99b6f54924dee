// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - User documents (the `flashcardSets` index array)
//! - Flashcard set documents (subcollection keyed by set name)
//!
//! The same operations run against an in-memory store when no GCP project is
//! configured, and against nothing at all in offline mode.

use crate::db::collections;
use crate::db::memory::MemoryStore;
use crate::error::AppError;
use crate::models::{FlashcardSet, FlashcardSetEntry, UserDoc};
use firestore::errors::{BackoffError, FirestoreError};
use futures_util::FutureExt;
use std::sync::Arc;

#[derive(Clone)]
enum Backend {
    Firestore(firestore::FirestoreDb),
    Memory(Arc<MemoryStore>),
    Offline,
}

/// Result of saving a flashcard set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOutcome {
    /// `false` when a set of the same name was overwritten
    pub created: bool,
}

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    backend: Backend,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            backend: Backend::Firestore(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            backend: Backend::Firestore(client),
        })
    }

    /// Create a store backed by process memory (local development, tests).
    pub fn new_in_memory() -> Self {
        Self {
            backend: Backend::Memory(Arc::new(MemoryStore::new())),
        }
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self {
            backend: Backend::Offline,
        }
    }

    fn offline() -> AppError {
        AppError::Database("Database not connected (offline mode)".to_string())
    }

    fn parent_path(
        client: &firestore::FirestoreDb,
        user_id: &str,
    ) -> Result<firestore::ParentPathBuilder, AppError> {
        client
            .parent_path(collections::USERS, user_id)
            .map_err(|e| AppError::Database(format!("Invalid user path: {}", e)))
    }

    // ─── User Document ───────────────────────────────────────────

    /// Get the user's root document.
    pub async fn get_user_doc(&self, user_id: &str) -> Result<Option<UserDoc>, AppError> {
        match &self.backend {
            Backend::Firestore(client) => client
                .fluent()
                .select()
                .by_id_in(collections::USERS)
                .obj()
                .one(user_id)
                .await
                .map_err(|e| AppError::Database(e.to_string())),
            Backend::Memory(store) => Ok(store.get_user_doc(user_id)),
            Backend::Offline => Err(Self::offline()),
        }
    }

    /// Create or replace the user's root document.
    pub async fn set_user_doc(&self, user_id: &str, doc: &UserDoc) -> Result<(), AppError> {
        match &self.backend {
            Backend::Firestore(client) => {
                let _: () = client
                    .fluent()
                    .update()
                    .in_col(collections::USERS)
                    .document_id(user_id)
                    .object(doc)
                    .execute()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                Ok(())
            }
            Backend::Memory(store) => {
                store.set_user_doc(user_id, doc.clone());
                Ok(())
            }
            Backend::Offline => Err(Self::offline()),
        }
    }

    /// List the user's set index, creating an empty user document on first use.
    pub async fn list_flashcard_sets(
        &self,
        user_id: &str,
    ) -> Result<Vec<FlashcardSetEntry>, AppError> {
        match self.get_user_doc(user_id).await? {
            Some(doc) => Ok(doc.flashcard_sets),
            None => {
                tracing::debug!(user_id, "Initializing empty user document");
                self.set_user_doc(user_id, &UserDoc::default()).await?;
                Ok(Vec::new())
            }
        }
    }

    // ─── Flashcard Sets ──────────────────────────────────────────

    /// Get one flashcard set document.
    pub async fn get_flashcard_set(
        &self,
        user_id: &str,
        name: &str,
    ) -> Result<Option<FlashcardSet>, AppError> {
        match &self.backend {
            Backend::Firestore(client) => {
                let parent_path = Self::parent_path(client, user_id)?;
                client
                    .fluent()
                    .select()
                    .by_id_in(collections::FLASHCARD_SETS)
                    .parent(&parent_path)
                    .obj()
                    .one(name)
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))
            }
            Backend::Memory(store) => Ok(store.get_flashcard_set(user_id, name)),
            Backend::Offline => Err(Self::offline()),
        }
    }

    /// Save a flashcard set: add it to the user's index and write the set
    /// document in one transaction.
    ///
    /// Saving under an existing name replaces the cards and leaves a single
    /// index entry. The index is read inside the transaction, so concurrent
    /// saves for the same user conflict and are retried instead of
    /// overwriting each other's entries.
    pub async fn save_flashcard_set(
        &self,
        user_id: &str,
        name: &str,
        set: &FlashcardSet,
    ) -> Result<SaveOutcome, AppError> {
        let client = match &self.backend {
            Backend::Firestore(client) => client,
            Backend::Memory(store) => {
                let created = store.save_flashcard_set(user_id, name, set.clone());
                return Ok(SaveOutcome { created });
            }
            Backend::Offline => return Err(Self::offline()),
        };

        let user_id = user_id.to_string();
        let name = name.to_string();
        let set = set.clone();

        let created = client
            .run_transaction(|db, transaction| {
                let user_id = user_id.clone();
                let name = name.clone();
                let set = set.clone();

                async move {
                    let mut user_doc: UserDoc = db
                        .fluent()
                        .select()
                        .by_id_in(collections::USERS)
                        .obj()
                        .one(&user_id)
                        .await?
                        .unwrap_or_default();
                    let created = user_doc.add_set(&name);
                    let parent_path = db.parent_path(collections::USERS, &user_id)?;

                    if created {
                        db.fluent()
                            .update()
                            .in_col(collections::USERS)
                            .document_id(&user_id)
                            .object(&user_doc)
                            .add_to_transaction(transaction)?;
                    }

                    db.fluent()
                        .update()
                        .in_col(collections::FLASHCARD_SETS)
                        .document_id(&name)
                        .parent(&parent_path)
                        .object(&set)
                        .add_to_transaction(transaction)?;

                    Ok::<_, BackoffError<FirestoreError>>(created)
                }
                .boxed()
            })
            .await
            .map_err(|e| AppError::Database(format!("Failed to save flashcard set: {}", e)))?;

        Ok(SaveOutcome { created })
    }

    /// Delete a flashcard set document and its index entry in one transaction.
    ///
    /// Returns `true` if the set was listed in the index. Deleting a set that
    /// does not exist succeeds.
    pub async fn delete_flashcard_set(&self, user_id: &str, name: &str) -> Result<bool, AppError> {
        let client = match &self.backend {
            Backend::Firestore(client) => client,
            Backend::Memory(store) => return Ok(store.delete_flashcard_set(user_id, name)),
            Backend::Offline => return Err(Self::offline()),
        };

        let user_id = user_id.to_string();
        let name = name.to_string();

        client
            .run_transaction(|db, transaction| {
                let user_id = user_id.clone();
                let name = name.clone();

                async move {
                    let mut user_doc: Option<UserDoc> = db
                        .fluent()
                        .select()
                        .by_id_in(collections::USERS)
                        .obj()
                        .one(&user_id)
                        .await?;
                    let listed = user_doc
                        .as_mut()
                        .map(|doc| doc.remove_set(&name))
                        .unwrap_or(false);
                    let parent_path = db.parent_path(collections::USERS, &user_id)?;

                    db.fluent()
                        .delete()
                        .from(collections::FLASHCARD_SETS)
                        .document_id(&name)
                        .parent(&parent_path)
                        .add_to_transaction(transaction)?;

                    if let (true, Some(doc)) = (listed, user_doc.as_ref()) {
                        db.fluent()
                            .update()
                            .in_col(collections::USERS)
                            .document_id(&user_id)
                            .object(doc)
                            .add_to_transaction(transaction)?;
                    }

                    Ok::<_, BackoffError<FirestoreError>>(listed)
                }
                .boxed()
            })
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete flashcard set: {}", e)))
    }
}
