// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pricing plans for the landing page.

use crate::models::Plan;
use crate::AppState;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/plans", get(list_plans))
}

#[derive(Serialize)]
pub struct PlanSummary {
    #[serde(flatten)]
    pub plan: Plan,
    pub price: String,
}

#[derive(Serialize)]
pub struct PlansResponse {
    pub plans: Vec<PlanSummary>,
}

async fn list_plans() -> Json<PlansResponse> {
    let plans = Plan::all()
        .iter()
        .map(|plan| PlanSummary {
            plan: *plan,
            price: plan.price_label(),
        })
        .collect();
    Json(PlansResponse { plans })
}
