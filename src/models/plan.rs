// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Subscription plans offered on the landing page.

use serde::Serialize;

/// A pricing tier. Amounts are monthly, in US cents.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Plan {
    pub id: &'static str,
    pub title: &'static str,
    pub monthly_price_cents: u32,
    pub features: &'static [&'static str],
}

pub const PLANS: [Plan; 3] = [
    Plan {
        id: "free",
        title: "Free",
        monthly_price_cents: 0,
        features: &[
            "200 cards/month",
            "Basic scheduling",
            "Text-only cards",
            "Community content",
        ],
    },
    Plan {
        id: "basic",
        title: "Basic",
        monthly_price_cents: 200,
        features: &[
            "1000 cards/month",
            "Advanced scheduling",
            "Media support",
            "Exclusive content",
        ],
    },
    Plan {
        id: "pro",
        title: "Pro",
        monthly_price_cents: 500,
        features: &[
            "3000 cards/month",
            "Advanced scheduling",
            "Media support",
            "Premium content",
        ],
    },
];

impl Plan {
    pub fn all() -> &'static [Plan] {
        &PLANS
    }

    pub fn find(id: &str) -> Option<&'static Plan> {
        PLANS.iter().find(|p| p.id.eq_ignore_ascii_case(id))
    }

    /// Free plans never go through checkout.
    pub fn is_paid(&self) -> bool {
        self.monthly_price_cents > 0
    }

    /// Display price, e.g. `$2`.
    pub fn price_label(&self) -> String {
        let dollars = self.monthly_price_cents / 100;
        match self.monthly_price_cents % 100 {
            0 => format!("${}", dollars),
            cents => format!("${}.{:02}", dollars, cents),
        }
    }
}
