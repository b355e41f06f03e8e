//! Built-in sample users for development environments.

use crate::models::{SellerProfile, User};

/// Sample users inserted by the seed endpoint: one admin who is also a
/// seller (so the product seed has an owner to attach to) and one plain
/// customer.
pub fn sample_users() -> Vec<User> {
    vec![
        User::new(
            "Maya Chen",
            "maya@example.com",
            true,
            true,
            Some(SellerProfile {
                name: "Maya's Outfitters".to_string(),
                logo: "/images/logo1.png".to_string(),
                description: "Quality apparel and accessories".to_string(),
            }),
        ),
        User::new("Jonas Weber", "jonas@example.com", false, false, None),
    ]
}
