use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Embedded storefront document for users flagged as sellers
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SellerProfile {
    /// Storefront display name
    pub name: String,
    /// Storefront logo URL
    pub logo: String,
    /// Storefront description
    #[serde(default)]
    pub description: String,
}

/// User entity - represents a user stored in MongoDB
///
/// Only the fields the catalog slice needs; the full account system
/// (credentials, verification, lockout) lives elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// User display name
    pub name: String,
    /// User email (unique)
    pub email: String,
    /// Whether this user may own products
    #[serde(default)]
    pub is_seller: bool,
    /// Whether this user has administrative access
    #[serde(default)]
    pub is_admin: bool,
    /// Storefront profile, present for sellers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller: Option<SellerProfile>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Seller projection attached to products when resolving the seller
/// reference ("populate"): just the storefront name and logo.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SellerSummary {
    /// The seller's user id
    pub id: Uuid,
    /// Storefront name (falls back to the account name)
    pub name: String,
    /// Storefront logo URL, when a profile exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

impl User {
    /// Build a new user. The id is a UUIDv7 so insertion order roughly
    /// matches id order.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        is_seller: bool,
        is_admin: bool,
        seller: Option<SellerProfile>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            email: email.into(),
            is_seller,
            is_admin,
            seller,
            created_at: now,
            updated_at: now,
        }
    }

    /// Project this user into the populate summary.
    pub fn seller_summary(&self) -> SellerSummary {
        match &self.seller {
            Some(profile) => SellerSummary {
                id: self.id,
                name: profile.name.clone(),
                logo: Some(profile.logo.clone()),
            },
            None => SellerSummary {
                id: self.id,
                name: self.name.clone(),
                logo: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seller_summary_uses_profile() {
        let user = User::new(
            "Maya Chen",
            "maya@example.com",
            true,
            false,
            Some(SellerProfile {
                name: "Maya's Outfitters".to_string(),
                logo: "/images/logo1.png".to_string(),
                description: "Quality apparel".to_string(),
            }),
        );

        let summary = user.seller_summary();
        assert_eq!(summary.id, user.id);
        assert_eq!(summary.name, "Maya's Outfitters");
        assert_eq!(summary.logo.as_deref(), Some("/images/logo1.png"));
    }

    #[test]
    fn test_seller_summary_falls_back_to_account_name() {
        let user = User::new("Jonas Weber", "jonas@example.com", false, false, None);

        let summary = user.seller_summary();
        assert_eq!(summary.name, "Jonas Weber");
        assert!(summary.logo.is_none());
    }

    #[test]
    fn test_user_serializes_id_as_underscore_id() {
        let user = User::new("Jonas Weber", "jonas@example.com", false, false, None);
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("_id").is_some());
        assert!(value.get("seller").is_none());
    }
}
