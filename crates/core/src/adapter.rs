//! Mapping between remote licenses and storefront products.

use crate::types::{License, Price, Product, ProductId, UpdateLicenseRequest};

/// Image used when a license has no `image_url`.
pub const DEFAULT_PRODUCT_IMAGE: &str = "/default-product-image.png";

const DEFAULT_PLATFORMS: &str = "Windows 10 & 11 (All Version) Supported";
const DEFAULT_LAUNCHERS: &str = "Steam, Battle.Net Supported";
const DEFAULT_RECOMMENDATIONS: &str = "Alternate Accounts Preffered";
const SPOOFER_FEATURE: &str = "🔗 Built-In Spoofer";

/// Stock assigned by [`product_to_license`].
pub const DEFAULT_STOCK: i64 = 10;
/// Category assigned by [`product_to_license`].
pub const DEFAULT_CATEGORY: &str = "Gaming";

/// Features shown when a license describes none of its own.
#[must_use]
pub fn default_features() -> Vec<String> {
    vec![
        format!("🔑 {DEFAULT_PLATFORMS}"),
        format!("💾 {DEFAULT_LAUNCHERS}"),
        format!("🏆 {DEFAULT_RECOMMENDATIONS}"),
    ]
}

/// Convert a remote license into a display product.
///
/// Empty strings count as absent. A license without an ID gets a fresh
/// UUID-based ID, so two such licenses never collide.
#[must_use]
pub fn license_to_product(license: &License) -> Product {
    let mut features = Vec::new();
    if let Some(platforms) = present(license.supported_platforms.as_deref()) {
        features.push(format!("🔑 {platforms}"));
    }
    if let Some(launchers) = present(license.supported_launchers.as_deref()) {
        features.push(format!("💾 {launchers}"));
    }
    if license.has_spoofer {
        features.push(SPOOFER_FEATURE.to_string());
    }
    if let Some(recommendations) = present(license.recommendations.as_deref()) {
        features.push(format!("🏆 {recommendations}"));
    }
    if let Some(version) = present(license.product_version.as_deref()) {
        features.push(format!("📦 Version: {version}"));
    }
    if let Some(language) = present(license.language.as_deref()) {
        features.push(format!("🌐 Language: {language}"));
    }
    if features.is_empty() {
        features = default_features();
    }

    let id = license
        .license_id
        .as_ref()
        .filter(|id| !id.as_str().is_empty())
        .map_or_else(ProductId::generate, |id| ProductId::from(id.clone()));

    Product {
        id,
        name: license.product_name.clone(),
        price: Price::from_amount(license.price),
        image: present(license.image_url.as_deref())
            .unwrap_or(DEFAULT_PRODUCT_IMAGE)
            .to_string(),
        description: present(license.description.as_deref()).map_or_else(
            || format!("License for {}", license.product_name),
            str::to_string,
        ),
        features,
    }
}

/// Seed an edit form from a display product.
///
/// This is not an inverse of [`license_to_product`]: platform, launcher,
/// recommendation, stock and category are fixed defaults, not recovered from
/// the product's features.
#[must_use]
pub fn product_to_license(product: &Product) -> UpdateLicenseRequest {
    UpdateLicenseRequest {
        product_name: Some(product.name.clone()),
        description: Some(product.description.clone()),
        price: Some(product.price.as_f64()),
        image_url: Some(product.image.clone()),
        supported_platforms: Some(DEFAULT_PLATFORMS.to_string()),
        supported_launchers: Some(DEFAULT_LAUNCHERS.to_string()),
        recommendations: Some(DEFAULT_RECOMMENDATIONS.to_string()),
        has_spoofer: Some(true),
        is_active: Some(true),
        stock_quantity: Some(DEFAULT_STOCK),
        category: Some(DEFAULT_CATEGORY.to_string()),
        ..UpdateLicenseRequest::default()
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::LicenseId;

    fn bare_license() -> License {
        License {
            license_id: None,
            product_name: "RAINBOW SIX UNLOCKALL".to_string(),
            description: None,
            price: 150_000.0,
            supported_platforms: None,
            supported_launchers: None,
            recommendations: None,
            product_version: None,
            has_spoofer: false,
            language: None,
            create_at: None,
            update_at: None,
            stock_quantity: 0,
            is_active: true,
            image_url: None,
            category: None,
        }
    }

    #[test]
    fn test_bare_license_uses_all_fallbacks() {
        let product = license_to_product(&bare_license());
        assert!(product.id.as_str().starts_with("license-"));
        assert_eq!(product.name, "RAINBOW SIX UNLOCKALL");
        assert_eq!(product.price, Price::new(150_000));
        assert_eq!(product.image, DEFAULT_PRODUCT_IMAGE);
        assert_eq!(product.description, "License for RAINBOW SIX UNLOCKALL");
        assert_eq!(
            product.features,
            vec![
                "🔑 Windows 10 & 11 (All Version) Supported",
                "💾 Steam, Battle.Net Supported",
                "🏆 Alternate Accounts Preffered",
            ]
        );
    }

    #[test]
    fn test_full_license_feature_order() {
        let license = License {
            license_id: Some(LicenseId::new("lic-1")),
            description: Some("Unlock everything".to_string()),
            supported_platforms: Some("Windows 11".to_string()),
            supported_launchers: Some("Steam".to_string()),
            recommendations: Some("Use alts".to_string()),
            product_version: Some("2.1".to_string()),
            has_spoofer: true,
            language: Some("ES".to_string()),
            image_url: Some("https://cdn/x.png".to_string()),
            ..bare_license()
        };

        let product = license_to_product(&license);
        assert_eq!(product.id, ProductId::new("lic-1"));
        assert_eq!(product.image, "https://cdn/x.png");
        assert_eq!(product.description, "Unlock everything");
        assert_eq!(
            product.features,
            vec![
                "🔑 Windows 11",
                "💾 Steam",
                "🔗 Built-In Spoofer",
                "🏆 Use alts",
                "📦 Version: 2.1",
                "🌐 Language: ES",
            ]
        );
    }

    #[test]
    fn test_spoofer_only_skips_defaults() {
        let license = License {
            has_spoofer: true,
            ..bare_license()
        };
        assert_eq!(
            license_to_product(&license).features,
            vec!["🔗 Built-In Spoofer"]
        );
    }

    #[test]
    fn test_empty_strings_count_as_absent() {
        let license = License {
            license_id: Some(LicenseId::new("")),
            description: Some(String::new()),
            image_url: Some(String::new()),
            language: Some(String::new()),
            ..bare_license()
        };
        let product = license_to_product(&license);
        assert!(product.id.as_str().starts_with("license-"));
        assert_eq!(product.image, DEFAULT_PRODUCT_IMAGE);
        assert_eq!(product.features, default_features());
    }

    #[test]
    fn test_missing_ids_do_not_collide() {
        let a = license_to_product(&bare_license());
        let b = license_to_product(&bare_license());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_product_to_license_is_lossy_seed() {
        let product = license_to_product(&License {
            license_id: Some(LicenseId::new("lic-9")),
            supported_platforms: Some("Linux".to_string()),
            stock_quantity: 99,
            ..bare_license()
        });

        let seed = product_to_license(&product);
        assert_eq!(seed.product_name.as_deref(), Some("RAINBOW SIX UNLOCKALL"));
        assert_eq!(seed.price, Some(150_000.0));
        assert_eq!(
            seed.supported_platforms.as_deref(),
            Some("Windows 10 & 11 (All Version) Supported")
        );
        assert_eq!(seed.stock_quantity, Some(DEFAULT_STOCK));
        assert_eq!(seed.category.as_deref(), Some("Gaming"));
        assert_eq!(seed.has_spoofer, Some(true));
        assert!(seed.validate().is_ok());
    }
}
