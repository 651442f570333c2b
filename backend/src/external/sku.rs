//! SKU and code-artifact issuing
//!
//! The catalog treats the SKU as an opaque unique string and the artifact
//! as an opaque reference it stores but never interprets. Issuing is an
//! injected capability so tests can substitute a deterministic issuer.

use uuid::Uuid;

/// A freshly issued SKU together with its scannable-code artifact reference
#[derive(Debug, Clone)]
pub struct IssuedSku {
    pub sku: String,
    pub artifact_ref: String,
}

/// Capability for issuing a unique SKU plus a derived code artifact
pub trait SkuIssuer: Send + Sync {
    fn issue(&self, product_name: &str) -> IssuedSku;
}

/// Production issuer: `PRD` followed by eight hex characters of a random
/// UUID, with the artifact referenced under a configured base path.
#[derive(Debug, Clone)]
pub struct QrSkuIssuer {
    artifact_base_url: String,
}

impl QrSkuIssuer {
    pub fn new(artifact_base_url: impl Into<String>) -> Self {
        Self {
            artifact_base_url: artifact_base_url.into(),
        }
    }
}

impl SkuIssuer for QrSkuIssuer {
    fn issue(&self, _product_name: &str) -> IssuedSku {
        let sku = format!(
            "PRD{}",
            &Uuid::new_v4().simple().to_string()[..8].to_uppercase()
        );
        let artifact_ref = format!("{}/{}.png", self.artifact_base_url.trim_end_matches('/'), sku);

        IssuedSku { sku, artifact_ref }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_issued_sku_format() {
        let issuer = QrSkuIssuer::new("/static/qrcodes");
        let issued = issuer.issue("Rice 5kg");

        assert_eq!(issued.sku.len(), 11);
        assert!(issued.sku.starts_with("PRD"));
        assert!(issued.sku[3..]
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        assert!(shared::validation::validate_sku(&issued.sku).is_ok());
    }

    #[test]
    fn test_artifact_ref_derived_from_sku() {
        let issuer = QrSkuIssuer::new("/static/qrcodes/");
        let issued = issuer.issue("Rice 5kg");

        assert_eq!(
            issued.artifact_ref,
            format!("/static/qrcodes/{}.png", issued.sku)
        );
    }

    #[test]
    fn test_issued_skus_are_unique() {
        let issuer = QrSkuIssuer::new("/static/qrcodes");
        let skus: HashSet<String> = (0..1000).map(|_| issuer.issue("Rice 5kg").sku).collect();

        assert_eq!(skus.len(), 1000);
    }
}
