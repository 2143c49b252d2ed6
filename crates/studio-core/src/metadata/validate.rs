//! Metadata validation, run synchronously at registration time

use super::ComponentMetadata;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    #[error("component '{component}' declares variant id '{id}' more than once")]
    DuplicateVariantId { component: String, id: String },

    #[error("component '{component}' has default variant '{default}' which is not among its variants")]
    UnknownDefaultVariant { component: String, default: String },

    #[error("component '{component}' declares no variants")]
    EmptyVariantSet { component: String },

    #[error("component '{component}' is missing required field '{field}'")]
    MissingRequiredField {
        component: String,
        field: &'static str,
    },
}

/// Check a metadata document for structural defects.
///
/// Succeeds iff the required fields are present, `variants` is non-empty, all
/// variant ids are pairwise distinct and `default_variant` names one of them.
pub fn validate(metadata: &ComponentMetadata) -> Result<(), MetadataError> {
    let component = if metadata.name.trim().is_empty() {
        "<unnamed>".to_string()
    } else {
        metadata.name.clone()
    };

    if metadata.name.trim().is_empty() {
        return Err(MetadataError::MissingRequiredField {
            component,
            field: "name",
        });
    }
    if metadata.component_type.is_none() {
        return Err(MetadataError::MissingRequiredField {
            component,
            field: "type",
        });
    }
    if metadata.default_variant.trim().is_empty() {
        return Err(MetadataError::MissingRequiredField {
            component,
            field: "defaultVariant",
        });
    }

    if metadata.variants.is_empty() {
        return Err(MetadataError::EmptyVariantSet { component });
    }

    let mut seen = HashSet::with_capacity(metadata.variants.len());
    for variant in &metadata.variants {
        if variant.id.trim().is_empty() {
            return Err(MetadataError::MissingRequiredField {
                component,
                field: "variants[].id",
            });
        }
        if !seen.insert(variant.id.as_str()) {
            return Err(MetadataError::DuplicateVariantId {
                component,
                id: variant.id.clone(),
            });
        }
    }

    if !seen.contains(metadata.default_variant.as_str()) {
        return Err(MetadataError::UnknownDefaultVariant {
            component,
            default: metadata.default_variant.clone(),
        });
    }

    Ok(())
}
