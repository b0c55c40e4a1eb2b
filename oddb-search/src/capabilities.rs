//! Capability registration with a media-server host.
//!
//! The host owns the actual plugin contract; this module only describes
//! what the provider can do and hands that description to a registry.

use serde::Serialize;

use crate::types::{ImageType, MediaKind, PROVIDER_ID_KEY, PROVIDER_NAME};

/// One thing the provider can supply for a media kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "capability", rename_all = "lowercase")]
pub enum Capability {
    /// Images of the listed types.
    Images {
        /// Media kind covered
        kind: MediaKind,
        /// Image slots that can be filled
        image_types: Vec<ImageType>,
    },
    /// Search candidates and full metadata.
    Metadata {
        /// Media kind covered
        kind: MediaKind,
    },
}

impl Capability {
    /// Media kind this capability covers.
    pub fn kind(&self) -> MediaKind {
        match self {
            Capability::Images { kind, .. } | Capability::Metadata { kind } => *kind,
        }
    }
}

/// Everything the host needs to register this provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderDescriptor {
    /// Provider name shown by the host
    pub name: &'static str,
    /// Key under which subject ids are stored on host items
    pub provider_id_key: &'static str,
    /// What the provider can supply, per media kind
    pub capabilities: Vec<Capability>,
}

impl ProviderDescriptor {
    /// Image and metadata capabilities for movies, series and seasons.
    pub fn open_douban() -> Self {
        let capabilities = MediaKind::ALL
            .iter()
            .flat_map(|&kind| {
                [
                    Capability::Images {
                        kind,
                        image_types: vec![ImageType::Primary, ImageType::Backdrop],
                    },
                    Capability::Metadata { kind },
                ]
            })
            .collect();

        Self {
            name: PROVIDER_NAME,
            provider_id_key: PROVIDER_ID_KEY,
            capabilities,
        }
    }

    /// Whether any capability covers `kind`.
    pub fn supports(&self, kind: MediaKind) -> bool {
        self.capabilities.iter().any(|c| c.kind() == kind)
    }
}

/// Host-side sink for provider capabilities.
pub trait CapabilityRegistry {
    /// Records one capability offered by `provider`.
    fn register(&mut self, provider: &str, capability: Capability);
}

/// Hands every capability of the provider to the host registry.
pub fn register_capabilities(registry: &mut impl CapabilityRegistry) -> ProviderDescriptor {
    let descriptor = ProviderDescriptor::open_douban();
    for capability in &descriptor.capabilities {
        tracing::debug!(provider = descriptor.name, ?capability, "Registering capability");
        registry.register(descriptor.name, capability.clone());
    }
    descriptor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingRegistry(Vec<(String, Capability)>);

    impl CapabilityRegistry for RecordingRegistry {
        fn register(&mut self, provider: &str, capability: Capability) {
            self.0.push((provider.to_string(), capability));
        }
    }

    #[test]
    fn test_registers_both_capabilities_per_kind() {
        let mut registry = RecordingRegistry::default();
        let descriptor = register_capabilities(&mut registry);

        assert_eq!(registry.0.len(), 6);
        assert!(registry.0.iter().all(|(name, _)| name == PROVIDER_NAME));
        assert_eq!(descriptor.provider_id_key, PROVIDER_ID_KEY);

        for kind in MediaKind::ALL {
            assert!(descriptor.supports(kind));
            assert!(registry.0.iter().any(|(_, c)| *c == Capability::Metadata { kind }));
            assert!(registry.0.iter().any(|(_, c)| matches!(
                c,
                Capability::Images { kind: k, image_types }
                    if *k == kind && image_types == &[ImageType::Primary, ImageType::Backdrop]
            )));
        }
    }
}
