/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Schema registry with composite-definition caching.
//!
//! The registry answers "what does field N look like under version V and
//! network W" in O(1): at most three hash lookups on a miss, one on a hit.
//! Composite results are cached per `(field, version, network)` on first use
//! so hot parse loops resolve each field once.

use crate::overlays::{self, FormatRule};
use crate::schema::FieldDef;
use crate::{base::BASE_FIELDS, overlays::required_fields};
use ironiso_core::{CardNetwork, IsoVersion};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

type CacheKey = (u16, IsoVersion, Option<CardNetwork>);

/// Immutable schema tables plus a composite-lookup cache.
///
/// A registry is cheap to share: parser, builder, and validator instances
/// hold an `Arc` to the same one.
#[derive(Debug)]
pub struct SchemaRegistry {
    base: HashMap<u16, FieldDef>,
    versions: HashMap<IsoVersion, HashMap<u16, FieldDef>>,
    networks: HashMap<CardNetwork, HashMap<u16, FieldDef>>,
    cache: RwLock<HashMap<CacheKey, Option<FieldDef>>>,
}

impl SchemaRegistry {
    /// Builds a registry from the built-in base, version, and network tables.
    #[must_use]
    pub fn new() -> Self {
        let base = BASE_FIELDS.iter().copied().collect();

        let mut versions = HashMap::new();
        for version in [IsoVersion::V1993, IsoVersion::V2003] {
            versions.insert(
                version,
                overlays::version_overlay(version).iter().copied().collect(),
            );
        }

        let mut networks = HashMap::new();
        for network in CardNetwork::ALL {
            networks.insert(
                network,
                overlays::network_overlay(network).iter().copied().collect(),
            );
        }

        Self {
            base,
            versions,
            networks,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the process-wide shared registry.
    #[must_use]
    pub fn global() -> Arc<Self> {
        static GLOBAL: OnceLock<Arc<SchemaRegistry>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(Self::new())))
    }

    /// Resolves the effective definition for a field.
    ///
    /// Priority order: network overlay, then version overlay, then the base
    /// table. The first table that defines the field wins.
    ///
    /// # Arguments
    /// * `field` - The field number (0-128)
    /// * `version` - The protocol version in effect
    /// * `network` - The card network in effect, if known
    #[must_use]
    pub fn definition_of(
        &self,
        field: u16,
        version: IsoVersion,
        network: Option<CardNetwork>,
    ) -> Option<FieldDef> {
        let key = (field, version, network);
        if let Some(cached) = self.cache.read().get(&key) {
            return *cached;
        }

        let resolved = self.resolve(field, version, network);
        self.cache.write().insert(key, resolved);
        resolved
    }

    fn resolve(
        &self,
        field: u16,
        version: IsoVersion,
        network: Option<CardNetwork>,
    ) -> Option<FieldDef> {
        if let Some(net) = network {
            if let Some(def) = self.networks.get(&net).and_then(|t| t.get(&field)) {
                return Some(*def);
            }
        }
        if let Some(def) = self.versions.get(&version).and_then(|t| t.get(&field)) {
            return Some(*def);
        }
        self.base.get(&field).copied()
    }

    /// Returns the description of a field's effective definition.
    #[must_use]
    pub fn describe(
        &self,
        field: u16,
        version: IsoVersion,
        network: Option<CardNetwork>,
    ) -> Option<&'static str> {
        self.definition_of(field, version, network)
            .map(|def| def.description)
    }

    /// Returns the fields a network requires in every message.
    #[must_use]
    pub fn required_fields(&self, network: CardNetwork) -> &'static [u16] {
        required_fields(network)
    }

    /// Returns the format rules a network imposes on individual fields.
    #[must_use]
    pub fn format_rules(&self, network: CardNetwork) -> &'static [(u16, FormatRule)] {
        overlays::format_rules(network)
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
