/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # IronIso Pool
//!
//! A bounded, mutex-guarded pool of reusable [`IsoMessage`] records.
//!
//! Message records are small and short-lived, so most deployments should not
//! need a pool at all; it exists for the throughput ceiling where allocator
//! pressure shows up in profiles. Acquire and release take a brief lock and
//! never block on anything else.
//!
//! A released message must no longer be referenced by the caller; its fields,
//! raw string, bitmap, and EMV data are cleared before it is recycled.

use ironiso_core::{CardNetwork, FieldValue, IsoMessage, IsoVersion, Mti};
use parking_lot::Mutex;
use std::collections::BTreeMap;

/// Default pool capacity.
pub const DEFAULT_CAPACITY: usize = 100;

/// Bounded pool of reusable message records.
#[derive(Debug)]
pub struct MessagePool {
    pool: Mutex<Vec<IsoMessage>>,
    capacity: usize,
}

impl MessagePool {
    /// Creates a pool that retains at most `capacity` released messages.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            pool: Mutex::new(Vec::with_capacity(capacity)),
            capacity,
        }
    }

    /// Takes a message from the pool, or allocates one when empty, and
    /// initialises it with the given state.
    ///
    /// # Arguments
    /// * `mti` - Message type indicator
    /// * `fields` - Data fields for the message
    /// * `version` - Protocol version
    /// * `network` - Card network, if known
    pub fn acquire(
        &self,
        mti: Mti,
        fields: BTreeMap<u16, FieldValue>,
        version: IsoVersion,
        network: Option<CardNetwork>,
    ) -> IsoMessage {
        let recycled = self.pool.lock().pop();

        match recycled {
            Some(mut msg) => {
                msg.mti = mti;
                msg.fields = fields;
                msg.version = version;
                msg.network = network;
                msg
            }
            None => {
                let mut msg = IsoMessage::new(mti, fields).with_version(version);
                msg.network = network;
                msg
            }
        }
    }

    /// Returns a message to the pool after clearing its state.
    ///
    /// The message is dropped instead when the pool is already at capacity.
    pub fn release(&self, mut msg: IsoMessage) {
        msg.fields.clear();
        msg.raw.clear();
        msg.bitmap = None;
        msg.emv = None;
        msg.network = None;

        let mut pool = self.pool.lock();
        if pool.len() < self.capacity {
            pool.push(msg);
        }
    }

    /// Drops every pooled message.
    pub fn clear(&self) {
        self.pool.lock().clear();
    }

    /// Returns the number of messages currently pooled.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pool.lock().len()
    }

    /// Returns true if no messages are pooled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pool.lock().is_empty()
    }

    /// Returns the maximum number of retained messages.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for MessagePool {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> BTreeMap<u16, FieldValue> {
        let mut fields = BTreeMap::new();
        fields.insert(11, FieldValue::text("123456"));
        fields
    }

    #[test]
    fn test_acquire_from_empty_pool() {
        let pool = MessagePool::new(4);
        let msg = pool.acquire(
            Mti::new("0100").unwrap(),
            fields(),
            IsoVersion::V1987,
            None,
        );
        assert_eq!(msg.mti.as_str(), "0100");
        assert_eq!(msg.field_str(11), Some("123456"));
        assert_eq!(pool.len(), 0);
    }

    #[test]
    fn test_release_clears_state() {
        let pool = MessagePool::new(4);
        let mut msg = pool.acquire(
            Mti::new("0100").unwrap(),
            fields(),
            IsoVersion::V1987,
            Some(CardNetwork::Visa),
        );
        msg.raw = "0100ABCD".to_string();
        msg.bitmap = Some("7020000000C00000".to_string());

        pool.release(msg);
        assert_eq!(pool.len(), 1);

        let recycled = pool.acquire(
            Mti::new("0200").unwrap(),
            BTreeMap::new(),
            IsoVersion::V1987,
            None,
        );
        assert_eq!(recycled.mti.as_str(), "0200");
        assert!(recycled.fields.is_empty());
        assert!(recycled.raw.is_empty());
        assert!(recycled.bitmap.is_none());
        assert!(recycled.network.is_none());
    }

    #[test]
    fn test_capacity_bound() {
        let pool = MessagePool::new(2);
        for _ in 0..5 {
            let msg = pool.acquire(
                Mti::new("0100").unwrap(),
                BTreeMap::new(),
                IsoVersion::V1987,
                None,
            );
            pool.release(msg);
        }
        // Releases beyond capacity drop the message.
        let a = pool.acquire(Mti::default(), BTreeMap::new(), IsoVersion::V1987, None);
        let b = pool.acquire(Mti::default(), BTreeMap::new(), IsoVersion::V1987, None);
        let c = pool.acquire(Mti::default(), BTreeMap::new(), IsoVersion::V1987, None);
        pool.release(a);
        pool.release(b);
        pool.release(c);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_clear() {
        let pool = MessagePool::new(4);
        let msg = pool.acquire(Mti::default(), BTreeMap::new(), IsoVersion::V1987, None);
        pool.release(msg);
        assert_eq!(pool.len(), 1);
        pool.clear();
        assert!(pool.is_empty());
        assert_eq!(pool.capacity(), 4);
    }
}
