use crate::common::get_current_time_or_zero;
use log::{info, warn};
use parking_lot::Mutex;
use rand::rngs::OsRng;
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};

const NODE_ID_BITS: u64 = 10;
const SEQUENCE_BITS: u64 = 12;
const EPOCH: u64 = 1288834974657;

/// Generates time-ordered 64-bit ids for [`crate::collection::NitriteId`].
pub struct SnowflakeIdGenerator {
    node_id: u64,
    sequence: AtomicU64,
    last_timestamp: AtomicU64,
    mutex: Mutex<()>,
}

impl SnowflakeIdGenerator {
    pub fn new() -> Self {
        let max_node_id = !(!0_u64 << NODE_ID_BITS);

        let mut node_id = Self::random_node_id();
        if node_id > max_node_id {
            warn!("Node id can't be greater than {}", max_node_id);
            node_id = OsRng.gen_range(1..=max_node_id);
        }
        info!("Initialized id generator with node id: {}", node_id);

        SnowflakeIdGenerator {
            node_id,
            sequence: AtomicU64::new(0),
            last_timestamp: AtomicU64::new(0),
            mutex: Mutex::new(()),
        }
    }

    pub fn get_id(&self) -> u64 {
        let _lock = self.mutex.lock();

        let current_time = get_current_time_or_zero() as u64;
        let last_timestamp = self.last_timestamp.load(Ordering::Relaxed);
        let mut timestamp = current_time;

        let sequence = if timestamp <= last_timestamp {
            // same millisecond, or the clock moved backwards
            timestamp = last_timestamp;
            let next = (self.sequence.load(Ordering::Relaxed) + 1) & !(!0_u64 << SEQUENCE_BITS);
            if next == 0 {
                // sequence exhausted for this millisecond
                timestamp = self.wait_next_millis(last_timestamp);
            }
            next
        } else {
            0
        };

        self.sequence.store(sequence, Ordering::Relaxed);
        self.last_timestamp.store(timestamp, Ordering::Relaxed);

        compose_id(timestamp, self.node_id, sequence)
    }

    fn wait_next_millis(&self, last_timestamp: u64) -> u64 {
        let mut timestamp = get_current_time_or_zero() as u64;
        while timestamp <= last_timestamp {
            std::thread::yield_now();
            timestamp = get_current_time_or_zero() as u64;
        }
        timestamp
    }

    fn random_node_id() -> u64 {
        let uuid = uuid::Uuid::new_v4();
        let uid = uuid.as_bytes();
        let rnd_byte = OsRng.gen::<u64>() & 0x000000FF;

        ((0x000000FF & uid[uid.len() - 1] as u64) | (0x0000FF00 & (rnd_byte << 8))) >> 6
    }
}

// A clock reading before the epoch (the clock fallback yields 0) clamps the
// time part to zero.
fn compose_id(timestamp: u64, node_id: u64, sequence: u64) -> u64 {
    if timestamp < EPOCH {
        warn!("Clock reading {} is before the id epoch", timestamp);
    }
    (timestamp.saturating_sub(EPOCH) << (SEQUENCE_BITS + NODE_ID_BITS))
        | (node_id << SEQUENCE_BITS)
        | sequence
}

impl Default for SnowflakeIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
