//! # Business Code Generator
//!
//! Produces candidate business codes: order numbers, customer codes, and
//! SKUs. Codes come from process-wide-safe monotonically incrementing
//! sequences and carry **no uniqueness guarantee of their own** — callers
//! confirm each candidate against the entity store and retry on collision
//! (bounded at [`MAX_GENERATION_ATTEMPTS`]).
//!
//! Formats:
//!
//! | Code          | Format            | Example     |
//! |---------------|-------------------|-------------|
//! | Order number  | `HD` + 4-digit seq | `HD0001`   |
//! | Customer code | `KH` + 6-digit seq | `KH000001` |
//! | SKU           | `SKU` + `yyMM` + 4-digit seq | `SKU25080001` |

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

/// Order number prefix.
pub const ORDER_NUMBER_PREFIX: &str = "HD";

/// Customer code prefix.
pub const CUSTOMER_CODE_PREFIX: &str = "KH";

/// SKU prefix.
pub const SKU_PREFIX: &str = "SKU";

/// Upper bound on generate-and-check attempts before callers give up.
pub const MAX_GENERATION_ATTEMPTS: u32 = 10;

/// Generator of candidate business codes.
///
/// One instance is shared per process; the sequences are safe under
/// concurrent increment.
#[derive(Debug, Default)]
pub struct CodeGenerator {
    order_seq: AtomicU64,
    customer_seq: AtomicU64,
    sku_seq: AtomicU64,
}

impl CodeGenerator {
    /// Creates a generator with all sequences at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Next order number candidate.
    pub fn order_number(&self) -> String {
        let seq = self.order_seq.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{ORDER_NUMBER_PREFIX}{seq:04}")
    }

    /// Next customer code candidate.
    pub fn customer_code(&self) -> String {
        let seq = self.customer_seq.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{CUSTOMER_CODE_PREFIX}{seq:06}")
    }

    /// Next SKU candidate, tagged with the current year/month.
    pub fn sku(&self) -> String {
        let fragment = Utc::now().format("%y%m");
        let seq = self.sku_seq.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{SKU_PREFIX}{fragment}{seq:04}")
    }

    /// Resets all sequences to zero (test support).
    pub fn reset(&self) {
        self.order_seq.store(0, Ordering::SeqCst);
        self.customer_seq.store(0, Ordering::SeqCst);
        self.sku_seq.store(0, Ordering::SeqCst);
    }
}
