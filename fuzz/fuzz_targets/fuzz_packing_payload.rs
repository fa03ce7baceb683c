//! Fuzz target: parsing upstream packing payloads.
//!
//! Arbitrary upstream bodies must parse or fail cleanly; whatever parses
//! must serialize back inside the `{"batches": ...}` envelope.

#![no_main]

use libfuzzer_sys::fuzz_target;
use packing_core::{BatchesEnvelope, PackingBatches};

fuzz_target!(|data: &[u8]| {
    if let Ok(batches) = PackingBatches::from_slice(data) {
        let body = serde_json::to_string(&BatchesEnvelope::from(batches))
            .expect("envelope serialization must not fail");
        assert!(body.starts_with(r#"{"batches":"#));
    }
});
