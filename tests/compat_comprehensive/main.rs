//! Compatibility Layer Comprehensive Test Suite
//!
//! End-to-end checks of the public API through the `bigtable_compat` facade.
//!
//! ## Test Tiers
//!
//! - **Tier 1: Golden Predicates** - exact tree shapes for legacy reads
//! - **Tier 2: Poll Scenarios** - backoff schedules, timeouts, re-polls
//! - **Tier 3: GC Policies** - flat dict view of family GC rules
//! - **Tier 4: Lifecycle Wiring** - config, names and poller together
//! - **Tier 5: Properties** - determinism and ordering over random input
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test compat_comprehensive
//! cargo test --test compat_comprehensive golden
//! ```

mod test_utils;


// Tier 2
mod poll_scenarios;

// Tier 3
mod gc_policies;

// Tier 4
mod lifecycle_wiring;

// Tier 5
mod properties;
