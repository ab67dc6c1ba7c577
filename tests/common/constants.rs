//! Shared constants for end-to-end tests
//!
//! When test data changes (user credentials, job fields, etc.),
//! update only this file.

// ============================================================================
// Test Users
// ============================================================================

pub const ALICE_BASE: &str = "alice";
pub const ALICE_NUMBER: &str = "555";
pub const ALICE_PASS: &str = "alicepass123";
pub const ALICE_NAME: &str = "Alice";
pub const ALICE_CITY: &str = "Pune";

pub const BOB_BASE: &str = "bob";
pub const BOB_NUMBER: &str = "222";
pub const BOB_PASS: &str = "bobpass123";
pub const BOB_NAME: &str = "Bob";
pub const BOB_CITY: &str = "Mumbai";

// ============================================================================
// Test Jobs
// ============================================================================

pub const PUNE_PINCODE: &str = "411001";
pub const BANGALORE_PINCODE: &str = "560001";

// ============================================================================
// Timeouts
// ============================================================================

/// How long to wait for a spawned server to answer
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Per-request timeout of the test client
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
