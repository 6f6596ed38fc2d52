//! Integrity canary.
//!
//! A session carries a sentinel established when it is created. After
//! each major step of item rendering the sentinel and the invariants of
//! the output buffers are re-checked. A failed check means memory the
//! core owns was overwritten, so there is nothing left to trust: the
//! process aborts instead of returning an error.

/// Sentinel value of an intact session.
const CANARY_WORD: u32 = 0xDEAD_0031;

/// Anything whose invariants can be checked after the fact.
pub trait Intact {
    fn is_intact(&self) -> bool;
}

/// Session-level sentinel.
#[derive(Debug)]
pub struct Canary {
    word: u32,
}

impl Canary {
    /// Installs a fresh canary.
    pub const fn new() -> Self {
        Self { word: CANARY_WORD }
    }
}

impl Default for Canary {
    fn default() -> Self {
        Self::new()
    }
}

impl Intact for Canary {
    fn is_intact(&self) -> bool {
        self.word == CANARY_WORD
    }
}

/// Verifies every part and aborts if any of them is corrupted.
pub fn ensure_intact(parts: &[&dyn Intact]) {
    if !parts.iter().all(|part| part.is_intact()) {
        fatal();
    }
}

#[cold]
#[inline(never)]
fn fatal() -> ! {
    log::error!("integrity check failed, aborting");
    panic!("integrity check failed");
}
