//! Shared switch for version-conflict warnings.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A handle to the warnings flag of a [`crate::SharedStore`].
///
/// All handles from the same store see the same value. Warnings start
/// enabled and, once disabled, stay disabled.
#[derive(Debug, Clone)]
pub struct WarningSwitch {
    flag: Arc<AtomicBool>,
}

impl WarningSwitch {
    pub(crate) fn from_flag(flag: Arc<AtomicBool>) -> Self {
        WarningSwitch { flag }
    }

    pub fn disable(&self) {
        self.flag.store(false, Ordering::Relaxed);
    }

    pub fn enabled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use crate::store::SharedStore;

    #[test]
    fn defaults_to_enabled() {
        assert!(SharedStore::new().warnings().unwrap().enabled());
    }

    #[test]
    fn disable_is_visible_to_other_handles() {
        let store = SharedStore::new();
        let reader = store.warnings().unwrap();
        store.warnings().unwrap().disable();
        assert!(!reader.enabled());
        assert!(!store.warnings().unwrap().enabled());
    }

    #[test]
    fn stores_do_not_share_flags() {
        let a = SharedStore::new();
        let b = SharedStore::new();
        a.warnings().unwrap().disable();
        assert!(b.warnings().unwrap().enabled());
    }
}
