//! Resource Layouts & Resource Sets
//!
//! Opaque handles for the pipeline resource layout and the per-pass resource
//! set. The device layer owns the actual descriptor objects; the pass only
//! forwards these handles to the command list at the fixed per-pass slot.

use std::sync::Arc;

/// Binding slots of a resource layout, in device binding order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ResourceLayoutSlot {
    PerInstanceExtraResources = 0,
    PerMaterial = 1,
    PerPass = 2,
    PerInstanceConstants = 3,
}

/// A compiled resource layout handle.
#[derive(Debug)]
pub struct ResourceLayout {
    pub id: u64,
    pub label: String,
    /// `false` for layouts whose device compilation failed.
    pub valid: bool,
}

impl ResourceLayout {
    #[must_use]
    pub fn new(id: u64, label: &str) -> Arc<Self> {
        Arc::new(Self {
            id,
            label: label.to_owned(),
            valid: true,
        })
    }
}

/// A resource set bound at one layout slot.
#[derive(Debug)]
pub struct ResourceSet {
    pub id: u64,
    pub label: String,
}

impl ResourceSet {
    #[must_use]
    pub fn new(id: u64, label: &str) -> Arc<Self> {
        Arc::new(Self {
            id,
            label: label.to_owned(),
        })
    }
}

pub type ResourceLayoutRef = Arc<ResourceLayout>;
pub type ResourceSetRef = Arc<ResourceSet>;
