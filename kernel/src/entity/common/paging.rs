use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Page size of a catalog listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct SelectLimit(i32);

impl SelectLimit {
    pub const DEFAULT: i32 = 30;

    pub fn new(value: impl Into<i32>) -> Self {
        SelectLimit(value.into())
    }

    /// `None` for a negative page size.
    pub fn try_new(value: i32) -> Option<Self> {
        (value >= 0).then_some(SelectLimit(value))
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl Default for SelectLimit {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

/// Rows skipped before a catalog page starts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct SelectOffset(i32);

impl SelectOffset {
    pub fn new(value: impl Into<i32>) -> Self {
        SelectOffset(value.into())
    }

    pub fn try_new(value: i32) -> Option<Self> {
        (value >= 0).then_some(SelectOffset(value))
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}
