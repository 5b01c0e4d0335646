use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IsDeleted<T> {
    value: bool,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T> IsDeleted<T> {
    pub fn new(value: impl Into<bool>) -> Self {
        Self {
            value: value.into(),
            _marker: PhantomData,
        }
    }
}

impl<T> IsDeleted<T> {
    pub fn value(&self) -> bool {
        self.value
    }
}

impl<T> AsRef<bool> for IsDeleted<T> {
    fn as_ref(&self) -> &bool {
        &self.value
    }
}

impl<T> From<IsDeleted<T>> for bool {
    fn from(value: IsDeleted<T>) -> Self {
        value.value
    }
}
