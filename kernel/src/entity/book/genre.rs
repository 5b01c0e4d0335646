use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Fromln, AsRefln)]
pub struct BookGenre(String);

impl BookGenre {
    pub fn new(genre: impl Into<String>) -> Self {
        Self(genre.into())
    }
}
