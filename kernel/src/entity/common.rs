mod flag;
mod money;
mod paging;
mod quantity;
mod time;

pub use self::{flag::*, money::*, paging::*, quantity::*, time::*};
