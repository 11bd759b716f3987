//! An insert-only ordered multimap built on a skip list.
//!
//! Every distinct key lives once on level 0 together with the bucket of values
//! inserted under it, in insertion order. A new key is promoted to each higher
//! level with probability one half, so towers follow a geometric distribution
//! and insertion takes expected logarithmic time.

mod coin;
mod error;
mod options;
mod skiplist;

pub use crate::coin::{Coin, FairCoin};
pub use crate::error::{Error, Result};
pub use crate::options::Options;
pub use crate::skiplist::SkipList;
