//! Draw construction: pool ordering, topology, bronze match, slot filling, courts.

mod bronze;
mod courts;
mod draw;
mod pool;
mod slots;
mod topology;

pub use bronze::inject_bronze_match;
pub use courts::assign_courts;
pub use draw::generate_bracket;
pub use pool::order_competitors;
pub use slots::fill_slots;
pub use topology::build_topology;
