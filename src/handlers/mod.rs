pub mod clear_cache;
pub mod get_cache;
pub mod set_cache;
pub mod zadd_cache;

pub use clear_cache::clear_cache_handler;
pub use get_cache::get_cache_handler;
pub use set_cache::set_cache_handler;
pub use zadd_cache::zadd_cache_handler;
