// Route path constants - single source of truth for all endpoint paths

pub const GET_CACHE: &str = "/getCache";
pub const SET_CACHE: &str = "/setCache";
pub const ZADD_CACHE: &str = "/zaddCache";
pub const CLEAR_CACHE: &str = "/clearCache";
