pub mod common;

mod redis_cache_tests;
