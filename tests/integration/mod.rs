//! Integration test modules.

mod contended_user_test;
mod progression_flow_test;
mod sqlite_store_test;
