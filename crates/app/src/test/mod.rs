//! Shared test fixtures.

mod db;

pub(crate) use context::TestContext;
pub(crate) use db::TestDb;
