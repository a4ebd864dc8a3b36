//! Test support for repository integration tests.


pub(crate) use context::TestContext;
