//! Test suites for the BrandIt daemon.

pub(crate) mod support;
mod unit;
