//! End-to-end tests of the public sweep → recommend → report API.

mod scenarios;
mod sweep_properties;
