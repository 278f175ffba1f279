//! Common test utilities and mock implementations
#![allow(dead_code)]


pub use mock_i2c::{BusOp, MockError, MockI2c};
pub use test_utils::{assert_float_eq, create_mock_driver, MockDelay};
