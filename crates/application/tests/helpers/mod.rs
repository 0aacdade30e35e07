#![allow(dead_code)]

mod mock_filters;

pub use mock_filters::*;
