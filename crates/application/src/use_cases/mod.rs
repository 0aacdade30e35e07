pub mod filtering;

pub use filtering::{
    ApplyFilterResultUseCase, FilterIncomingCallUseCase, FilterRunHandle, IncomingCallFilter,
};
