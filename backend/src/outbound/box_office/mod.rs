//! Box-office outbound adapter.
//!
//! A thin HTTP implementation of the `BoxOfficeSource` port.

mod dto;
mod http_source;

pub use http_source::{
    BoxOfficeHttpConfig, BoxOfficeHttpSource, DEFAULT_SOURCE_NAME, DEFAULT_TIMEOUT,
};
