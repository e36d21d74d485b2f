pub mod client;
pub mod error;
pub mod request;

pub use client::{ClientOptions, SdkClient, SdkResponse};
pub use error::{BoxError, ConfigError, Error, ErrorFactory, ErrorRegistry, SdkRequestError};
pub use request::{RequestOptions, RoutedRequest, fill_path, route_request};

pub use reqwest::Method;
