//! # Marci Test
//!
//! Drives a frozen route table in memory, through the same dispatcher the
//! server uses, without binding a port.
//!
//! ```ignore
//! use marci_test::TestClient;
//!
//! let client = TestClient::new(app.build().await?);
//! let response = client.get("/api/users/42").send().await;
//! response.assert_status_code(200);
//! assert_eq!(response.json_value().unwrap()["id"], 42);
//! ```

#![doc(html_root_url = "https://docs.rs/marci-test/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod error;
mod request;
mod response;

pub use client::{TestClient, TestClientRequest};
pub use error::TestError;
pub use request::TestRequestBuilder;
pub use response::TestResponse;
