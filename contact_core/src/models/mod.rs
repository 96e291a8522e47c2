pub mod request;
pub mod response;

pub use request::{ContactRequest, RawFields};
pub use response::{ContactResponse, HealthPayload};
