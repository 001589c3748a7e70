//! External service integrations.

pub mod booking_client {
    pub use crate::booking_client::*;
}

pub mod joke_client {
    pub use crate::joke_client::*;
}
