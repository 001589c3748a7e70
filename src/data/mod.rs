//! Storage layer.

pub mod db {
    pub use crate::db::*;
}

pub mod student_repository {
    pub use crate::student_repository::*;
}
