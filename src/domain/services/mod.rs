//! # Domain Services
//!
//! エンティティに属さないドメインのルール

pub mod progress_observer;
pub mod retry_policy;
