//! Background Tasks Module
//!
//! Contains the tasks that run alongside request handling.
//!
//! # Tasks
//! - Expiration watcher: one per stored entry, removes it when its lifetime completes

mod expiration;

pub(crate) use expiration::spawn_expiration_watcher;
