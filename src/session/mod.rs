//! Session configuration model
//!
//! Typed descriptors for the sessions RxTxApp can run, accumulated into a
//! [`Configuration`] and rendered to the JSON file RxTxApp reads.

mod builder;
mod descriptor;
pub mod format;
mod render;

pub use builder::{add_st30p_sessions, add_video_sessions, create_empty_config, Configuration};
pub use descriptor::{Session, SessionKind, St30pSession, VideoSession, PORTS_PER_SESSION};
