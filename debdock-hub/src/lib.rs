//! debdock-hub: Docker Hub registry client
//!
//! Provides tag listing for official images and resolution of which base
//! image repository (debian or ubuntu) publishes a given distribution.

pub mod error;
pub mod hub;

pub use error::{Error, Result};
pub use hub::{resolve_image_os, DockerHubClient, ImageOs, TagSource};
