//! debdock: build Debian packages inside Docker containers
//!
//! The pipeline reads the newest `debian/changelog` entry, derives a build
//! plan, resolves a base image from Docker Hub, then drives docker, apt,
//! dpkg-buildpackage and lintian strictly in sequence.

pub mod builder;
pub mod config;
pub mod docker;
pub mod error;
pub mod runner;

pub use error::{Error, Result};
