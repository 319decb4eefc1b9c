pub mod calculation;
pub mod integration;
pub mod subscription;
pub mod webhook;
