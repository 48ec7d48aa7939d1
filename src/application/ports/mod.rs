//! Ports - Interfaces between the application and infrastructure

pub mod outbound;
