//! Application layer - Use cases and the ports they depend on
//!
//! This layer contains:
//! - DTOs: row shapes of the relational data API
//! - Mappers: conversion between domain entities and rows
//! - Ports: repository and storage interfaces implemented by infrastructure
//! - Services: the editing session and its load/save use cases

pub mod dto;
pub mod mappers;
pub mod ports;
pub mod services;
