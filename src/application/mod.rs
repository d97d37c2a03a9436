/// Application layer - controllers, registry, DTOs and read models
///
/// This layer drives the monitoring domain on a timer and coordinates with
/// infrastructure through ports.
pub mod controllers;
pub mod dto;
pub mod read_models;
pub mod registry;
