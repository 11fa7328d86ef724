/// Application layer - Use cases, discovery and DTOs
///
/// This layer contains the application logic that orchestrates
/// domain services and coordinates with infrastructure through ports.
pub mod discovery;
pub mod dto;
pub mod factories;
pub mod use_cases;
