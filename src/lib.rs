//! Student Registry Library
//!
//! Registers students over a small REST API and enriches every new record
//! with a booking id from the booking API and a joke from the joke API.
//!
//! # Modules
//!
//! - `api`: HTTP-facing components.
//! - `core`: Domain models, services and errors.
//! - `data`: Storage layer.
//! - `integrations`: Outbound API clients.
//! - `app`: Router and state assembly.
//! - `booking_client`: Booking API client.
//! - `config`: Configuration management.
//! - `db`: Database connection and schema bootstrap.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `joke_client`: Joke API client with fallback.
//! - `models`: Student and third-party payload models.
//! - `services`: Student registration service.
//! - `student_repository`: Student storage (Postgres or in-memory).

pub mod api;
pub mod core;
pub mod data;
pub mod integrations;

pub mod app;
pub mod booking_client;
pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod joke_client;
pub mod models;
pub mod services;
pub mod student_repository;
