//! Rail station finder server.
//!
//! Loads a boundary polygon, pages through a Web Feature Service for the
//! railway stations inside it, and serves the result as GeoJSON for a map.

pub mod boundary;
pub mod config;
pub mod stations;
pub mod web;
pub mod wfs;
