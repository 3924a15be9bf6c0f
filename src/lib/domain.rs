//! Domain layer: the dispatch pipeline, its value objects and its ports.

pub mod communication;
