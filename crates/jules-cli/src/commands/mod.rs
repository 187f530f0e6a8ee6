pub mod activities;
pub mod sessions;
pub mod sources;
