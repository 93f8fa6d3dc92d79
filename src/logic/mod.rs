pub mod audit;
pub mod auth;
pub mod channel;
pub mod config;
pub mod error;
pub mod fixture;
pub mod league;
pub mod player;
pub mod result;
pub mod standings;
pub mod team;
pub mod types;
