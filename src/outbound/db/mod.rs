pub mod connection;
pub mod error;
pub mod models;
pub mod orgs;
pub mod repository;
pub mod teams;
pub mod users;
