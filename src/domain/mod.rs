pub mod auth;
pub mod org;
pub mod rbac;
pub mod session;
pub mod team;
pub mod timeclock;
