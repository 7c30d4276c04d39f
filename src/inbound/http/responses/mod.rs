pub mod health;
pub mod org;
pub mod profile;
pub mod shared;
pub mod team;
pub mod timeclock;
