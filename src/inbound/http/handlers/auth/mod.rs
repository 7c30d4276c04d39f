mod login;
mod logout;
mod profile;
mod register;
mod select;

pub use login::auth_login;
pub use logout::auth_logout;
pub use profile::{auth_delete_account, auth_profile, auth_update_profile};
pub use register::auth_register;
pub use select::auth_select;
