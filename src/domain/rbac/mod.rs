mod models;
mod resolver;

pub use models::{Inherits, Role, RoleMap, default_role_map};
pub use resolver::{RbacError, ResolvedRole, resolve_role};
