use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Team {
    pub id: Uuid,
    pub org_id: Uuid,
    pub owner_id: Uuid,
    pub department: String,
    pub members: Vec<TeamMember>,
    pub tasks: Vec<Task>,
    pub created_at: PrimitiveDateTime,
    pub updated_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: Uuid,
    pub name: String,
    pub role: String,
}

/// Tasks live inside their team row and have no independent lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub task_id: Uuid,
    pub task_name: String,
    pub assigned_user_id: Option<Uuid>,
    pub assigned_user_name: Option<String>,
}

/// Removes the first member entry matching `user_id` and nothing else.
pub fn remove_member_entry(members: &mut Vec<TeamMember>, user_id: Uuid) -> Option<TeamMember> {
    let position = members.iter().position(|m| m.id == user_id)?;

    Some(members.remove(position))
}

/// Removes the first task entry matching `task_id` and nothing else.
pub fn remove_task_entry(tasks: &mut Vec<Task>, task_id: Uuid) -> Option<Task> {
    let position = tasks.iter().position(|t| t.task_id == task_id)?;

    Some(tasks.remove(position))
}
