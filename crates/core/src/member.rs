//! Project members.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::id::{MemberId, ProjectId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub project_id: ProjectId,
}

impl Entity for Member {
    type Id = MemberId;
    const NAME: &'static str = "member";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub name: String,
    pub project_id: ProjectId,
}
