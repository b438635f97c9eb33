use uuid::Uuid;

use crate::error::{Result, StorageError};

text_enum! {
    pub enum Role {
        User => "user",
        Judge => "judge",
        Admin => "admin",
    }
}

/// Identity handed over by the authentication gateway. The engine never
/// establishes identity itself, it only refuses to mutate on behalf of
/// nobody.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caller {
    Anonymous,
    Authenticated { user_id: Uuid, role: Role },
}

impl Caller {
    pub fn user(user_id: Uuid) -> Self {
        Caller::Authenticated {
            user_id,
            role: Role::User,
        }
    }

    pub fn judge(judge_id: Uuid) -> Self {
        Caller::Authenticated {
            user_id: judge_id,
            role: Role::Judge,
        }
    }

    pub fn user_id(&self) -> Result<Uuid> {
        match self {
            Caller::Authenticated { user_id, .. } => Ok(*user_id),
            Caller::Anonymous => Err(StorageError::AuthRequired),
        }
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            Caller::Authenticated { role, .. } => Some(*role),
            Caller::Anonymous => None,
        }
    }
}
