use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const SYSTEM_ROLE: &str = "system";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub roles: Vec<String>,
}

impl User {
    pub fn new(id: Uuid) -> Self {
        Self { id, roles: vec![] }
    }

    pub fn new_system_user() -> Self {
        Self {
            id: Uuid::new_v4(),
            roles: vec![SYSTEM_ROLE.into()],
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|x| x == role)
    }

    pub fn is_system(&self) -> bool {
        self.has_role(SYSTEM_ROLE)
    }

    /// True when the user is `id` or acts on behalf of the platform.
    pub fn acts_for(&self, id: &Uuid) -> bool {
        self.is_system() || &self.id == id
    }
}

#[test]
fn system_user_acts_for_anyone() {
    let system = User::new_system_user();

    assert!(system.is_system());
    assert!(system.acts_for(&Uuid::new_v4()));
}

#[test]
fn plain_user_acts_only_for_self() {
    let user = User::new(Uuid::new_v4());

    assert!(!user.is_system());
    assert!(user.acts_for(&user.id.clone()));
    assert!(!user.acts_for(&Uuid::new_v4()));
}
