//! Super-admin endpoints
//!
//! Reachable only through [`crate::Session::admin`], which checks the role
//! locally before any request is made.

use shared::models::{ClubAdminCreate, Role, User, UserUpdate};

use super::Api;
use crate::ClientResult;

/// Admin endpoint group, borrowed from an authorized session
#[derive(Debug, Clone, Copy)]
pub struct AdminApi<'a> {
    api: &'a Api,
}

impl<'a> AdminApi<'a> {
    pub(crate) fn new(api: &'a Api) -> Self {
        Self { api }
    }

    pub async fn users(&self) -> ClientResult<Vec<User>> {
        self.api.get_list("admin/users", "users").await
    }

    pub async fn users_by_role(&self, role: Role) -> ClientResult<Vec<User>> {
        self.api
            .get_list(&format!("admin/users/role/{}", role.as_str()), "users")
            .await
    }

    pub async fn club_admins(&self) -> ClientResult<Vec<User>> {
        self.api.get_list("admin/club-admins", "clubAdmins").await
    }

    pub async fn create_club_admin(&self, request: &ClubAdminCreate) -> ClientResult<User> {
        self.api
            .post_keyed("admin/club-admins", request, "user")
            .await
    }

    pub async fn update_user(&self, user_id: i64, update: &UserUpdate) -> ClientResult<User> {
        self.api
            .put_keyed(&format!("admin/users/{}", user_id), update, "user")
            .await
    }

    pub async fn delete_user(&self, user_id: i64) -> ClientResult<String> {
        self.api
            .delete_ack(&format!("admin/users/{}", user_id))
            .await
    }
}
