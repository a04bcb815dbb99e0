use serde::{Deserialize, Serialize};
use soramayo_application::UserOverview;
use ts_rs::TS;

/// Incoming payload for assigning a role to an account.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/assign-role-request.ts"
)]
pub struct AssignRoleRequest {
    pub rol: String,
}

/// One directory row in the user administration screen.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/user-overview-response.ts"
)]
pub struct UserOverviewResponse {
    pub user_id: String,
    pub email: String,
    pub created_at: String,
    pub rol: Option<String>,
}

impl From<UserOverview> for UserOverviewResponse {
    fn from(overview: UserOverview) -> Self {
        Self {
            user_id: overview.user_id.to_string(),
            email: overview.email,
            created_at: overview.created_at.to_rfc3339(),
            rol: overview.role.map(|role| role.as_str().to_owned()),
        }
    }
}
