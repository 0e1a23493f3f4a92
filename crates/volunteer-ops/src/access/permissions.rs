use serde::Serialize;

use super::roles::UserRole;

/// Capabilities a role may hold. Mutating operations name the capability
/// they require and refuse to run without it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Edit,
    Delete,
    Create,
    UploadDocuments,
    ViewAuditLog,
    ScheduleInterviews,
    ManageEvaluations,
}

impl Capability {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Edit => "edit records",
            Self::Delete => "delete records",
            Self::Create => "create records",
            Self::UploadDocuments => "upload documents",
            Self::ViewAuditLog => "view the audit log",
            Self::ScheduleInterviews => "schedule interviews",
            Self::ManageEvaluations => "manage evaluations",
        }
    }
}

/// Per-role capability table consulted before any mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PermissionSet {
    pub can_edit: bool,
    pub can_delete: bool,
    pub can_create: bool,
    pub can_upload_documents: bool,
    pub can_view_audit_log: bool,
    pub can_schedule_interviews: bool,
    pub can_manage_evaluations: bool,
}

impl PermissionSet {
    pub const fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::Edit => self.can_edit,
            Capability::Delete => self.can_delete,
            Capability::Create => self.can_create,
            Capability::UploadDocuments => self.can_upload_documents,
            Capability::ViewAuditLog => self.can_view_audit_log,
            Capability::ScheduleInterviews => self.can_schedule_interviews,
            Capability::ManageEvaluations => self.can_manage_evaluations,
        }
    }
}

const ADMIN_PERMISSIONS: PermissionSet = PermissionSet {
    can_edit: true,
    can_delete: true,
    can_create: true,
    can_upload_documents: true,
    can_view_audit_log: true,
    can_schedule_interviews: true,
    can_manage_evaluations: true,
};

const HR_PERMISSIONS: PermissionSet = PermissionSet {
    can_edit: true,
    can_delete: false,
    can_create: true,
    can_upload_documents: true,
    can_view_audit_log: false,
    can_schedule_interviews: true,
    can_manage_evaluations: true,
};

const LEAD_PERMISSIONS: PermissionSet = PermissionSet {
    can_edit: true,
    can_delete: false,
    can_create: false,
    can_upload_documents: false,
    can_view_audit_log: false,
    can_schedule_interviews: true,
    can_manage_evaluations: true,
};

const VOLUNTEER_PERMISSIONS: PermissionSet = PermissionSet {
    can_edit: false,
    can_delete: false,
    can_create: false,
    can_upload_documents: true,
    can_view_audit_log: false,
    can_schedule_interviews: false,
    can_manage_evaluations: false,
};

impl UserRole {
    /// The authoritative capability table for this role.
    pub const fn permissions(self) -> &'static PermissionSet {
        match self {
            UserRole::Admin => &ADMIN_PERMISSIONS,
            UserRole::Hr => &HR_PERMISSIONS,
            UserRole::Lead => &LEAD_PERMISSIONS,
            UserRole::Volunteer => &VOLUNTEER_PERMISSIONS,
        }
    }
}

/// Pure lookup against the permission table; no side effects.
pub fn check_permission(role: UserRole, capability: Capability) -> bool {
    role.permissions().allows(capability)
}

/// Gate for mutating operations: refuses with an explicit error rather than
/// degrading into a silent no-op.
pub fn ensure_permission(role: UserRole, capability: Capability) -> Result<(), AccessError> {
    if check_permission(role, capability) {
        Ok(())
    } else {
        Err(AccessError::PermissionDenied { role, capability })
    }
}

/// Errors raised by the access layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    #[error("role {role:?} is not permitted to {denied}", denied = .capability.label())]
    PermissionDenied {
        role: UserRole,
        capability: Capability,
    },
    #[error("unrecognized role {value:?}")]
    UnknownRole { value: String },
    #[error("request carries no session identity")]
    MissingSession,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_holds_every_capability() {
        let all = [
            Capability::Edit,
            Capability::Delete,
            Capability::Create,
            Capability::UploadDocuments,
            Capability::ViewAuditLog,
            Capability::ScheduleInterviews,
            Capability::ManageEvaluations,
        ];
        for capability in all {
            assert!(check_permission(UserRole::Admin, capability));
        }
    }

    #[test]
    fn volunteer_may_only_upload_documents() {
        assert!(check_permission(
            UserRole::Volunteer,
            Capability::UploadDocuments
        ));
        for capability in [
            Capability::Edit,
            Capability::Delete,
            Capability::Create,
            Capability::ViewAuditLog,
            Capability::ScheduleInterviews,
            Capability::ManageEvaluations,
        ] {
            assert!(!check_permission(UserRole::Volunteer, capability));
        }
    }

    #[test]
    fn only_admin_may_delete() {
        assert!(check_permission(UserRole::Admin, Capability::Delete));
        for role in [UserRole::Hr, UserRole::Lead, UserRole::Volunteer] {
            assert!(!check_permission(role, Capability::Delete));
        }
    }

    #[test]
    fn ensure_permission_names_the_denied_capability() {
        let error = ensure_permission(UserRole::Volunteer, Capability::Delete)
            .expect_err("volunteers cannot delete");
        assert_eq!(
            error,
            AccessError::PermissionDenied {
                role: UserRole::Volunteer,
                capability: Capability::Delete,
            }
        );
        assert!(error.to_string().contains("delete records"));
    }
}
