//! Role-based capability checks.
//!
//! The user context comes from the host's identity provider; these predicates
//! only interpret it.

use serde::{Deserialize, Serialize};

/// Role assigned to an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Administers every site in a district.
    DistrictAdmin,
    /// Administers the sites they are assigned to.
    SiteAdmin,
    /// Curates standards for a subject.
    SubjectLead,
    /// Classroom teacher.
    Teacher,
    /// Read-only student or parent account.
    StudentParent,
}

impl UserRole {
    fn is_one_of(self, roles: &[Self]) -> bool {
        roles.contains(&self)
    }

    /// Manage district-wide settings.
    pub fn can_manage_district(self) -> bool {
        self == Self::DistrictAdmin
    }

    /// Manage a single site.
    pub fn can_manage_site(self) -> bool {
        self.is_admin()
    }

    /// Manage teacher accounts.
    pub fn can_manage_teachers(self) -> bool {
        self.is_admin()
    }

    /// Browse the full standards catalogue.
    pub fn can_view_all_standards(self) -> bool {
        self.is_staff()
    }

    /// Upload curriculum documents.
    pub fn can_upload_documents(self) -> bool {
        self.is_staff()
    }

    /// Manage user accounts.
    pub fn can_manage_users(self) -> bool {
        self.is_admin()
    }

    /// View analytics dashboards.
    pub fn can_access_analytics(self) -> bool {
        self.is_one_of(&[Self::DistrictAdmin, Self::SiteAdmin, Self::SubjectLead])
    }

    /// District or site administrator.
    pub fn is_admin(self) -> bool {
        self.is_one_of(&[Self::DistrictAdmin, Self::SiteAdmin])
    }

    fn is_staff(self) -> bool {
        self != Self::StudentParent
    }
}

/// Identity details supplied by the host for the current user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContext {
    /// Role granted to the user.
    pub role: UserRole,
    /// District the user belongs to.
    #[serde(default)]
    pub district_id: Option<String>,
    /// Sites the user is assigned to.
    #[serde(default)]
    pub site_ids: Option<Vec<String>>,
}

impl UserContext {
    /// District admins reach every site; everyone else only their assigned
    /// sites.
    ///
    /// # Examples
    /// ```
    /// use ontara_gateway::domain::permissions::{UserContext, UserRole};
    ///
    /// let teacher = UserContext {
    ///     role: UserRole::Teacher,
    ///     district_id: None,
    ///     site_ids: Some(vec!["north".to_owned()]),
    /// };
    /// assert!(teacher.has_access_to_site("north"));
    /// assert!(!teacher.has_access_to_site("south"));
    /// ```
    pub fn has_access_to_site(&self, site_id: &str) -> bool {
        self.role == UserRole::DistrictAdmin
            || self
                .site_ids
                .as_deref()
                .is_some_and(|sites| sites.iter().any(|site| site == site_id))
    }
}
