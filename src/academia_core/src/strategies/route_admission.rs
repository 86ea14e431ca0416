use crate::domain::{
    identity::Identity,
    navigation::{LANDING_VIEW, LOGIN_VIEW, NavigationIntent},
};

/// Outcome of evaluating a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    Allow,
    Deny { redirect_to: String },
}

impl Admission {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Admission::Allow)
    }
}

/// Pure admission rules, independent of any router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmissionPolicy {
    login_view: String,
    landing_view: String,
}

impl Default for AdmissionPolicy {
    fn default() -> Self {
        Self::new(LOGIN_VIEW, LANDING_VIEW)
    }
}

impl AdmissionPolicy {
    pub fn new(login_view: impl Into<String>, landing_view: impl Into<String>) -> Self {
        Self {
            login_view: login_view.into(),
            landing_view: landing_view.into(),
        }
    }

    pub fn login_view(&self) -> &str {
        &self.login_view
    }

    pub fn landing_view(&self) -> &str {
        &self.landing_view
    }

    /// Anonymous users go to the login view, users lacking the required role go to the landing
    /// view, everyone else is let through.
    pub fn evaluate(&self, identity: Option<&Identity>, intent: &NavigationIntent) -> Admission {
        if !intent.is_protected() {
            return Admission::Allow;
        }

        let Some(identity) = identity else {
            return Admission::Deny {
                redirect_to: self.login_view.clone(),
            };
        };

        match intent.required_role() {
            Some(required) if identity.role() != required => Admission::Deny {
                redirect_to: self.landing_view.clone(),
            },
            _ => Admission::Allow,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::{identity::UserId, role::Role};

    fn identity(role: Role) -> Identity {
        Identity::new(UserId::new("1"), "Test", "test@example.com", role, Utc::now())
    }

    #[test]
    fn anonymous_user_is_sent_to_login() {
        let policy = AdmissionPolicy::default();
        let intent = NavigationIntent::protected("/dashboard");

        assert_eq!(
            policy.evaluate(None, &intent),
            Admission::Deny {
                redirect_to: "/auth/login".to_string()
            }
        );
    }

    #[test]
    fn student_is_sent_to_landing_when_admin_required() {
        let policy = AdmissionPolicy::default();
        let intent = NavigationIntent::protected("/admin").requiring(Role::Admin);

        assert_eq!(
            policy.evaluate(Some(&identity(Role::Student)), &intent),
            Admission::Deny {
                redirect_to: "/dashboard".to_string()
            }
        );
    }

    #[test]
    fn admin_is_admitted_to_admin_view() {
        let policy = AdmissionPolicy::default();
        let intent = NavigationIntent::protected("/admin").requiring(Role::Admin);

        assert!(policy.evaluate(Some(&identity(Role::Admin)), &intent).is_allowed());
    }

    #[test]
    fn anonymous_user_with_role_requirement_still_goes_to_login() {
        let policy = AdmissionPolicy::default();
        let intent = NavigationIntent::protected("/admin").requiring(Role::Admin);

        assert_eq!(
            policy.evaluate(None, &intent),
            Admission::Deny {
                redirect_to: "/auth/login".to_string()
            }
        );
    }

    #[test]
    fn public_views_are_always_allowed() {
        let policy = AdmissionPolicy::default();
        assert!(
            policy
                .evaluate(None, &NavigationIntent::public("/auth/login"))
                .is_allowed()
        );
    }

    #[test]
    fn custom_views_are_used_for_redirects() {
        let policy = AdmissionPolicy::new("/signin", "/home");
        let intent = NavigationIntent::protected("/admin").requiring(Role::Admin);

        assert_eq!(
            policy.evaluate(None, &intent),
            Admission::Deny {
                redirect_to: "/signin".to_string()
            }
        );
        assert_eq!(
            policy.evaluate(Some(&identity(Role::Instructor)), &intent),
            Admission::Deny {
                redirect_to: "/home".to_string()
            }
        );
    }
}
