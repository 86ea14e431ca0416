use super::role::Role;

pub const LOGIN_VIEW: &str = "/auth/login";
pub const REGISTER_VIEW: &str = "/auth/register";
pub const LANDING_VIEW: &str = "/dashboard";

/// An attempted route activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationIntent {
    path: String,
    protected: bool,
    required_role: Option<Role>,
}

impl NavigationIntent {
    /// Intent for a view that needs a signed-in user.
    pub fn protected(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            protected: true,
            required_role: None,
        }
    }

    /// Intent for a view anyone can open (the auth pages).
    pub fn public(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            protected: false,
            required_role: None,
        }
    }

    pub fn requiring(mut self, role: Role) -> Self {
        self.protected = true;
        self.required_role = Some(role);
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_protected(&self) -> bool {
        self.protected
    }

    pub fn required_role(&self) -> Option<Role> {
        self.required_role
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRule {
    pub prefix: String,
    pub protected: bool,
    pub required_role: Option<Role>,
}

impl RouteRule {
    pub fn protected(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            protected: true,
            required_role: None,
        }
    }

    pub fn public(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            protected: false,
            required_role: None,
        }
    }

    pub fn requiring(mut self, role: Role) -> Self {
        self.protected = true;
        self.required_role = Some(role);
        self
    }

    fn matches(&self, path: &str) -> bool {
        path == self.prefix
            || path
                .strip_prefix(self.prefix.as_str())
                .is_some_and(|rest| rest.starts_with('/') || rest.starts_with('?'))
    }
}

/// Maps view paths to the admission requirements of their feature group.
#[derive(Debug, Clone)]
pub struct RouteTable {
    rules: Vec<RouteRule>,
    fallback: String,
}

impl Default for RouteTable {
    /// Sections of the training portal. The admin area is role-gated.
    fn default() -> Self {
        Self::new(LANDING_VIEW)
            .with_rule(RouteRule::public("/auth"))
            .with_rule(RouteRule::protected("/dashboard"))
            .with_rule(RouteRule::protected("/courses"))
            .with_rule(RouteRule::protected("/badges"))
            .with_rule(RouteRule::protected("/profile"))
            .with_rule(RouteRule::protected("/admin").requiring(Role::Admin))
    }
}

impl RouteTable {
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            rules: Vec::new(),
            fallback: fallback.into(),
        }
    }

    pub fn with_rule(mut self, rule: RouteRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Resolve a path to the intent the guard evaluates.
    ///
    /// The root path and anything not covered by a rule resolve to the fallback view, which is
    /// resolved once more so it picks up its own protection.
    pub fn intent_for(&self, path: &str) -> NavigationIntent {
        match self.rule_for(path) {
            Some(rule) => Self::intent_from_rule(rule, path),
            None => match self.rule_for(&self.fallback) {
                Some(rule) => Self::intent_from_rule(rule, &self.fallback),
                None => NavigationIntent::protected(self.fallback.clone()),
            },
        }
    }

    fn rule_for(&self, path: &str) -> Option<&RouteRule> {
        self.rules
            .iter()
            .filter(|rule| rule.matches(path))
            .max_by_key(|rule| rule.prefix.len())
    }

    fn intent_from_rule(rule: &RouteRule, path: &str) -> NavigationIntent {
        NavigationIntent {
            path: path.to_string(),
            protected: rule.protected,
            required_role: rule.required_role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_pages_are_public() {
        let table = RouteTable::default();
        assert!(!table.intent_for("/auth/login").is_protected());
        assert!(!table.intent_for("/auth/register").is_protected());
    }

    #[test]
    fn feature_sections_are_protected() {
        let table = RouteTable::default();
        let intent = table.intent_for("/courses/mis-cursos");
        assert!(intent.is_protected());
        assert_eq!(intent.required_role(), None);
        assert_eq!(intent.path(), "/courses/mis-cursos");
    }

    #[test]
    fn admin_section_requires_admin() {
        let table = RouteTable::default();
        assert_eq!(
            table.intent_for("/admin/users").required_role(),
            Some(Role::Admin)
        );
    }

    #[test]
    fn prefix_match_respects_segment_boundaries() {
        let table = RouteTable::default();
        let intent = table.intent_for("/administration");
        assert_eq!(intent.path(), LANDING_VIEW);
        assert_eq!(intent.required_role(), None);
    }

    #[test]
    fn unknown_and_root_paths_fall_back_to_landing() {
        let table = RouteTable::default();
        for path in ["/", "", "/nowhere"] {
            let intent = table.intent_for(path);
            assert_eq!(intent.path(), LANDING_VIEW);
            assert!(intent.is_protected());
        }
    }
}
