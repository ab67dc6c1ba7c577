use serde::Serialize;

/// Contact details a user fills in once after signing up.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub name: String,
    pub address: String,
    pub city: String,
    pub pincode: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: usize,
    pub handle: String,
    /// None until the details step has been completed.
    pub profile: Option<UserProfile>,
}

impl User {
    pub fn is_profile_complete(&self) -> bool {
        self.profile.is_some()
    }
}

/// Joins the two login form parts into the unique user handle.
pub fn compose_handle(base: &str, number: &str) -> String {
    format!("{}@{}", base.trim(), number.trim())
}
