use crate::user::UserProfile;
use serde::Serialize;

/// The accepter's contact details, copied at acceptance time. Later changes
/// to the accepter's profile never reach an existing snapshot.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AccepterSnapshot {
    pub name: String,
    pub address: String,
    pub city: String,
    pub pincode: String,
}

impl AccepterSnapshot {
    pub fn capture(profile: &UserProfile) -> Self {
        AccepterSnapshot {
            name: profile.name.clone(),
            address: profile.address.clone(),
            city: profile.city.clone(),
            pincode: profile.pincode.clone(),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AcceptedJob {
    pub id: usize,
    pub job_id: usize,
    pub accepter_id: usize,
    /// Copied from the job so the inbox needs no join.
    pub poster_id: usize,
    pub accepter: AccepterSnapshot,
}
