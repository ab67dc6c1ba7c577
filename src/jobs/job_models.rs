use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: usize,
    pub company_name: String,
    pub address: String,
    pub pincode: String,
    /// Free text, e.g. "20k/month".
    pub salary: String,
    pub job_type: String,
    pub phone: String,
    pub poster_id: usize,
}

/// A posting as submitted, before it gets an id and an owner.
#[derive(Debug, Clone)]
pub struct NewJob {
    pub company_name: String,
    pub address: String,
    pub pincode: String,
    pub salary: String,
    pub job_type: String,
    pub phone: String,
}
