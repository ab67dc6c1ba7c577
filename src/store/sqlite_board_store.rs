use super::schema::VERSIONED_SCHEMAS;
use crate::acceptance::{AcceptanceStore, AcceptedJob, AccepterSnapshot};
use crate::jobs::{Job, JobStore, NewJob};
use crate::sqlite_persistence::open_versioned_db;
use crate::user::{
    AuthToken, AuthTokenValue, BoardHasher, HashedPassword, User, UserAuthCredentialsStore,
    UserAuthTokenStore, UserProfile, UserStore, UsernamePasswordCredentials,
};
use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use std::{
    path::Path,
    str::FromStr,
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, SystemTime},
};
use tracing::debug;

/// All board data in one SQLite file. Every method holds the connection lock
/// for its whole duration.
#[derive(Clone)]
pub struct SqliteBoardStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteBoardStore {
    pub fn new<T: AsRef<Path>>(db_path: T) -> Result<Self> {
        let conn = open_versioned_db(db_path, VERSIONED_SCHEMAS)?;
        Ok(SqliteBoardStore {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("Board store connection lock poisoned"))
    }
}

fn system_time_from_column_result(value: i64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(value as u64)
}

fn system_time_to_column_value(time: SystemTime) -> i64 {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == ErrorCode::ConstraintViolation
                && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

const USER_COLUMNS: &str = "id, handle, name, address, city, pincode";

fn user_from_row(row: &Row) -> rusqlite::Result<User> {
    let name: Option<String> = row.get(2)?;
    let address: Option<String> = row.get(3)?;
    let city: Option<String> = row.get(4)?;
    let pincode: Option<String> = row.get(5)?;
    let profile = match (name, address, city, pincode) {
        (Some(name), Some(address), Some(city), Some(pincode)) => Some(UserProfile {
            name,
            address,
            city,
            pincode,
        }),
        _ => None,
    };
    Ok(User {
        id: row.get(0)?,
        handle: row.get(1)?,
        profile,
    })
}

const JOB_COLUMNS: &str = "id, company_name, address, pincode, salary, job_type, phone, poster_id";

fn job_from_row(row: &Row) -> rusqlite::Result<Job> {
    Ok(Job {
        id: row.get(0)?,
        company_name: row.get(1)?,
        address: row.get(2)?,
        pincode: row.get(3)?,
        salary: row.get(4)?,
        job_type: row.get(5)?,
        phone: row.get(6)?,
        poster_id: row.get(7)?,
    })
}

const ACCEPTED_JOB_COLUMNS: &str = "id, job_id, accepter_id, poster_id, accepter_name, accepter_address, accepter_city, accepter_pincode";

fn accepted_job_from_row(row: &Row) -> rusqlite::Result<AcceptedJob> {
    Ok(AcceptedJob {
        id: row.get(0)?,
        job_id: row.get(1)?,
        accepter_id: row.get(2)?,
        poster_id: row.get(3)?,
        accepter: AccepterSnapshot {
            name: row.get(4)?,
            address: row.get(5)?,
            city: row.get(6)?,
            pincode: row.get(7)?,
        },
    })
}

fn get_user_with_conn(conn: &Connection, user_id: usize) -> Result<Option<User>> {
    conn.query_row(
        &format!("SELECT {} FROM user WHERE id = ?1", USER_COLUMNS),
        params![user_id],
        user_from_row,
    )
    .optional()
    .with_context(|| format!("Failed to get user {}", user_id))
}

impl UserStore for SqliteBoardStore {
    fn create_user(&self, user_handle: &str, password: &HashedPassword) -> Result<Option<User>> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        match tx.execute(
            "INSERT INTO user (handle) VALUES (?1)",
            params![user_handle],
        ) {
            Ok(_) => {}
            Err(err) if is_unique_violation(&err) => {
                debug!("Handle {} already taken", user_handle);
                return Ok(None);
            }
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to create user {}", user_handle))
            }
        }
        let user_id = tx.last_insert_rowid() as usize;
        tx.execute(
            "INSERT INTO user_password_credentials (user_id, salt, hash, hasher) VALUES (?1, ?2, ?3, ?4)",
            params![
                user_id,
                password.salt,
                password.hash,
                password.hasher.to_string()
            ],
        )?;
        tx.commit()?;

        Ok(Some(User {
            id: user_id,
            handle: user_handle.to_string(),
            profile: None,
        }))
    }

    fn get_user(&self, user_id: usize) -> Result<Option<User>> {
        let conn = self.lock()?;
        get_user_with_conn(&conn, user_id)
    }

    fn get_user_by_handle(&self, user_handle: &str) -> Result<Option<User>> {
        let conn = self.lock()?;
        conn.query_row(
            &format!("SELECT {} FROM user WHERE handle = ?1", USER_COLUMNS),
            params![user_handle],
            user_from_row,
        )
        .optional()
        .with_context(|| format!("Failed to get user {}", user_handle))
    }

    fn count_users(&self) -> Result<usize> {
        let conn = self.lock()?;
        Ok(conn.query_row("SELECT COUNT(*) FROM user", [], |row| row.get(0))?)
    }

    fn set_user_profile_if_empty(&self, user_id: usize, profile: &UserProfile) -> Result<bool> {
        let conn = self.lock()?;
        let updated = conn.execute(
            "UPDATE user SET name = ?1, address = ?2, city = ?3, pincode = ?4 \
             WHERE id = ?5 AND name IS NULL",
            params![
                profile.name,
                profile.address,
                profile.city,
                profile.pincode,
                user_id
            ],
        )?;
        Ok(updated > 0)
    }
}

impl UserAuthCredentialsStore for SqliteBoardStore {
    fn get_user_password_credentials(
        &self,
        user_handle: &str,
    ) -> Result<Option<UsernamePasswordCredentials>> {
        let conn = self.lock()?;
        let row = conn
            .query_row(
                "SELECT c.user_id, c.salt, c.hash, c.hasher, c.created, c.last_tried, c.last_used \
                 FROM user_password_credentials c JOIN user u ON u.id = c.user_id \
                 WHERE u.handle = ?1",
                params![user_handle],
                |row| {
                    Ok((
                        row.get::<usize, usize>(0)?,
                        row.get::<usize, String>(1)?,
                        row.get::<usize, String>(2)?,
                        row.get::<usize, String>(3)?,
                        row.get::<usize, i64>(4)?,
                        row.get::<usize, Option<i64>>(5)?,
                        row.get::<usize, Option<i64>>(6)?,
                    ))
                },
            )
            .optional()?;

        let (user_id, salt, hash, hasher, created, last_tried, last_used) = match row {
            Some(row) => row,
            None => return Ok(None),
        };
        Ok(Some(UsernamePasswordCredentials {
            user_id,
            salt,
            hash,
            hasher: BoardHasher::from_str(&hasher)?,
            created: system_time_from_column_result(created),
            last_tried: last_tried.map(system_time_from_column_result),
            last_used: last_used.map(system_time_from_column_result),
        }))
    }

    fn update_user_password_credentials(
        &self,
        credentials: &UsernamePasswordCredentials,
    ) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "UPDATE user_password_credentials SET last_tried = ?1, last_used = ?2 WHERE user_id = ?3",
            params![
                credentials.last_tried.map(system_time_to_column_value),
                credentials.last_used.map(system_time_to_column_value),
                credentials.user_id
            ],
        )?;
        Ok(())
    }
}

impl UserAuthTokenStore for SqliteBoardStore {
    fn get_user_auth_token(&self, value: &AuthTokenValue) -> Result<Option<AuthToken>> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT user_id, value, created, last_used FROM auth_token WHERE value = ?1",
            params![value.0],
            |row| {
                Ok(AuthToken {
                    user_id: row.get(0)?,
                    value: AuthTokenValue(row.get(1)?),
                    created: system_time_from_column_result(row.get(2)?),
                    last_used: row
                        .get::<usize, Option<i64>>(3)?
                        .map(system_time_from_column_result),
                })
            },
        )
        .optional()
        .context("Failed to get auth token")
    }

    fn update_user_auth_token_last_used_timestamp(&self, token: &AuthTokenValue) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "UPDATE auth_token SET last_used = cast(strftime('%s','now') as int) WHERE value = ?1",
            params![token.0],
        )?;
        Ok(())
    }

    fn add_user_auth_token(&self, token: AuthToken) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO auth_token (value, user_id) VALUES (?1, ?2)",
            params![token.value.0, token.user_id],
        )?;
        Ok(())
    }
}

impl JobStore for SqliteBoardStore {
    fn create_job(&self, poster_id: usize, job: &NewJob) -> Result<Job> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO job (company_name, address, pincode, salary, job_type, phone, poster_id) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                job.company_name,
                job.address,
                job.pincode,
                job.salary,
                job.job_type,
                job.phone,
                poster_id
            ],
        )
        .with_context(|| format!("Failed to create job for user {}", poster_id))?;

        Ok(Job {
            id: conn.last_insert_rowid() as usize,
            company_name: job.company_name.clone(),
            address: job.address.clone(),
            pincode: job.pincode.clone(),
            salary: job.salary.clone(),
            job_type: job.job_type.clone(),
            phone: job.phone.clone(),
            poster_id,
        })
    }

    fn get_job(&self, job_id: usize) -> Result<Option<Job>> {
        // Row ids are i64, anything larger cannot exist.
        if i64::try_from(job_id).is_err() {
            return Ok(None);
        }
        let conn = self.lock()?;
        conn.query_row(
            &format!("SELECT {} FROM job WHERE id = ?1", JOB_COLUMNS),
            params![job_id],
            job_from_row,
        )
        .optional()
        .with_context(|| format!("Failed to get job {}", job_id))
    }

    fn get_all_jobs(&self) -> Result<Vec<Job>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!("SELECT {} FROM job ORDER BY id", JOB_COLUMNS))?;
        let jobs = stmt
            .query_map([], job_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(jobs)
    }

    fn count_jobs(&self) -> Result<usize> {
        let conn = self.lock()?;
        Ok(conn.query_row("SELECT COUNT(*) FROM job", [], |row| row.get(0))?)
    }

    fn get_jobs_by_pincode(&self, pincode: &str) -> Result<Vec<Job>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM job WHERE pincode = ?1 ORDER BY id",
            JOB_COLUMNS
        ))?;
        let jobs = stmt
            .query_map(params![pincode], job_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(jobs)
    }
}

impl AcceptanceStore for SqliteBoardStore {
    fn create_accepted_job(
        &self,
        job: &Job,
        accepter_id: usize,
        accepter: &AccepterSnapshot,
    ) -> Result<AcceptedJob> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO accepted_job (job_id, accepter_id, poster_id, accepter_name, \
             accepter_address, accepter_city, accepter_pincode) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                job.id,
                accepter_id,
                job.poster_id,
                accepter.name,
                accepter.address,
                accepter.city,
                accepter.pincode
            ],
        )
        .with_context(|| format!("Failed to record acceptance of job {}", job.id))?;

        Ok(AcceptedJob {
            id: conn.last_insert_rowid() as usize,
            job_id: job.id,
            accepter_id,
            poster_id: job.poster_id,
            accepter: accepter.clone(),
        })
    }

    fn get_accepted_jobs_for_poster(&self, poster_id: usize) -> Result<Vec<AcceptedJob>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM accepted_job WHERE poster_id = ?1 ORDER BY id",
            ACCEPTED_JOB_COLUMNS
        ))?;
        let accepted = stmt
            .query_map(params![poster_id], accepted_job_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_tmp_store() -> (SqliteBoardStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let temp_file_path = temp_dir.path().join("test.db");
        let store = SqliteBoardStore::new(&temp_file_path).unwrap();
        (store, temp_dir)
    }

    fn profile(name: &str) -> UserProfile {
        UserProfile {
            name: name.to_string(),
            address: "Baker St".to_string(),
            city: "Pune".to_string(),
            pincode: "411001".to_string(),
        }
    }

    fn new_job(pincode: &str) -> NewJob {
        NewJob {
            company_name: "Acme".to_string(),
            address: "MG Road".to_string(),
            pincode: pincode.to_string(),
            salary: "20k".to_string(),
            job_type: "Driver".to_string(),
            phone: "9999".to_string(),
        }
    }

    #[test]
    fn test_create_user() {
        let (store, _temp_dir) = create_tmp_store();
        let password = HashedPassword::new("pw").unwrap();

        let user = store.create_user("test_user", &password).unwrap().unwrap();
        assert_eq!(user.id, 1);
        assert!(user.profile.is_none());

        assert!(store.create_user("test_user", &password).unwrap().is_none());
        assert_eq!(store.count_users().unwrap(), 1);
        assert_eq!(
            store.get_user_by_handle("test_user").unwrap(),
            Some(user.clone())
        );
        assert_eq!(store.get_user(user.id).unwrap(), Some(user));
        assert!(store.get_user(2).unwrap().is_none());
    }

    #[test]
    fn stores_password_credentials_with_user() {
        let (store, _temp_dir) = create_tmp_store();
        let password = HashedPassword::new("pw").unwrap();
        let user = store.create_user("test_user", &password).unwrap().unwrap();

        let mut credentials = store
            .get_user_password_credentials("test_user")
            .unwrap()
            .unwrap();
        assert_eq!(credentials.user_id, user.id);
        assert_eq!(credentials.hasher, BoardHasher::Argon2);
        assert!(credentials.matches("pw").unwrap());
        assert!(credentials.last_used.is_none());

        credentials.last_tried = Some(SystemTime::now());
        credentials.last_used = credentials.last_tried;
        store.update_user_password_credentials(&credentials).unwrap();
        let updated = store
            .get_user_password_credentials("test_user")
            .unwrap()
            .unwrap();
        assert!(updated.last_used.is_some());
        assert!(updated.last_tried.is_some());

        assert!(store
            .get_user_password_credentials("nobody")
            .unwrap()
            .is_none());
    }

    #[test]
    fn profile_is_written_once() {
        let (store, _temp_dir) = create_tmp_store();
        let password = HashedPassword::new("pw").unwrap();
        let user = store.create_user("test_user", &password).unwrap().unwrap();

        assert!(store
            .set_user_profile_if_empty(user.id, &profile("Alice"))
            .unwrap());
        assert!(!store
            .set_user_profile_if_empty(user.id, &profile("Eve"))
            .unwrap());
        assert!(!store.set_user_profile_if_empty(99, &profile("Eve")).unwrap());

        let stored = store.get_user(user.id).unwrap().unwrap();
        assert_eq!(stored.profile, Some(profile("Alice")));
    }

    #[test]
    fn cannot_create_job_without_user() {
        let (store, _temp_dir) = create_tmp_store();
        assert!(store.create_job(1, &new_job("411001")).is_err());
        assert_eq!(store.count_jobs().unwrap(), 0);
    }

    #[test]
    fn creates_and_filters_jobs() {
        let (store, _temp_dir) = create_tmp_store();
        let password = HashedPassword::new("pw").unwrap();
        let user = store.create_user("poster", &password).unwrap().unwrap();

        let first = store.create_job(user.id, &new_job("411001")).unwrap();
        let second = store.create_job(user.id, &new_job("560001")).unwrap();

        assert_eq!(store.get_job(first.id).unwrap(), Some(first.clone()));
        assert!(store.get_job(99).unwrap().is_none());
        assert_eq!(
            store.get_all_jobs().unwrap(),
            vec![first.clone(), second.clone()]
        );
        assert_eq!(store.count_jobs().unwrap(), 2);
        assert_eq!(store.get_jobs_by_pincode("560001").unwrap(), vec![second]);
        assert!(store.get_jobs_by_pincode("").unwrap().is_empty());
    }

    #[test]
    fn accepted_job_snapshot_survives_profile_change() {
        let (store, _temp_dir) = create_tmp_store();
        let password = HashedPassword::new("pw").unwrap();
        let poster = store.create_user("poster", &password).unwrap().unwrap();
        let accepter = store.create_user("accepter", &password).unwrap().unwrap();
        store
            .set_user_profile_if_empty(accepter.id, &profile("Bob"))
            .unwrap();
        let job = store.create_job(poster.id, &new_job("411001")).unwrap();

        let accepted = store
            .create_accepted_job(&job, accepter.id, &AccepterSnapshot::capture(&profile("Bob")))
            .unwrap();

        store
            .lock()
            .unwrap()
            .execute(
                "UPDATE user SET name = 'Robert', city = 'Goa' WHERE id = ?1",
                params![accepter.id],
            )
            .unwrap();

        let inbox = store.get_accepted_jobs_for_poster(poster.id).unwrap();
        assert_eq!(inbox, vec![accepted]);
        assert_eq!(inbox[0].accepter.name, "Bob");
        assert_eq!(inbox[0].accepter.city, "Pune");
        assert!(store
            .get_accepted_jobs_for_poster(accepter.id)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn auth_tokens_round_trip() {
        let (store, _temp_dir) = create_tmp_store();
        let password = HashedPassword::new("pw").unwrap();
        let user = store.create_user("test_user", &password).unwrap().unwrap();

        let value = AuthTokenValue::generate();
        store
            .add_user_auth_token(AuthToken {
                user_id: user.id,
                created: SystemTime::now(),
                last_used: None,
                value: value.clone(),
            })
            .unwrap();

        let token = store.get_user_auth_token(&value).unwrap().unwrap();
        assert_eq!(token.user_id, user.id);
        assert!(token.last_used.is_none());

        store
            .update_user_auth_token_last_used_timestamp(&value)
            .unwrap();
        let token = store.get_user_auth_token(&value).unwrap().unwrap();
        assert!(token.last_used.is_some());
    }

    #[test]
    fn reopens_existing_database() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        {
            let store = SqliteBoardStore::new(&db_path).unwrap();
            let password = HashedPassword::new("pw").unwrap();
            store.create_user("keep_me", &password).unwrap();
        }

        let store = SqliteBoardStore::new(&db_path).unwrap();
        assert!(store.get_user_by_handle("keep_me").unwrap().is_some());
    }
}
