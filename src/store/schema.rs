use crate::sqlite_column;
use crate::sqlite_persistence::{ForeignKey, SqlType, Table, VersionedSchema, DEFAULT_TIMESTAMP};

const USER_FOREIGN_KEY: ForeignKey = ForeignKey {
    foreign_table: "user",
    foreign_column: "id",
};

/// V 0
pub const USER_TABLE_V_0: Table = Table {
    name: "user",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("handle", &SqlType::Text, non_null = true, is_unique = true),
        sqlite_column!("name", &SqlType::Text),
        sqlite_column!("address", &SqlType::Text),
        sqlite_column!("city", &SqlType::Text),
        sqlite_column!("pincode", &SqlType::Text),
        sqlite_column!(
            "created",
            &SqlType::Integer,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    indices: &[],
};

pub const USER_PASSWORD_CREDENTIALS_TABLE_V_0: Table = Table {
    name: "user_password_credentials",
    columns: &[
        sqlite_column!(
            "user_id",
            &SqlType::Integer,
            non_null = true,
            is_unique = true,
            foreign_key = Some(&USER_FOREIGN_KEY)
        ),
        sqlite_column!("salt", &SqlType::Text, non_null = true),
        sqlite_column!("hash", &SqlType::Text, non_null = true),
        sqlite_column!("hasher", &SqlType::Text, non_null = true),
        sqlite_column!(
            "created",
            &SqlType::Integer,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
        sqlite_column!("last_tried", &SqlType::Integer),
        sqlite_column!("last_used", &SqlType::Integer),
    ],
    indices: &[],
};

pub const AUTH_TOKEN_TABLE_V_0: Table = Table {
    name: "auth_token",
    columns: &[
        sqlite_column!(
            "user_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&USER_FOREIGN_KEY)
        ),
        sqlite_column!("value", &SqlType::Text, non_null = true, is_unique = true),
        sqlite_column!(
            "created",
            &SqlType::Integer,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
        sqlite_column!("last_used", &SqlType::Integer),
    ],
    indices: &[],
};

pub const JOB_TABLE_V_0: Table = Table {
    name: "job",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("company_name", &SqlType::Text, non_null = true),
        sqlite_column!("address", &SqlType::Text, non_null = true),
        sqlite_column!("pincode", &SqlType::Text, non_null = true),
        sqlite_column!("salary", &SqlType::Text, non_null = true),
        sqlite_column!("job_type", &SqlType::Text, non_null = true),
        sqlite_column!("phone", &SqlType::Text, non_null = true),
        sqlite_column!(
            "poster_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&USER_FOREIGN_KEY)
        ),
        sqlite_column!(
            "created",
            &SqlType::Integer,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    indices: &[("idx_job_pincode", "pincode")],
};

pub const ACCEPTED_JOB_TABLE_V_0: Table = Table {
    name: "accepted_job",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "job_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "job",
                foreign_column: "id",
            })
        ),
        sqlite_column!(
            "accepter_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&USER_FOREIGN_KEY)
        ),
        sqlite_column!(
            "poster_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&USER_FOREIGN_KEY)
        ),
        sqlite_column!("accepter_name", &SqlType::Text, non_null = true),
        sqlite_column!("accepter_address", &SqlType::Text, non_null = true),
        sqlite_column!("accepter_city", &SqlType::Text, non_null = true),
        sqlite_column!("accepter_pincode", &SqlType::Text, non_null = true),
        sqlite_column!(
            "created",
            &SqlType::Integer,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    indices: &[("idx_accepted_job_poster_id", "poster_id")],
};

pub const VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[
        USER_TABLE_V_0,
        USER_PASSWORD_CREDENTIALS_TABLE_V_0,
        AUTH_TOKEN_TABLE_V_0,
        JOB_TABLE_V_0,
        ACCEPTED_JOB_TABLE_V_0,
    ],
    migration: None,
}];
