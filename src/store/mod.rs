mod schema;
mod sqlite_board_store;

pub use sqlite_board_store::SqliteBoardStore;

use crate::acceptance::AcceptanceStore;
use crate::jobs::JobStore;
use crate::user::{UserAuthCredentialsStore, UserAuthTokenStore, UserStore};

/// Every store the server needs, backed by a single implementation.
pub trait BoardStore:
    UserStore + UserAuthCredentialsStore + UserAuthTokenStore + JobStore + AcceptanceStore
{
}

impl<T> BoardStore for T where
    T: UserStore + UserAuthCredentialsStore + UserAuthTokenStore + JobStore + AcceptanceStore
{
}
