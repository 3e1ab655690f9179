//! One handler per user request type.
//!
//! Handlers run after the behavior chain (validation included) and talk to the
//! store only through [`UserStore`](crate::store::UserStore), each call wrapped
//! in [`guarded`](userhub_pipeline::guarded) so cancellation is observed.

mod count;
mod create;
mod delete;
mod find;
mod get;
mod list;
mod update;

#[cfg(test)]
pub(crate) mod testing;

pub use count::CountUsersHandler;
pub use create::CreateUserHandler;
pub use delete::DeleteUserHandler;
pub use find::FindUsersHandler;
pub use get::GetUserHandler;
pub use list::ListUsersHandler;
pub use update::UpdateUserHandler;
